//! Identity store view over `auth_user`.
//!
//! User accounts are owned by the identity store and shared across both
//! schema generations; the backfill only ever reads here. The write
//! surface at the bottom exists for the demo seeder.

use diesel::prelude::*;
use diesel::{SqliteConnection, insert_into};

use crate::models::{NewUser, User};
use crate::schema::auth_user;

/// Looks a user up by id, returning `None` if the account is gone.
pub fn find_user(conn: &mut SqliteConnection, user_id: i32) -> anyhow::Result<Option<User>> {
    let user = auth_user::table
        .find(user_id)
        .select(User::as_select())
        .first(conn)
        .optional()?;
    Ok(user)
}

/// True if the account with the given id still exists.
pub fn user_exists(conn: &mut SqliteConnection, user_id: i32) -> anyhow::Result<bool> {
    Ok(find_user(conn, user_id)?.is_some())
}

/// Looks a user up by username.
pub fn find_user_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> anyhow::Result<Option<User>> {
    let user = auth_user::table
        .filter(auth_user::username.eq(username))
        .select(User::as_select())
        .first(conn)
        .optional()?;
    Ok(user)
}

/// Creates a user account and returns its id (seeding only).
pub fn create_user(conn: &mut SqliteConnection, row: &NewUser<'_>) -> anyhow::Result<i32> {
    let new_id: i32 = insert_into(auth_user::table)
        .values(row)
        .returning(auth_user::id)
        .get_result(conn)?;
    Ok(new_id)
}

/// Deletes a user account by id (seeding only; cascades to its profile).
pub fn delete_user(conn: &mut SqliteConnection, user_id: i32) -> anyhow::Result<usize> {
    let n = diesel::delete(auth_user::table.find(user_id)).execute(conn)?;
    Ok(n)
}

/// Deletes every non-staff account (seeding only), returning the count.
pub fn delete_non_staff_users(conn: &mut SqliteConnection) -> anyhow::Result<usize> {
    let n = diesel::delete(auth_user::table.filter(auth_user::is_staff.eq(false))).execute(conn)?;
    Ok(n)
}
