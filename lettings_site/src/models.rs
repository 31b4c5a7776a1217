//! Diesel models mapping to the current per-domain schema.
//!
//! These types mirror the tables created by the embedded migrations and
//! declared in [`crate::schema`]:
//! - [`crate::schema::lettings_address`] / [`crate::schema::lettings_letting`]: lettings domain
//! - [`crate::schema::profiles_profile`]: profiles domain
//! - [`crate::schema::auth_user`]: shared identity table, never migrated
//!
//! The legacy single-app rows live in [`crate::legacy::models`]. See the
//! migrations for constraints (CHECK on the integer fields, UNIQUE
//! one-to-one links, `ON DELETE CASCADE` FKs).

use diesel::prelude::*;

use crate::schema::*;

/// A row in [`crate::schema::auth_user`]: one user account.
///
/// Accounts are shared between the legacy and current schemas; the
/// backfill only ever reads this table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = auth_user, check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    /// Database primary key. Populated by the DB.
    pub id: i32,
    /// Unique login name.
    pub username: String,
    /// Contact email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Whether the account may use the staff tooling.
    pub is_staff: bool,
}

/// Insertable form of [`User`] for creating new accounts (seeding only).
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = auth_user)]
pub struct NewUser<'a> {
    /// Unique login name.
    pub username: &'a str,
    /// Contact email address.
    pub email: &'a str,
    /// Given name.
    pub first_name: &'a str,
    /// Family name.
    pub last_name: &'a str,
    /// Whether the account may use the staff tooling.
    pub is_staff: bool,
}

/// A row in [`crate::schema::lettings_address`]: one postal address.
///
/// The six data fields carry no uniqueness constraint; two rows with
/// identical values are distinct records with distinct ids.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Selectable)]
#[diesel(table_name = lettings_address, check_for_backend(diesel::sqlite::Sqlite))]
pub struct Address {
    /// Database primary key. Populated by the DB.
    pub id: i32,
    /// House or building number (non-negative, CHECK-enforced).
    pub number: i32,
    /// Street name (64 chars max).
    pub street: String,
    /// City name (64 chars max).
    pub city: String,
    /// State or region code (2 chars max).
    pub state: String,
    /// Postal code (non-negative, CHECK-enforced).
    pub zip_code: i32,
    /// ISO country code (3 chars max).
    pub country_iso_code: String,
}

/// Insertable form of [`Address`]. Also doubles as the exact-match lookup
/// tuple for address resolution, since it carries precisely the six data
/// fields.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = lettings_address)]
pub struct NewAddress<'a> {
    /// House or building number.
    pub number: i32,
    /// Street name.
    pub street: &'a str,
    /// City name.
    pub city: &'a str,
    /// State or region code.
    pub state: &'a str,
    /// Postal code.
    pub zip_code: i32,
    /// ISO country code.
    pub country_iso_code: &'a str,
}

/// A row in [`crate::schema::lettings_letting`]: one rental property.
///
/// Owns exactly one [`Address`] (UNIQUE FK); deleting the address
/// cascades to the letting.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable)]
#[diesel(table_name = lettings_letting, check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(belongs_to(Address, foreign_key = address_id))]
pub struct Letting {
    /// Database primary key. Populated by the DB.
    pub id: i32,
    /// Display title (256 chars max).
    pub title: String,
    /// FK to [`Address::id`].
    pub address_id: i32,
}

/// Insertable form of [`Letting`].
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = lettings_letting)]
pub struct NewLetting<'a> {
    /// Display title.
    pub title: &'a str,
    /// FK to [`Address::id`]; the address must already exist.
    pub address_id: i32,
}

/// A row in [`crate::schema::profiles_profile`]: per-user metadata.
///
/// One profile per user (UNIQUE FK); deleting the user cascades.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable)]
#[diesel(table_name = profiles_profile, check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(belongs_to(User, foreign_key = user_id))]
pub struct Profile {
    /// Database primary key. Populated by the DB.
    pub id: i32,
    /// FK to [`User::id`].
    pub user_id: i32,
    /// Free-text favourite city (64 chars max, may be empty).
    pub favorite_city: String,
}

/// Insertable form of [`Profile`].
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = profiles_profile)]
pub struct NewProfile<'a> {
    /// FK to [`User::id`]; the account must still exist.
    pub user_id: i32,
    /// Free-text favourite city.
    pub favorite_city: &'a str,
}
