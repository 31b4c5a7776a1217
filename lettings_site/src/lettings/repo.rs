//! SQLite implementation of the lettings sink.

use diesel::prelude::*;
use diesel::{SqliteConnection, insert_into};

use super::LettingsSink;
use crate::models::{Address, NewAddress, NewLetting};
use crate::observe::ObserverSet;

/// Repository for the lettings tables in a SQLite database.
///
/// Holds the observer registry; every successful create/delete notifies
/// the observers synchronously before the call returns.
#[derive(Default)]
pub struct SqliteRepo {
    observers: ObserverSet,
}

impl SqliteRepo {
    /// Creates a repository with the given observers.
    pub fn new(observers: ObserverSet) -> Self {
        Self { observers }
    }
}

impl LettingsSink for SqliteRepo {
    fn create_address(
        &self,
        conn: &mut SqliteConnection,
        row: &NewAddress<'_>,
    ) -> anyhow::Result<i32> {
        use crate::schema::lettings_address::dsl as la;

        let new_id: i32 = insert_into(la::lettings_address)
            .values(row)
            .returning(la::id)
            .get_result(conn)?;

        self.observers.notify_created("lettings_address", new_id);
        Ok(new_id)
    }

    fn find_addresses(
        &self,
        conn: &mut SqliteConnection,
        query: &NewAddress<'_>,
    ) -> anyhow::Result<Vec<Address>> {
        use crate::schema::lettings_address::dsl as la;

        let rows = la::lettings_address
            .filter(
                la::number
                    .eq(query.number)
                    .and(la::street.eq(query.street))
                    .and(la::city.eq(query.city))
                    .and(la::state.eq(query.state))
                    .and(la::zip_code.eq(query.zip_code))
                    .and(la::country_iso_code.eq(query.country_iso_code)),
            )
            .order(la::id.asc())
            .select(Address::as_select())
            .load(conn)?;
        Ok(rows)
    }

    fn create_letting(
        &self,
        conn: &mut SqliteConnection,
        row: &NewLetting<'_>,
    ) -> anyhow::Result<i32> {
        use crate::schema::lettings_letting::dsl as ll;

        let new_id: i32 = insert_into(ll::lettings_letting)
            .values(row)
            .returning(ll::id)
            .get_result(conn)?;

        self.observers.notify_created("lettings_letting", new_id);
        Ok(new_id)
    }

    fn any_lettings(&self, conn: &mut SqliteConnection) -> anyhow::Result<bool> {
        use crate::schema::lettings_letting::dsl as ll;

        let n: i64 = ll::lettings_letting.count().get_result(conn)?;
        Ok(n > 0)
    }

    fn delete_all(&self, conn: &mut SqliteConnection) -> anyhow::Result<usize> {
        use crate::schema::lettings_address::dsl as la;
        use crate::schema::lettings_letting::dsl as ll;

        // Lettings first; their FK cascade would fire anyway, but the
        // observers must see every removed row.
        let letting_ids: Vec<i32> = ll::lettings_letting.select(ll::id).load(conn)?;
        diesel::delete(ll::lettings_letting).execute(conn)?;
        for id in &letting_ids {
            self.observers.notify_deleted("lettings_letting", *id);
        }

        let address_ids: Vec<i32> = la::lettings_address.select(la::id).load(conn)?;
        diesel::delete(la::lettings_address).execute(conn)?;
        for id in &address_ids {
            self.observers.notify_deleted("lettings_address", *id);
        }

        Ok(letting_ids.len() + address_ids.len())
    }
}
