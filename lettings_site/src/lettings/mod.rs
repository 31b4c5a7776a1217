//! Lettings domain: current-schema sink for addresses and lettings.

use diesel::SqliteConnection;

use crate::models::{Address, NewAddress, NewLetting};

/// Portable surface; the SQLite implementation lives in `repo.rs`.
///
/// Create calls return the new row's database id and fire the registered
/// observers after the row is in. [`LettingsSink::find_addresses`] is the
/// exact-match lookup the backfill resolves legacy addresses with; it can
/// return more than one row because the address fields carry no
/// uniqueness constraint.
pub trait LettingsSink {
    /// Creates an address row and returns its id.
    fn create_address(
        &self,
        conn: &mut SqliteConnection,
        row: &NewAddress<'_>,
    ) -> anyhow::Result<i32>;

    /// Returns every address matching all six fields of `query`, in id order.
    fn find_addresses(
        &self,
        conn: &mut SqliteConnection,
        query: &NewAddress<'_>,
    ) -> anyhow::Result<Vec<Address>>;

    /// Creates a letting row linked to an existing address and returns its id.
    fn create_letting(
        &self,
        conn: &mut SqliteConnection,
        row: &NewLetting<'_>,
    ) -> anyhow::Result<i32>;

    /// True if any letting rows exist.
    fn any_lettings(&self, conn: &mut SqliteConnection) -> anyhow::Result<bool>;

    /// Deletes every letting and address, returning the number of rows removed.
    fn delete_all(&self, conn: &mut SqliteConnection) -> anyhow::Result<usize>;
}

pub mod repo;

pub use repo::SqliteRepo;
