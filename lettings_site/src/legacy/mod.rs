//! Legacy single-app schema: the record source for the backfill.
//!
//! The original layout kept addresses, lettings and profiles in one
//! "site" app (`site_address`, `site_letting`, `site_profile`). This
//! module is the read-only enumeration surface over those tables, plus
//! the retirement step that drops them once the copy has succeeded.
//!
//! Nothing here writes to the legacy tables; the `New*` insert structs in
//! [`models`] exist so tests can stage legacy data.

pub mod models;
pub mod read;

pub use read::{read_addresses, read_lettings, read_profiles};

use diesel::SqliteConnection;
use diesel::connection::SimpleConnection;

/// Drops the retired legacy tables.
///
/// Delete order honors FKs: `site_letting` and `site_profile` reference
/// `site_address` / `auth_user`, so they go first. `auth_user` is shared
/// with the current schema and stays. Run this only after a successful
/// copy; the data is not recoverable afterwards.
pub fn drop_legacy_tables(conn: &mut SqliteConnection) -> anyhow::Result<()> {
    conn.batch_execute(
        "DROP TABLE site_letting;
         DROP TABLE site_profile;
         DROP TABLE site_address;",
    )?;
    Ok(())
}
