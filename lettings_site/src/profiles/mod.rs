//! Profiles domain: current-schema sink for user profiles.

use diesel::SqliteConnection;

use crate::models::NewProfile;

/// Portable surface; the SQLite implementation lives in `repo.rs`.
///
/// The schema allows at most one profile per user; a second create for
/// the same user surfaces the UNIQUE violation unchanged.
pub trait ProfilesSink {
    /// Creates a profile row and returns its id.
    fn create_profile(
        &self,
        conn: &mut SqliteConnection,
        row: &NewProfile<'_>,
    ) -> anyhow::Result<i32>;

    /// True if any profile rows exist.
    fn any_profiles(&self, conn: &mut SqliteConnection) -> anyhow::Result<bool>;

    /// Deletes every profile, returning the number of rows removed.
    fn delete_all(&self, conn: &mut SqliteConnection) -> anyhow::Result<usize>;
}

pub mod repo;

pub use repo::SqliteRepo;
