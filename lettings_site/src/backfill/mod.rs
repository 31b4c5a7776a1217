//! One-way backfill from the legacy single-app schema into the
//! per-domain tables.
//!
//! ## What this does
//! - Copies every `site_address` row into `lettings_address` verbatim.
//! - Re-links every `site_letting` onto the copied addresses by exact
//!   six-field match and copies it into `lettings_letting`.
//! - Copies every `site_profile` whose user account still exists into
//!   `profiles_profile`.
//!
//! ## Ordering & transactions
//! Steps run strictly in that order; letting resolution only works once
//! the address copy has committed. Each step runs inside its own
//! **`BEGIN IMMEDIATE`** transaction via
//! `SqliteConnection::immediate_transaction`: a step either lands whole
//! or not at all, and a fatal error mid-pipeline leaves the earlier,
//! already-committed steps in place.
//!
//! ## Skips and failures
//! A letting whose address tuple matches nothing, and a profile whose
//! user is gone, are skipped without an error. More than one address
//! match is [`BackfillError::AmbiguousAddress`] (the fields carry no
//! uniqueness constraint, so this can genuinely happen); sink constraint
//! violations propagate unchanged. Both abort the current step.
//!
//! ## Not idempotent
//! Re-running against an already-populated sink duplicates address rows,
//! which in turn makes every letting resolution ambiguous, and trips the
//! one-profile-per-user constraint. There is no state record and no
//! resumability; the upgrade procedure runs this exactly once.

mod address;
mod letting;
mod profile;

pub use address::AddressCopier;
pub use letting::LettingCopier;
pub use profile::ProfileCopier;

use diesel::SqliteConnection;

use crate::diag::Diagnostics;
use crate::lettings::LettingsSink;
use crate::profiles::ProfilesSink;

/// Errors specific to the backfill (everything else arrives as sink or
/// connection errors through `anyhow`).
#[derive(thiserror::Error, Debug)]
pub enum BackfillError {
    /// More than one current address matched a legacy letting's address
    /// fields, so there is no defensible link target.
    #[error(
        "ambiguous address match for {number} {street}, {city}: {count} candidate rows"
    )]
    AmbiguousAddress {
        /// House number of the offending tuple.
        number: i32,
        /// Street of the offending tuple.
        street: String,
        /// City of the offending tuple.
        city: String,
        /// How many current rows matched.
        count: usize,
    },
}

/// Result type used throughout the backfill for fallible operations.
pub type BackfillResult<T> = anyhow::Result<T>;

/// Runs the full pipeline: addresses, then lettings, then profiles.
///
/// The profile step has no data dependency on the other two but runs
/// last so a lettings failure never leaves profiles half-applied ahead
/// of it.
pub fn run_backfill(
    conn: &mut SqliteConnection,
    lettings: &dyn LettingsSink,
    profiles: &dyn ProfilesSink,
    diag: &dyn Diagnostics,
) -> BackfillResult<()> {
    AddressCopier::new(diag).run(conn, lettings)?;
    LettingCopier::new(diag).run(conn, lettings)?;
    ProfileCopier::new(diag).run(conn, profiles)?;
    Ok(())
}
