//! Step 3: copy legacy profiles for still-existing users.

use diesel::SqliteConnection;

use super::BackfillResult;
use crate::diag::Diagnostics;
use crate::profiles::ProfilesSink;
use crate::{identity, legacy};
use crate::models::NewProfile;

/// Copies every `site_profile` row into `profiles_profile`, skipping
/// rows whose user account has since been deleted.
///
/// The identity store is only read. A UNIQUE violation on `user_id`
/// (e.g. a profile left by an earlier partial run) aborts the step.
pub struct ProfileCopier<'a> {
    diag: &'a dyn Diagnostics,
}

impl<'a> ProfileCopier<'a> {
    /// Builds a copier reporting through `diag`.
    pub fn new(diag: &'a dyn Diagnostics) -> Self {
        Self { diag }
    }

    /// Runs the copy inside one immediate transaction.
    pub fn run(
        &self,
        conn: &mut SqliteConnection,
        sink: &dyn ProfilesSink,
    ) -> BackfillResult<()> {
        self.diag.info("copying legacy profiles");

        conn.immediate_transaction::<_, anyhow::Error, _>(|conn| {
            for old in legacy::read_profiles(conn)? {
                let Some(user) = identity::find_user(conn, old.user_id)? else {
                    // Account is gone; the profile has nothing to attach to.
                    continue;
                };

                sink.create_profile(
                    conn,
                    &NewProfile {
                        user_id: user.id,
                        favorite_city: &old.favorite_city,
                    },
                )?;
            }
            Ok(())
        })?;

        self.diag.info("profile copy committed");
        Ok(())
    }
}
