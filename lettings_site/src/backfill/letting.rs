//! Step 2: re-link and copy legacy lettings.

use diesel::SqliteConnection;

use super::{BackfillError, BackfillResult};
use crate::diag::Diagnostics;
use crate::legacy;
use crate::lettings::LettingsSink;
use crate::models::{NewAddress, NewLetting};

/// Copies every `site_letting` row into `lettings_letting`, resolving
/// the owning address against the rows Step 1 created.
///
/// Resolution is exact equality on all six address fields. A letting
/// whose tuple matches nothing is left behind without an error; a tuple
/// matching more than one row aborts the step, because the link target
/// would be arbitrary.
pub struct LettingCopier<'a> {
    diag: &'a dyn Diagnostics,
}

impl<'a> LettingCopier<'a> {
    /// Builds a copier reporting through `diag`.
    pub fn new(diag: &'a dyn Diagnostics) -> Self {
        Self { diag }
    }

    /// Runs the copy inside one immediate transaction. Requires the
    /// address copy to have committed first.
    pub fn run(
        &self,
        conn: &mut SqliteConnection,
        sink: &dyn LettingsSink,
    ) -> BackfillResult<()> {
        self.diag.info("copying legacy lettings");

        conn.immediate_transaction::<_, anyhow::Error, _>(|conn| {
            for old in legacy::read_lettings(conn)? {
                let query = NewAddress {
                    number: old.address.number,
                    street: &old.address.street,
                    city: &old.address.city,
                    state: &old.address.state,
                    zip_code: old.address.zip_code,
                    country_iso_code: &old.address.country_iso_code,
                };

                let matches = sink.find_addresses(conn, &query)?;
                let target = match matches.as_slice() {
                    // Address was never carried over; leave the letting behind.
                    [] => continue,
                    [one] => one.id,
                    many => {
                        return Err(BackfillError::AmbiguousAddress {
                            number: old.address.number,
                            street: old.address.street.clone(),
                            city: old.address.city.clone(),
                            count: many.len(),
                        }
                        .into());
                    }
                };

                sink.create_letting(
                    conn,
                    &NewLetting {
                        title: &old.title,
                        address_id: target,
                    },
                )?;
            }
            Ok(())
        })?;

        self.diag.info("letting copy committed");
        Ok(())
    }
}
