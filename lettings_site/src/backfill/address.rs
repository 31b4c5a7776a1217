//! Step 1: copy legacy addresses.

use diesel::SqliteConnection;

use super::BackfillResult;
use crate::diag::Diagnostics;
use crate::legacy;
use crate::lettings::LettingsSink;
use crate::models::NewAddress;

/// Copies every `site_address` row into `lettings_address`.
///
/// All six fields are carried verbatim; the copy assigns fresh ids. Any
/// sink rejection aborts the step.
pub struct AddressCopier<'a> {
    diag: &'a dyn Diagnostics,
}

impl<'a> AddressCopier<'a> {
    /// Builds a copier reporting through `diag`.
    pub fn new(diag: &'a dyn Diagnostics) -> Self {
        Self { diag }
    }

    /// Runs the copy inside one immediate transaction.
    pub fn run(
        &self,
        conn: &mut SqliteConnection,
        sink: &dyn LettingsSink,
    ) -> BackfillResult<()> {
        self.diag.info("copying legacy addresses");

        conn.immediate_transaction::<_, anyhow::Error, _>(|conn| {
            for old in legacy::read_addresses(conn)? {
                let row = NewAddress {
                    number: old.number,
                    street: &old.street,
                    city: &old.city,
                    state: &old.state,
                    zip_code: old.zip_code,
                    country_iso_code: &old.country_iso_code,
                };
                sink.create_address(conn, &row)?;
            }
            Ok(())
        })?;

        self.diag.info("address copy committed");
        Ok(())
    }
}
