//! Demo data seeding for fresh deployments.
//!
//! Installs the fixture's admin account, demo users (each with a
//! profile) and demo lettings through the domain sinks, so the usual
//! observers fire. Seeding is skip-if-present: when demo lettings or
//! profiles already exist the run is a no-op unless forced, in which
//! case existing lettings, addresses, profiles and non-staff accounts
//! are removed first.
//!
//! The whole run happens inside a single immediate transaction; a
//! half-seeded database is never visible.

use diesel::SqliteConnection;

use crate::diag::Diagnostics;
use crate::fixture::Fixture;
use crate::identity;
use crate::lettings::LettingsSink;
use crate::models::{NewAddress, NewLetting, NewProfile, NewUser};
use crate::profiles::ProfilesSink;

/// Options for a seeding run.
pub struct SeedOptions {
    /// If true, delete existing demo data (and recreate the admin) first.
    pub force: bool,
}

/// What a seeding run did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// True when existing data was found and the run changed nothing.
    pub skipped: bool,
    /// Accounts created (admin included).
    pub users_created: usize,
    /// Profiles created.
    pub profiles_created: usize,
    /// Lettings created (one address each).
    pub lettings_created: usize,
}

/// Applies a normalized [`Fixture`] to the database.
pub fn seed_site(
    conn: &mut SqliteConnection,
    fixture: &Fixture,
    opt: SeedOptions,
    lettings: &dyn LettingsSink,
    profiles: &dyn ProfilesSink,
    diag: &dyn Diagnostics,
) -> anyhow::Result<SeedSummary> {
    conn.immediate_transaction::<_, anyhow::Error, _>(|conn| {
        let mut summary = SeedSummary::default();

        if !opt.force && (lettings.any_lettings(conn)? || profiles.any_profiles(conn)?) {
            diag.info("demo data already present, nothing to seed");
            summary.skipped = true;
            return Ok(summary);
        }

        if opt.force {
            let removed = lettings.delete_all(conn)? + profiles.delete_all(conn)?;
            let users_removed = identity::delete_non_staff_users(conn)?;
            diag.warning(&format!(
                "force seed: removed {removed} demo rows and {users_removed} accounts"
            ));
        }

        // Admin account. Kept if present; force recreates it.
        match identity::find_user_by_username(conn, &fixture.admin.username)? {
            Some(existing) if opt.force => {
                identity::delete_user(conn, existing.id)?;
                create_admin(conn, fixture)?;
                summary.users_created += 1;
            }
            Some(_) => diag.info("admin account already present"),
            None => {
                create_admin(conn, fixture)?;
                summary.users_created += 1;
            }
        }

        // Demo users, one profile each.
        for (username, cfg) in &fixture.users {
            let user_id = identity::create_user(
                conn,
                &NewUser {
                    username,
                    email: &cfg.email,
                    first_name: &cfg.first_name,
                    last_name: &cfg.last_name,
                    is_staff: false,
                },
            )?;
            summary.users_created += 1;

            profiles.create_profile(
                conn,
                &NewProfile {
                    user_id,
                    favorite_city: &cfg.favorite_city,
                },
            )?;
            summary.profiles_created += 1;
        }

        // Demo lettings, one address each.
        for l in &fixture.lettings {
            let address_id = lettings.create_address(
                conn,
                &NewAddress {
                    number: l.address.number as i32,
                    street: &l.address.street,
                    city: &l.address.city,
                    state: &l.address.state,
                    zip_code: l.address.zip_code as i32,
                    country_iso_code: &l.address.country_iso_code,
                },
            )?;
            lettings.create_letting(
                conn,
                &NewLetting {
                    title: &l.title,
                    address_id,
                },
            )?;
            summary.lettings_created += 1;
        }

        diag.info(&format!(
            "seed complete: {} users, {} profiles, {} lettings",
            summary.users_created, summary.profiles_created, summary.lettings_created
        ));
        Ok(summary)
    })
}

fn create_admin(conn: &mut SqliteConnection, fixture: &Fixture) -> anyhow::Result<i32> {
    identity::create_user(
        conn,
        &NewUser {
            username: &fixture.admin.username,
            email: &fixture.admin.email,
            first_name: "",
            last_name: "",
            is_staff: true,
        },
    )
}
