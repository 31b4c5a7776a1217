//! Read-only enumeration of the legacy tables.
//!
//! Row order is not significant to the copy; reads use primary-key order
//! so runs are deterministic.

use diesel::SqliteConnection;
use diesel::prelude::*;

use super::models::{SiteAddress, SiteLetting, SiteProfile};
use crate::schema::{site_address, site_letting, site_profile};

/// Read all legacy addresses.
pub fn read_addresses(conn: &mut SqliteConnection) -> anyhow::Result<Vec<SiteAddress>> {
    let rows = site_address::table
        .order(site_address::id.asc())
        .select(SiteAddress::as_select())
        .load(conn)?;
    Ok(rows)
}

/// Read all legacy lettings with their address field values embedded.
pub fn read_lettings(conn: &mut SqliteConnection) -> anyhow::Result<Vec<SiteLetting>> {
    let rows = site_letting::table
        .inner_join(site_address::table)
        .order(site_letting::id.asc())
        .select((site_letting::title, SiteAddress::as_select()))
        .load::<(String, SiteAddress)>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(title, address)| SiteLetting { title, address })
        .collect())
}

/// Read all legacy profiles.
pub fn read_profiles(conn: &mut SqliteConnection) -> anyhow::Result<Vec<SiteProfile>> {
    let rows = site_profile::table
        .order(site_profile::id.asc())
        .select(SiteProfile::as_select())
        .load(conn)?;
    Ok(rows)
}
