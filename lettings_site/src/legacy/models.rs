//! Row types for the legacy single-app tables.

use diesel::prelude::*;

use crate::schema::{site_address, site_letting, site_profile};

/// A row in [`crate::schema::site_address`].
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Selectable)]
#[diesel(table_name = site_address, check_for_backend(diesel::sqlite::Sqlite))]
pub struct SiteAddress {
    /// Database primary key in the legacy schema.
    pub id: i32,
    /// House or building number.
    pub number: i32,
    /// Street name.
    pub street: String,
    /// City name.
    pub city: String,
    /// State or region code.
    pub state: String,
    /// Postal code.
    pub zip_code: i32,
    /// ISO country code.
    pub country_iso_code: String,
}

/// A legacy letting together with its address field values.
///
/// The backfill resolves the current-schema address by field equality, so
/// the enumeration embeds the full address record rather than the bare
/// foreign key.
#[derive(Debug, Clone)]
pub struct SiteLetting {
    /// Display title.
    pub title: String,
    /// The linked legacy address, fields included.
    pub address: SiteAddress,
}

/// A row in [`crate::schema::site_profile`].
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = site_profile, check_for_backend(diesel::sqlite::Sqlite))]
pub struct SiteProfile {
    /// Database primary key in the legacy schema.
    pub id: i32,
    /// FK into `auth_user`; the account may have been deleted since.
    pub user_id: i32,
    /// Free-text favourite city.
    pub favorite_city: String,
}

/// Insertable legacy address, for staging test data.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = site_address)]
pub struct NewSiteAddress<'a> {
    /// House or building number.
    pub number: i32,
    /// Street name.
    pub street: &'a str,
    /// City name.
    pub city: &'a str,
    /// State or region code.
    pub state: &'a str,
    /// Postal code.
    pub zip_code: i32,
    /// ISO country code.
    pub country_iso_code: &'a str,
}

/// Insertable legacy letting, for staging test data.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = site_letting)]
pub struct NewSiteLetting<'a> {
    /// Display title.
    pub title: &'a str,
    /// FK to a `site_address` row.
    pub address_id: i32,
}

/// Insertable legacy profile, for staging test data.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = site_profile)]
pub struct NewSiteProfile<'a> {
    /// FK to an `auth_user` row.
    pub user_id: i32,
    /// Free-text favourite city.
    pub favorite_city: &'a str,
}
