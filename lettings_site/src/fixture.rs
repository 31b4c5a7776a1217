//! Demo fixture: parsing, normalization, and loading.
//!
//! A TOML fixture describes the data the seeder installs on a fresh
//! deployment:
//! - the admin account,
//! - demo users keyed by username, each with a favourite city,
//! - demo lettings, each with its full address.
//!
//! Key behaviors:
//! - Normalization trims whitespace, lowercases usernames, uppercases the
//!   state and country codes, and de-duplicates entries while preserving
//!   order.
//! - Empty usernames and letting titles are rejected.
//!
//! Entrypoints:
//! - Parse + normalize from a TOML string: [`load_fixture_str`]
//! - Parse + normalize from a file path: [`load_fixture_path`]

use anyhow::{Context, bail};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use toml::from_str;

/// Top-level demo fixture.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    /// The staff account every deployment gets.
    pub admin: AdminCfg,
    /// Map of username -> demo user. Keys are normalized to lowercase.
    pub users: IndexMap<String, UserCfg>,
    /// Demo lettings with their addresses.
    pub lettings: Vec<LettingCfg>,
}

/// Admin account settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AdminCfg {
    /// Login name for the staff account.
    pub username: String,
    /// Contact email for the staff account.
    pub email: String,
}

/// One demo user and the profile seeded for them.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UserCfg {
    /// Contact email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Favourite city stored on the seeded profile (may be empty).
    #[serde(default)]
    pub favorite_city: String,
}

/// One demo letting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LettingCfg {
    /// Display title.
    pub title: String,
    /// The letting's address.
    pub address: AddressCfg,
}

/// Address payload for a demo letting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AddressCfg {
    /// House or building number.
    pub number: u32,
    /// Street name (64 chars max).
    pub street: String,
    /// City name (64 chars max).
    pub city: String,
    /// State or region code (2 chars max, normalized uppercase).
    pub state: String,
    /// Postal code.
    pub zip_code: u32,
    /// ISO country code (3 chars max, normalized uppercase).
    pub country_iso_code: String,
}

/// Summary of changes performed during normalization.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    /// Number of user keys that changed when lowercasing/trimming.
    pub users_renamed: usize,
    /// Count of removed duplicate users after key normalization.
    pub users_deduped: usize,
    /// Count of removed duplicate lettings (same title and address).
    pub lettings_deduped: usize,
}

/// Normalize a fixture in-place.
///
/// - Trims every string field.
/// - Lowercases usernames (the admin's included) and de-duplicates users
///   by normalized key, first occurrence winning.
/// - Uppercases address state and country codes.
/// - De-duplicates lettings by full (title, address) value.
/// - Rejects empty usernames and empty letting titles.
pub fn normalize_fixture(fixture: &mut Fixture) -> anyhow::Result<NormalizationReport> {
    let mut report = NormalizationReport::default();

    fixture.admin.username = fixture.admin.username.trim().to_lowercase();
    fixture.admin.email = fixture.admin.email.trim().to_string();
    if fixture.admin.username.is_empty() {
        bail!("fixture admin username is empty");
    }

    let mut users = IndexMap::with_capacity(fixture.users.len());
    for (key, mut cfg) in std::mem::take(&mut fixture.users) {
        let normalized = key.trim().to_lowercase();
        if normalized.is_empty() {
            bail!("fixture contains a user with an empty username");
        }
        if normalized != key {
            report.users_renamed += 1;
        }

        cfg.email = cfg.email.trim().to_string();
        cfg.first_name = cfg.first_name.trim().to_string();
        cfg.last_name = cfg.last_name.trim().to_string();
        cfg.favorite_city = cfg.favorite_city.trim().to_string();

        if users.contains_key(&normalized) {
            report.users_deduped += 1;
        } else {
            users.insert(normalized, cfg);
        }
    }
    fixture.users = users;

    let mut lettings: Vec<LettingCfg> = Vec::with_capacity(fixture.lettings.len());
    for mut l in std::mem::take(&mut fixture.lettings) {
        l.title = l.title.trim().to_string();
        if l.title.is_empty() {
            bail!("fixture contains a letting with an empty title");
        }
        l.address.street = l.address.street.trim().to_string();
        l.address.city = l.address.city.trim().to_string();
        l.address.state = l.address.state.trim().to_uppercase();
        l.address.country_iso_code = l.address.country_iso_code.trim().to_uppercase();

        if lettings.contains(&l) {
            report.lettings_deduped += 1;
        } else {
            lettings.push(l);
        }
    }
    fixture.lettings = lettings;

    Ok(report)
}

/// Parse a fixture from a TOML string and normalize it.
pub fn load_fixture_str(s: &str) -> anyhow::Result<Fixture> {
    let mut fixture: Fixture = from_str(s).context("failed to parse fixture TOML")?;
    normalize_fixture(&mut fixture)?;
    Ok(fixture)
}

/// Read, parse and normalize a fixture from a file path.
pub fn load_fixture_path(path: &str) -> anyhow::Result<Fixture> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixture file {path}"))?;
    load_fixture_str(&s)
}
