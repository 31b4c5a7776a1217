//! Backend library for the lettings site: relational models for the
//! lettings and profiles domains, the legacy single-app schema they were
//! split out of, and the one-way backfill that carries rows across.

#![deny(missing_docs)]

pub mod backfill;
pub mod db;
pub mod diag;
pub mod fixture;
pub mod identity;
pub mod legacy;
pub mod lettings;
pub mod models;
pub mod observe;
pub mod profiles;
/// Diesel table definitions, kept in sync with the embedded migrations.
pub mod schema;
pub mod seed;
