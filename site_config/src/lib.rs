//! Shared configuration helpers for the lettings site binaries.
//!
//! Everything the deployed site is configured by comes in through
//! environment variables; this crate provides typed access to them so
//! callers get a structured error instead of a bare `VarError`.

pub mod env;

pub use env::{MissingEnvVarError, database_url, get_env_var};
