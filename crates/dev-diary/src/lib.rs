//! dev-diary library
//!
//! This module exports the preference store, defaulting rules and report
//! types used by the `dev-diary` binary, for integration tests and reuse.

pub mod config;
pub mod defaults;
pub mod preferences;
pub mod report;
