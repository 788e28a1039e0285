//! Integration test utilities for the roster API
//!
//! Helpers for running end-to-end tests against a server backed by a real
//! PostgreSQL database.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
