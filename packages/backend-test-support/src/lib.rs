//! Backend test support utilities
//!
//! Shared helpers for the backend's unit and integration tests: idempotent
//! logging setup, Problem Details assertions and unique test identifiers.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
