//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claim triage test suite.
//!
//! # Modules
//!
//! - `fixtures`: Reference claims and fixed timestamps
//! - `builders`: Builder patterns for claim inputs and submissions
//! - `assertions`: Assertion helpers for scores and pipeline results
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
