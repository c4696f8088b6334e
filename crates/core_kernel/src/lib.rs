//! Core Kernel - Foundational types shared by the claim triage crates
//!
//! This crate provides the building blocks used across all other crates:
//! - Bounded scores with precise decimal arithmetic
//! - Strongly-typed identifiers
//! - Port error and health types for the hexagonal adapters

pub mod score;
pub mod identifiers;
pub mod error;
pub mod ports;

pub use score::Score;
pub use identifiers::{ClaimId, ClaimHistoryId, UserId, ProcessingLogId};
pub use error::CoreError;
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
