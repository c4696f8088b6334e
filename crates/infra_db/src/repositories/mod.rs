//! Repository implementations
//!
//! Repositories hold the SQL and speak in row types; translation to domain
//! records happens in [`crate::adapters`]. Queries are built at runtime with
//! `sqlx::query_as` so the crate builds without a live database.

pub mod claim_history;
pub mod claims;
pub mod processing_logs;

pub use claim_history::ClaimHistoryRepository;
pub use claims::ClaimsRepository;
pub use processing_logs::ProcessingLogRepository;
