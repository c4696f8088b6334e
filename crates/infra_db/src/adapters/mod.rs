//! Domain Adapters
//!
//! Implementations of the claim domain's ports over the repositories in
//! [`crate::repositories`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresClaimAdapter;
//! use domain_claims::ClaimRecordPort;
//!
//! let adapter = PostgresClaimAdapter::new(pool);
//! let claim = adapter.find_owned(claim_id, user_id).await?;
//! ```

pub mod claims;

pub use claims::PostgresClaimAdapter;
