//! Claim Triage Domain
//!
//! Scores submitted insurance claims with a fixed sequence of rule-based
//! stages and recommends how each claim should be handled next.
//!
//! # Pipeline
//!
//! ```text
//! ClaimInput -> Classification -> Validation -> RiskAssessment
//!            -> FraudDetection -> Recommendation -> Finalization -> ProcessingResult
//! ```
//!
//! The pipeline itself is synchronous and free of side effects. The
//! [`services`] module wraps it with storage and audit logging through the
//! ports in [`ports`].
//!
//! # Example
//!
//! ```rust
//! use domain_claims::{ClaimInput, NextAction, PipelineRunner};
//! use rust_decimal_macros::dec;
//!
//! let claim = ClaimInput::new("auto", dec!(30000)).with_description("minor accident");
//! let result = PipelineRunner::new().process(claim);
//!
//! assert_eq!(result.next_action, NextAction::StandardReview);
//! ```

pub mod analysis;
pub mod claim;
pub mod documents;
pub mod error;
pub mod fraud_check;
pub mod history;
pub mod pipeline;
pub mod ports;
pub mod services;
pub mod stages;
pub mod state;

pub use analysis::{AnalysisResults, NextAction, RiskLevel};
pub use claim::{ClaimInput, ClaimPriority, ClaimRecord, ClaimStatus, ClaimType, ClaimUpdate, NewClaim};
pub use documents::{classify_document, DocumentClassification, DocumentKind};
pub use error::{ClaimError, StageFailure};
pub use fraud_check::{detect_fraud, FraudCheck, FraudRecommendation};
pub use history::ClaimHistoryEntry;
pub use pipeline::{PipelineRunner, ProcessingResult};
pub use ports::{ClaimPage, ClaimQuery, ClaimRecordPort, ProcessingLogEntry, ProcessingLogPort, ProcessingStatus};
pub use services::{ClaimIntakeService, TriageService};
pub use state::AnalysisState;
