//! Per-run accumulator threaded through the stages

use core_kernel::Score;

use crate::analysis::{AnalysisResults, NextAction};
use crate::claim::ClaimInput;

/// State of one pipeline run
///
/// Each run creates its own state and moves it through the stages by value,
/// so a state is never visible to two runs at once.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisState {
    /// The claim being scored; stages only read it
    pub claim: ClaimInput,
    pub analysis_results: AnalysisResults,
    /// Append-only; order reflects generation priority
    pub recommendations: Vec<String>,
    pub confidence: Score,
    /// Set by finalization only
    pub next_action: Option<NextAction>,
    /// Reserved for non-fatal stage warnings; no stage writes it today
    pub errors: Vec<String>,
}

impl AnalysisState {
    pub fn new(claim: ClaimInput) -> Self {
        Self {
            claim,
            analysis_results: AnalysisResults::default(),
            recommendations: Vec::new(),
            confidence: Score::ZERO,
            next_action: None,
            errors: Vec::new(),
        }
    }
}
