//! Claim records and the pipeline's view of a claim

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use core_kernel::{ClaimId, UserId};
use crate::error::{ClaimError, StageFailure};
use crate::pipeline::ProcessingResult;

/// Line of business a claim is filed under
///
/// The four known types drive the document and priority lookups. Any other
/// string is accepted and kept verbatim; it falls back to default handling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClaimType {
    Auto,
    Health,
    Property,
    Life,
    Other(String),
}

impl ClaimType {
    /// Returns the wire name of the type
    pub fn as_str(&self) -> &str {
        match self {
            ClaimType::Auto => "auto",
            ClaimType::Health => "health",
            ClaimType::Property => "property",
            ClaimType::Life => "life",
            ClaimType::Other(name) => name,
        }
    }

    /// The type used when a record does not carry one
    pub fn unknown() -> Self {
        ClaimType::Other("unknown".to_string())
    }

    /// Returns true for one of the four types the lookup tables understand
    pub fn is_known(&self) -> bool {
        !matches!(self, ClaimType::Other(_))
    }
}

impl From<&str> for ClaimType {
    fn from(value: &str) -> Self {
        match value {
            "auto" => ClaimType::Auto,
            "health" => ClaimType::Health,
            "property" => ClaimType::Property,
            "life" => ClaimType::Life,
            other => ClaimType::Other(other.to_string()),
        }
    }
}

impl From<String> for ClaimType {
    fn from(value: String) -> Self {
        ClaimType::from(value.as_str())
    }
}

impl From<ClaimType> for String {
    fn from(value: ClaimType) -> String {
        value.as_str().to_string()
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The claim attributes the scoring pipeline reads
///
/// Only `type`, `amount` and `description` are interpreted. Every other
/// field is carried in `extra` and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimInput {
    #[serde(rename = "type", default = "ClaimType::unknown")]
    pub claim_type: ClaimType,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClaimInput {
    /// Creates an input with the given type and amount
    pub fn new(claim_type: impl Into<ClaimType>, amount: Decimal) -> Self {
        Self {
            claim_type: claim_type.into(),
            amount: Some(amount),
            description: None,
            extra: Map::new(),
        }
    }

    /// Sets the free-text description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an opaque pass-through field
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Amount for lookups that tolerate its absence
    pub fn amount_or_zero(&self) -> Decimal {
        self.amount.unwrap_or_default()
    }

    /// Amount for scoring rules, which refuse to guess
    pub fn require_amount(&self, stage: &'static str) -> Result<Decimal, StageFailure> {
        match self.amount {
            None => Err(StageFailure::missing_field(stage, "amount")),
            Some(amount) if amount < Decimal::ZERO => Err(
                StageFailure::new(stage, format!("amount must be non-negative, got {}", amount)),
            ),
            Some(amount) => Ok(amount),
        }
    }

    /// Lower-cased description; absent reads as empty
    pub fn description_lower(&self) -> String {
        self.description
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
    }
}

/// Lifecycle status of a submitted claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Submitted,
    UnderReview,
    PendingDocuments,
    Approved,
    Rejected,
    Closed,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Submitted => "submitted",
            ClaimStatus::UnderReview => "under_review",
            ClaimStatus::PendingDocuments => "pending_documents",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
            ClaimStatus::Closed => "closed",
        }
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(ClaimStatus::Submitted),
            "under_review" => Ok(ClaimStatus::UnderReview),
            "pending_documents" => Ok(ClaimStatus::PendingDocuments),
            "approved" => Ok(ClaimStatus::Approved),
            "rejected" => Ok(ClaimStatus::Rejected),
            "closed" => Ok(ClaimStatus::Closed),
            other => Err(ClaimError::Core(core_kernel::CoreError::validation(format!(
                "unknown claim status '{}'",
                other
            )))),
        }
    }
}

/// Priority chosen by the submitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl ClaimPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimPriority::Low => "low",
            ClaimPriority::Medium => "medium",
            ClaimPriority::High => "high",
            ClaimPriority::Urgent => "urgent",
        }
    }
}

impl FromStr for ClaimPriority {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(ClaimPriority::Low),
            "medium" => Ok(ClaimPriority::Medium),
            "high" => Ok(ClaimPriority::High),
            "urgent" => Ok(ClaimPriority::Urgent),
            other => Err(ClaimError::Core(core_kernel::CoreError::validation(format!(
                "unknown claim priority '{}'",
                other
            )))),
        }
    }
}

/// Data supplied when a claim is submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClaim {
    pub claim_type: ClaimType,
    pub priority: ClaimPriority,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    pub incident_date: NaiveDate,
    #[serde(default)]
    pub metadata: Value,
}

impl NewClaim {
    /// Checks the invariants a stored claim must satisfy
    pub fn validate(&self) -> Result<(), ClaimError> {
        if self.amount < Decimal::ZERO {
            return Err(ClaimError::InvalidAmount(format!(
                "amount must be non-negative, got {}",
                self.amount
            )));
        }
        if self.description.trim().is_empty() {
            return Err(ClaimError::MissingField("description".to_string()));
        }
        Ok(())
    }
}

/// Changes a submitter may make while the claim is still `submitted`
///
/// Absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimUpdate {
    #[serde(default)]
    pub claim_type: Option<ClaimType>,
    #[serde(default)]
    pub priority: Option<ClaimPriority>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub incident_date: Option<NaiveDate>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl ClaimUpdate {
    pub fn is_empty(&self) -> bool {
        self.claim_type.is_none()
            && self.priority.is_none()
            && self.amount.is_none()
            && self.description.is_none()
            && self.incident_date.is_none()
            && self.metadata.is_none()
    }

    fn validate(&self) -> Result<(), ClaimError> {
        if let Some(amount) = self.amount {
            if amount < Decimal::ZERO {
                return Err(ClaimError::InvalidAmount(format!(
                    "amount must be non-negative, got {}",
                    amount
                )));
            }
        }
        if self.description.as_deref().is_some_and(|d| d.trim().is_empty()) {
            return Err(ClaimError::MissingField("description".to_string()));
        }
        Ok(())
    }
}

/// A stored claim owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub id: ClaimId,
    pub owner_id: UserId,
    pub claim_number: String,
    pub claim_type: ClaimType,
    pub status: ClaimStatus,
    pub priority: ClaimPriority,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    pub incident_date: NaiveDate,
    pub submitted_at: DateTime<Utc>,
    pub metadata: Value,
    /// Latest triage result, if the claim has been processed
    pub ai_analysis: Option<ProcessingResult>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClaimRecord {
    /// Creates a freshly submitted claim
    pub fn submit(owner_id: UserId, new_claim: NewClaim) -> Self {
        let now = Utc::now();

        Self {
            id: ClaimId::new_v7(),
            owner_id,
            claim_number: generate_claim_number(now),
            claim_type: new_claim.claim_type,
            status: ClaimStatus::Submitted,
            priority: new_claim.priority,
            amount: new_claim.amount,
            description: new_claim.description,
            incident_date: new_claim.incident_date,
            submitted_at: now,
            metadata: new_claim.metadata,
            ai_analysis: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if the given user owns this claim
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner_id == user
    }

    /// Applies an update; only a claim still in `submitted` status may change
    pub fn apply_update(&mut self, update: ClaimUpdate, at: DateTime<Utc>) -> Result<(), ClaimError> {
        if self.status != ClaimStatus::Submitted {
            return Err(ClaimError::NotEditable(self.status.as_str().to_string()));
        }
        if update.is_empty() {
            return Err(ClaimError::EmptyUpdate);
        }
        update.validate()?;

        if let Some(claim_type) = update.claim_type {
            self.claim_type = claim_type;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(incident_date) = update.incident_date {
            self.incident_date = incident_date;
        }
        if let Some(metadata) = update.metadata {
            self.metadata = metadata;
        }
        self.updated_at = at;
        Ok(())
    }

    /// Builds the pipeline input, passing the bookkeeping fields through
    pub fn to_input(&self) -> ClaimInput {
        ClaimInput::new(self.claim_type.clone(), self.amount)
            .with_description(self.description.clone())
            .with_extra("id", Value::String(self.id.as_uuid().to_string()))
            .with_extra("claim_number", Value::String(self.claim_number.clone()))
            .with_extra("status", Value::String(self.status.as_str().to_string()))
            .with_extra("priority", Value::String(self.priority.as_str().to_string()))
            .with_extra("incident_date", Value::String(self.incident_date.to_string()))
            .with_extra("metadata", self.metadata.clone())
    }
}

/// Claim numbers look like `CLM-20240115-1A2B3C4D`
pub fn generate_claim_number(at: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("CLM-{}-{}", at.format("%Y%m%d"), suffix[..8].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_claim_type_round_trips_unknown_strings() {
        let t: ClaimType = serde_json::from_value(json!("marine")).unwrap();
        assert_eq!(t, ClaimType::Other("marine".to_string()));
        assert!(!t.is_known());
        assert_eq!(serde_json::to_value(&t).unwrap(), json!("marine"));
    }

    #[test]
    fn test_claim_input_keeps_extra_fields() {
        let input: ClaimInput = serde_json::from_value(json!({
            "type": "auto",
            "amount": 1200,
            "description": "Rear-ended",
            "claim_number": "CLM-1"
        }))
        .unwrap();

        assert_eq!(input.claim_type, ClaimType::Auto);
        assert_eq!(input.amount, Some(dec!(1200)));
        assert_eq!(input.extra.get("claim_number"), Some(&json!("CLM-1")));

        let back = serde_json::to_value(&input).unwrap();
        assert_eq!(back["claim_number"], json!("CLM-1"));
        assert_eq!(back["type"], json!("auto"));
    }

    #[test]
    fn test_claim_input_without_amount() {
        let input: ClaimInput = serde_json::from_value(json!({ "type": "health" })).unwrap();
        assert_eq!(input.amount, None);
        assert_eq!(input.amount_or_zero(), Decimal::ZERO);
        assert!(input.require_amount("risk_assessment").is_err());
    }

    #[test]
    fn test_require_amount_rejects_negative() {
        let input = ClaimInput::new("auto", dec!(-1));
        let err = input.require_amount("fraud_detection").unwrap_err();
        assert_eq!(err.stage, "fraud_detection");
        assert!(err.message.contains("non-negative"));
    }

    #[test]
    fn test_claim_number_format() {
        let at = DateTime::parse_from_rfc3339("2024-01-15T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let number = generate_claim_number(at);

        assert!(number.starts_with("CLM-20240115-"));
        assert_eq!(number.len(), "CLM-20240115-".len() + 8);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("under_review".parse::<ClaimStatus>().unwrap(), ClaimStatus::UnderReview);
        assert!("lost".parse::<ClaimStatus>().is_err());
    }

    #[test]
    fn test_new_claim_validation() {
        let mut claim = NewClaim {
            claim_type: ClaimType::Property,
            priority: ClaimPriority::default(),
            amount: dec!(500),
            description: "Hail damage".to_string(),
            incident_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            metadata: Value::Null,
        };
        assert!(claim.validate().is_ok());

        claim.amount = dec!(-5);
        assert!(matches!(claim.validate(), Err(ClaimError::InvalidAmount(_))));
    }

    fn submitted_claim() -> ClaimRecord {
        ClaimRecord::submit(
            UserId::new_v7(),
            NewClaim {
                claim_type: ClaimType::Auto,
                priority: ClaimPriority::Medium,
                amount: dec!(1000),
                description: "Scraped bumper".to_string(),
                incident_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                metadata: json!({}),
            },
        )
    }

    #[test]
    fn test_update_changes_only_given_fields() {
        let mut claim = submitted_claim();
        let before = claim.clone();
        let later = claim.updated_at + chrono::Duration::seconds(5);

        claim
            .apply_update(
                ClaimUpdate {
                    amount: Some(dec!(1500)),
                    priority: Some(ClaimPriority::High),
                    ..Default::default()
                },
                later,
            )
            .unwrap();

        assert_eq!(claim.amount, dec!(1500));
        assert_eq!(claim.priority, ClaimPriority::High);
        assert_eq!(claim.description, before.description);
        assert_eq!(claim.claim_type, before.claim_type);
        assert_eq!(claim.updated_at, later);
        assert_eq!(claim.created_at, before.created_at);
    }

    #[test]
    fn test_empty_update_is_rejected() {
        let mut claim = submitted_claim();
        let err = claim.apply_update(ClaimUpdate::default(), Utc::now()).unwrap_err();
        assert!(matches!(err, ClaimError::EmptyUpdate));
    }

    #[test]
    fn test_update_rejected_after_submission_stage() {
        let mut claim = submitted_claim();
        claim.status = ClaimStatus::UnderReview;

        let update = ClaimUpdate {
            description: Some("Scraped bumper and door".to_string()),
            ..Default::default()
        };
        let err = claim.apply_update(update, Utc::now()).unwrap_err();

        assert!(matches!(err, ClaimError::NotEditable(ref s) if s == "under_review"));
        assert!(err.is_rejected());
        assert_eq!(claim.description, "Scraped bumper");
    }

    #[test]
    fn test_update_validates_values() {
        let mut claim = submitted_claim();
        let err = claim
            .apply_update(
                ClaimUpdate {
                    amount: Some(dec!(-1)),
                    ..Default::default()
                },
                Utc::now(),
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(claim.amount, dec!(1000));
    }
}
