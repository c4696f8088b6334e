//! Test Data Builders
//!
//! Builders that let a test state only the fields it cares about.

use chrono::NaiveDate;
use core_kernel::UserId;
use domain_claims::{ClaimInput, ClaimPriority, ClaimRecord, ClaimType, NewClaim};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Map, Value};

use crate::fixtures::TimeFixtures;

/// Builder for pipeline inputs
pub struct ClaimInputBuilder {
    claim_type: ClaimType,
    amount: Option<Decimal>,
    description: Option<String>,
    extra: Map<String, Value>,
}

impl Default for ClaimInputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimInputBuilder {
    pub fn new() -> Self {
        Self {
            claim_type: ClaimType::Auto,
            amount: Some(dec!(1000)),
            description: None,
            extra: Map::new(),
        }
    }

    pub fn with_type(mut self, claim_type: impl Into<ClaimType>) -> Self {
        self.claim_type = claim_type.into();
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn without_amount(mut self) -> Self {
        self.amount = None;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a field the pipeline does not interpret
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn build(self) -> ClaimInput {
        ClaimInput {
            claim_type: self.claim_type,
            amount: self.amount,
            description: self.description,
            extra: self.extra,
        }
    }
}

/// Builder for claim submissions
pub struct NewClaimBuilder {
    claim_type: ClaimType,
    priority: ClaimPriority,
    amount: Decimal,
    description: String,
    incident_date: NaiveDate,
    metadata: Value,
}

impl Default for NewClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewClaimBuilder {
    pub fn new() -> Self {
        Self {
            claim_type: ClaimType::Auto,
            priority: ClaimPriority::Medium,
            amount: dec!(30000),
            description: "minor accident".to_string(),
            incident_date: TimeFixtures::incident_date(),
            metadata: json!({}),
        }
    }

    /// Starts from a filler description, for tests where the text is irrelevant
    pub fn with_random_description() -> Self {
        let words: String = Sentence(4..10).fake();
        Self::new().with_description(words)
    }

    pub fn with_type(mut self, claim_type: impl Into<ClaimType>) -> Self {
        self.claim_type = claim_type.into();
        self
    }

    pub fn with_priority(mut self, priority: ClaimPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_incident_date(mut self, date: NaiveDate) -> Self {
        self.incident_date = date;
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn build(self) -> NewClaim {
        NewClaim {
            claim_type: self.claim_type,
            priority: self.priority,
            amount: self.amount,
            description: self.description,
            incident_date: self.incident_date,
            metadata: self.metadata,
        }
    }

    /// Builds and submits the claim on behalf of `owner`, without storing it
    pub fn submit_for(self, owner: UserId) -> ClaimRecord {
        ClaimRecord::submit(owner, self.build())
    }
}
