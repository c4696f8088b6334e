//! Pre-built Test Fixtures
//!
//! Reference claims with known expected outcomes, plus fixed identifiers and
//! timestamps so results can be compared exactly.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::UserId;
use domain_claims::ClaimInput;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Reference claims used across the pipeline tests
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// Mid-value auto claim: risk 0.4 medium, fraud 0.1, standard review
    pub fn minor_auto_accident() -> ClaimInput {
        ClaimInput::new("auto", dec!(30000)).with_description("minor accident")
    }

    /// Life claim: high priority by type, risk 0.5 medium, standard review
    pub fn life_natural_causes() -> ClaimInput {
        ClaimInput::new("life", dec!(150000)).with_description("natural causes")
    }

    /// High-value total loss: fraud 0.4, below the investigation line
    pub fn property_total_loss() -> ClaimInput {
        ClaimInput::new("property", dec!(250000)).with_description("total loss fire")
    }

    /// Small health claim: baseline risk 0.3 (medium), standard review
    pub fn small_health_claim() -> ClaimInput {
        ClaimInput::new("health", dec!(1200)).with_description("Outpatient visit")
    }

    /// A claim the scoring stages refuse: no amount
    pub fn missing_amount() -> ClaimInput {
        let mut claim = ClaimInput::new("auto", dec!(0)).with_description("no amount given");
        claim.amount = None;
        claim
    }

    /// A claim the scoring stages refuse: negative amount
    pub fn negative_amount() -> ClaimInput {
        ClaimInput::new("property", dec!(-250)).with_description("refund")
    }

    /// A type outside the four known lines of business
    pub fn unknown_type() -> ClaimInput {
        ClaimInput::new("marine", dec!(4000)).with_description("cargo damaged in transit")
    }
}

/// Fixed timestamps
pub struct TimeFixtures;

impl TimeFixtures {
    /// Processing time used for byte-identical comparisons
    pub fn processed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    pub fn incident_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }
}

/// Fixed identifiers
pub struct IdFixtures;

impl IdFixtures {
    /// The claimant most tests act as
    pub fn owner() -> UserId {
        UserId::from_uuid(Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0001))
    }

    /// A second user, for ownership checks
    pub fn other_owner() -> UserId {
        UserId::from_uuid(Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0002))
    }
}
