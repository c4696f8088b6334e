//! Property-Based Test Generators
//!
//! Proptest strategies for claim inputs. Descriptions are drawn so the
//! keyword rules fire often enough to exercise every branch.

use domain_claims::{ClaimInput, ClaimType};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::Map;

/// Any claim type, including ones the lookup tables do not know
pub fn claim_type_strategy() -> impl Strategy<Value = ClaimType> {
    prop_oneof![
        Just(ClaimType::Auto),
        Just(ClaimType::Health),
        Just(ClaimType::Property),
        Just(ClaimType::Life),
        "[a-z]{3,10}".prop_map(ClaimType::from),
    ]
}

/// Non-negative amounts up to ten million, in cents
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Amounts clustered around the rule thresholds
pub fn threshold_amount_strategy() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(Decimal::new(25_000, 0)),
        Just(Decimal::new(50_000, 0)),
        Just(Decimal::new(100_000, 0)),
        Just(Decimal::new(200_000, 0)),
        (-100i64..=100i64).prop_map(|d| Decimal::new(10_000_000 + d, 2)),
        amount_strategy(),
    ]
}

/// Descriptions mixing rule keywords with filler text
pub fn description_strategy() -> impl Strategy<Value = String> {
    let keyword = prop_oneof![
        Just("accident"),
        Just("Total Loss"),
        Just("emergency"),
        Just("ACCIDENT"),
        Just(""),
    ];
    (keyword, "[a-z ]{0,30}", any::<bool>()).prop_map(|(kw, filler, before)| {
        if before {
            format!("{} {}", kw, filler)
        } else {
            format!("{} {}", filler, kw)
        }
    })
}

/// Well-formed inputs every stage can score
pub fn claim_input_strategy() -> impl Strategy<Value = ClaimInput> {
    (
        claim_type_strategy(),
        threshold_amount_strategy(),
        proptest::option::of(description_strategy()),
    )
        .prop_map(|(claim_type, amount, description)| ClaimInput {
            claim_type,
            amount: Some(amount),
            description,
            extra: Map::new(),
        })
}

/// Inputs that may lack an amount or carry a negative one
pub fn any_claim_input_strategy() -> impl Strategy<Value = ClaimInput> {
    (
        claim_type_strategy(),
        proptest::option::of(-1_000_000i64..1_000_000_000i64),
        proptest::option::of(description_strategy()),
    )
        .prop_map(|(claim_type, cents, description)| ClaimInput {
            claim_type,
            amount: cents.map(|c| Decimal::new(c, 2)),
            description,
            extra: Map::new(),
        })
}
