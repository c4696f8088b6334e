//! Bounded scores with precise decimal arithmetic
//!
//! Risk scores, fraud probabilities and confidences are all probabilities in
//! the closed interval [0, 1]. `Score` keeps that invariant in the type: every
//! constructor clamps, so a value outside the interval cannot be observed.
//!
//! Scores are exact decimals internally and serialize as JSON numbers.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A decimal value clamped to `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Score(Decimal);

impl Score {
    /// The lowest possible score
    pub const ZERO: Score = Score(Decimal::ZERO);

    /// The highest possible score
    pub const ONE: Score = Score(Decimal::ONE);

    /// Creates a score, clamping the value into `[0, 1]`
    pub fn new(value: Decimal) -> Self {
        Self(value.clamp(Decimal::ZERO, Decimal::ONE))
    }

    /// Returns the underlying decimal
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns `1 - self`
    pub fn complement(&self) -> Score {
        Score(Decimal::ONE - self.0)
    }

    /// Arithmetic mean of the given scores, or `None` when empty
    ///
    /// The mean of values in `[0, 1]` is itself in `[0, 1]`, so no clamping
    /// takes place beyond what construction already guarantees.
    pub fn mean<I>(scores: I) -> Option<Score>
    where
        I: IntoIterator<Item = Score>,
    {
        let (sum, count) = scores
            .into_iter()
            .fold((Decimal::ZERO, 0u32), |(sum, count), s| (sum + s.0, count + 1));

        if count == 0 {
            None
        } else {
            Some(Score::new(sum / Decimal::from(count)))
        }
    }

    /// Lossy conversion for display and JSON
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

impl From<Score> for Decimal {
    fn from(score: Score) -> Decimal {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Score::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_clamps_both_ends() {
        assert_eq!(Score::new(dec!(1.4)), Score::ONE);
        assert_eq!(Score::new(dec!(-0.2)), Score::ZERO);
        assert_eq!(Score::new(dec!(0.35)).value(), dec!(0.35));
    }

    #[test]
    fn test_complement() {
        assert_eq!(Score::new(dec!(0.4)).complement().value(), dec!(0.6));
    }

    #[test]
    fn test_mean_of_empty_is_none() {
        assert!(Score::mean(Vec::new()).is_none());
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Score::new(dec!(0.4))).unwrap();
        assert_eq!(json, "0.4");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn score_is_always_bounded(mantissa in -10_000_000i64..10_000_000i64, scale in 0u32..6u32) {
            let score = Score::new(Decimal::new(mantissa, scale));
            prop_assert!(score >= Score::ZERO);
            prop_assert!(score <= Score::ONE);
        }

        #[test]
        fn mean_stays_within_inputs(a in 0i64..=10_000i64, b in 0i64..=10_000i64) {
            let sa = Score::new(Decimal::new(a, 4));
            let sb = Score::new(Decimal::new(b, 4));
            let mean = Score::mean([sa, sb]).unwrap();
            prop_assert!(mean >= sa.min(sb));
            prop_assert!(mean <= sa.max(sb));
        }
    }
}
