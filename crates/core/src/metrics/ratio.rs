//! Percentage ratios that cannot divide by zero.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// A percentage, or "N/A" when the denominator is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ratio {
    /// `numerator / denominator * 100`, one decimal place.
    Value(Decimal),
    /// Denominator was zero.
    #[default]
    NotApplicable,
}

impl Ratio {
    /// Sentinel text for a missing ratio.
    pub const NOT_APPLICABLE: &'static str = "N/A";

    /// Safe ratio: "N/A" on a zero denominator, otherwise the percentage
    /// rounded to one decimal place.
    #[must_use]
    pub fn of(numerator: Decimal, denominator: Decimal) -> Self {
        if denominator.is_zero() {
            return Self::NotApplicable;
        }
        numerator
            .checked_div(denominator)
            .and_then(|q| q.checked_mul(Decimal::ONE_HUNDRED))
            .map_or(Self::NotApplicable, |pct| Self::Value(pct.round_dp(1)))
    }

    /// The percentage, if any.
    #[must_use]
    pub const fn value(self) -> Option<Decimal> {
        match self {
            Self::Value(v) => Some(v),
            Self::NotApplicable => None,
        }
    }

    /// Returns true for "N/A".
    #[must_use]
    pub const fn is_not_applicable(self) -> bool {
        matches!(self, Self::NotApplicable)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::NotApplicable => f.write_str(Self::NOT_APPLICABLE),
        }
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => Serialize::serialize(v, serializer),
            Self::NotApplicable => serializer.serialize_str(Self::NOT_APPLICABLE),
        }
    }
}
