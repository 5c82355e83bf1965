//! Metric blocks and their field-wise arithmetic.

use std::iter::Sum;
use std::ops::{Add, Sub};

use rust_decimal::Decimal;
use serde::Serialize;

use super::ratio::Ratio;

/// Figures for one period: last year, budget, actual, and two ratios.
///
/// Ratios are always derived from the three amounts, never combined
/// directly, so every constructor and operator recomputes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricBlock {
    /// Same period one year earlier.
    pub last_year: Decimal,
    /// Budget for the period.
    pub budget: Decimal,
    /// Actual for the period.
    pub actual: Decimal,
    /// `actual / budget` in percent.
    pub actual_vs_budget_pct: Ratio,
    /// `actual / last_year` in percent.
    pub actual_vs_last_year_pct: Ratio,
}

impl MetricBlock {
    /// Builds a block and derives its ratios.
    #[must_use]
    pub fn new(last_year: Decimal, budget: Decimal, actual: Decimal) -> Self {
        Self {
            last_year,
            budget,
            actual,
            actual_vs_budget_pct: Ratio::of(actual, budget),
            actual_vs_last_year_pct: Ratio::of(actual, last_year),
        }
    }

    /// Variance as budget minus actual.
    #[must_use]
    pub fn variance(&self) -> Decimal {
        self.budget - self.actual
    }
}

impl Default for MetricBlock {
    fn default() -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    }
}

impl Add for MetricBlock {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.last_year + rhs.last_year,
            self.budget + rhs.budget,
            self.actual + rhs.actual,
        )
    }
}

impl Sub for MetricBlock {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.last_year - rhs.last_year,
            self.budget - rhs.budget,
            self.actual - rhs.actual,
        )
    }
}

impl<'a> Sum<&'a MetricBlock> for MetricBlock {
    fn sum<I: Iterator<Item = &'a MetricBlock>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, block| acc + *block)
    }
}

/// The three period blocks of one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodMetrics {
    /// Selected month.
    pub current_month: MetricBlock,
    /// Year to date.
    pub year_to_date: MetricBlock,
    /// Full-year forecast.
    pub forecast: MetricBlock,
}

impl Add for PeriodMetrics {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            current_month: self.current_month + rhs.current_month,
            year_to_date: self.year_to_date + rhs.year_to_date,
            forecast: self.forecast + rhs.forecast,
        }
    }
}

impl Sub for PeriodMetrics {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            current_month: self.current_month - rhs.current_month,
            year_to_date: self.year_to_date - rhs.year_to_date,
            forecast: self.forecast - rhs.forecast,
        }
    }
}

impl<'a> Sum<&'a PeriodMetrics> for PeriodMetrics {
    fn sum<I: Iterator<Item = &'a PeriodMetrics>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, metrics| acc + *metrics)
    }
}
