//! Financial metrics calculator.

use rust_decimal::Decimal;

use super::block::{MetricBlock, PeriodMetrics};
use crate::fiscal::{ReportPeriods, WindowKind};
use crate::ledger::WindowBalances;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Computes the period blocks of one account from pre-fetched windows.
///
/// Pure: the calculator only reads the shared window maps, so it can run
/// for many accounts in parallel.
#[derive(Debug, Clone, Copy)]
pub struct MetricsCalculator {
    elapsed_days: i64,
    total_days: i64,
    month_selected: bool,
}

impl MetricsCalculator {
    /// Creates a calculator for the resolved periods.
    #[must_use]
    pub fn new(periods: &ReportPeriods) -> Self {
        Self {
            elapsed_days: periods.elapsed_days(),
            total_days: periods.total_days(),
            month_selected: periods.current_month.is_some(),
        }
    }

    /// Annual budget prorated by elapsed days; zero for an empty year.
    #[must_use]
    pub fn ytd_budget(&self, annual_budget: Decimal) -> Decimal {
        prorate(annual_budget, self.elapsed_days, self.total_days)
    }

    /// Flat monthly budget (`annual / 12`).
    #[must_use]
    pub fn month_budget(annual_budget: Decimal) -> Decimal {
        annual_budget / MONTHS_PER_YEAR
    }

    /// YTD actual plus whatever budget is left for the rest of the year.
    #[must_use]
    pub fn forecast_actual(ytd_actual: Decimal, annual_budget: Decimal, ytd_budget: Decimal) -> Decimal {
        ytd_actual + (annual_budget - ytd_budget).max(Decimal::ZERO)
    }

    /// All three blocks for one account.
    #[must_use]
    pub fn account(
        &self,
        account: &str,
        balances: &WindowBalances,
        annual_budget: Decimal,
    ) -> PeriodMetrics {
        let actual = |kind| balances.net(kind, account).abs();

        let current_month = if self.month_selected {
            MetricBlock::new(
                actual(WindowKind::MonthLastYear),
                Self::month_budget(annual_budget),
                actual(WindowKind::Month),
            )
        } else {
            MetricBlock::default()
        };

        let ytd_actual = actual(WindowKind::YearToDate);
        let ytd_budget = self.ytd_budget(annual_budget);
        let year_to_date = MetricBlock::new(
            actual(WindowKind::YearToDateLastYear),
            ytd_budget,
            ytd_actual,
        );

        let forecast = MetricBlock::new(
            actual(WindowKind::PreviousYear),
            annual_budget,
            Self::forecast_actual(ytd_actual, annual_budget, ytd_budget),
        );

        PeriodMetrics {
            current_month,
            year_to_date,
            forecast,
        }
    }
}

fn prorate(amount: Decimal, elapsed_days: i64, total_days: i64) -> Decimal {
    if total_days <= 0 {
        return Decimal::ZERO;
    }
    amount * Decimal::from(elapsed_days) / Decimal::from(total_days)
}
