//! Headline totals of a built report.

use rust_decimal::Decimal;

use super::types::{AccountRow, ReportSummary, SummaryFigures};

impl ReportSummary {
    /// Sums every account row. Totals and summary rows are ignored so
    /// nothing is counted twice.
    #[must_use]
    pub fn from_account_rows<'a>(rows: impl IntoIterator<Item = &'a AccountRow>) -> Self {
        let mut annual_budget = Decimal::ZERO;
        let mut ytd_budget = Decimal::ZERO;
        let mut ytd_actual = Decimal::ZERO;
        let mut forecast_actual = Decimal::ZERO;

        for row in rows {
            annual_budget += row.metrics.forecast.budget;
            ytd_budget += row.metrics.year_to_date.budget;
            ytd_actual += row.metrics.year_to_date.actual;
            forecast_actual += row.metrics.forecast.actual;
        }

        Self {
            total: SummaryFigures::new(annual_budget, ytd_actual),
            year_to_date: SummaryFigures::new(ytd_budget, ytd_actual),
            forecast: SummaryFigures::new(annual_budget, forecast_actual),
        }
    }
}
