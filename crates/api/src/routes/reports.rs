//! Income statement routes.
//!
//! Both endpoints always answer 200: a report that cannot be built comes
//! back with no rows and the failure goes to the diagnostic log.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::NaiveDate;
use ledgerview_core::diagnostics::TracingSink;
use ledgerview_core::reports::{IncomeStatementReport, ReportFilters, ReportService, SummaryReport};
use ledgerview_core::store::ReportStore;
use serde::Deserialize;
use tracing::warn;

use crate::AppState;

/// Creates the report routes.
pub fn routes<S: ReportStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/reports/income-statement", get(get_income_statement::<S>))
        .route(
            "/reports/income-statement/summary",
            get(get_income_statement_summary::<S>),
        )
}

/// Query parameters shared by both report endpoints.
///
/// Everything arrives as text so that empty values (`cost_center=`) mean
/// "no filter" instead of a rejected request.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// Company name.
    pub company: Option<String>,
    /// Fiscal year name.
    pub fiscal_year: Option<String>,
    /// Cost center.
    pub cost_center: Option<String>,
    /// Month number.
    pub month: Option<String>,
    /// Reporting framework.
    pub reporting_framework: Option<String>,
    /// Override window start.
    pub from_date: Option<String>,
    /// Override window end.
    pub to_date: Option<String>,
    /// Only accounts with activity.
    pub only_with_activity: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ReportQuery {
    /// Converts the query into report filters.
    ///
    /// Unparseable values are kept as invalid filter values (month 0, or
    /// an inverted window) so the service rejects them the usual way.
    pub fn into_filters(self) -> ReportFilters {
        let month = non_empty(self.month).map(|m| m.parse::<u32>().unwrap_or(0));
        let from_date = non_empty(self.from_date).map(|d| parse_date(&d, NaiveDate::MAX));
        let to_date = non_empty(self.to_date).map(|d| parse_date(&d, NaiveDate::MIN));
        let only_with_activity = non_empty(self.only_with_activity)
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes"));

        ReportFilters {
            company: non_empty(self.company).unwrap_or_default(),
            fiscal_year: non_empty(self.fiscal_year).unwrap_or_default(),
            cost_center: non_empty(self.cost_center),
            month,
            reporting_framework: non_empty(self.reporting_framework),
            from_date,
            to_date,
            only_with_activity,
        }
    }
}

fn parse_date(value: &str, invalid: NaiveDate) -> NaiveDate {
    value.parse().unwrap_or_else(|_| {
        warn!(value, "Unparseable report date");
        invalid
    })
}

async fn get_income_statement<S: ReportStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<ReportQuery>,
) -> Json<IncomeStatementReport> {
    let service = ReportService::from_config(state.store.as_ref(), &TracingSink, &state.report);
    Json(service.build_report(query.into_filters(), state.today()).await)
}

async fn get_income_statement_summary<S: ReportStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<ReportQuery>,
) -> Json<SummaryReport> {
    let service = ReportService::from_config(state.store.as_ref(), &TracingSink, &state.report);
    Json(service.build_summary(query.into_filters(), state.today()).await)
}
