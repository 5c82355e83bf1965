//! Filter list endpoints that feed report front-ends.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use ledgerview_core::fiscal::FiscalYear;
use ledgerview_core::store::ReportStore;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;

/// Creates the filter list routes.
pub fn routes<S: ReportStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/filters/companies", get(list_companies::<S>))
        .route("/filters/fiscal-years", get(list_fiscal_years::<S>))
        .route("/filters/cost-centers", get(list_cost_centers::<S>))
        .route("/filters/expense-accounts", get(list_expense_accounts::<S>))
}

/// Optional company scope.
#[derive(Debug, Default, Deserialize)]
pub struct CompanyQuery {
    /// Company name; empty means every company.
    pub company: Option<String>,
}

impl CompanyQuery {
    fn company(&self) -> Option<&str> {
        self.company
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Expense account option.
#[derive(Debug, Serialize)]
pub struct ExpenseAccountOption {
    /// Account code.
    pub name: String,
    /// Display name.
    pub account_name: String,
}

async fn list_companies<S: ReportStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.store.list_companies().await?))
}

async fn list_fiscal_years<S: ReportStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<FiscalYear>>, ApiError> {
    Ok(Json(state.store.list_fiscal_years().await?))
}

async fn list_cost_centers<S: ReportStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<CompanyQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.store.list_cost_centers(query.company()).await?))
}

async fn list_expense_accounts<S: ReportStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<CompanyQuery>,
) -> Result<Json<Vec<ExpenseAccountOption>>, ApiError> {
    let accounts = state.store.list_expense_accounts(query.company()).await?;
    Ok(Json(
        accounts
            .into_iter()
            .map(|a| ExpenseAccountOption {
                name: a.code,
                account_name: a.name,
            })
            .collect(),
    ))
}
