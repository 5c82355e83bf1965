//! API route definitions.

use axum::Router;
use ledgerview_core::store::ReportStore;

use crate::AppState;

pub mod filters;
pub mod health;
pub mod reports;

/// Creates the API router with all routes.
pub fn api_routes<S: ReportStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .merge(health::routes())
        .merge(reports::routes())
        .merge(filters::routes())
}
