//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Income statement and summary endpoints
//! - Filter list endpoints for report front-ends
//! - Error responses built from `AppError`

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use chrono::{NaiveDate, Utc};
use ledgerview_core::store::ReportStore;
use ledgerview_shared::ReportConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
pub struct AppState<S> {
    /// Store every report reads from.
    pub store: Arc<S>,
    /// Report defaults.
    pub report: Arc<ReportConfig>,
}

impl<S> AppState<S> {
    /// Creates the state.
    pub fn new(store: S, report: ReportConfig) -> Self {
        Self {
            store: Arc::new(store),
            report: Arc::new(report),
        }
    }

    /// Today's date in the configured report timezone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.report.tz()).date_naive()
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            report: Arc::clone(&self.report),
        }
    }
}

/// Creates the main application router.
pub fn create_router<S: ReportStore + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
