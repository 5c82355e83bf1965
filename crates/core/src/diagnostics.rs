//! Diagnostic side channel.
//!
//! Report builds never fail towards the caller; what went wrong is
//! recorded here instead.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tracing::error;

/// Where a diagnostic came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticContext {
    /// Company filter.
    pub company: Option<String>,
    /// Fiscal year filter.
    pub fiscal_year: Option<String>,
    /// Cost center filter.
    pub cost_center: Option<String>,
    /// Build stage ("filters", "period", "classify", ...).
    pub stage: &'static str,
}

impl DiagnosticContext {
    /// Same context at another stage.
    #[must_use]
    pub fn at(&self, stage: &'static str) -> Self {
        Self {
            stage,
            ..self.clone()
        }
    }
}

/// A recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Human-readable message.
    pub message: String,
    /// Context.
    pub context: DiagnosticContext,
}

/// Fire-and-forget diagnostic recorder. Implementations must not panic
/// and must not block for long.
pub trait DiagnosticSink: Send + Sync {
    /// Records one diagnostic.
    fn record(&self, message: &str, context: &DiagnosticContext);
}

/// Writes diagnostics as `tracing` error events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, message: &str, context: &DiagnosticContext) {
        error!(
            company = context.company.as_deref().unwrap_or_default(),
            fiscal_year = context.fiscal_year.as_deref().unwrap_or_default(),
            cost_center = context.cost_center.as_deref().unwrap_or_default(),
            stage = context.stage,
            "{message}"
        );
    }
}

/// Keeps diagnostics in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Records at one stage.
    pub fn at_stage(&self, stage: &str) -> Vec<Diagnostic> {
        self.records()
            .into_iter()
            .filter(|d| d.context.stage == stage)
            .collect()
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, message: &str, context: &DiagnosticContext) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Diagnostic {
                message: message.to_string(),
                context: context.clone(),
            });
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for std::sync::Arc<T> {
    fn record(&self, message: &str, context: &DiagnosticContext) {
        (**self).record(message, context);
    }
}
