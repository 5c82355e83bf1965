//! Report service: resolves periods, reads the store, and assembles rows.

use chrono::NaiveDate;
use futures::channel::oneshot;
use ledgerview_shared::ReportConfig;
use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::assembler::{ReportAssembler, ReportLine};
use super::error::ReportError;
use super::types::{IncomeStatementReport, ReportFilters, ReportRow, ReportSummary, SummaryReport};
use crate::accounts::{Account, AccountTree, RootType};
use crate::classify::{Classifier, RuleTable};
use crate::diagnostics::{DiagnosticContext, DiagnosticSink};
use crate::fiscal::{PeriodRequest, PeriodResolver, WindowKind};
use crate::ledger::{LedgerAggregator, WindowBalances};
use crate::metrics::{MetricsCalculator, PeriodMetrics};
use crate::store::{ReportStore, StoreError};

/// A failed build step.
struct BuildFailure {
    stage: &'static str,
    error: ReportError,
}

fn at<E: Into<ReportError>>(stage: &'static str) -> impl FnOnce(E) -> BuildFailure {
    move |error| BuildFailure {
        stage,
        error: error.into(),
    }
}

/// Computes per-account metrics on the rayon pool, keeping the async
/// worker free. Results come back in input order.
async fn measure(
    calculator: MetricsCalculator,
    balances: WindowBalances,
    work: Vec<(String, Decimal)>,
) -> Result<Vec<PeriodMetrics>, ReportError> {
    let (tx, rx) = oneshot::channel();
    rayon::spawn(move || {
        let metrics: Vec<PeriodMetrics> = work
            .par_iter()
            .map(|(code, budget)| calculator.account(code, &balances, *budget))
            .collect();
        // the receiver is gone only if the build was dropped
        let _ = tx.send(metrics);
    });
    rx.await
        .map_err(|_| ReportError::Internal("metrics worker stopped".to_string()))
}

/// Builds income statements against a store.
pub struct ReportService<'a, S, D> {
    store: &'a S,
    sink: &'a D,
    rules: RuleTable,
    default_framework: Option<String>,
}

impl<'a, S: ReportStore, D: DiagnosticSink> ReportService<'a, S, D> {
    /// Creates a service with the hospitality rule set.
    #[must_use]
    pub fn new(store: &'a S, sink: &'a D) -> Self {
        Self {
            store,
            sink,
            rules: RuleTable::hospitality(),
            default_framework: None,
        }
    }

    /// Creates a service using the report settings.
    #[must_use]
    pub fn from_config(store: &'a S, sink: &'a D, config: &ReportConfig) -> Self {
        Self::new(store, sink).with_default_framework(config.default_reporting_framework.clone())
    }

    /// Replaces the rule table.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    /// Framework used when the filters name none.
    #[must_use]
    pub fn with_default_framework(mut self, framework: Option<String>) -> Self {
        self.default_framework = framework.filter(|f| !f.trim().is_empty());
        self
    }

    /// Builds the income statement.
    ///
    /// Never fails: on any error the report comes back with no rows and the
    /// error is recorded on the diagnostic sink.
    pub async fn build_report(&self, filters: ReportFilters, today: NaiveDate) -> IncomeStatementReport {
        let filters = self.normalize(filters);
        let context = DiagnosticContext {
            company: Some(filters.company.clone()),
            fiscal_year: Some(filters.fiscal_year.clone()),
            cost_center: filters.cost_center.clone(),
            stage: "build",
        };

        match self.try_build(&filters, today, &context).await {
            Ok(rows) => {
                info!(
                    company = %filters.company,
                    fiscal_year = %filters.fiscal_year,
                    rows = rows.len(),
                    "Income statement built"
                );
                IncomeStatementReport { rows, filters }
            }
            Err(failure) => {
                self.sink
                    .record(&failure.error.to_string(), &context.at(failure.stage));
                IncomeStatementReport::empty(filters)
            }
        }
    }

    /// Builds the report and sums its account rows.
    pub async fn build_summary(&self, filters: ReportFilters, today: NaiveDate) -> SummaryReport {
        let report = self.build_report(filters, today).await;
        SummaryReport {
            summary: ReportSummary::from_account_rows(report.account_rows()),
            filters: report.filters,
        }
    }

    /// Trims text filters, treats blanks as absent, and applies the
    /// default framework.
    fn normalize(&self, mut filters: ReportFilters) -> ReportFilters {
        let blank_to_none = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        filters.company = filters.company.trim().to_string();
        filters.fiscal_year = filters.fiscal_year.trim().to_string();
        filters.cost_center = blank_to_none(filters.cost_center);
        filters.reporting_framework = blank_to_none(filters.reporting_framework)
            .or_else(|| self.default_framework.clone());
        filters
    }

    async fn try_build(
        &self,
        filters: &ReportFilters,
        today: NaiveDate,
        context: &DiagnosticContext,
    ) -> Result<Vec<ReportRow>, BuildFailure> {
        let window_override = filters.validate().map_err(at("filters"))?;
        let company = filters.company.as_str();

        if !self.store.company_exists(company).await.map_err(at("company"))? {
            return Err(at("company")(StoreError::not_found("company", company)));
        }

        let request = PeriodRequest {
            fiscal_year: filters.fiscal_year.clone(),
            window_override,
            month: filters.month,
            today,
        };
        let periods = PeriodResolver::resolve(self.store, &request)
            .await
            .map_err(at("period"))?;
        if periods.previous_is_fallback {
            self.sink.record(
                &format!(
                    "no fiscal year precedes {}; comparing it against itself",
                    periods.fiscal_year.name
                ),
                &context.at("period"),
            );
        }

        let cost_centers = match filters.cost_center.as_deref() {
            Some(code) => Some(
                self.store
                    .expand_with_descendants(code)
                    .await
                    .map_err(at("cost_center"))?,
            ),
            None => None,
        };
        let cost_centers = cost_centers.as_deref();

        let directives = self
            .store
            .directive_map(filters.reporting_framework.as_deref())
            .await
            .map_err(at("classify"))?;
        if directives.is_empty() {
            let error = ReportError::Configuration(
                "no report-class directives configured; using built-in classes".to_string(),
            );
            self.sink.record(&error.to_string(), &context.at("classify"));
        }
        let classifier = Classifier::new(self.rules.clone(), directives);

        let (income, expense) = futures::try_join!(
            self.store.list_accounts(company, RootType::Income),
            self.store.list_accounts(company, RootType::Expense),
        )
        .map_err(at("accounts"))?;
        let tree = AccountTree::new(income.into_iter().chain(expense));
        let missing = tree.missing_parents();
        if !missing.is_empty() {
            warn!(company = %company, missing = ?missing, "Accounts reference unknown parents");
        }

        let budgets = self
            .store
            .budget_amounts(company, &periods.fiscal_year.name, cost_centers)
            .await
            .map_err(at("budget"))?;
        let balances = LedgerAggregator::new(self.store, company, cost_centers)
            .fetch_windows(&periods)
            .await
            .map_err(at("ledger"))?;

        let accounts: Vec<&Account> = tree
            .preorder()
            .into_iter()
            .filter(|account| account.is_reportable())
            .filter(|account| {
                !filters.only_with_activity
                    || balances.has_activity(WindowKind::CurrentYear, &account.code)
                    || budgets.contains_key(&account.code)
            })
            .collect();

        let windows = balances.distinct_windows();
        let work: Vec<(String, Decimal)> = accounts
            .iter()
            .map(|account| {
                let budget = budgets.get(&account.code).copied().unwrap_or_default();
                (account.code.clone(), budget)
            })
            .collect();
        let metrics = measure(MetricsCalculator::new(&periods), balances, work)
            .await
            .map_err(at("metrics"))?;

        let lines: Vec<ReportLine<'_>> = accounts
            .into_iter()
            .zip(metrics)
            .map(|(account, metrics)| ReportLine {
                account,
                classification: classifier.classify_account(account, &tree),
                metrics,
            })
            .collect();

        debug!(
            company = %company,
            accounts = lines.len(),
            windows,
            "Accounts classified and measured"
        );

        Ok(ReportAssembler::assemble(&lines))
    }
}
