//! Ledger aggregation.
//!
//! Each distinct window is read from the store exactly once per report;
//! every account lookup afterwards is a map hit.

use std::collections::{BTreeSet, HashMap};

use futures::future::try_join_all;
use rust_decimal::Decimal;
use tracing::debug;

use super::types::{AccountTotals, AccountTotalsMap, Posting};
use crate::fiscal::{DateWindow, ReportPeriods, WindowKind};
use crate::store::{LedgerStore, StoreError};

/// Aggregates postings for one company and cost-center scope.
pub struct LedgerAggregator<'a, S> {
    store: &'a S,
    company: &'a str,
    cost_centers: Option<&'a [String]>,
}

impl<'a, S: LedgerStore> LedgerAggregator<'a, S> {
    /// Creates an aggregator. `cost_centers` must already include descendants.
    #[must_use]
    pub const fn new(store: &'a S, company: &'a str, cost_centers: Option<&'a [String]>) -> Self {
        Self {
            store,
            company,
            cost_centers,
        }
    }

    /// Sums postings per account, keeping only live postings of this scope.
    ///
    /// The store is expected to filter already; the checks are repeated
    /// here so a lenient store cannot leak cancelled or foreign postings.
    #[must_use]
    pub fn summarize<'p>(
        &self,
        postings: impl IntoIterator<Item = &'p Posting>,
        window: DateWindow,
    ) -> AccountTotalsMap {
        let mut totals = AccountTotalsMap::new();
        for posting in postings {
            if posting.is_cancelled
                || posting.company != self.company
                || !window.contains(posting.posting_date)
                || !self.in_scope(posting.cost_center.as_deref())
            {
                continue;
            }
            totals
                .entry(posting.account.clone())
                .or_insert_with(AccountTotals::default)
                .add(posting);
        }
        totals
    }

    fn in_scope(&self, cost_center: Option<&str>) -> bool {
        match self.cost_centers {
            None => true,
            Some(allowed) => cost_center.is_some_and(|cc| allowed.iter().any(|a| a == cc)),
        }
    }

    /// Reads and sums one window.
    pub async fn aggregate(&self, window: DateWindow) -> Result<AccountTotalsMap, StoreError> {
        let postings = self
            .store
            .query_postings(self.company, window, self.cost_centers)
            .await?;
        Ok(self.summarize(&postings, window))
    }

    /// Reads every window of the report concurrently.
    ///
    /// Identical windows are fetched once. Either all windows load or the
    /// whole call fails.
    pub async fn fetch_windows(&self, periods: &ReportPeriods) -> Result<WindowBalances, StoreError> {
        let table = periods.windows();
        let distinct: BTreeSet<DateWindow> = table.iter().map(|(_, window)| *window).collect();

        debug!(
            company = %self.company,
            windows = table.len(),
            distinct = distinct.len(),
            "Fetching ledger windows"
        );

        let loaded = try_join_all(distinct.into_iter().map(|window| async move {
            self.aggregate(window).await.map(|totals| (window, totals))
        }))
        .await?;

        Ok(WindowBalances {
            by_window: loaded.into_iter().collect(),
            kinds: table.into_iter().collect(),
        })
    }
}

/// Aggregated totals for every window of one report.
#[derive(Debug, Clone, Default)]
pub struct WindowBalances {
    by_window: HashMap<DateWindow, AccountTotalsMap>,
    kinds: HashMap<WindowKind, DateWindow>,
}

impl WindowBalances {
    /// Totals map for a window kind; `None` when the window does not apply.
    #[must_use]
    pub fn get(&self, kind: WindowKind) -> Option<&AccountTotalsMap> {
        self.kinds
            .get(&kind)
            .and_then(|window| self.by_window.get(window))
    }

    /// Net movement of one account in one window, zero when absent.
    #[must_use]
    pub fn net(&self, kind: WindowKind, account: &str) -> Decimal {
        self.get(kind)
            .and_then(|totals| totals.get(account))
            .map_or(Decimal::ZERO, |totals| totals.net_sum)
    }

    /// Returns true if the account has any posting in the window.
    #[must_use]
    pub fn has_activity(&self, kind: WindowKind, account: &str) -> bool {
        self.get(kind).is_some_and(|totals| totals.contains_key(account))
    }

    /// Number of distinct windows loaded.
    #[must_use]
    pub fn distinct_windows(&self) -> usize {
        self.by_window.len()
    }
}
