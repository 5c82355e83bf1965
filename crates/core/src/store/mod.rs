//! Read-only store contracts the report engine depends on.
//!
//! The db crate implements these traits against PostgreSQL; `MemoryStore`
//! implements them in memory for tests and embedding.

pub mod memory;
pub mod types;

use std::collections::BTreeMap;
use std::future::Future;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::accounts::{Account, RootType};
use crate::classify::ReportClassDirectives;
use crate::fiscal::{DateWindow, FiscalYear};
use crate::ledger::Posting;

pub use memory::MemoryStore;
pub use types::{BudgetLine, CostCenter, DirectiveRecord};

/// Store failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Referenced record does not exist.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// Kind of record ("fiscal year", "cost center", ...).
        entity: &'static str,
        /// Identifier that was looked up.
        key: String,
    },

    /// The backing store failed.
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Shorthand for a not-found error.
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }
}

/// Company lookups.
pub trait CompanyStore: Send + Sync {
    /// All company names, sorted.
    fn list_companies(&self) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// Returns true if the company exists.
    fn company_exists(
        &self,
        company: &str,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

/// Chart of accounts.
pub trait AccountStore: Send + Sync {
    /// Accounts of one root type, ordered by tree pre-order key (`lft`).
    ///
    /// Group and disabled accounts are included; the report decides.
    fn list_accounts(
        &self,
        company: &str,
        root_type: RootType,
    ) -> impl Future<Output = Result<Vec<Account>, StoreError>> + Send;

    /// One account by code.
    fn get_account(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Account, StoreError>> + Send;

    /// Leaf, enabled expense accounts, optionally for one company.
    fn list_expense_accounts(
        &self,
        company: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Account>, StoreError>> + Send;
}

/// Fiscal years.
pub trait FiscalYearStore: Send + Sync {
    /// One fiscal year by name.
    fn get_fiscal_year(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<FiscalYear, StoreError>> + Send;

    /// The fiscal year whose `[start, end]` contains `date`.
    fn find_fiscal_year_containing(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Option<FiscalYear>, StoreError>> + Send;

    /// All fiscal years, newest first.
    fn list_fiscal_years(&self)
    -> impl Future<Output = Result<Vec<FiscalYear>, StoreError>> + Send;
}

/// Cost center tree.
pub trait CostCenterStore: Send + Sync {
    /// The cost center and every descendant.
    fn expand_with_descendants(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// Leaf, enabled cost centers, optionally for one company.
    fn list_cost_centers(
        &self,
        company: Option<&str>,
    ) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;
}

/// General ledger.
pub trait LedgerStore: Send + Sync {
    /// Postings of a company within a window, optionally limited to cost
    /// centers. Implementations may or may not drop cancelled postings.
    fn query_postings(
        &self,
        company: &str,
        window: DateWindow,
        cost_centers: Option<&[String]>,
    ) -> impl Future<Output = Result<Vec<Posting>, StoreError>> + Send;
}

/// Submitted budgets.
pub trait BudgetStore: Send + Sync {
    /// Annual budget of one account; zero when no budget line exists.
    fn get_budget_amount(
        &self,
        fiscal_year: &str,
        account: &str,
        cost_centers: Option<&[String]>,
    ) -> impl Future<Output = Result<Decimal, StoreError>> + Send;

    /// Annual budgets of every budgeted account, summed per account.
    fn budget_amounts(
        &self,
        company: &str,
        fiscal_year: &str,
        cost_centers: Option<&[String]>,
    ) -> impl Future<Output = Result<BTreeMap<String, Decimal>, StoreError>> + Send;
}

/// Report-class directives.
pub trait DirectiveStore: Send + Sync {
    /// Directive map for a reporting framework. Framework-scoped entries
    /// override unscoped ones.
    fn directive_map(
        &self,
        framework: Option<&str>,
    ) -> impl Future<Output = Result<ReportClassDirectives, StoreError>> + Send;
}

/// Everything a report build reads.
pub trait ReportStore:
    CompanyStore + AccountStore + FiscalYearStore + CostCenterStore + LedgerStore + BudgetStore + DirectiveStore
{
}

impl<T> ReportStore for T where
    T: CompanyStore
        + AccountStore
        + FiscalYearStore
        + CostCenterStore
        + LedgerStore
        + BudgetStore
        + DirectiveStore
{
}
