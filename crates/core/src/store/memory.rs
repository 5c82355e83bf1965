//! In-memory store.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{BudgetLine, CostCenter, DirectiveRecord};
use super::{
    AccountStore, BudgetStore, CompanyStore, CostCenterStore, DirectiveStore, FiscalYearStore,
    LedgerStore, StoreError,
};
use crate::accounts::{Account, RootType};
use crate::classify::ReportClassDirectives;
use crate::fiscal::{DateWindow, FiscalYear};
use crate::ledger::Posting;

/// Store backed by plain vectors, built with `with_*` calls.
///
/// Counts ledger queries so callers can check that each window is read
/// once. Postings are returned unfiltered by cancellation, like a store
/// that leaves that to the caller.
#[derive(Debug, Default)]
pub struct MemoryStore {
    companies: BTreeSet<String>,
    accounts: Vec<Account>,
    fiscal_years: Vec<FiscalYear>,
    cost_centers: Vec<CostCenter>,
    postings: Vec<Posting>,
    budgets: Vec<BudgetLine>,
    directives: Vec<DirectiveRecord>,
    fail_ledger: bool,
    posting_queries: AtomicUsize,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a company.
    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.companies.insert(company.into());
        self
    }

    /// Adds an account; its company is registered too.
    #[must_use]
    pub fn with_account(mut self, account: Account) -> Self {
        self.companies.insert(account.company.clone());
        self.accounts.push(account);
        self
    }

    /// Adds a fiscal year.
    #[must_use]
    pub fn with_fiscal_year(mut self, fiscal_year: FiscalYear) -> Self {
        self.fiscal_years.push(fiscal_year);
        self
    }

    /// Adds a cost center.
    #[must_use]
    pub fn with_cost_center(mut self, cost_center: CostCenter) -> Self {
        self.cost_centers.push(cost_center);
        self
    }

    /// Adds a ledger posting.
    #[must_use]
    pub fn with_posting(mut self, posting: Posting) -> Self {
        self.postings.push(posting);
        self
    }

    /// Adds a budget line.
    #[must_use]
    pub fn with_budget(mut self, line: BudgetLine) -> Self {
        self.budgets.push(line);
        self
    }

    /// Adds a report-class directive.
    #[must_use]
    pub fn with_directive(mut self, record: DirectiveRecord) -> Self {
        self.directives.push(record);
        self
    }

    /// Makes every ledger query fail with a backend error.
    #[must_use]
    pub fn with_failing_ledger(mut self) -> Self {
        self.fail_ledger = true;
        self
    }

    /// Number of `query_postings` calls served so far.
    pub fn posting_queries(&self) -> usize {
        self.posting_queries.load(Ordering::SeqCst)
    }

    fn budget_lines<'a>(
        &'a self,
        fiscal_year: &'a str,
        cost_centers: Option<&'a [String]>,
    ) -> impl Iterator<Item = &'a BudgetLine> + 'a {
        self.budgets.iter().filter(move |line| {
            line.fiscal_year == fiscal_year
                && cost_centers.is_none_or(|allowed| {
                    line.cost_center
                        .as_ref()
                        .is_some_and(|cc| allowed.contains(cc))
                })
        })
    }
}

impl CompanyStore for MemoryStore {
    async fn list_companies(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.companies.iter().cloned().collect())
    }

    async fn company_exists(&self, company: &str) -> Result<bool, StoreError> {
        Ok(self.companies.contains(company))
    }
}

impl AccountStore for MemoryStore {
    async fn list_accounts(
        &self,
        company: &str,
        root_type: RootType,
    ) -> Result<Vec<Account>, StoreError> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .filter(|a| a.company == company && a.root_type == root_type)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.lft.cmp(&b.lft).then_with(|| a.code.cmp(&b.code)));
        Ok(accounts)
    }

    async fn get_account(&self, code: &str) -> Result<Account, StoreError> {
        self.accounts
            .iter()
            .find(|a| a.code == code)
            .cloned()
            .ok_or_else(|| StoreError::not_found("account", code))
    }

    async fn list_expense_accounts(&self, company: Option<&str>) -> Result<Vec<Account>, StoreError> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .filter(|a| {
                a.root_type == RootType::Expense
                    && !a.is_group
                    && !a.disabled
                    && company.is_none_or(|c| a.company == c)
            })
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(accounts)
    }
}

impl FiscalYearStore for MemoryStore {
    async fn get_fiscal_year(&self, name: &str) -> Result<FiscalYear, StoreError> {
        self.fiscal_years
            .iter()
            .find(|fy| fy.name == name)
            .cloned()
            .ok_or_else(|| StoreError::not_found("fiscal year", name))
    }

    async fn find_fiscal_year_containing(
        &self,
        date: NaiveDate,
    ) -> Result<Option<FiscalYear>, StoreError> {
        Ok(self
            .fiscal_years
            .iter()
            .filter(|fy| fy.contains_date(date))
            .min_by_key(|fy| fy.start_date)
            .cloned())
    }

    async fn list_fiscal_years(&self) -> Result<Vec<FiscalYear>, StoreError> {
        let mut years = self.fiscal_years.clone();
        years.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(years)
    }
}

impl CostCenterStore for MemoryStore {
    async fn expand_with_descendants(&self, code: &str) -> Result<Vec<String>, StoreError> {
        if !self.cost_centers.iter().any(|cc| cc.name == code) {
            return Err(StoreError::not_found("cost center", code));
        }

        let mut expanded = vec![code.to_string()];
        let mut cursor = 0;
        while cursor < expanded.len() {
            let parent = expanded[cursor].clone();
            for child in self
                .cost_centers
                .iter()
                .filter(|cc| cc.parent.as_deref() == Some(parent.as_str()))
            {
                if !expanded.contains(&child.name) {
                    expanded.push(child.name.clone());
                }
            }
            cursor += 1;
        }
        Ok(expanded)
    }

    async fn list_cost_centers(&self, company: Option<&str>) -> Result<Vec<String>, StoreError> {
        let mut names: Vec<String> = self
            .cost_centers
            .iter()
            .filter(|cc| !cc.is_group && !cc.disabled && company.is_none_or(|c| cc.company == c))
            .map(|cc| cc.name.clone())
            .collect();
        names.sort();
        Ok(names)
    }
}

impl LedgerStore for MemoryStore {
    async fn query_postings(
        &self,
        company: &str,
        window: DateWindow,
        cost_centers: Option<&[String]>,
    ) -> Result<Vec<Posting>, StoreError> {
        self.posting_queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_ledger {
            return Err(StoreError::Backend("ledger unavailable".to_string()));
        }

        Ok(self
            .postings
            .iter()
            .filter(|p| {
                p.company == company
                    && window.contains(p.posting_date)
                    && cost_centers.is_none_or(|allowed| {
                        p.cost_center.as_ref().is_some_and(|cc| allowed.contains(cc))
                    })
            })
            .cloned()
            .collect())
    }
}

impl BudgetStore for MemoryStore {
    async fn get_budget_amount(
        &self,
        fiscal_year: &str,
        account: &str,
        cost_centers: Option<&[String]>,
    ) -> Result<Decimal, StoreError> {
        Ok(self
            .budget_lines(fiscal_year, cost_centers)
            .filter(|line| line.account == account)
            .map(|line| line.amount)
            .sum())
    }

    async fn budget_amounts(
        &self,
        company: &str,
        fiscal_year: &str,
        cost_centers: Option<&[String]>,
    ) -> Result<BTreeMap<String, Decimal>, StoreError> {
        let mut amounts = BTreeMap::new();
        for line in self
            .budget_lines(fiscal_year, cost_centers)
            .filter(|line| line.company == company)
        {
            *amounts.entry(line.account.clone()).or_insert(Decimal::ZERO) += line.amount;
        }
        Ok(amounts)
    }
}

impl DirectiveStore for MemoryStore {
    async fn directive_map(
        &self,
        framework: Option<&str>,
    ) -> Result<ReportClassDirectives, StoreError> {
        let mut directives = ReportClassDirectives::new();
        for record in self.directives.iter().filter(|r| r.framework.is_none()) {
            directives.insert(&record.report_class, record.is_direct);
        }
        if let Some(framework) = framework {
            for record in self
                .directives
                .iter()
                .filter(|r| r.framework.as_deref() == Some(framework))
            {
                directives.insert(&record.report_class, record.is_direct);
            }
        }
        Ok(directives)
    }
}
