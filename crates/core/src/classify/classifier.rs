//! Account classifier.

use super::directives::ReportClassDirectives;
use super::rules::RuleTable;
use super::types::{Category, Classification};
use crate::accounts::{Account, AccountTree, RootType};

/// The facts classification looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountFacts<'a> {
    /// Root type.
    pub root_type: RootType,
    /// Free-text account type.
    pub account_type: &'a str,
    /// Trimmed report class, `None` when blank.
    pub report_class: Option<&'a str>,
    /// Include-in-gross, inherited from ancestors.
    pub include_in_gross: bool,
}

impl<'a> AccountFacts<'a> {
    /// Reads the facts of an account, resolving inherited flags in the tree.
    #[must_use]
    pub fn of(account: &'a Account, tree: &AccountTree) -> Self {
        Self {
            root_type: account.root_type,
            account_type: &account.account_type,
            report_class: account.report_class(),
            include_in_gross: tree.include_in_gross(&account.code),
        }
    }
}

/// Classifies accounts with a rule table and directive map.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: RuleTable,
    directives: ReportClassDirectives,
}

impl Classifier {
    /// Creates a classifier.
    #[must_use]
    pub fn new(rules: RuleTable, directives: ReportClassDirectives) -> Self {
        Self { rules, directives }
    }

    /// Hospitality rules with the given directives.
    #[must_use]
    pub fn hospitality(directives: ReportClassDirectives) -> Self {
        Self::new(RuleTable::hospitality(), directives)
    }

    /// Classifies one account. Never fails: when no rule matches, income
    /// falls back to Indirect Revenue and everything else to Indirect
    /// Expenses.
    #[must_use]
    pub fn classify(&self, facts: &AccountFacts<'_>) -> Classification {
        match self.rules.first_match(facts, &self.directives) {
            Some(rule) => Classification::new(rule.category, rule.name),
            None if facts.root_type == RootType::Income => {
                Classification::new(Category::IndirectRevenue, "fallback")
            }
            None => Classification::new(Category::IndirectExpenses, "fallback"),
        }
    }

    /// Classifies an account from the tree.
    #[must_use]
    pub fn classify_account(&self, account: &Account, tree: &AccountTree) -> Classification {
        self.classify(&AccountFacts::of(account, tree))
    }

    /// Directive map in use.
    #[must_use]
    pub fn directives(&self) -> &ReportClassDirectives {
        &self.directives
    }
}
