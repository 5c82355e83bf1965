//! Ordered classification rules.

use super::classifier::AccountFacts;
use super::directives::ReportClassDirectives;
use super::types::Category;
use crate::accounts::RootType;

/// Hospitality revenue classes treated as direct revenue.
pub const HOSPITALITY_REVENUE_CLASSES: &[&str] = &[
    "Room",
    "Food",
    "Beverage",
    "Spa",
    "Conference",
    "Pool",
    "Gym",
    "Direct Revenue",
    "Other Revenue",
];

/// Hospitality classes treated as cost of sales.
pub const HOSPITALITY_COST_CLASSES: &[&str] =
    &["Food", "Beverage", "Room", "Other Costs", "Cost of Sales"];

/// Account types that always mean cost of sales.
pub const COST_OF_SALES_ACCOUNT_TYPES: &[&str] =
    &["Cost of Goods Sold", "Direct Expenses", "Cost of Sales"];

/// Salary keywords, matched as substrings.
pub const SALARY_KEYWORDS: &[&str] = &[
    "salary",
    "salaries",
    "wage",
    "payroll",
    "basic",
    "overtime",
    "allowance",
    "bonus",
];

/// Payroll burden keywords, matched as substrings.
pub const PAYROLL_BURDEN_KEYWORDS: &[&str] = &[
    "burden",
    "statutory",
    "employer",
    "social security",
    "provident",
    "pension",
    "ssnit",
    "gratuity",
    "severance",
    "vacation",
    "sick",
];

/// Report classes treated as direct expenses.
pub const DIRECT_EXPENSE_CLASSES: &[&str] = &[
    "Direct Expenses",
    "Operational",
    "Maintenance",
    "Utilities",
    "Supplies",
];

/// Administrative and overhead keywords, matched as substrings.
pub const ADMINISTRATIVE_KEYWORDS: &[&str] = &[
    "administrative",
    "admin",
    "overhead",
    "office",
    "marketing",
    "insurance",
    "rent",
    "depreciation",
    "amortization",
    "professional",
    "legal",
    "audit",
    "bank charges",
];

/// A single test against an account's facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Always matches.
    Always,
    /// The account or an ancestor is flagged include-in-gross.
    IncludeInGross,
    /// Account type equals one of the values (case-insensitive).
    AccountTypeIn(&'static [&'static str]),
    /// Report class equals one of the values (case-insensitive).
    ReportClassIn(&'static [&'static str]),
    /// Report class contains one of the keywords (case-insensitive).
    ReportClassContains(&'static [&'static str]),
    /// The directive map marks the report class direct.
    DirectiveDirect,
}

impl Predicate {
    /// Evaluates the predicate. A missing report class matches nothing
    /// that inspects the report class.
    #[must_use]
    pub fn matches(&self, facts: &AccountFacts<'_>, directives: &ReportClassDirectives) -> bool {
        match self {
            Self::Always => true,
            Self::IncludeInGross => facts.include_in_gross,
            Self::AccountTypeIn(values) => {
                let account_type = facts.account_type.trim();
                values.iter().any(|v| v.eq_ignore_ascii_case(account_type))
            }
            Self::ReportClassIn(values) => facts
                .report_class
                .is_some_and(|class| values.iter().any(|v| v.eq_ignore_ascii_case(class))),
            Self::ReportClassContains(keywords) => facts.report_class.is_some_and(|class| {
                let class = class.to_lowercase();
                keywords.iter().any(|k| class.contains(k))
            }),
            Self::DirectiveDirect => directives.is_direct(facts.report_class),
        }
    }
}

/// One rule: if the root type fits and any predicate matches, the
/// account gets `category`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Rule name, reported alongside the classification.
    pub name: &'static str,
    /// Root type the rule applies to; `None` applies to every root.
    pub root_type: Option<RootType>,
    /// Predicates, any of which selects the rule.
    pub any_of: Vec<Predicate>,
    /// Category assigned on match.
    pub category: Category,
}

impl Rule {
    /// Creates a rule.
    #[must_use]
    pub fn new(
        name: &'static str,
        root_type: Option<RootType>,
        any_of: Vec<Predicate>,
        category: Category,
    ) -> Self {
        Self {
            name,
            root_type,
            any_of,
            category,
        }
    }

    /// Returns true if the rule selects this account.
    #[must_use]
    pub fn matches(&self, facts: &AccountFacts<'_>, directives: &ReportClassDirectives) -> bool {
        self.root_type.is_none_or(|root| root == facts.root_type)
            && self.any_of.iter().any(|p| p.matches(facts, directives))
    }
}

/// Ordered rule list; first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Creates a table from rules in priority order.
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The built-in hospitality rule set.
    #[must_use]
    pub fn hospitality() -> Self {
        use Predicate::{
            AccountTypeIn, Always, DirectiveDirect, IncludeInGross, ReportClassContains,
            ReportClassIn,
        };

        let income = Some(RootType::Income);
        let expense = Some(RootType::Expense);

        Self::new(vec![
            Rule::new(
                "direct-revenue",
                income,
                vec![DirectiveDirect, ReportClassIn(HOSPITALITY_REVENUE_CLASSES)],
                Category::DirectRevenue,
            ),
            Rule::new("indirect-revenue", income, vec![Always], Category::IndirectRevenue),
            Rule::new(
                "cost-of-sales",
                expense,
                vec![
                    IncludeInGross,
                    AccountTypeIn(COST_OF_SALES_ACCOUNT_TYPES),
                    ReportClassIn(HOSPITALITY_COST_CLASSES),
                    DirectiveDirect,
                ],
                Category::CostOfSales,
            ),
            Rule::new(
                "salaries",
                expense,
                vec![ReportClassContains(SALARY_KEYWORDS)],
                Category::Salaries,
            ),
            Rule::new(
                "payroll-burden",
                expense,
                vec![ReportClassContains(PAYROLL_BURDEN_KEYWORDS)],
                Category::PayrollBurden,
            ),
            Rule::new(
                "direct-expenses",
                expense,
                vec![DirectiveDirect, ReportClassIn(DIRECT_EXPENSE_CLASSES)],
                Category::DirectExpenses,
            ),
            Rule::new(
                "administrative",
                expense,
                vec![ReportClassContains(ADMINISTRATIVE_KEYWORDS)],
                Category::Administrative,
            ),
            Rule::new("indirect-expenses", None, vec![Always], Category::IndirectExpenses),
        ])
    }

    /// Rules in priority order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// First rule matching the account.
    #[must_use]
    pub fn first_match(
        &self,
        facts: &AccountFacts<'_>,
        directives: &ReportClassDirectives,
    ) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(facts, directives))
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::hospitality()
    }
}
