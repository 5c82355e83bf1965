//! Section and category types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Report section. Every reportable account lands in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    /// Operating revenue.
    #[serde(rename = "Direct Revenue")]
    DirectRevenue,
    /// Non-operating revenue.
    #[serde(rename = "Indirect Revenue")]
    IndirectRevenue,
    /// Cost of goods and services sold.
    #[serde(rename = "Cost of Sales")]
    CostOfSales,
    /// Operating expenses, payroll included.
    #[serde(rename = "Direct Expenses")]
    DirectExpenses,
    /// Overheads and everything unmatched.
    #[serde(rename = "Indirect Expenses")]
    IndirectExpenses,
}

impl Section {
    /// All sections in render order.
    pub const RENDER_ORDER: [Self; 5] = [
        Self::DirectRevenue,
        Self::CostOfSales,
        Self::DirectExpenses,
        Self::IndirectRevenue,
        Self::IndirectExpenses,
    ];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DirectRevenue => "Direct Revenue",
            Self::IndirectRevenue => "Indirect Revenue",
            Self::CostOfSales => "Cost of Sales",
            Self::DirectExpenses => "Direct Expenses",
            Self::IndirectExpenses => "Indirect Expenses",
        }
    }

    /// Returns true for the two revenue sections.
    #[must_use]
    pub const fn is_revenue(self) -> bool {
        matches!(self, Self::DirectRevenue | Self::IndirectRevenue)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Intermediate category a rule assigns.
///
/// Finer than `Section`: salary and payroll-burden accounts keep their own
/// category but render inside Direct Expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Direct revenue.
    DirectRevenue,
    /// Indirect revenue.
    IndirectRevenue,
    /// Cost of sales.
    CostOfSales,
    /// Salaries and wages.
    Salaries,
    /// Employer payroll costs.
    PayrollBurden,
    /// Other direct expenses.
    DirectExpenses,
    /// Administrative overheads.
    Administrative,
    /// Unmatched expenses.
    IndirectExpenses,
}

impl Category {
    /// Section the category renders in.
    #[must_use]
    pub const fn section(self) -> Section {
        match self {
            Self::DirectRevenue => Section::DirectRevenue,
            Self::IndirectRevenue => Section::IndirectRevenue,
            Self::CostOfSales => Section::CostOfSales,
            Self::Salaries | Self::PayrollBurden | Self::DirectExpenses => Section::DirectExpenses,
            Self::Administrative | Self::IndirectExpenses => Section::IndirectExpenses,
        }
    }

    /// Whether the category counts as direct.
    #[must_use]
    pub const fn is_direct(self) -> bool {
        !matches!(
            self,
            Self::IndirectRevenue | Self::Administrative | Self::IndirectExpenses
        )
    }
}

/// Result of classifying one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Section the account renders in.
    pub section: Section,
    /// Category assigned by the matching rule.
    pub category: Category,
    /// Direct flag.
    pub is_direct: bool,
    /// Name of the rule that matched.
    pub rule: &'static str,
}

impl Classification {
    /// Builds the classification for a category.
    #[must_use]
    pub const fn new(category: Category, rule: &'static str) -> Self {
        Self {
            section: category.section(),
            category,
            is_direct: category.is_direct(),
            rule,
        }
    }
}
