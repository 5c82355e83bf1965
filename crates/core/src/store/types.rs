//! Records owned by the store that have no richer domain type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A node of the cost center tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenter {
    /// Cost center code.
    pub name: String,
    /// Owning company.
    pub company: String,
    /// Parent cost center.
    pub parent: Option<String>,
    /// Group (non-leaf) marker.
    pub is_group: bool,
    /// Disabled cost centers are hidden from filter lists.
    pub disabled: bool,
}

/// One budgeted amount from a submitted budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLine {
    /// Owning company.
    pub company: String,
    /// Fiscal year name.
    pub fiscal_year: String,
    /// Cost center the budget is set against.
    pub cost_center: Option<String>,
    /// Account code.
    pub account: String,
    /// Annual amount.
    pub amount: Decimal,
}

/// One report-class directive row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveRecord {
    /// Report class label.
    pub report_class: String,
    /// Reporting framework; `None` applies to every framework.
    pub framework: Option<String>,
    /// Whether the class counts as direct.
    pub is_direct: bool,
}
