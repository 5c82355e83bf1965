//! Account snapshot types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Top-level ledger category of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RootType {
    /// Revenue accounts.
    Income,
    /// Cost and expense accounts.
    Expense,
    /// Balance sheet assets.
    Asset,
    /// Balance sheet liabilities.
    Liability,
    /// Owner's equity.
    Equity,
}

impl RootType {
    /// Every root type, in ledger order.
    pub const ALL: [Self; 5] = [
        Self::Income,
        Self::Expense,
        Self::Asset,
        Self::Liability,
        Self::Equity,
    ];

    /// Returns the canonical label stored in the ledger.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
            Self::Asset => "Asset",
            Self::Liability => "Liability",
            Self::Equity => "Equity",
        }
    }

    /// Income and expense accounts are the only ones a P&L report shows.
    #[must_use]
    pub const fn is_profit_and_loss(self) -> bool {
        matches!(self, Self::Income | Self::Expense)
    }
}

impl fmt::Display for RootType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a root type label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown root type: {0}")]
pub struct UnknownRootType(pub String);

impl FromStr for RootType {
    type Err = UnknownRootType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|root| root.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRootType(s.to_string()))
    }
}

/// Read-only snapshot of a general-ledger account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Owning company.
    pub company: String,
    /// Root type.
    pub root_type: RootType,
    /// Free-text sub-classification (e.g. "Direct Expense").
    pub account_type: String,
    /// Externally assigned report class label.
    pub report_class: Option<String>,
    /// Parent account code.
    pub parent_account: Option<String>,
    /// Non-leaf marker.
    pub is_group: bool,
    /// Own "include in gross" flag (not yet inherited).
    pub include_in_gross: bool,
    /// Nested-set left key.
    pub lft: i32,
    /// Nested-set right key.
    pub rgt: i32,
    /// Disabled accounts never appear in reports.
    pub disabled: bool,
}

impl Account {
    /// Report class with surrounding whitespace removed; `None` when blank.
    #[must_use]
    pub fn report_class(&self) -> Option<&str> {
        self.report_class
            .as_deref()
            .map(str::trim)
            .filter(|class| !class.is_empty())
    }

    /// Returns true if this account should receive a metric row.
    #[must_use]
    pub fn is_reportable(&self) -> bool {
        !self.is_group && !self.disabled && self.root_type.is_profit_and_loss()
    }
}
