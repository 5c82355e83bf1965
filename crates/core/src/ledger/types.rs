//! Ledger posting types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One general-ledger posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Company the posting belongs to.
    pub company: String,
    /// Account code.
    pub account: String,
    /// Posting date.
    pub posting_date: NaiveDate,
    /// Debit amount (>= 0).
    pub debit: Decimal,
    /// Credit amount (>= 0).
    pub credit: Decimal,
    /// Cost center tag.
    pub cost_center: Option<String>,
    /// Cancelled postings never count.
    pub is_cancelled: bool,
}

impl Posting {
    /// Signed value of the posting (debit - credit).
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// Summed movement of one account in one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTotals {
    /// Sum of debits.
    pub debit_sum: Decimal,
    /// Sum of credits.
    pub credit_sum: Decimal,
    /// `debit_sum - credit_sum`.
    pub net_sum: Decimal,
}

impl AccountTotals {
    /// Folds one posting into the totals.
    pub fn add(&mut self, posting: &Posting) {
        self.debit_sum += posting.debit;
        self.credit_sum += posting.credit;
        self.net_sum = self.debit_sum - self.credit_sum;
    }
}

/// Account code to totals, ordered by code.
pub type AccountTotalsMap = BTreeMap<String, AccountTotals>;
