//! General-ledger postings and per-window aggregation.

pub mod aggregator;
pub mod types;

pub use aggregator::{LedgerAggregator, WindowBalances};
pub use types::{AccountTotals, AccountTotalsMap, Posting};
