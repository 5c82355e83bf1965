//! Core P&L engine for Ledgerview.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Everything it reads comes through the store traits in [`store`].
//!
//! # Modules
//!
//! - `accounts` - Account snapshots and the account tree
//! - `fiscal` - Fiscal years and report windows
//! - `ledger` - Posting aggregation per window
//! - `classify` - Rule-driven section classification
//! - `metrics` - Per-account period figures and safe ratios
//! - `reports` - Income statement assembly
//! - `diagnostics` - Side channel for recorded failures
//! - `store` - Store contracts and an in-memory store

pub mod accounts;
pub mod classify;
pub mod diagnostics;
pub mod fiscal;
pub mod ledger;
pub mod metrics;
pub mod reports;
pub mod store;
