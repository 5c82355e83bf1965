//! Income statement generation.
//!
//! The service resolves periods, loads every ledger window once, classifies
//! and measures each account, and hands the results to the assembler,
//! which emits header, sub-header, account, total and summary rows.

pub mod assembler;
pub mod error;
pub mod service;
pub mod summary;
pub mod types;

#[cfg(test)]
mod tests;

pub use assembler::{ReportAssembler, ReportLine};
pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
