//! `SeaORM` entities for the report tables.

pub mod accounts;
pub mod budget_accounts;
pub mod budgets;
pub mod companies;
pub mod cost_centers;
pub mod fiscal_years;
pub mod gl_entries;
pub mod report_class_directives;
