//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ReportError;
use crate::classify::Section;
use crate::fiscal::DateWindow;
use crate::metrics::PeriodMetrics;

/// Indent of header and section total rows.
pub const HEADER_INDENT: u8 = 0;
/// Indent of sub-header and sub-group total rows.
pub const SUB_HEADER_INDENT: u8 = 1;
/// Indent of account rows.
pub const ACCOUNT_INDENT: u8 = 2;

/// Report filters. Echoed back with every report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilters {
    /// Company name.
    pub company: String,
    /// Fiscal year name.
    pub fiscal_year: String,
    /// Cost center; descendants are included.
    #[serde(default)]
    pub cost_center: Option<String>,
    /// Selected month (1-12).
    #[serde(default)]
    pub month: Option<u32>,
    /// Reporting framework for directive lookup.
    #[serde(default)]
    pub reporting_framework: Option<String>,
    /// Start of an explicit current-year window.
    #[serde(default)]
    pub from_date: Option<NaiveDate>,
    /// End of an explicit current-year window.
    #[serde(default)]
    pub to_date: Option<NaiveDate>,
    /// Only report accounts with postings or budget in the current year.
    #[serde(default)]
    pub only_with_activity: bool,
}

impl ReportFilters {
    /// Creates filters for a company and fiscal year.
    pub fn new(company: impl Into<String>, fiscal_year: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            fiscal_year: fiscal_year.into(),
            ..Self::default()
        }
    }

    /// Checks the filters and returns the explicit window, if any.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidFilter` for a blank company or fiscal
    /// year, a month outside 1..=12, a one-sided date override, or
    /// `from_date > to_date`.
    pub fn validate(&self) -> Result<Option<DateWindow>, ReportError> {
        if self.company.trim().is_empty() {
            return Err(ReportError::InvalidFilter("company is required".to_string()));
        }
        if self.fiscal_year.trim().is_empty() {
            return Err(ReportError::InvalidFilter(
                "fiscal_year is required".to_string(),
            ));
        }
        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                return Err(ReportError::InvalidFilter(format!(
                    "month must be between 1 and 12, got {month}"
                )));
            }
        }

        match (self.from_date, self.to_date) {
            (None, None) => Ok(None),
            (Some(from), Some(to)) => DateWindow::new(from, to).map(Some).ok_or_else(|| {
                ReportError::InvalidFilter(format!("from_date {from} is after to_date {to}"))
            }),
            _ => Err(ReportError::InvalidFilter(
                "from_date and to_date must be given together".to_string(),
            )),
        }
    }
}

/// Section header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderRow {
    /// Section label.
    pub label: String,
    /// Section.
    pub section: Section,
    /// Indent level.
    pub indent: u8,
}

/// Report-class header inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubHeaderRow {
    /// Report class label.
    pub label: String,
    /// Section.
    pub section: Section,
    /// Indent level.
    pub indent: u8,
}

/// One account with its figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRow {
    /// Account code.
    pub account: String,
    /// Account display name.
    pub account_name: String,
    /// Section.
    pub section: Section,
    /// Report class group the row belongs to.
    pub report_class: String,
    /// Direct flag from classification.
    pub is_direct: bool,
    /// Indent level.
    pub indent: u8,
    /// Period figures.
    #[serde(flatten)]
    pub metrics: PeriodMetrics,
}

/// Folded figures of a report-class group or a whole section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalRow {
    /// "TOTAL ..." label.
    pub label: String,
    /// Section.
    pub section: Section,
    /// Report class for a group total; `None` for the section total.
    pub report_class: Option<String>,
    /// Indent level.
    pub indent: u8,
    /// Period figures.
    #[serde(flatten)]
    pub metrics: PeriodMetrics,
}

/// Derived line after the last section (revenue, gross and net profit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    /// Line label.
    pub label: String,
    /// Indent level.
    pub indent: u8,
    /// Period figures.
    #[serde(flatten)]
    pub metrics: PeriodMetrics,
}

/// One row of the flat report sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportRow {
    /// Section header.
    Header(HeaderRow),
    /// Report-class header.
    SubHeader(SubHeaderRow),
    /// Account figures.
    Account(AccountRow),
    /// Group or section total.
    Total(TotalRow),
    /// Revenue and profit lines.
    Summary(SummaryRow),
}

impl ReportRow {
    /// Indent level of the row.
    #[must_use]
    pub const fn indent(&self) -> u8 {
        match self {
            Self::Header(row) => row.indent,
            Self::SubHeader(row) => row.indent,
            Self::Account(row) => row.indent,
            Self::Total(row) => row.indent,
            Self::Summary(row) => row.indent,
        }
    }

    /// The account row, if this is one.
    #[must_use]
    pub const fn as_account(&self) -> Option<&AccountRow> {
        match self {
            Self::Account(row) => Some(row),
            _ => None,
        }
    }
}

/// Income statement: ordered rows plus the filters that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeStatementReport {
    /// Rows in render order; empty when the build failed.
    pub rows: Vec<ReportRow>,
    /// Filters as applied.
    pub filters: ReportFilters,
}

impl IncomeStatementReport {
    /// A report with no rows.
    #[must_use]
    pub fn empty(filters: ReportFilters) -> Self {
        Self {
            rows: Vec::new(),
            filters,
        }
    }

    /// Account rows in order.
    pub fn account_rows(&self) -> impl Iterator<Item = &AccountRow> {
        self.rows.iter().filter_map(ReportRow::as_account)
    }
}

/// Budget, actual, and variance (budget - actual) for one horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryFigures {
    /// Budget.
    pub budget: Decimal,
    /// Actual.
    pub actual: Decimal,
    /// `budget - actual`.
    pub variance: Decimal,
}

impl SummaryFigures {
    /// Builds figures and derives the variance.
    #[must_use]
    pub fn new(budget: Decimal, actual: Decimal) -> Self {
        Self {
            budget,
            actual,
            variance: budget - actual,
        }
    }
}

/// Headline totals over every account row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    /// Annual budget against actual to date.
    pub total: SummaryFigures,
    /// Year to date.
    pub year_to_date: SummaryFigures,
    /// Full-year forecast.
    pub forecast: SummaryFigures,
}

/// Summary response: headline totals plus the filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryReport {
    /// Headline totals.
    pub summary: ReportSummary,
    /// Filters as applied.
    pub filters: ReportFilters,
}
