//! Fiscal period types.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Fiscal year definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalYear {
    /// Fiscal year identifier (e.g. "2025" or "2024-2025").
    pub name: String,
    /// First day of the fiscal year.
    pub start_date: NaiveDate,
    /// Last day of the fiscal year.
    pub end_date: NaiveDate,
}

impl FiscalYear {
    /// Returns true if the given date falls within this fiscal year.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// The fiscal year as a closed window.
    #[must_use]
    pub const fn window(&self) -> DateWindow {
        DateWindow {
            from: self.start_date,
            to: self.end_date,
        }
    }
}

/// Closed date interval `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateWindow {
    /// First day, inclusive.
    pub from: NaiveDate,
    /// Last day, inclusive.
    pub to: NaiveDate,
}

impl DateWindow {
    /// Creates a window, or `None` when `from > to`.
    #[must_use]
    pub fn new(from: NaiveDate, to: NaiveDate) -> Option<Self> {
        (from <= to).then_some(Self { from, to })
    }

    /// Returns true if the date falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// Whole days between the bounds (`to - from`).
    #[must_use]
    pub fn span_days(&self) -> i64 {
        (self.to - self.from).num_days()
    }

    /// The same window one year earlier.
    ///
    /// A bound on 29 February lands on 28 February.
    #[must_use]
    pub fn shifted_back_one_year(&self) -> Self {
        Self {
            from: shift_back_one_year(self.from),
            to: shift_back_one_year(self.to),
        }
    }

    /// Calendar month `month` of `year` as a window.
    #[must_use]
    pub fn calendar_month(year: i32, month: u32) -> Option<Self> {
        let from = NaiveDate::from_ymd_opt(year, month, 1)?;
        let to = from.checked_add_months(Months::new(1))?.pred_opt()?;
        Some(Self { from, to })
    }
}

/// Moves a date back twelve calendar months, clamping to the month end.
#[must_use]
pub fn shift_back_one_year(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(12))
        .unwrap_or_else(|| date.with_year(date.year() - 1).unwrap_or(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_rejects_inverted_bounds() {
        assert!(DateWindow::new(date(2025, 2, 1), date(2025, 1, 1)).is_none());
        assert!(DateWindow::new(date(2025, 1, 1), date(2025, 1, 1)).is_some());
    }

    #[test]
    fn test_span_days_is_exclusive_difference() {
        let fy = FiscalYear {
            name: "2025".to_string(),
            start_date: date(2025, 1, 1),
            end_date: date(2025, 12, 31),
        };
        assert_eq!(fy.window().span_days(), 364);
    }

    #[test]
    fn test_leap_day_shifts_to_february_28() {
        let window = DateWindow::calendar_month(2024, 2).unwrap();
        assert_eq!(window.to, date(2024, 2, 29));
        let last_year = window.shifted_back_one_year();
        assert_eq!(last_year.from, date(2023, 2, 1));
        assert_eq!(last_year.to, date(2023, 2, 28));
    }

    #[test]
    fn test_calendar_month_december() {
        let window = DateWindow::calendar_month(2025, 12).unwrap();
        assert_eq!(window.from, date(2025, 12, 1));
        assert_eq!(window.to, date(2025, 12, 31));
        assert!(DateWindow::calendar_month(2025, 13).is_none());
    }
}
