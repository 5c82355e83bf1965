//! Period resolution: every reporting window a report needs, derived once.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::period::{DateWindow, FiscalYear, shift_back_one_year};
use crate::reports::ReportError;
use crate::store::FiscalYearStore;

/// Named reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    /// Whole current fiscal year (or the override window).
    CurrentYear,
    /// Whole previous fiscal year.
    PreviousYear,
    /// Fiscal year start up to the YTD cutoff.
    YearToDate,
    /// Year-to-date span shifted back one year.
    YearToDateLastYear,
    /// Selected month.
    Month,
    /// Selected month one year earlier.
    MonthLastYear,
}

/// Inputs to period resolution.
#[derive(Debug, Clone)]
pub struct PeriodRequest {
    /// Fiscal year identifier.
    pub fiscal_year: String,
    /// Explicit current-year window replacing the fiscal year bounds.
    pub window_override: Option<DateWindow>,
    /// Selected month (1-12).
    pub month: Option<u32>,
    /// The date treated as "today".
    pub today: NaiveDate,
}

/// Every window a report reads, resolved from one fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPeriods {
    /// The requested fiscal year.
    pub fiscal_year: FiscalYear,
    /// The fiscal year before it (or the same one, see `previous_is_fallback`).
    pub previous_fiscal_year: FiscalYear,
    /// True when no earlier fiscal year exists and the current one stands in.
    /// Always false with an explicit window, which is shifted back instead.
    pub previous_is_fallback: bool,
    /// Current-year window.
    pub current: DateWindow,
    /// Previous-year window.
    pub previous: DateWindow,
    /// Last day counted as elapsed.
    pub ytd_cutoff: NaiveDate,
    /// False while "today" is before the current window starts.
    pub ytd_started: bool,
    /// Selected month, if any.
    pub month: Option<u32>,
    /// Selected month window.
    pub current_month: Option<DateWindow>,
    /// Selected month window one year earlier.
    pub current_month_last_year: Option<DateWindow>,
}

impl ReportPeriods {
    /// Derives all windows from already-loaded fiscal years.
    ///
    /// `previous` is the fiscal year containing the current start shifted
    /// back twelve months; `None` makes the current year stand in for it.
    pub fn derive(
        fiscal_year: FiscalYear,
        previous: Option<FiscalYear>,
        window_override: Option<DateWindow>,
        month: Option<u32>,
        today: NaiveDate,
    ) -> Result<Self, ReportError> {
        if let Some(m) = month {
            if !(1..=12).contains(&m) {
                return Err(ReportError::InvalidFilter(format!(
                    "month must be between 1 and 12, got {m}"
                )));
            }
        }

        let current = match window_override {
            Some(window) => window,
            None => DateWindow::new(fiscal_year.start_date, fiscal_year.end_date).ok_or_else(
                || {
                    ReportError::InvalidFilter(format!(
                        "fiscal year {} ends before it starts",
                        fiscal_year.name
                    ))
                },
            )?,
        };

        let previous_is_fallback = previous.is_none() && window_override.is_none();
        let previous_fiscal_year = previous.unwrap_or_else(|| fiscal_year.clone());
        let previous_window = if window_override.is_some() {
            current.shifted_back_one_year()
        } else {
            previous_fiscal_year.window()
        };

        let (ytd_cutoff, ytd_started) = if current.contains(today) {
            (today, true)
        } else if today > current.to {
            (current.to, true)
        } else {
            (current.from, false)
        };

        let current_month = month.map(|m| month_within(current, m));
        let current_month_last_year = current_month.map(|w| w.shifted_back_one_year());

        Ok(Self {
            fiscal_year,
            previous_fiscal_year,
            previous_is_fallback,
            current,
            previous: previous_window,
            ytd_cutoff,
            ytd_started,
            month,
            current_month,
            current_month_last_year,
        })
    }

    /// Year-to-date window; `None` before the year starts (zero length).
    #[must_use]
    pub fn year_to_date(&self) -> Option<DateWindow> {
        self.ytd_started.then_some(DateWindow {
            from: self.current.from,
            to: self.ytd_cutoff,
        })
    }

    /// Year-to-date window one year earlier.
    #[must_use]
    pub fn year_to_date_last_year(&self) -> Option<DateWindow> {
        self.year_to_date().map(|w| w.shifted_back_one_year())
    }

    /// Days elapsed from the window start to the YTD cutoff.
    #[must_use]
    pub fn elapsed_days(&self) -> i64 {
        (self.ytd_cutoff - self.current.from).num_days()
    }

    /// Days in the current window (`end - start`).
    #[must_use]
    pub fn total_days(&self) -> i64 {
        self.current.span_days()
    }

    /// Looks up one window by kind.
    #[must_use]
    pub fn window(&self, kind: WindowKind) -> Option<DateWindow> {
        match kind {
            WindowKind::CurrentYear => Some(self.current),
            WindowKind::PreviousYear => Some(self.previous),
            WindowKind::YearToDate => self.year_to_date(),
            WindowKind::YearToDateLastYear => self.year_to_date_last_year(),
            WindowKind::Month => self.current_month,
            WindowKind::MonthLastYear => self.current_month_last_year,
        }
    }

    /// The fixed window table, skipping windows that do not apply.
    #[must_use]
    pub fn windows(&self) -> Vec<(WindowKind, DateWindow)> {
        [
            WindowKind::CurrentYear,
            WindowKind::PreviousYear,
            WindowKind::YearToDate,
            WindowKind::YearToDateLastYear,
            WindowKind::Month,
            WindowKind::MonthLastYear,
        ]
        .into_iter()
        .filter_map(|kind| self.window(kind).map(|window| (kind, window)))
        .collect()
    }
}

/// First occurrence of calendar month `month` overlapping `window`, or the
/// month in the window's starting year when none overlaps.
fn month_within(window: DateWindow, month: u32) -> DateWindow {
    (window.from.year()..=window.to.year())
        .filter_map(|year| DateWindow::calendar_month(year, month))
        .find(|candidate| candidate.from <= window.to && candidate.to >= window.from)
        .or_else(|| DateWindow::calendar_month(window.from.year(), month))
        .unwrap_or(window)
}

/// Resolves report periods against the fiscal year store.
pub struct PeriodResolver;

impl PeriodResolver {
    /// Loads the fiscal year and its predecessor, then derives every window.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Store` with a not-found error when the fiscal
    /// year does not exist, and `ReportError::InvalidFilter` for a bad month.
    pub async fn resolve<S: FiscalYearStore>(
        store: &S,
        request: &PeriodRequest,
    ) -> Result<ReportPeriods, ReportError> {
        let fiscal_year = store.get_fiscal_year(&request.fiscal_year).await?;
        let shifted_start = shift_back_one_year(fiscal_year.start_date);
        let previous = store
            .find_fiscal_year_containing(shifted_start)
            .await?
            .filter(|candidate| candidate.name != fiscal_year.name);

        ReportPeriods::derive(
            fiscal_year,
            previous,
            request.window_override,
            request.month,
            request.today,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fy(name: &str, start: NaiveDate, end: NaiveDate) -> FiscalYear {
        FiscalYear {
            name: name.to_string(),
            start_date: start,
            end_date: end,
        }
    }

    fn fy2025() -> FiscalYear {
        fy("2025", date(2025, 1, 1), date(2025, 12, 31))
    }

    fn fy2024() -> FiscalYear {
        fy("2024", date(2024, 1, 1), date(2024, 12, 31))
    }

    #[test]
    fn test_override_window_never_falls_back() {
        let periods = ReportPeriods::derive(
            fy2025(),
            None,
            DateWindow::new(date(2025, 6, 1), date(2025, 6, 30)),
            None,
            date(2025, 7, 1),
        )
        .unwrap();
        assert!(!periods.previous_is_fallback);
        assert_eq!(periods.previous, DateWindow::new(date(2024, 6, 1), date(2024, 6, 30)).unwrap());

        let plain = ReportPeriods::derive(fy2025(), None, None, None, date(2025, 7, 1)).unwrap();
        assert!(plain.previous_is_fallback);
    }

    #[test]
    fn test_ytd_cutoff_is_today_inside_year() {
        let periods =
            ReportPeriods::derive(fy2025(), Some(fy2024()), None, None, date(2025, 7, 1)).unwrap();
        assert_eq!(periods.ytd_cutoff, date(2025, 7, 1));
        assert_eq!(periods.elapsed_days(), 181);
        assert_eq!(periods.total_days(), 364);
        assert_eq!(
            periods.year_to_date_last_year(),
            Some(DateWindow {
                from: date(2024, 1, 1),
                to: date(2024, 7, 1)
            })
        );
        assert!(!periods.previous_is_fallback);
        assert_eq!(periods.previous, fy2024().window());
    }

    #[test]
    fn test_ytd_cutoff_clamps_to_year_end() {
        let periods =
            ReportPeriods::derive(fy2025(), Some(fy2024()), None, None, date(2026, 3, 1)).unwrap();
        assert_eq!(periods.ytd_cutoff, date(2025, 12, 31));
        assert!(periods.ytd_started);
    }

    #[test]
    fn test_year_not_started_collapses_ytd() {
        let periods =
            ReportPeriods::derive(fy2025(), Some(fy2024()), None, None, date(2024, 11, 5)).unwrap();
        assert_eq!(periods.ytd_cutoff, date(2025, 1, 1));
        assert_eq!(periods.elapsed_days(), 0);
        assert_eq!(periods.year_to_date(), None);
        assert_eq!(periods.year_to_date_last_year(), None);
        assert!(
            !periods
                .windows()
                .iter()
                .any(|(kind, _)| *kind == WindowKind::YearToDate)
        );
    }

    #[test]
    fn test_missing_previous_year_falls_back_visibly() {
        let periods = ReportPeriods::derive(fy2025(), None, None, None, date(2025, 5, 1)).unwrap();
        assert!(periods.previous_is_fallback);
        assert_eq!(periods.previous_fiscal_year, fy2025());
        assert_eq!(periods.previous, periods.current);
    }

    #[test]
    fn test_month_window_and_last_year() {
        let periods =
            ReportPeriods::derive(fy2025(), Some(fy2024()), None, Some(3), date(2025, 7, 1))
                .unwrap();
        assert_eq!(
            periods.current_month,
            Some(DateWindow {
                from: date(2025, 3, 1),
                to: date(2025, 3, 31)
            })
        );
        assert_eq!(
            periods.current_month_last_year,
            Some(DateWindow {
                from: date(2024, 3, 1),
                to: date(2024, 3, 31)
            })
        );
        assert_eq!(periods.windows().len(), 6);
    }

    #[test]
    fn test_month_in_split_fiscal_year_uses_overlapping_calendar_year() {
        let split = fy("2024-2025", date(2024, 7, 1), date(2025, 6, 30));
        let periods = ReportPeriods::derive(split, None, None, Some(2), date(2025, 3, 10)).unwrap();
        assert_eq!(periods.current_month.unwrap().from, date(2025, 2, 1));
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        let err = ReportPeriods::derive(fy2025(), None, None, Some(13), date(2025, 1, 1));
        assert!(matches!(err, Err(ReportError::InvalidFilter(_))));
    }

    #[test]
    fn test_override_window_drives_ytd_and_previous() {
        let window = DateWindow::new(date(2025, 4, 1), date(2025, 9, 30)).unwrap();
        let periods =
            ReportPeriods::derive(fy2025(), Some(fy2024()), Some(window), None, date(2025, 5, 1))
                .unwrap();
        assert_eq!(periods.current, window);
        assert_eq!(periods.previous, window.shifted_back_one_year());
        assert_eq!(periods.elapsed_days(), 30);
    }
}
