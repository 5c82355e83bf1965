//! Report service tests against the in-memory store.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::accounts::{Account, RootType};
use crate::classify::{Category, Classification, Section};
use crate::diagnostics::MemorySink;
use crate::fiscal::FiscalYear;
use crate::ledger::Posting;
use crate::metrics::{MetricBlock, PeriodMetrics, Ratio};
use crate::store::{BudgetLine, CostCenter, DirectiveRecord, MemoryStore};

const COMPANY: &str = "Lakeside Hotel";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2025, 7, 1)
}

fn account(code: &str, name: &str, root_type: RootType, class: Option<&str>, lft: i32) -> Account {
    Account {
        code: code.to_string(),
        name: name.to_string(),
        company: COMPANY.to_string(),
        root_type,
        account_type: String::new(),
        report_class: class.map(str::to_string),
        parent_account: None,
        is_group: false,
        include_in_gross: false,
        lft,
        rgt: lft + 1,
        disabled: false,
    }
}

fn child_of(mut account: Account, parent: &str) -> Account {
    account.parent_account = Some(parent.to_string());
    account
}

fn posting(account: &str, day: NaiveDate, debit: Decimal, credit: Decimal, cc: &str) -> Posting {
    Posting {
        company: COMPANY.to_string(),
        account: account.to_string(),
        posting_date: day,
        debit,
        credit,
        cost_center: Some(cc.to_string()),
        is_cancelled: false,
    }
}

fn cost_center(name: &str, parent: Option<&str>, is_group: bool) -> CostCenter {
    CostCenter {
        name: name.to_string(),
        company: COMPANY.to_string(),
        parent: parent.map(str::to_string),
        is_group,
        disabled: false,
    }
}

fn fiscal_year(year: i32) -> FiscalYear {
    FiscalYear {
        name: year.to_string(),
        start_date: date(year, 1, 1),
        end_date: date(year, 12, 31),
    }
}

fn hotel() -> MemoryStore {
    let mut revenue_group = account("4000", "Revenue", RootType::Income, None, 1);
    revenue_group.is_group = true;
    let mut cos_group = account("5000", "Cost of Sales", RootType::Expense, None, 10);
    cos_group.is_group = true;
    cos_group.include_in_gross = true;
    let mut disabled = account("6400", "Old Account", RootType::Expense, Some("Rent"), 23);
    disabled.disabled = true;
    let mut cancelled = posting("5100", date(2025, 6, 16), dec!(100), dec!(30), "Kitchen");
    cancelled.is_cancelled = true;

    MemoryStore::new()
        .with_fiscal_year(fiscal_year(2024))
        .with_fiscal_year(fiscal_year(2025))
        .with_cost_center(cost_center("Main", None, true))
        .with_cost_center(cost_center("F&B", Some("Main"), true))
        .with_cost_center(cost_center("Kitchen", Some("F&B"), false))
        .with_cost_center(cost_center("Bar", Some("F&B"), false))
        .with_cost_center(cost_center("Rooms", Some("Main"), false))
        .with_account(revenue_group)
        .with_account(child_of(account("4100", "Room Revenue", RootType::Income, Some("Room"), 2), "4000"))
        .with_account(child_of(account("4200", "Food Revenue", RootType::Income, Some("Food"), 3), "4000"))
        .with_account(child_of(account("4900", "Interest Income", RootType::Income, Some("Interest"), 4), "4000"))
        .with_account(cos_group)
        .with_account(child_of(account("5100", "Food Cost", RootType::Expense, Some("Food"), 11), "5000"))
        .with_account(child_of(account("5150", "Linen", RootType::Expense, Some("Housekeeping"), 12), "5000"))
        .with_account(account("6100", "Salaries", RootType::Expense, Some("Salaries"), 20))
        .with_account(account("6200", "Office Rent", RootType::Expense, Some("Office Rent"), 21))
        .with_account(account("6300", "Sundries", RootType::Expense, None, 22))
        .with_account(disabled)
        .with_posting(posting("4100", date(2025, 3, 10), dec!(0), dec!(1000), "Rooms"))
        .with_posting(posting("4100", date(2024, 3, 10), dec!(0), dec!(800), "Rooms"))
        .with_posting(posting("4200", date(2025, 6, 15), dec!(0), dec!(500), "Kitchen"))
        .with_posting(posting("4200", date(2025, 6, 20), dec!(0), dec!(70), "Bar"))
        .with_posting(posting("5100", date(2025, 6, 15), dec!(200), dec!(0), "Kitchen"))
        .with_posting(cancelled)
        .with_posting(posting("5150", date(2025, 2, 1), dec!(50), dec!(0), "Rooms"))
        .with_posting(posting("6100", date(2025, 5, 31), dec!(300), dec!(0), "Main"))
        .with_posting(posting("6200", date(2025, 4, 1), dec!(100), dec!(0), "Main"))
        .with_posting(posting("6300", date(2025, 4, 2), dec!(10), dec!(0), "Main"))
        .with_budget(BudgetLine {
            company: COMPANY.to_string(),
            fiscal_year: "2025".to_string(),
            cost_center: Some("Rooms".to_string()),
            account: "4100".to_string(),
            amount: dec!(1200),
        })
        .with_budget(BudgetLine {
            company: COMPANY.to_string(),
            fiscal_year: "2025".to_string(),
            cost_center: Some("Kitchen".to_string()),
            account: "5100".to_string(),
            amount: dec!(240),
        })
        .with_directive(DirectiveRecord {
            report_class: "Room".to_string(),
            framework: None,
            is_direct: true,
        })
}

fn filters() -> ReportFilters {
    ReportFilters::new(COMPANY, "2025")
}

fn account_row<'r>(report: &'r IncomeStatementReport, code: &str) -> &'r AccountRow {
    report
        .account_rows()
        .find(|row| row.account == code)
        .unwrap_or_else(|| panic!("no row for {code}"))
}

fn header_labels(report: &IncomeStatementReport) -> Vec<&str> {
    report
        .rows
        .iter()
        .filter_map(|row| match row {
            ReportRow::Header(h) => Some(h.label.as_str()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_sections_render_in_fixed_order() {
    let store = hotel();
    let sink = MemorySink::new();
    let report = ReportService::new(&store, &sink).build_report(filters(), today()).await;

    assert_eq!(
        header_labels(&report),
        vec![
            "Direct Revenue",
            "Cost of Sales",
            "Direct Expenses",
            "Indirect Revenue",
            "Indirect Expenses"
        ]
    );
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn test_row_sequence_of_a_section() {
    let store = hotel();
    let sink = MemorySink::new();
    let report = ReportService::new(&store, &sink).build_report(filters(), today()).await;

    let indents: Vec<(u8, &str)> = report
        .rows
        .iter()
        .take_while(|row| !matches!(row, ReportRow::Total(t) if t.report_class.is_none()))
        .map(|row| {
            let kind = match row {
                ReportRow::Header(_) => "header",
                ReportRow::SubHeader(_) => "sub_header",
                ReportRow::Account(_) => "account",
                ReportRow::Total(_) => "total",
                ReportRow::Summary(_) => "summary",
            };
            (row.indent(), kind)
        })
        .collect();

    assert_eq!(
        indents,
        vec![
            (0, "header"),
            (1, "sub_header"),
            (2, "account"),
            (1, "total"),
            (1, "sub_header"),
            (2, "account"),
            (1, "total"),
        ]
    );
}

#[tokio::test]
async fn test_group_and_disabled_accounts_are_not_reported() {
    let store = hotel();
    let sink = MemorySink::new();
    let report = ReportService::new(&store, &sink).build_report(filters(), today()).await;

    let codes: Vec<&str> = report.account_rows().map(|row| row.account.as_str()).collect();
    assert!(!codes.contains(&"4000"));
    assert!(!codes.contains(&"5000"));
    assert!(!codes.contains(&"6400"));
    assert_eq!(codes.len(), 8);
}

#[tokio::test]
async fn test_account_figures() {
    let store = hotel();
    let sink = MemorySink::new();
    let report = ReportService::new(&store, &sink).build_report(filters(), today()).await;

    let room = account_row(&report, "4100");
    assert_eq!(room.section, Section::DirectRevenue);
    assert_eq!(room.metrics.year_to_date.actual, dec!(1000));
    assert_eq!(room.metrics.year_to_date.last_year, dec!(800));
    assert_eq!(room.metrics.year_to_date.budget, dec!(1200) * dec!(181) / dec!(364));
    assert_eq!(room.metrics.forecast.last_year, dec!(800));
    assert_eq!(room.metrics.forecast.budget, dec!(1200));
    assert_eq!(
        room.metrics.forecast.actual,
        dec!(1000) + (dec!(1200) - room.metrics.year_to_date.budget)
    );
    assert_eq!(room.metrics.year_to_date.actual_vs_last_year_pct, Ratio::Value(dec!(125.0)));

    // the cancelled 100/30 posting does not count
    let food_cost = account_row(&report, "5100");
    assert_eq!(food_cost.metrics.year_to_date.actual, dec!(200));
    assert!(food_cost.metrics.year_to_date.actual_vs_last_year_pct.is_not_applicable());
}

#[tokio::test]
async fn test_inherited_include_in_gross_and_default_group() {
    let store = hotel();
    let sink = MemorySink::new();
    let report = ReportService::new(&store, &sink).build_report(filters(), today()).await;

    assert_eq!(account_row(&report, "5150").section, Section::CostOfSales);
    assert_eq!(account_row(&report, "6100").section, Section::DirectExpenses);
    let sundries = account_row(&report, "6300");
    assert_eq!(sundries.section, Section::IndirectExpenses);
    assert_eq!(sundries.report_class, "Other");
    assert!(!sundries.is_direct);
}

#[tokio::test]
async fn test_section_totals_fold_account_rows() {
    let store = hotel();
    let sink = MemorySink::new();
    let report = ReportService::new(&store, &sink)
        .build_report(ReportFilters { month: Some(6), ..filters() }, today())
        .await;

    for row in &report.rows {
        let ReportRow::Total(total) = row else { continue };
        let members: Vec<&AccountRow> = report
            .account_rows()
            .filter(|a| a.section == total.section)
            .filter(|a| total.report_class.as_ref().is_none_or(|c| &a.report_class == c))
            .collect();
        let ytd: Decimal = members.iter().map(|a| a.metrics.year_to_date.actual).sum();
        let month: Decimal = members.iter().map(|a| a.metrics.current_month.actual).sum();

        assert_eq!(total.metrics.year_to_date.actual, ytd, "{}", total.label);
        assert_eq!(total.metrics.current_month.actual, month, "{}", total.label);
        assert_eq!(
            total.metrics.year_to_date.actual_vs_budget_pct,
            Ratio::of(total.metrics.year_to_date.actual, total.metrics.year_to_date.budget)
        );
    }
}

#[tokio::test]
async fn test_summary_rows() {
    let store = hotel();
    let sink = MemorySink::new();
    let report = ReportService::new(&store, &sink).build_report(filters(), today()).await;

    let summaries: Vec<&SummaryRow> = report
        .rows
        .iter()
        .filter_map(|row| match row {
            ReportRow::Summary(s) => Some(s),
            _ => None,
        })
        .collect();
    let labels: Vec<&str> = summaries.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Total Revenue", "Gross Profit", "Net Profit"]);

    // revenue 1000 + 570, cost of sales 200 + 50, expenses 300 + 100 + 10
    assert_eq!(summaries[0].metrics.year_to_date.actual, dec!(1570));
    assert_eq!(summaries[1].metrics.year_to_date.actual, dec!(1320));
    assert_eq!(summaries[2].metrics.year_to_date.actual, dec!(910));
    assert!(matches!(report.rows.last(), Some(ReportRow::Summary(_))));
}

#[tokio::test]
async fn test_cost_center_filter_includes_children() {
    let store = hotel();
    let sink = MemorySink::new();
    let report = ReportService::new(&store, &sink)
        .build_report(
            ReportFilters {
                cost_center: Some("F&B".to_string()),
                ..filters()
            },
            today(),
        )
        .await;

    // Kitchen 500 and Bar 70 both roll up into F&B
    assert_eq!(account_row(&report, "4200").metrics.year_to_date.actual, dec!(570));
    assert_eq!(account_row(&report, "4100").metrics.year_to_date.actual, dec!(0));
    assert_eq!(account_row(&report, "5100").metrics.forecast.budget, dec!(240));
    assert_eq!(account_row(&report, "4100").metrics.forecast.budget, dec!(0));
}

#[tokio::test]
async fn test_only_with_activity() {
    let store = hotel();
    let sink = MemorySink::new();
    let report = ReportService::new(&store, &sink)
        .build_report(
            ReportFilters {
                cost_center: Some("Kitchen".to_string()),
                only_with_activity: true,
                ..filters()
            },
            today(),
        )
        .await;

    let codes: Vec<&str> = report.account_rows().map(|row| row.account.as_str()).collect();
    assert_eq!(codes, vec!["4200", "5100"]);
}

#[tokio::test]
async fn test_each_window_is_fetched_once() {
    let store = hotel();
    let sink = MemorySink::new();
    let report = ReportService::new(&store, &sink)
        .build_report(ReportFilters { month: Some(3), ..filters() }, today())
        .await;

    assert!(!report.rows.is_empty());
    assert_eq!(store.posting_queries(), 6);
    assert_eq!(account_row(&report, "4100").metrics.current_month.actual, dec!(1000));
    assert_eq!(account_row(&report, "4100").metrics.current_month.last_year, dec!(800));
    assert_eq!(account_row(&report, "4100").metrics.current_month.budget, dec!(100));
}

#[tokio::test]
async fn test_unknown_fiscal_year_yields_empty_report() {
    let store = hotel();
    let sink = MemorySink::new();
    let report = ReportService::new(&store, &sink)
        .build_report(ReportFilters::new(COMPANY, "2031"), today())
        .await;

    assert!(report.rows.is_empty());
    assert_eq!(report.filters.fiscal_year, "2031");
    let records = sink.at_stage("period");
    assert_eq!(records.len(), 1);
    assert!(records[0].message.contains("fiscal year not found: 2031"));
}

#[tokio::test]
async fn test_unknown_cost_center_yields_empty_report() {
    let store = hotel();
    let sink = MemorySink::new();
    let report = ReportService::new(&store, &sink)
        .build_report(
            ReportFilters {
                cost_center: Some("Spa".to_string()),
                ..filters()
            },
            today(),
        )
        .await;

    assert!(report.rows.is_empty());
    assert_eq!(sink.at_stage("cost_center").len(), 1);
}

#[tokio::test]
async fn test_unknown_company_yields_empty_report() {
    let store = hotel();
    let sink = MemorySink::new();
    let report = ReportService::new(&store, &sink)
        .build_report(ReportFilters::new("Nowhere Inn", "2025"), today())
        .await;

    assert!(report.rows.is_empty());
    assert_eq!(sink.at_stage("company").len(), 1);
}

#[tokio::test]
async fn test_ledger_failure_aborts_whole_report() {
    let store = hotel().with_failing_ledger();
    let sink = MemorySink::new();
    let report = ReportService::new(&store, &sink).build_report(filters(), today()).await;

    assert!(report.rows.is_empty());
    assert_eq!(sink.at_stage("ledger").len(), 1);
}

#[tokio::test]
async fn test_invalid_filters_yield_empty_report() {
    let store = hotel();
    let sink = MemorySink::new();
    let service = ReportService::new(&store, &sink);

    let bad_month = service
        .build_report(ReportFilters { month: Some(13), ..filters() }, today())
        .await;
    let backwards = service
        .build_report(
            ReportFilters {
                from_date: Some(date(2025, 6, 1)),
                to_date: Some(date(2025, 1, 1)),
                ..filters()
            },
            today(),
        )
        .await;

    assert!(bad_month.rows.is_empty());
    assert!(backwards.rows.is_empty());
    assert_eq!(sink.at_stage("filters").len(), 2);
    assert_eq!(store.posting_queries(), 0);
}

#[tokio::test]
async fn test_missing_previous_year_is_recorded() {
    let store = MemoryStore::new()
        .with_fiscal_year(fiscal_year(2025))
        .with_account(account("4100", "Room Revenue", RootType::Income, Some("Room"), 1))
        .with_posting(posting("4100", date(2025, 3, 10), dec!(0), dec!(1000), "Rooms"));
    let sink = MemorySink::new();
    let report = ReportService::new(&store, &sink).build_report(filters(), today()).await;

    assert!(!report.rows.is_empty());
    assert_eq!(sink.at_stage("period").len(), 1);
    // previous year stands in as the current year
    assert_eq!(account_row(&report, "4100").metrics.forecast.last_year, dec!(1000));
}

#[tokio::test]
async fn test_override_window_is_not_a_previous_year_fallback() {
    let store = MemoryStore::new()
        .with_fiscal_year(fiscal_year(2025))
        .with_account(account("4100", "Room Revenue", RootType::Income, Some("Room"), 1))
        .with_posting(posting("4100", date(2024, 6, 10), dec!(0), dec!(300), "Rooms"))
        .with_posting(posting("4100", date(2025, 6, 10), dec!(0), dec!(1000), "Rooms"));
    let sink = MemorySink::new();
    let report = ReportService::new(&store, &sink)
        .build_report(
            ReportFilters {
                from_date: Some(date(2025, 6, 1)),
                to_date: Some(date(2025, 6, 30)),
                ..filters()
            },
            today(),
        )
        .await;

    assert!(sink.at_stage("period").is_empty());
    assert_eq!(account_row(&report, "4100").metrics.forecast.last_year, dec!(300));
}

#[tokio::test]
async fn test_report_class_groups_follow_classifier_matching() {
    let store = MemoryStore::new()
        .with_fiscal_year(fiscal_year(2024))
        .with_fiscal_year(fiscal_year(2025))
        .with_account(account("6500", "Sundry", RootType::Expense, None, 1))
        .with_account(account("6510", "Other Charges", RootType::Expense, Some("Other"), 3))
        .with_account(account("6520", "Petty Items", RootType::Expense, Some("misc"), 5))
        .with_account(account("6530", "Small Tools", RootType::Expense, Some("Misc"), 7));
    let sink = MemorySink::new();
    let report = ReportService::new(&store, &sink).build_report(filters(), today()).await;

    let sub_headers: Vec<&str> = report
        .rows
        .iter()
        .filter_map(|row| match row {
            ReportRow::SubHeader(h) => Some(h.label.as_str()),
            _ => None,
        })
        .collect();
    // classless accounts stay apart from a class literally named "Other"
    assert_eq!(sub_headers, vec!["Other", "Other", "misc"]);

    let group_totals: Vec<Option<&str>> = report
        .rows
        .iter()
        .filter_map(|row| match row {
            ReportRow::Total(t) if t.indent == SUB_HEADER_INDENT => Some(t.report_class.as_deref()),
            _ => None,
        })
        .collect();
    assert_eq!(group_totals.len(), 3);
    assert_eq!(account_row(&report, "6530").report_class, "misc");
    assert_eq!(account_row(&report, "6500").report_class, "Other");
}

#[tokio::test]
async fn test_empty_directives_are_recorded_but_not_fatal() {
    let store = MemoryStore::new()
        .with_fiscal_year(fiscal_year(2024))
        .with_fiscal_year(fiscal_year(2025))
        .with_account(account("4100", "Room Revenue", RootType::Income, Some("Room"), 1));
    let sink = MemorySink::new();
    let report = ReportService::new(&store, &sink).build_report(filters(), today()).await;

    assert_eq!(account_row(&report, "4100").section, Section::DirectRevenue);
    let records = sink.at_stage("classify");
    assert_eq!(records.len(), 1);
    assert!(records[0].message.starts_with("Configuration error"));
}

#[tokio::test]
async fn test_default_framework_applies() {
    let store = hotel().with_directive(DirectiveRecord {
        report_class: "Interest".to_string(),
        framework: Some("USALI".to_string()),
        is_direct: true,
    });
    let sink = MemorySink::new();

    let plain = ReportService::new(&store, &sink).build_report(filters(), today()).await;
    assert_eq!(account_row(&plain, "4900").section, Section::IndirectRevenue);

    let scoped = ReportService::new(&store, &sink)
        .with_default_framework(Some("USALI".to_string()))
        .build_report(filters(), today())
        .await;
    assert_eq!(account_row(&scoped, "4900").section, Section::DirectRevenue);
    assert_eq!(scoped.filters.reporting_framework.as_deref(), Some("USALI"));
}

#[tokio::test]
async fn test_window_override_replaces_fiscal_bounds() {
    let store = hotel();
    let sink = MemorySink::new();
    let report = ReportService::new(&store, &sink)
        .build_report(
            ReportFilters {
                from_date: Some(date(2025, 6, 1)),
                to_date: Some(date(2025, 6, 30)),
                ..filters()
            },
            today(),
        )
        .await;

    assert_eq!(account_row(&report, "4100").metrics.year_to_date.actual, dec!(0));
    assert_eq!(account_row(&report, "5100").metrics.year_to_date.actual, dec!(200));
    // whole override window elapsed: ytd budget is the full annual amount
    assert_eq!(account_row(&report, "5100").metrics.year_to_date.budget, dec!(240));
}

#[tokio::test]
async fn test_summary_figures() {
    let store = hotel();
    let sink = MemorySink::new();
    let summary = ReportService::new(&store, &sink).build_summary(filters(), today()).await;

    assert_eq!(summary.summary.total.budget, dec!(1440));
    assert_eq!(summary.summary.year_to_date.actual, dec!(2230));
    assert_eq!(
        summary.summary.forecast.variance,
        summary.summary.forecast.budget - summary.summary.forecast.actual
    );
    assert_eq!(summary.filters.company, COMPANY);
}

#[tokio::test]
async fn test_rows_serialize_with_type_tags() {
    let store = hotel();
    let sink = MemorySink::new();
    let report = ReportService::new(&store, &sink).build_report(filters(), today()).await;
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["rows"][0]["type"], "header");
    assert_eq!(json["rows"][0]["label"], "Direct Revenue");
    assert_eq!(json["rows"][1]["type"], "sub_header");
    let row = &json["rows"][2];
    assert_eq!(row["type"], "account");
    assert_eq!(row["account"], "4100");
    assert_eq!(row["section"], "Direct Revenue");
    assert_eq!(row["isDirect"], true);
    assert_eq!(row["yearToDate"]["actual"], "1000");
    assert_eq!(row["currentMonth"]["actualVsBudgetPct"], "N/A");
    assert_eq!(json["filters"]["company"], COMPANY);
}

fn metrics_strategy() -> impl Strategy<Value = PeriodMetrics> {
    (0i64..1_000_000, 0i64..1_000_000, 0i64..1_000_000).prop_map(|(ly, b, a)| {
        let block = MetricBlock::new(Decimal::from(ly), Decimal::from(b), Decimal::from(a));
        PeriodMetrics {
            current_month: block,
            year_to_date: block,
            forecast: block,
        }
    })
}

fn category_strategy() -> impl Strategy<Value = Category> {
    prop::sample::select(vec![
        Category::DirectRevenue,
        Category::IndirectRevenue,
        Category::CostOfSales,
        Category::Salaries,
        Category::DirectExpenses,
        Category::IndirectExpenses,
    ])
}

proptest! {
    /// Every section total equals the sum of its account rows, with ratios
    /// recomputed from the summed amounts.
    #[test]
    fn test_section_total_consistency(
        entries in prop::collection::vec(
            (category_strategy(), prop::option::of(prop::sample::select(vec!["Room", "Food", "Rent"])), metrics_strategy()),
            1..25,
        )
    ) {
        let accounts: Vec<Account> = entries
            .iter()
            .enumerate()
            .map(|(i, (_, class, _))| {
                let lft = i32::try_from(i).unwrap();
                account(&format!("{}", 1000 + i), "Account", RootType::Expense, *class, lft)
            })
            .collect();
        let lines: Vec<ReportLine<'_>> = accounts
            .iter()
            .zip(&entries)
            .map(|(account, (category, _, metrics))| ReportLine {
                account,
                classification: Classification::new(*category, "test"),
                metrics: *metrics,
            })
            .collect();

        let rows = ReportAssembler::assemble(&lines);

        for section in Section::RENDER_ORDER {
            let expected: Decimal = lines
                .iter()
                .filter(|l| l.classification.section == section)
                .map(|l| l.metrics.year_to_date.actual)
                .sum();
            let total = rows.iter().find_map(|row| match row {
                ReportRow::Total(t) if t.section == section && t.report_class.is_none() => Some(t),
                _ => None,
            });
            match total {
                Some(t) => {
                    prop_assert_eq!(t.metrics.year_to_date.actual, expected);
                    prop_assert_eq!(
                        t.metrics.year_to_date.actual_vs_budget_pct,
                        Ratio::of(t.metrics.year_to_date.actual, t.metrics.year_to_date.budget)
                    );
                }
                None => prop_assert!(lines.iter().all(|l| l.classification.section != section)),
            }
        }
        let account_rows = rows.iter().filter(|r| matches!(r, ReportRow::Account(_))).count();
        prop_assert_eq!(account_rows, lines.len());
    }
}
