//! Report assembly: classified, measured accounts in, ordered rows out.

use std::collections::BTreeMap;

use super::types::{
    ACCOUNT_INDENT, AccountRow, HEADER_INDENT, HeaderRow, ReportRow, SUB_HEADER_INDENT,
    SubHeaderRow, SummaryRow, TotalRow,
};
use crate::accounts::Account;
use crate::classify::{Classification, Section};
use crate::metrics::PeriodMetrics;

/// Group label for accounts without a report class.
pub const UNGROUPED_LABEL: &str = "Other";

/// One reportable account with its classification and figures.
#[derive(Debug, Clone)]
pub struct ReportLine<'a> {
    /// The account.
    pub account: &'a Account,
    /// Classification result.
    pub classification: Classification,
    /// Period figures.
    pub metrics: PeriodMetrics,
}

impl ReportLine<'_> {
    fn report_class(&self) -> Option<&str> {
        self.account.report_class()
    }
}

/// Report classes compare the way the classifier compares them.
fn same_class(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        (None, None) => true,
        _ => false,
    }
}

/// Builds the flat row sequence.
pub struct ReportAssembler;

impl ReportAssembler {
    /// Emits rows section by section in render order.
    ///
    /// `lines` must already be in tree pre-order; report-class groups keep
    /// the order in which their first account appears.
    #[must_use]
    pub fn assemble(lines: &[ReportLine<'_>]) -> Vec<ReportRow> {
        let mut rows = Vec::new();
        let mut section_totals = BTreeMap::new();

        for section in Section::RENDER_ORDER {
            let members: Vec<&ReportLine<'_>> = lines
                .iter()
                .filter(|line| line.classification.section == section)
                .collect();
            if members.is_empty() {
                continue;
            }

            rows.push(ReportRow::Header(HeaderRow {
                label: section.label().to_string(),
                section,
                indent: HEADER_INDENT,
            }));

            for (class, group) in group_by_report_class(&members) {
                let label = class.unwrap_or(UNGROUPED_LABEL);
                rows.push(ReportRow::SubHeader(SubHeaderRow {
                    label: label.to_string(),
                    section,
                    indent: SUB_HEADER_INDENT,
                }));
                rows.extend(
                    group
                        .iter()
                        .map(|line| ReportRow::Account(account_row(line, label))),
                );
                rows.push(ReportRow::Total(TotalRow {
                    label: total_label(label),
                    section,
                    report_class: Some(label.to_string()),
                    indent: SUB_HEADER_INDENT,
                    metrics: group.iter().map(|line| &line.metrics).sum(),
                }));
            }

            let total: PeriodMetrics = members.iter().map(|line| &line.metrics).sum();
            section_totals.insert(section, total);
            rows.push(ReportRow::Total(TotalRow {
                label: total_label(section.label()),
                section,
                report_class: None,
                indent: HEADER_INDENT,
                metrics: total,
            }));
        }

        if !section_totals.is_empty() {
            rows.extend(summary_rows(&section_totals));
        }
        rows
    }
}

fn account_row(line: &ReportLine<'_>, group_label: &str) -> AccountRow {
    AccountRow {
        account: line.account.code.clone(),
        account_name: line.account.name.clone(),
        section: line.classification.section,
        report_class: group_label.to_string(),
        is_direct: line.classification.is_direct,
        indent: ACCOUNT_INDENT,
        metrics: line.metrics,
    }
}

fn total_label(label: &str) -> String {
    format!("TOTAL {}", label.to_uppercase())
}

/// Stable grouping by first appearance. Accounts without a class form their
/// own group; the first spelling seen labels a class group.
fn group_by_report_class<'l, 'a>(
    members: &[&'l ReportLine<'a>],
) -> Vec<(Option<&'l str>, Vec<&'l ReportLine<'a>>)> {
    let mut groups: Vec<(Option<&str>, Vec<&ReportLine<'a>>)> = Vec::new();
    for &line in members {
        let class = line.report_class();
        match groups
            .iter_mut()
            .find(|(existing, _)| same_class(*existing, class))
        {
            Some((_, group)) => group.push(line),
            None => groups.push((class, vec![line])),
        }
    }
    groups
}

fn summary_rows(totals: &BTreeMap<Section, PeriodMetrics>) -> Vec<ReportRow> {
    let of = |section: Section| totals.get(&section).copied().unwrap_or_default();

    let total_revenue = of(Section::DirectRevenue) + of(Section::IndirectRevenue);
    let gross_profit = total_revenue - of(Section::CostOfSales);
    let net_profit = gross_profit - of(Section::DirectExpenses) - of(Section::IndirectExpenses);

    [
        ("Total Revenue", total_revenue),
        ("Gross Profit", gross_profit),
        ("Net Profit", net_profit),
    ]
    .into_iter()
    .map(|(label, metrics)| {
        ReportRow::Summary(SummaryRow {
            label: label.to_string(),
            indent: HEADER_INDENT,
            metrics,
        })
    })
    .collect()
}
