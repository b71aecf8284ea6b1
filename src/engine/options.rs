use std::collections::BTreeSet;

use crate::format::{chronological_key, month_label, Period};
use crate::models::{FilterOptions, MonthOption, Record, Selection};

/// Distinct values per dimension for the filter dropdowns.
///
/// Months are chronological and carry their calendar label; the other
/// dimensions are sorted by name.
pub fn filter_options(records: &[Record]) -> FilterOptions {
    let mut months: Vec<&str> = records
        .iter()
        .map(|r| r.month.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    months.sort_by(|a, b| chronological_key(a).cmp(&chronological_key(b)));

    FilterOptions {
        months: months
            .into_iter()
            .map(|m| MonthOption {
                value: m.to_string(),
                label: month_label(m),
            })
            .collect(),
        departments: distinct(records, |r| r.department.as_str()),
        customers: distinct(records, |r| r.customer.as_str()),
        responsibles: distinct(records, |r| r.responsible.as_str()),
    }
}

fn distinct<'r>(records: &'r [Record], field: impl Fn(&'r Record) -> &'r str) -> Vec<String> {
    records
        .iter()
        .map(field)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// The selection a fresh dashboard opens with: the latest month only.
///
/// Valid periods always win over malformed keys.
pub fn default_selection(records: &[Record]) -> Selection {
    let latest = records
        .iter()
        .map(|r| r.month.as_str())
        .max_by_key(|m| (Period::parse(m), *m));
    match latest {
        Some(month) => Selection::new().months([month]),
        None => Selection::new(),
    }
}
