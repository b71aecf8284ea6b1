//! Grouped projections over a filtered record set.
//!
//! Grouping goes through `BTreeMap`, so every projection starts in key order
//! (the order a SQL `GROUP BY ... ORDER BY key` would give) before any
//! chart-specific sort is applied.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::format::{chronological_key, month_label};
use crate::models::{CustomerTotal, DeptMonthRow, DeptMonthSeries, Record, ResponsibleTotal, TrendPoint};

/// Sum per (month, department), chronologically ordered, with a trend line.
pub fn dept_month_series(records: &[Record]) -> DeptMonthSeries {
    let mut groups: BTreeMap<(&str, &str), Decimal> = BTreeMap::new();
    for r in records {
        *groups.entry((r.month.as_str(), r.department.as_str())).or_default() += r.sum;
    }

    let mut rows: Vec<DeptMonthRow> = groups
        .into_iter()
        .map(|((month, department), sum)| DeptMonthRow {
            month: month.to_string(),
            label: month_label(month),
            department: department.to_string(),
            sum,
        })
        .collect();

    rows.sort_by(|a, b| {
        chronological_key(&a.month)
            .cmp(&chronological_key(&b.month))
            .then_with(|| a.department.cmp(&b.department))
    });

    let trend = trend_line(&rows);
    DeptMonthSeries { rows, trend }
}

/// Mean of the department sums sharing each label, in row order.
fn trend_line(rows: &[DeptMonthRow]) -> Vec<TrendPoint> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut acc: Vec<(&DeptMonthRow, Decimal, u32)> = Vec::new();

    for row in rows {
        match index.get(row.label.as_str()) {
            Some(&i) => {
                acc[i].1 += row.sum;
                acc[i].2 += 1;
            }
            None => {
                index.insert(&row.label, acc.len());
                acc.push((row, row.sum, 1));
            }
        }
    }

    acc.into_iter()
        .map(|(first, total, n)| TrendPoint {
            month: first.month.clone(),
            label: first.label.clone(),
            value: total / Decimal::from(n),
        })
        .collect()
}

/// Sum per customer, largest first. Ties keep customer name order.
pub fn customer_totals(records: &[Record]) -> Vec<CustomerTotal> {
    let mut groups: BTreeMap<&str, Decimal> = BTreeMap::new();
    for r in records {
        *groups.entry(r.customer.as_str()).or_default() += r.sum;
    }

    let mut rows: Vec<CustomerTotal> = groups
        .into_iter()
        .map(|(customer, sum)| CustomerTotal {
            customer: customer.to_string(),
            sum,
        })
        .collect();
    // sort_by is stable
    rows.sort_by(|a, b| b.sum.cmp(&a.sum));
    rows
}

/// Sum per responsible, in name order.
pub fn responsible_totals(records: &[Record]) -> Vec<ResponsibleTotal> {
    let mut groups: BTreeMap<&str, Decimal> = BTreeMap::new();
    for r in records {
        *groups.entry(r.responsible.as_str()).or_default() += r.sum;
    }

    groups
        .into_iter()
        .map(|(responsible, sum)| ResponsibleTotal {
            responsible: responsible.to_string(),
            sum,
        })
        .collect()
}
