use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{DepartmentAmount, Record, StatsBundle, UnpaidBreakdown};

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Exact mean of amounts. `None` for an empty slice.
pub fn mean_amount(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    values
        .iter()
        .sum::<Decimal>()
        .checked_div(Decimal::from(values.len()))
}

/// Median, averaging the two middle values for even lengths. `None` for an
/// empty slice.
pub fn median(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / Decimal::TWO)
    } else {
        Some(sorted[mid])
    }
}

/// Compute the stats panel over an already-filtered record set.
pub fn summarize(records: &[Record]) -> StatsBundle {
    let sums: Vec<Decimal> = records.iter().map(|r| r.sum).collect();
    let exec_days: Vec<f64> = records.iter().filter_map(|r| r.exec_time).collect();
    // An unpaid invoice has no payment time, whatever the column holds
    let payment_days: Vec<f64> = records
        .iter()
        .filter(|r| r.is_paid())
        .filter_map(|r| r.payment_time)
        .collect();

    let mut unpaid_total = Decimal::ZERO;
    let mut unpaid_by_dept: BTreeMap<&str, Decimal> = BTreeMap::new();
    for r in records.iter().filter(|r| !r.is_paid()) {
        unpaid_total += r.sum;
        *unpaid_by_dept.entry(r.department.as_str()).or_default() += r.sum;
    }

    let unpaid_by_department = if unpaid_by_dept.is_empty() {
        UnpaidBreakdown::NoUnpaidInvoices
    } else {
        UnpaidBreakdown::ByDepartment(
            unpaid_by_dept
                .into_iter()
                .map(|(department, amount)| DepartmentAmount {
                    department: department.to_string(),
                    amount,
                })
                .collect(),
        )
    };

    StatsBundle {
        count: records.len(),
        total_sum: sums.iter().sum(),
        median_sum: median(&sums),
        mean_sum: mean_amount(&sums),
        mean_exec_days: mean(&exec_days),
        mean_payment_days: mean(&payment_days),
        unpaid_total,
        unpaid_by_department,
    }
}
