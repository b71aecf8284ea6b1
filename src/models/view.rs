use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::stats::StatsBundle;

// ---------------------------------------------------------------------------
// DeptMonthRow: Sum per (month, department)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeptMonthRow {
    pub month: String,
    /// Calendar label, e.g. `Декабрь 2023`.
    pub label: String,
    pub department: String,
    pub sum: Decimal,
}

// ---------------------------------------------------------------------------
// TrendPoint: Mean of department sums for one period
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: String,
    pub label: String,
    pub value: Decimal,
}

// ---------------------------------------------------------------------------
// DeptMonthSeries: Grouped series plus trend overlay
// ---------------------------------------------------------------------------

/// Department-by-month series in chronological order with one trend point
/// per period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeptMonthSeries {
    pub rows: Vec<DeptMonthRow>,
    pub trend: Vec<TrendPoint>,
}

// ---------------------------------------------------------------------------
// CustomerTotal / ResponsibleTotal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerTotal {
    pub customer: String,
    pub sum: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsibleTotal {
    pub responsible: String,
    pub sum: Decimal,
}

// ---------------------------------------------------------------------------
// DashboardView: Everything the presentation layer binds to
// ---------------------------------------------------------------------------

/// Result of one filter → aggregate pass.
///
/// Field order is fixed: series chart, customer chart, responsible chart,
/// stats panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub dept_month: DeptMonthSeries,
    pub customers: Vec<CustomerTotal>,
    pub responsibles: Vec<ResponsibleTotal>,
    pub stats: StatsBundle,
}

// ---------------------------------------------------------------------------
// FilterOptions: Dropdown contents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthOption {
    pub value: String,
    pub label: String,
}

/// Distinct, sorted values available for each filter dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub months: Vec<MonthOption>,
    pub departments: Vec<String>,
    pub customers: Vec<String>,
    pub responsibles: Vec<String>,
}
