use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::{format_days, format_rub};

// ---------------------------------------------------------------------------
// UnpaidBreakdown: Unpaid amount per department, or an explicit "none"
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentAmount {
    pub department: String,
    pub amount: Decimal,
}

/// Unpaid invoices grouped by department.
///
/// `NoUnpaidInvoices` is produced whenever the filtered set has no unpaid
/// record; `ByDepartment` is never empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "departments", rename_all = "snake_case")]
pub enum UnpaidBreakdown {
    #[default]
    NoUnpaidInvoices,
    ByDepartment(Vec<DepartmentAmount>),
}

// ---------------------------------------------------------------------------
// StatsBundle: Scalar statistics over the filtered set
// ---------------------------------------------------------------------------

/// Summary statistics for the stats panel.
///
/// `None` marks a value that is undefined over the filtered set (mean or
/// median of nothing).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsBundle {
    pub count: usize,
    pub total_sum: Decimal,
    pub median_sum: Option<Decimal>,
    pub mean_sum: Option<Decimal>,
    pub mean_exec_days: Option<f64>,
    pub mean_payment_days: Option<f64>,
    pub unpaid_total: Decimal,
    pub unpaid_by_department: UnpaidBreakdown,
}

/// One labelled line of the stats panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatEntry {
    pub label: &'static str,
    pub value: String,
}

const UNDEFINED: &str = "—";

impl StatsBundle {
    /// The stats panel, one entry per line, in display order.
    pub fn entries(&self) -> Vec<StatEntry> {
        let money = |v: Option<Decimal>| v.map(format_rub).unwrap_or_else(|| UNDEFINED.to_string());
        let days = |v: Option<f64>| v.map(format_days).unwrap_or_else(|| UNDEFINED.to_string());

        let unpaid = match &self.unpaid_by_department {
            UnpaidBreakdown::NoUnpaidInvoices => "неоплаченных счетов нет".to_string(),
            UnpaidBreakdown::ByDepartment(rows) => rows
                .iter()
                .map(|r| format!("{}: {}", r.department, format_rub(r.amount)))
                .collect::<Vec<_>>()
                .join("; "),
        };

        vec![
            StatEntry {
                label: "Количество счетов",
                value: self.count.to_string(),
            },
            StatEntry {
                label: "Общая сумма",
                value: format_rub(self.total_sum),
            },
            StatEntry {
                label: "Медианное значение по сумме счёта",
                value: money(self.median_sum),
            },
            StatEntry {
                label: "Среднее значение по сумме счёта",
                value: money(self.mean_sum),
            },
            StatEntry {
                label: "Среднее значение по выполнению",
                value: days(self.mean_exec_days),
            },
            StatEntry {
                label: "Среднее время оплаты",
                value: days(self.mean_payment_days),
            },
            StatEntry {
                label: "Сумма неоплаченных счетов",
                value: format_rub(self.unpaid_total),
            },
            StatEntry {
                label: "Неоплаченные по отделам",
                value: unpaid,
            },
        ]
    }
}
