use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Record: One invoice / work order
// ---------------------------------------------------------------------------

/// A single invoice or work order as read from the record store.
///
/// Amounts are exact decimals in rubles; durations are in days. A missing `payment_date` means the invoice is
/// still unpaid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Period key, `YYYY-MM`.
    pub month: String,
    pub department: String,
    pub customer: String,
    pub responsible: String,
    pub sum: Decimal,
    pub exec_time: Option<f64>,
    pub payment_time: Option<f64>,
    pub payment_date: Option<NaiveDateTime>,
}

impl Record {
    pub fn is_paid(&self) -> bool {
        self.payment_date.is_some()
    }
}

// ---------------------------------------------------------------------------
// Dimension: The four filterable record fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Month,
    Department,
    Customer,
    Responsible,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Month,
        Dimension::Department,
        Dimension::Customer,
        Dimension::Responsible,
    ];

    /// The record's value along this dimension.
    pub fn value<'r>(&self, record: &'r Record) -> &'r str {
        match self {
            Dimension::Month => &record.month,
            Dimension::Department => &record.department,
            Dimension::Customer => &record.customer,
            Dimension::Responsible => &record.responsible,
        }
    }
}

// ---------------------------------------------------------------------------
// Selection: Chosen filter values per dimension
// ---------------------------------------------------------------------------

/// Filter values chosen for each dimension.
///
/// An empty list leaves its dimension unconstrained; it never means "match
/// nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub months: Vec<String>,
    pub departments: Vec<String>,
    pub customers: Vec<String>,
    pub responsibles: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn months<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.months = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn departments<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.departments = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn customers<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.customers = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn responsibles<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.responsibles = values.into_iter().map(Into::into).collect();
        self
    }

    /// Selected values for one dimension.
    pub fn values(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Month => &self.months,
            Dimension::Department => &self.departments,
            Dimension::Customer => &self.customers,
            Dimension::Responsible => &self.responsibles,
        }
    }

    /// True when no dimension is constrained.
    pub fn is_empty(&self) -> bool {
        Dimension::ALL.iter().all(|d| self.values(*d).is_empty())
    }
}
