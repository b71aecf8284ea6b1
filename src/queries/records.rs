//! Record reads against the configured DuckDB source table.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use crate::config::ColumnMap;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::Record;
use crate::sql_builder::{quote_ident, SqlBuilder};
use crate::store::RecordStore;

/// SQL type amounts are read through: 4 fractional digits, 14 integral.
const AMOUNT_TYPE: &str = "DECIMAL(18,4)";

// ---------------------------------------------------------------------------
// RecordQuery
// ---------------------------------------------------------------------------

/// Query interface for work-order records backed by the source table.
pub struct RecordQuery<'a> {
    conn: &'a Connection,
    table: &'a str,
    columns: &'a ColumnMap,
}

impl<'a> RecordQuery<'a> {
    /// Create a new `RecordQuery` bound to the given connection and table.
    pub fn new(conn: &'a Connection, table: &'a str, columns: &'a ColumnMap) -> Self {
        Self {
            conn,
            table,
            columns,
        }
    }

    /// Read every row of the source table.
    ///
    /// Columns are cast in SQL so that integer, decimal, float, text and
    /// date typed sources all decode the same way. Numeric casts use
    /// `TRY_CAST`, so a malformed cell reads back as NULL instead of failing
    /// the whole query. Amounts travel as decimal text to stay exact.
    pub fn all(&self) -> Result<Vec<Record>> {
        let sql = SqlBuilder::new(&quote_ident(self.table))
            .select(&self.projection())
            .order_by(&["\"month\" ASC"])
            .build();

        let rows: Vec<RawRecord> = self.conn.execute_into(&sql)?;
        Ok(rows.into_iter().map(RawRecord::into_record).collect())
    }

    /// Count the rows in the source table.
    pub fn count(&self) -> Result<i64> {
        let sql = SqlBuilder::new(&quote_ident(self.table))
            .select(&["COUNT(*) AS cnt"])
            .build();

        let cnt = self
            .conn
            .execute_scalar(&sql)?
            .and_then(|v| v.as_i64())
            .unwrap_or(0);
        Ok(cnt)
    }

    fn projection(&self) -> Vec<String> {
        let c = self.columns;
        let text = |col: &str, alias: &str| format!("CAST({} AS VARCHAR) AS \"{}\"", quote_ident(col), alias);
        let number = |col: &str, alias: &str| format!("TRY_CAST({} AS DOUBLE) AS \"{}\"", quote_ident(col), alias);
        let amount = |col: &str, alias: &str| {
            format!(
                "CAST(TRY_CAST({} AS {}) AS VARCHAR) AS \"{}\"",
                quote_ident(col),
                AMOUNT_TYPE,
                alias
            )
        };
        vec![
            text(&c.month, "month"),
            text(&c.department, "department"),
            text(&c.customer, "customer"),
            text(&c.responsible, "responsible"),
            amount(&c.sum, "sum"),
            number(&c.exec_time, "exec_time"),
            number(&c.payment_time, "payment_time"),
            text(&c.payment_date, "payment_date"),
        ]
    }
}

impl RecordStore for RecordQuery<'_> {
    fn fetch_all(&self) -> Result<Vec<Record>> {
        self.all()
    }
}

// ---------------------------------------------------------------------------
// RawRecord: row as it comes back from DuckDB
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawRecord {
    month: Option<String>,
    department: Option<String>,
    customer: Option<String>,
    responsible: Option<String>,
    sum: Option<String>,
    exec_time: Option<f64>,
    payment_time: Option<f64>,
    payment_date: Option<String>,
}

impl RawRecord {
    /// NULL text cells become empty strings and a NULL amount counts as zero,
    /// so every row lands in exactly one group of each projection.
    fn into_record(self) -> Record {
        let payment_date = self.payment_date.as_deref().and_then(|raw| {
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                warn!(value = raw, "unparsable payment date, treating invoice as unpaid");
            }
            parsed
        });

        Record {
            month: self.month.unwrap_or_default(),
            department: self.department.unwrap_or_default(),
            customer: self.customer.unwrap_or_default(),
            responsible: self.responsible.unwrap_or_default(),
            sum: self.sum.as_deref().map(parse_amount).unwrap_or_default(),
            exec_time: self.exec_time,
            payment_time: self.payment_time,
            payment_date,
        }
    }
}

/// Parse the VARCHAR rendering of an amount cast to [`AMOUNT_TYPE`].
///
/// Trailing zeros are dropped. Text that is not a decimal counts as zero.
pub fn parse_amount(raw: &str) -> Decimal {
    match Decimal::from_str(raw.trim()) {
        Ok(d) => d.normalize(),
        Err(_) => {
            warn!(value = raw, "unparsable amount, counting it as zero");
            Decimal::ZERO
        }
    }
}

/// Parse the VARCHAR rendering of a DATE, TIMESTAMP or TIMESTAMPTZ cell.
///
/// Zoned values are normalized to UTC. Blank strings are treated as missing
/// without a warning.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    // %.f also matches an absent fraction
    const FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z")
                .ok()
                .map(|dt| dt.naive_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
