//! DuckDB connection wrapper owning the dashboard's data source.
//!
//! A [`Connection`] is opened once, from a `DATABASE_URL`-style location, and
//! lives as long as the [`Dashboard`](crate::Dashboard) that owns it:
//! - `:memory:` opens an empty in-memory database (tests, demos)
//! - `postgres://` / `postgresql://` attaches a PostgreSQL database read-only
//!   through DuckDB's postgres extension
//! - anything else is a DuckDB database file, opened read-only

use crate::config;
use crate::error::{DashboardError, Result};
use duckdb::{types::ValueRef, AccessMode, Config, Connection as DuckDbConnection};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

// ---------------------------------------------------------------------------
// DataSource
// ---------------------------------------------------------------------------

/// Parsed form of a data source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Memory,
    File(PathBuf),
    Postgres(String),
}

impl DataSource {
    /// Classify a data source location string.
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(DashboardError::Config("empty data source location".into()));
        }
        if url == ":memory:" {
            return Ok(Self::Memory);
        }
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            return Ok(Self::Postgres(url.to_string()));
        }
        let path = url.strip_prefix("duckdb://").unwrap_or(url);
        Ok(Self::File(PathBuf::from(path)))
    }
}

impl fmt::Display for DataSource {
    /// Renders the location with credentials masked, for logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, ":memory:"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Postgres(url) => {
                // query parameters may carry a password or sslkey path
                let base = url.split(|c| c == '?' || c == '#').next().unwrap_or_default();
                match base.rsplit_once('@') {
                    Some((_, host)) => write!(f, "postgres://***@{}", host),
                    None => write!(f, "{}", base),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Connection
// ---------------------------------------------------------------------------

/// Owns a DuckDB connection to the record source.
pub struct Connection {
    conn: DuckDbConnection,
    source: DataSource,
}

impl Connection {
    /// Open the data source named by `url`.
    ///
    /// Fails when the location cannot be reached; callers at startup treat
    /// this as fatal.
    pub fn open(url: &str) -> Result<Self> {
        let source = DataSource::parse(url)?;
        let conn = match &source {
            DataSource::Memory => DuckDbConnection::open_in_memory()?,
            DataSource::File(path) => {
                if !path.exists() {
                    return Err(DashboardError::DataSource(format!(
                        "database file {} does not exist",
                        path.display()
                    )));
                }
                let flags = Config::default().access_mode(AccessMode::ReadOnly)?;
                DuckDbConnection::open_with_flags(path, flags)?
            }
            DataSource::Postgres(pg_url) => {
                let conn = DuckDbConnection::open_in_memory()?;
                conn.execute_batch(&format!(
                    "INSTALL postgres; LOAD postgres; \
                     ATTACH '{}' AS {} (TYPE POSTGRES, READ_ONLY); \
                     USE {};",
                    pg_url.replace('\'', "''"),
                    config::POSTGRES_ALIAS,
                    config::POSTGRES_ALIAS
                ))
                .map_err(|e| {
                    DashboardError::DataSource(format!("cannot attach {}: {}", source, e))
                })?;
                conn
            }
        };
        info!(source = %source, "opened data source");
        Ok(Self { conn, source })
    }

    /// Open an empty in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    /// The location this connection was opened from.
    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    pub fn execute(&self, sql: &str) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows_result = stmt.query([])?;

        // Column metadata is only available once the statement has run
        let column_names: Vec<String> = rows_result
            .as_ref()
            .map(|s| s.column_names().into_iter().map(|n| n.to_string()).collect())
            .unwrap_or_default();

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::with_capacity(column_names.len());
            for (i, col_name) in column_names.iter().enumerate() {
                map.insert(col_name.clone(), convert_value_ref(row.get_ref(i)?));
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(&self, sql: &str) -> Result<Vec<T>> {
        let rows = self.execute(sql)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(row.into_iter().collect());
            results.push(serde_json::from_value(value)?);
        }
        Ok(results)
    }

    /// Execute SQL and return the first column of the first row.
    ///
    /// Returns `None` if the result set is empty.
    pub fn execute_scalar(&self, sql: &str) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;

        if let Some(row) = rows.next()? {
            Ok(Some(convert_value_ref(row.get_ref(0)?)))
        } else {
            Ok(None)
        }
    }

    /// Create a DuckDB table from a newline-delimited JSON file.
    ///
    /// Only meaningful on in-memory or writable databases; used to seed
    /// fixtures and demo data.
    pub fn register_table_from_ndjson(&self, table_name: &str, ndjson_path: &str) -> Result<()> {
        let path_fwd = ndjson_path.replace('\\', "/").replace('\'', "''");
        let table = crate::sql_builder::quote_ident(table_name);
        self.conn.execute_batch(&format!(
            "DROP TABLE IF EXISTS {}; \
             CREATE TABLE {} AS SELECT * FROM read_json_auto('{}', format='newline_delimited')",
            table, table, path_fwd
        ))?;
        Ok(())
    }

    /// Access the underlying DuckDB connection for advanced usage.
    pub fn raw(&self) -> &DuckDbConnection {
        &self.conn
    }
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
///
/// Projections cast every column to VARCHAR or DOUBLE, so only scalar
/// variants need a faithful mapping.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => match i64::try_from(n) {
            Ok(i) => serde_json::Value::Number(i.into()),
            Err(_) => serde_json::Value::String(n.to_string()),
        },
        ValueRef::UTinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::USmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UBigInt(n) => serde_json::Value::Number(n.into()),
        // NaN and infinities have no JSON form and read back as missing
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => serde_json::Value::String(String::from_utf8_lossy(bytes).to_string()),
        _ => serde_json::Value::Null,
    }
}
