//! Work-order dashboard core.
//!
//! Loads invoice/work-order records from a DuckDB-reachable data source,
//! filters them by month, department, customer and responsible party, and
//! derives the three dashboard charts plus the statistics panel.
//!
//! Every refresh re-reads the full table and recomputes from scratch; no
//! state is kept between calls apart from the open connection.
//!
//! # Quick start
//!
//! ```no_run
//! use workorder_dash::{Dashboard, Selection};
//!
//! let dashboard = Dashboard::builder()
//!     .database_url("dash.duckdb")
//!     .build()
//!     .unwrap();
//!
//! let selection = Selection::new().months(["2024-01"]).departments(["Эксплуатация"]);
//! let view = dashboard.refresh(&selection).unwrap();
//! for entry in view.stats.entries() {
//!     println!("{}: {}", entry.label, entry.value);
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod connection;
pub mod engine;
pub mod error;
pub mod format;
pub mod models;
pub mod queries;
pub mod sql_builder;
pub mod store;

#[cfg(feature = "async")]
pub use async_client::AsyncDashboard;
pub use config::ColumnMap;
pub use connection::Connection;
pub use error::{DashboardError, Result};
pub use models::{DashboardView, FilterOptions, Record, Selection, StatsBundle};
pub use sql_builder::SqlBuilder;
pub use store::RecordStore;

use std::fmt;
use tracing::info;

// ---------------------------------------------------------------------------
// DashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Dashboard`].
///
/// Use [`Dashboard::builder()`] to obtain one.
pub struct DashboardBuilder {
    database_url: Option<String>,
    connection: Option<Connection>,
    table: String,
    columns: ColumnMap,
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self {
            database_url: None,
            connection: None,
            table: config::DEFAULT_TABLE.to_string(),
            columns: ColumnMap::default(),
        }
    }
}

impl DashboardBuilder {
    /// Set the data source location.
    ///
    /// If not set, it is read from the `DATABASE_URL` environment variable
    /// at build time.
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Use an already opened connection instead of opening one.
    pub fn connection(mut self, conn: Connection) -> Self {
        self.connection = Some(conn);
        self
    }

    /// Set the source table (optionally schema-qualified).
    ///
    /// Defaults to `clear_dash_new`.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Override the source column names.
    pub fn columns(mut self, columns: ColumnMap) -> Self {
        self.columns = columns;
        self
    }

    /// Open the data source and verify the table is readable.
    ///
    /// Any failure here means the dashboard has nothing to show; callers
    /// starting a process should treat it as fatal.
    pub fn build(self) -> Result<Dashboard> {
        if self.table.trim().is_empty() {
            return Err(DashboardError::InvalidArgument("table name is empty".into()));
        }

        let conn = match self.connection {
            Some(conn) => conn,
            None => {
                let url = match self.database_url {
                    Some(url) => url,
                    None => config::database_url_from_env()?,
                };
                Connection::open(&url)?
            }
        };

        let dashboard = Dashboard {
            conn,
            table: self.table,
            columns: self.columns,
        };

        let rows = dashboard.records().count().map_err(|e| {
            DashboardError::DataSource(format!("cannot read table {}: {}", dashboard.table, e))
        })?;
        info!(
            source = %dashboard.conn.source(),
            table = %dashboard.table,
            rows,
            "dashboard data source ready"
        );

        Ok(dashboard)
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// The main entry point: an owned data source connection plus the table
/// layout needed to read records from it.
///
/// Created via [`Dashboard::builder()`]. The connection is released when the
/// dashboard is dropped or [`close`](Dashboard::close)d.
pub struct Dashboard {
    conn: Connection,
    table: String,
    columns: ColumnMap,
}

impl Dashboard {
    /// Create a new builder for configuring the dashboard.
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }

    /// Access the record query interface for the source table.
    pub fn records(&self) -> queries::RecordQuery<'_> {
        queries::RecordQuery::new(&self.conn, &self.table, &self.columns)
    }

    /// Re-read all records and build the view for `selection`.
    ///
    /// A data source failure is returned as an error; the dashboard stays
    /// usable and the next refresh tries again.
    pub fn refresh(&self, selection: &Selection) -> Result<DashboardView> {
        engine::run(&self.records(), selection)
    }

    /// Build the opening view from a single read of the source.
    ///
    /// An empty month list in `selection` is replaced by the latest month.
    /// Returns the selection actually applied with its view.
    pub fn open(&self, selection: Selection) -> Result<(Selection, DashboardView)> {
        engine::open(&self.records(), selection)
    }

    /// Distinct values available for each filter, read fresh from the source.
    pub fn filter_options(&self) -> Result<FilterOptions> {
        Ok(engine::filter_options(&self.records().all()?))
    }

    /// The selection the dashboard opens with (the latest month).
    pub fn default_selection(&self) -> Result<Selection> {
        Ok(engine::default_selection(&self.records().all()?))
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    /// Return a reference to the underlying [`Connection`].
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Consume the dashboard and close its connection.
    pub fn close(self) {
        info!(source = %self.conn.source(), "closing data source");
        drop(self);
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dashboard(source={}, table={})", self.conn.source(), self.table)
    }
}
