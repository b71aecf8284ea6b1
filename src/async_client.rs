//! Async wrapper around [`Dashboard`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every pipeline call on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! DuckDB reads the table.
//!
//! # Example
//!
//! ```no_run
//! use workorder_dash::{AsyncDashboard, Selection};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let dashboard = AsyncDashboard::builder()
//!         .database_url("dash.duckdb")
//!         .build()
//!         .await
//!         .unwrap();
//!
//!     let view = dashboard
//!         .refresh(Selection::new().months(["2024-01"]))
//!         .await
//!         .unwrap();
//!     println!("{} invoices", view.stats.count);
//! }
//! ```

use std::sync::{Arc, Mutex};

use crate::config::ColumnMap;
use crate::error::{DashboardError, Result};
use crate::models::{DashboardView, FilterOptions, Selection};
use crate::Dashboard;

// ---------------------------------------------------------------------------
// AsyncDashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncDashboard`].
#[derive(Default)]
pub struct AsyncDashboardBuilder {
    database_url: Option<String>,
    table: Option<String>,
    columns: Option<ColumnMap>,
}

impl AsyncDashboardBuilder {
    /// Set the data source location (defaults to `DATABASE_URL`).
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the source table.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Override the source column names.
    pub fn columns(mut self, columns: ColumnMap) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Build the async dashboard, opening the connection on the blocking
    /// thread pool.
    pub async fn build(self) -> Result<AsyncDashboard> {
        tokio::task::spawn_blocking(move || {
            let mut builder = Dashboard::builder();
            if let Some(url) = self.database_url {
                builder = builder.database_url(url);
            }
            if let Some(table) = self.table {
                builder = builder.table(table);
            }
            if let Some(columns) = self.columns {
                builder = builder.columns(columns);
            }
            Ok(AsyncDashboard::from_dashboard(builder.build()?))
        })
        .await
        .map_err(|e| DashboardError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncDashboard
// ---------------------------------------------------------------------------

/// Async wrapper around [`Dashboard`].
///
/// The DuckDB connection is not `Sync`, so the dashboard sits behind a
/// [`Mutex`]; concurrent refreshes queue rather than overlap.
#[derive(Clone)]
pub struct AsyncDashboard {
    inner: Arc<Mutex<Dashboard>>,
}

impl AsyncDashboard {
    /// Create a new builder for configuring the async dashboard.
    pub fn builder() -> AsyncDashboardBuilder {
        AsyncDashboardBuilder::default()
    }

    /// Wrap an already built dashboard.
    pub fn from_dashboard(dashboard: Dashboard) -> Self {
        Self {
            inner: Arc::new(Mutex::new(dashboard)),
        }
    }

    /// Run a sync dashboard operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Dashboard) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let dashboard = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = dashboard
                .lock()
                .map_err(|_| DashboardError::InvalidArgument("dashboard lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| DashboardError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Re-read all records and build the view for `selection`.
    pub async fn refresh(&self, selection: Selection) -> Result<DashboardView> {
        self.run(move |d| d.refresh(&selection)).await
    }

    /// Build the opening view from a single read of the source.
    pub async fn open(&self, selection: Selection) -> Result<(Selection, DashboardView)> {
        self.run(move |d| d.open(selection)).await
    }

    /// Distinct values available for each filter.
    pub async fn filter_options(&self) -> Result<FilterOptions> {
        self.run(|d| d.filter_options()).await
    }

    /// The selection the dashboard opens with.
    pub async fn default_selection(&self) -> Result<Selection> {
        self.run(|d| d.default_selection()).await
    }
}
