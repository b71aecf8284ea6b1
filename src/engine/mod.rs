//! The filter → aggregate pipeline.
//!
//! Everything here is pure over an in-memory record slice. [`run`] and
//! [`open`] are the only entry points that touch a [`RecordStore`], and each
//! reads it exactly once per call.

pub mod aggregate;
pub mod filter;
pub mod options;
pub mod stats;

use tracing::debug;

use crate::error::Result;
use crate::models::{DashboardView, Record, Selection};
use crate::store::RecordStore;

pub use options::{default_selection, filter_options};

/// Filter `records` once and derive every chart and the stats panel from
/// that single filtered set.
pub fn build_view(records: &[Record], selection: &Selection) -> DashboardView {
    let filtered = filter::apply(records, selection);
    DashboardView {
        dept_month: aggregate::dept_month_series(&filtered),
        customers: aggregate::customer_totals(&filtered),
        responsibles: aggregate::responsible_totals(&filtered),
        stats: stats::summarize(&filtered),
    }
}

/// Fetch the full row set from `store` and build the view for `selection`.
pub fn run<S: RecordStore + ?Sized>(store: &S, selection: &Selection) -> Result<DashboardView> {
    let records = store.fetch_all()?;
    let view = build_view(&records, selection);
    debug!(
        fetched = records.len(),
        matched = view.stats.count,
        "dashboard view rebuilt"
    );
    Ok(view)
}

/// Open the dashboard: one read serves both the default month and the view.
///
/// When `selection` has no months, the latest month in the data is chosen;
/// the other dimensions are kept as given. Returns the selection actually
/// applied alongside the view.
pub fn open<S: RecordStore + ?Sized>(
    store: &S,
    selection: Selection,
) -> Result<(Selection, DashboardView)> {
    let records = store.fetch_all()?;
    let selection = if selection.months.is_empty() {
        Selection {
            months: default_selection(&records).months,
            ..selection
        }
    } else {
        selection
    };
    let view = build_view(&records, &selection);
    debug!(
        fetched = records.len(),
        matched = view.stats.count,
        months = ?selection.months,
        "dashboard opened"
    );
    Ok((selection, view))
}
