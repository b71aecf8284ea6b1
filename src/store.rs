//! The record store boundary.
//!
//! The dashboard core only ever asks a store for the complete row set; it
//! never paginates and never pushes filters down. Each call is a fresh read.

use crate::error::Result;
use crate::models::Record;

/// A read-only source of work-order records.
pub trait RecordStore {
    /// Fetch every record currently in the source.
    fn fetch_all(&self) -> Result<Vec<Record>>;
}

impl RecordStore for [Record] {
    fn fetch_all(&self) -> Result<Vec<Record>> {
        Ok(self.to_vec())
    }
}

impl RecordStore for Vec<Record> {
    fn fetch_all(&self) -> Result<Vec<Record>> {
        self.as_slice().fetch_all()
    }
}
