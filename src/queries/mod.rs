//! Query modules for the dashboard's data source.
//!
//! Each module provides a query struct that borrows from a
//! [`Connection`](crate::connection::Connection) and exposes methods
//! returning `Result<T>` with typed payloads.

pub mod records;

pub use records::RecordQuery;
