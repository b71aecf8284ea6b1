//! Shared test fixtures for the dashboard integration tests.
//!
//! Provides `setup_sample_db()` which creates an in-memory DuckDB connection
//! with a small `clear_dash_new` table loaded from an NDJSON temp file, using
//! the same column names as the production table.

#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;
use workorder_dash::{Connection, Dashboard};

/// Create an in-memory `Connection` with the sample `clear_dash_new` table.
///
/// The data set spans three months and two departments:
///
/// | month   | Department     | Customer | Responsible | Sum  | paid |
/// |---------|----------------|----------|-------------|------|------|
/// | 2023-12 | Эксплуатация   | Acme     | Иванов      | 1000 | yes  |
/// | 2024-01 | Эксплуатация   | Acme     | Иванов      |  500 | no   |
/// | 2024-01 | Проектирование | Globex   | Петров      | 1500 | yes  |
/// | 2024-01 | Эксплуатация   | Initech  | Петров      | 1000 | no   |
/// | 2024-02 | Проектирование | Globex   | Сидоров     | 2000 | yes  |
pub fn setup_sample_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    register_records(&conn);
    conn
}

/// Build a [`Dashboard`] over [`setup_sample_db`].
pub fn sample_dashboard() -> Dashboard {
    Dashboard::builder()
        .connection(setup_sample_db())
        .build()
        .unwrap()
}

fn register_records(conn: &Connection) {
    let rows = vec![
        serde_json::json!({
            "month": "2023-12",
            "Department": "Эксплуатация",
            "Customer": "Acme",
            "Responsible": "Иванов",
            "Sum": 1000,
            "Exec_time": 2.0,
            "Payment_time": 5.0,
            "Payment_date": "2023-12-20"
        }),
        serde_json::json!({
            "month": "2024-01",
            "Department": "Эксплуатация",
            "Customer": "Acme",
            "Responsible": "Иванов",
            "Sum": 500,
            "Exec_time": 3.0,
            "Payment_time": null,
            "Payment_date": null
        }),
        serde_json::json!({
            "month": "2024-01",
            "Department": "Проектирование",
            "Customer": "Globex",
            "Responsible": "Петров",
            "Sum": 1500,
            "Exec_time": 5.0,
            "Payment_time": 10.0,
            "Payment_date": "2024-01-25"
        }),
        serde_json::json!({
            "month": "2024-01",
            "Department": "Эксплуатация",
            "Customer": "Initech",
            "Responsible": "Петров",
            "Sum": 1000,
            "Exec_time": 1.0,
            "Payment_time": null,
            "Payment_date": null
        }),
        serde_json::json!({
            "month": "2024-02",
            "Department": "Проектирование",
            "Customer": "Globex",
            "Responsible": "Сидоров",
            "Sum": 2000,
            "Exec_time": 4.0,
            "Payment_time": 3.0,
            "Payment_date": "2024-02-10"
        }),
    ];
    register_ndjson(conn, "clear_dash_new", &rows);
}

/// Write `rows` to a temp NDJSON file and load it as `table_name`.
pub fn register_ndjson(conn: &Connection, table_name: &str, rows: &[serde_json::Value]) {
    let mut file = NamedTempFile::new().unwrap();
    for row in rows {
        writeln!(file, "{}", serde_json::to_string(row).unwrap()).unwrap();
    }
    file.flush().unwrap();

    let path = file.path().to_str().unwrap();
    conn.register_table_from_ndjson(table_name, path).unwrap();
    // NamedTempFile is dropped here, but DuckDB has already read the data
    // into an in-memory table, so this is fine.
}
