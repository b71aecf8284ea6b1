use crate::error::{DashboardError, Result};

/// Environment variable holding the data source location.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Source table the dashboard reads from.
pub const DEFAULT_TABLE: &str = "clear_dash_new";

/// Alias under which a PostgreSQL database is attached inside DuckDB.
pub const POSTGRES_ALIAS: &str = "source";

pub const CURRENCY_SUFFIX: &str = "₽";

/// Nominative Russian month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

// ---------------------------------------------------------------------------
// ColumnMap: Source column names for each record field
// ---------------------------------------------------------------------------

/// Names of the source table columns backing each [`Record`](crate::models::Record) field.
///
/// The defaults match the `clear_dash_new` export, which mixes a lowercase
/// `month` key with capitalized measure columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub month: String,
    pub department: String,
    pub customer: String,
    pub responsible: String,
    pub sum: String,
    pub exec_time: String,
    pub payment_time: String,
    pub payment_date: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            month: "month".to_string(),
            department: "Department".to_string(),
            customer: "Customer".to_string(),
            responsible: "Responsible".to_string(),
            sum: "Sum".to_string(),
            exec_time: "Exec_time".to_string(),
            payment_time: "Payment_time".to_string(),
            payment_date: "Payment_date".to_string(),
        }
    }
}

/// Read the data source location from [`DATABASE_URL_ENV`].
///
/// Does not load `.env` itself; binaries call `dotenv` before this.
pub fn database_url_from_env() -> Result<String> {
    match std::env::var(DATABASE_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => Ok(url.trim().to_string()),
        Ok(_) => Err(DashboardError::Config(format!("{} is empty", DATABASE_URL_ENV))),
        Err(_) => Err(DashboardError::Config(format!(
            "{} is not set (add it to the environment or a .env file)",
            DATABASE_URL_ENV
        ))),
    }
}
