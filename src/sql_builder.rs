//! SQL builder for the read-side projections of the record store.
//!
//! The dashboard never pushes filter predicates down to the data source, so
//! the builder only covers projection and ordering. Identifiers that
//! come from configuration (table and column names) are quoted with
//! [`quote_ident`]. Builder methods return `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use workorder_dash::sql_builder::{quote_ident, SqlBuilder};
//! let sql = SqlBuilder::new(&quote_ident("clear_dash_new"))
//!     .select(&["CAST(\"Sum\" AS DOUBLE) AS \"sum\""])
//!     .order_by(&["\"sum\" DESC"])
//!     .build();
//! assert_eq!(
//!     sql,
//!     "SELECT CAST(\"Sum\" AS DOUBLE) AS \"sum\"\nFROM \"clear_dash_new\"\nORDER BY \"sum\" DESC"
//! );
//! ```

/// Builds read-only SELECT statements.
pub struct SqlBuilder {
    select_cols: Vec<String>,
    from_table: String,
    order_by_cols: Vec<String>,
}

impl SqlBuilder {
    /// Create a builder targeting the given table or view.
    ///
    /// The name is used verbatim; pass it through [`quote_ident`] first when
    /// it comes from configuration.
    pub fn new(table: &str) -> Self {
        Self {
            select_cols: vec!["*".to_string()],
            from_table: table.to_string(),
            order_by_cols: Vec::new(),
        }
    }

    /// Set the columns to select (replaces the default `*`).
    pub fn select<S: AsRef<str>>(&mut self, cols: &[S]) -> &mut Self {
        self.select_cols = cols.iter().map(|c| c.as_ref().to_string()).collect();
        self
    }

    /// Add ORDER BY clauses (e.g. `"month ASC"`).
    pub fn order_by(&mut self, clauses: &[&str]) -> &mut Self {
        self.order_by_cols.extend(clauses.iter().map(|c| c.to_string()));
        self
    }

    /// Build the final SQL string.
    pub fn build(&self) -> String {
        let mut parts = vec![
            format!("SELECT {}", self.select_cols.join(", ")),
            format!("FROM {}", self.from_table),
        ];

        if !self.order_by_cols.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_by_cols.join(", ")));
        }

        parts.join("\n")
    }
}

/// Quote a possibly schema-qualified identifier for DuckDB.
///
/// `clear_dash_new` becomes `"clear_dash_new"`, `public.orders` becomes
/// `"public"."orders"`. Embedded double quotes are doubled.
pub fn quote_ident(name: &str) -> String {
    name.split('.')
        .map(|part| format!("\"{}\"", part.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(".")
}
