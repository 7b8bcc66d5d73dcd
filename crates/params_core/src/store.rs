//! Row-existence capability for database-backed rules.
//!
//! The `exists` and `unique` rules need exactly one thing from the
//! persistence layer: whether a row matching a value is present. The
//! `RowSource` trait captures that capability; implementations over a
//! real database must bind `value` and `exclude_id` as query parameters,
//! while `table` and `column` are trusted identifiers supplied by the
//! calling code.

use crate::{ParamValue, Params};
use std::collections::HashMap;
use thiserror::Error;

/// Error from a row-existence lookup.
///
/// Collaborator failures are not validation outcomes: the engine never
/// converts them into error records, they propagate to the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The queried table is not known to the source
    #[error("unknown table '{0}'")]
    UnknownTable(String),

    /// The underlying query failed
    #[error("row lookup failed on {table}.{column}: {message}")]
    QueryFailed {
        /// Table that was queried
        table: String,
        /// Column that was matched
        column: String,
        /// Driver-reported failure
        message: String,
    },
}

/// Capability to check whether a matching row exists.
pub trait RowSource {
    /// Returns whether `table` holds a row whose `column` equals `value`.
    ///
    /// When `exclude_id` is given, the row carrying that id is ignored.
    fn row_exists(
        &self,
        table: &str,
        column: &str,
        value: &ParamValue,
        exclude_id: Option<i64>,
    ) -> Result<bool, StoreError>;
}

/// In-memory row source.
///
/// Serves as test scaffolding and as a reference implementation of the
/// capability. Rows are plain parameter maps; `exclude_id` is matched
/// against an `id` column.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: HashMap<String, Vec<Params>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row into a table, creating the table if needed.
    pub fn insert_row(&mut self, table: impl Into<String>, row: Params) {
        self.tables.entry(table.into()).or_default().push(row);
    }
}

impl RowSource for MemoryStore {
    fn row_exists(
        &self,
        table: &str,
        column: &str,
        value: &ParamValue,
        exclude_id: Option<i64>,
    ) -> Result<bool, StoreError> {
        let rows = self
            .tables
            .get(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;

        Ok(rows.iter().any(|row| {
            if let Some(excluded) = exclude_id {
                if row.get("id") == Some(&ParamValue::Int(excluded)) {
                    return false;
                }
            }
            row.get(column) == Some(value)
        }))
    }
}
