//! Database layer for VetFiles.

mod schema;
mod owners;
mod patients;
mod users;
mod appointments;
mod hospitalizations;
mod records;
pub mod migrations;
pub mod seed;

pub use schema::*;
#[allow(unused_imports)]
pub use owners::*;
#[allow(unused_imports)]
pub use patients::*;
#[allow(unused_imports)]
pub use users::*;
#[allow(unused_imports)]
pub use appointments::*;
#[allow(unused_imports)]
pub use hospitalizations::*;
#[allow(unused_imports)]
pub use records::*;

use rusqlite::types::Value;
use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Migration failed: {0}")]
    Migration(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema and apply post-schema migrations.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        migrations::apply(self)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begin a transaction.
    pub fn transaction(&mut self) -> DbResult<rusqlite::Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    /// Run a dynamically built `UPDATE ... SET` against one row. The SET
    /// clause covers exactly the given column/value pairs, so absent
    /// fields stay untouched. Returns false for an empty change set.
    pub(crate) fn update_by_id(
        &self,
        table: &str,
        sets: Vec<(&str, Value)>,
        id: i64,
    ) -> DbResult<bool> {
        if sets.is_empty() {
            return Ok(false);
        }

        let clause = sets
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{} = ?{}", column, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            table,
            clause,
            sets.len() + 1
        );

        let mut values: Vec<Value> = sets.into_iter().map(|(_, value)| value).collect();
        values.push(Value::Integer(id));

        let rows_affected = self
            .conn
            .execute(&sql, rusqlite::params_from_iter(values))?;
        Ok(rows_affected > 0)
    }
}

/// Optional-column helper: `None` leaves the column out of the change
/// set, `Some(None)` writes NULL, `Some(Some(v))` writes the value.
pub(crate) fn push_nullable<T: Into<Value>>(
    sets: &mut Vec<(&str, Value)>,
    column: &'static str,
    field: Option<Option<T>>,
) {
    if let Some(inner) = field {
        let value = match inner {
            Some(v) => v.into(),
            None => Value::Null,
        };
        sets.push((column, value));
    }
}
