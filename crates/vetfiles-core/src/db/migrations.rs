//! Post-schema migrations.
//!
//! The base schema only grows through `CREATE ... IF NOT EXISTS`; column
//! additions to live databases happen here. Steps must stay safe to run
//! on every open.

use super::{Database, DbError, DbResult};

/// Apply all migration steps in order.
pub fn apply(db: &Database) -> DbResult<()> {
    add_user_schedule_column(db)?;
    Ok(())
}

/// Add `users.schedule`. SQLite has no `ADD COLUMN IF NOT EXISTS`, so a
/// "duplicate column name" error means the step already ran and is not a
/// failure.
fn add_user_schedule_column(db: &Database) -> DbResult<()> {
    match db
        .conn()
        .execute("ALTER TABLE users ADD COLUMN schedule TEXT", [])
    {
        Ok(_) => Ok(()),
        Err(e) if e.to_string().contains("duplicate column name") => Ok(()),
        Err(e) => Err(DbError::Migration(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_is_idempotent() {
        // `open_in_memory` already applied migrations once.
        let db = Database::open_in_memory().unwrap();
        assert!(apply(&db).is_ok());
        assert!(apply(&db).is_ok());
    }

    #[test]
    fn test_schedule_column_exists_after_open() {
        let db = Database::open_in_memory().unwrap();
        let count: i64 = db
            .conn()
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('users') WHERE name = 'schedule'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_other_alter_errors_are_fatal() {
        let db = Database::open_in_memory().unwrap();
        let result = db
            .conn()
            .execute("ALTER TABLE no_such_table ADD COLUMN x TEXT", []);
        assert!(result.is_err());
        assert!(!result.unwrap_err().to_string().contains("duplicate column"));
    }
}
