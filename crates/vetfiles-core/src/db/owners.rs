//! Owner database operations.

use rusqlite::types::Value;
use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::{Owner, OwnerPatch};

fn map_owner(row: &Row<'_>) -> rusqlite::Result<Owner> {
    Ok(Owner {
        id: row.get(0)?,
        cedula: row.get(1)?,
        full_name: row.get(2)?,
        phone: row.get(3)?,
        email: row.get(4)?,
        address: row.get(5)?,
    })
}

impl Database {
    /// Insert a new owner, returning the assigned id.
    pub fn insert_owner(&self, owner: &Owner) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO owners (cedula, full_name, phone, email, address)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                owner.cedula,
                owner.full_name,
                owner.phone,
                owner.email,
                owner.address,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get an owner by id.
    pub fn get_owner(&self, id: i64) -> DbResult<Option<Owner>> {
        self.conn
            .query_row(
                r#"
                SELECT id, cedula, full_name, phone, email, address
                FROM owners
                WHERE id = ?
                "#,
                [id],
                map_owner,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all owners, alphabetically.
    pub fn list_owners(&self) -> DbResult<Vec<Owner>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, cedula, full_name, phone, email, address
            FROM owners
            ORDER BY full_name ASC
            "#,
        )?;

        let rows = stmt.query_map([], map_owner)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Substring match on name or cédula, for the directory search.
    pub fn match_owners(&self, query: &str, limit: usize) -> DbResult<Vec<Owner>> {
        let pattern = format!("%{}%", query);
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, cedula, full_name, phone, email, address
            FROM owners
            WHERE full_name LIKE ?1 OR cedula LIKE ?1
            ORDER BY full_name ASC
            LIMIT ?2
            "#,
        )?;

        let rows = stmt.query_map(params![pattern, limit as i64], map_owner)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Apply a partial update. Absent fields are left untouched.
    pub fn update_owner(&self, id: i64, patch: &OwnerPatch) -> DbResult<bool> {
        let mut sets: Vec<(&str, Value)> = Vec::new();
        if let Some(cedula) = &patch.cedula {
            sets.push(("cedula", cedula.clone().into()));
        }
        if let Some(full_name) = &patch.full_name {
            sets.push(("full_name", full_name.clone().into()));
        }
        if let Some(phone) = &patch.phone {
            sets.push(("phone", phone.clone().into()));
        }
        if let Some(email) = &patch.email {
            sets.push(("email", email.clone().into()));
        }
        if let Some(address) = &patch.address {
            sets.push(("address", address.clone().into()));
        }
        self.update_by_id("owners", sets, id)
    }

    /// Delete an owner.
    pub fn delete_owner(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self.conn.execute("DELETE FROM owners WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}
