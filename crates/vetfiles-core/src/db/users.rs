//! Staff user database operations.

use rusqlite::types::Value;
use rusqlite::{params, OptionalExtension, Row};

use super::{push_nullable, Database, DbError, DbResult};
use crate::models::{StaffRole, StaffUser, StaffUserPatch};

/// Intermediate row struct for database mapping.
struct UserRow {
    id: i64,
    cedula: String,
    full_name: String,
    email: String,
    phone: String,
    role: String,
    password_hash: String,
    created_at: i64,
    schedule: Option<String>,
}

impl UserRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            cedula: row.get(1)?,
            full_name: row.get(2)?,
            email: row.get(3)?,
            phone: row.get(4)?,
            role: row.get(5)?,
            password_hash: row.get(6)?,
            created_at: row.get(7)?,
            schedule: row.get(8)?,
        })
    }
}

impl TryFrom<UserRow> for StaffUser {
    type Error = DbError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = StaffRole::parse(&row.role)
            .ok_or_else(|| DbError::Constraint(format!("Unknown staff role: {}", row.role)))?;
        Ok(StaffUser {
            id: row.id,
            cedula: row.cedula,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            role,
            password_hash: row.password_hash,
            created_at: row.created_at,
            schedule: row.schedule,
        })
    }
}

impl Database {
    /// Insert a new staff user, returning the assigned id.
    pub fn insert_user(&self, user: &StaffUser) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO users (cedula, full_name, email, phone, role, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                user.cedula,
                user.full_name,
                user.email,
                user.phone,
                user.role.as_str(),
                user.password_hash,
                user.created_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a staff user by id.
    pub fn get_user(&self, id: i64) -> DbResult<Option<StaffUser>> {
        self.conn
            .query_row(
                r#"
                SELECT id, cedula, full_name, email, phone, role,
                       password_hash, created_at, schedule
                FROM users
                WHERE id = ?
                "#,
                [id],
                UserRow::from_row,
            )
            .optional()?
            .map(StaffUser::try_from)
            .transpose()
    }

    /// List all staff users, alphabetically.
    pub fn list_users(&self) -> DbResult<Vec<StaffUser>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, cedula, full_name, email, phone, role,
                   password_hash, created_at, schedule
            FROM users
            ORDER BY full_name ASC
            "#,
        )?;

        let rows = stmt.query_map([], UserRow::from_row)?;
        let mut users = Vec::new();
        for row in rows {
            users.push(row?.try_into()?);
        }
        Ok(users)
    }

    /// List staff users holding a given role.
    pub fn list_users_by_role(&self, role: StaffRole) -> DbResult<Vec<StaffUser>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, cedula, full_name, email, phone, role,
                   password_hash, created_at, schedule
            FROM users
            WHERE role = ?
            ORDER BY full_name ASC
            "#,
        )?;

        let rows = stmt.query_map([role.as_str()], UserRow::from_row)?;
        let mut users = Vec::new();
        for row in rows {
            users.push(row?.try_into()?);
        }
        Ok(users)
    }

    /// Apply a partial update. Absent fields are left untouched.
    pub fn update_user(&self, id: i64, patch: &StaffUserPatch) -> DbResult<bool> {
        let mut sets: Vec<(&str, Value)> = Vec::new();
        if let Some(cedula) = &patch.cedula {
            sets.push(("cedula", cedula.clone().into()));
        }
        if let Some(full_name) = &patch.full_name {
            sets.push(("full_name", full_name.clone().into()));
        }
        if let Some(email) = &patch.email {
            sets.push(("email", email.clone().into()));
        }
        if let Some(phone) = &patch.phone {
            sets.push(("phone", phone.clone().into()));
        }
        if let Some(role) = patch.role {
            sets.push(("role", role.as_str().to_string().into()));
        }
        if let Some(password_hash) = &patch.password_hash {
            sets.push(("password_hash", password_hash.clone().into()));
        }
        push_nullable(&mut sets, "schedule", patch.schedule.clone());
        self.update_by_id("users", sets, id)
    }

    /// Delete a staff user.
    pub fn delete_user(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self.conn.execute("DELETE FROM users WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}
