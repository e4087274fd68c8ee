//! Appointment database operations.

use rusqlite::types::Value;
use rusqlite::{params, OptionalExtension, Row};

use super::{push_nullable, Database, DbError, DbResult};
use crate::models::{Appointment, AppointmentKind, AppointmentPatch, AppointmentStatus};

const SELECT_APPOINTMENT: &str = r#"
    SELECT a.id, a.patient_id, a.doctor_id, a.assistant_id, a.type,
           a.start_time, a.duration_minutes, a.status,
           p.name AS patient_name, o.full_name AS owner_name,
           u1.full_name AS doctor_name, u2.full_name AS assistant_name
    FROM appointments a
    JOIN patients p ON a.patient_id = p.id
    JOIN owners o ON p.owner_id = o.id
    JOIN users u1 ON a.doctor_id = u1.id
    LEFT JOIN users u2 ON a.assistant_id = u2.id
"#;

/// Intermediate row struct for database mapping.
struct AppointmentRow {
    id: i64,
    patient_id: i64,
    doctor_id: i64,
    assistant_id: Option<i64>,
    kind: String,
    start_time: String,
    duration_minutes: i64,
    status: String,
    patient_name: Option<String>,
    owner_name: Option<String>,
    doctor_name: Option<String>,
    assistant_name: Option<String>,
}

impl AppointmentRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            patient_id: row.get(1)?,
            doctor_id: row.get(2)?,
            assistant_id: row.get(3)?,
            kind: row.get(4)?,
            start_time: row.get(5)?,
            duration_minutes: row.get(6)?,
            status: row.get(7)?,
            patient_name: row.get(8)?,
            owner_name: row.get(9)?,
            doctor_name: row.get(10)?,
            assistant_name: row.get(11)?,
        })
    }
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = DbError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        let kind = AppointmentKind::parse(&row.kind)
            .ok_or_else(|| DbError::Constraint(format!("Unknown appointment type: {}", row.kind)))?;
        let status = AppointmentStatus::parse(&row.status).ok_or_else(|| {
            DbError::Constraint(format!("Unknown appointment status: {}", row.status))
        })?;
        Ok(Appointment {
            id: row.id,
            patient_id: row.patient_id,
            doctor_id: row.doctor_id,
            assistant_id: row.assistant_id,
            kind,
            start_time: row.start_time,
            duration_minutes: row.duration_minutes,
            status,
            patient_name: row.patient_name,
            owner_name: row.owner_name,
            doctor_name: row.doctor_name,
            assistant_name: row.assistant_name,
        })
    }
}

impl Database {
    /// Insert a new appointment. New appointments always enter the
    /// calendar as 'Programada'. Returns the assigned id.
    pub fn insert_appointment(&self, appt: &Appointment) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO appointments
                (patient_id, doctor_id, assistant_id, type, start_time, duration_minutes, status)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'Programada')
            "#,
            params![
                appt.patient_id,
                appt.doctor_id,
                appt.assistant_id,
                appt.kind.as_str(),
                appt.start_time,
                appt.duration_minutes,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get an appointment by id, with display names.
    pub fn get_appointment(&self, id: i64) -> DbResult<Option<Appointment>> {
        let sql = format!("{} WHERE a.id = ?", SELECT_APPOINTMENT);
        self.conn
            .query_row(&sql, [id], AppointmentRow::from_row)
            .optional()?
            .map(Appointment::try_from)
            .transpose()
    }

    /// List the whole calendar in chronological order, with display names
    /// denormalized from the patient, owner, and staff tables.
    pub fn list_appointments(&self) -> DbResult<Vec<Appointment>> {
        let sql = format!("{} ORDER BY a.start_time ASC", SELECT_APPOINTMENT);
        let mut stmt = self.conn.prepare(&sql)?;

        let rows = stmt.query_map([], AppointmentRow::from_row)?;
        let mut appointments = Vec::new();
        for row in rows {
            appointments.push(row?.try_into()?);
        }
        Ok(appointments)
    }

    /// Apply a partial update. Absent fields are left untouched; joined
    /// display names are never written.
    pub fn update_appointment(&self, id: i64, patch: &AppointmentPatch) -> DbResult<bool> {
        let mut sets: Vec<(&str, Value)> = Vec::new();
        if let Some(patient_id) = patch.patient_id {
            sets.push(("patient_id", patient_id.into()));
        }
        if let Some(doctor_id) = patch.doctor_id {
            sets.push(("doctor_id", doctor_id.into()));
        }
        push_nullable(&mut sets, "assistant_id", patch.assistant_id);
        if let Some(kind) = patch.kind {
            sets.push(("type", kind.as_str().to_string().into()));
        }
        if let Some(start_time) = &patch.start_time {
            sets.push(("start_time", start_time.clone().into()));
        }
        if let Some(duration) = patch.duration_minutes {
            sets.push(("duration_minutes", duration.into()));
        }
        if let Some(status) = patch.status {
            sets.push(("status", status.as_str().to_string().into()));
        }
        self.update_by_id("appointments", sets, id)
    }

    /// Delete an appointment.
    pub fn delete_appointment(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM appointments WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}
