//! Hospitalization database operations.

use rusqlite::types::Value;
use rusqlite::{params, OptionalExtension, Row};

use super::{push_nullable, Database, DbError, DbResult};
use crate::models::{
    Hospitalization, HospitalizationCheck, HospitalizationPatch, HospitalizationStatus,
};

const SELECT_HOSPITALIZATION: &str = r#"
    SELECT h.id, h.patient_id, h.doctor_id, h.entry_date, h.reason,
           h.diagnosis_preliminary, h.alert_message, h.alert_time, h.status,
           h.treatment_plan, h.notes, h.weight_entry, h.discharge_date,
           p.name AS patient_name, u.full_name AS doctor_name
    FROM hospitalizations h
    JOIN patients p ON h.patient_id = p.id
    JOIN users u ON h.doctor_id = u.id
"#;

/// Intermediate row struct for database mapping.
struct HospitalizationRow {
    id: i64,
    patient_id: i64,
    doctor_id: i64,
    entry_date: String,
    reason: String,
    diagnosis_preliminary: String,
    alert_message: Option<String>,
    alert_time: Option<String>,
    status: String,
    treatment_plan: Option<String>,
    notes: Option<String>,
    weight_entry: Option<f64>,
    discharge_date: Option<String>,
    patient_name: Option<String>,
    doctor_name: Option<String>,
}

impl HospitalizationRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            patient_id: row.get(1)?,
            doctor_id: row.get(2)?,
            entry_date: row.get(3)?,
            reason: row.get(4)?,
            diagnosis_preliminary: row.get(5)?,
            alert_message: row.get(6)?,
            alert_time: row.get(7)?,
            status: row.get(8)?,
            treatment_plan: row.get(9)?,
            notes: row.get(10)?,
            weight_entry: row.get(11)?,
            discharge_date: row.get(12)?,
            patient_name: row.get(13)?,
            doctor_name: row.get(14)?,
        })
    }
}

impl TryFrom<HospitalizationRow> for Hospitalization {
    type Error = DbError;

    fn try_from(row: HospitalizationRow) -> Result<Self, Self::Error> {
        let status = HospitalizationStatus::parse(&row.status).ok_or_else(|| {
            DbError::Constraint(format!("Unknown hospitalization status: {}", row.status))
        })?;
        Ok(Hospitalization {
            id: row.id,
            patient_id: row.patient_id,
            doctor_id: row.doctor_id,
            entry_date: row.entry_date,
            reason: row.reason,
            diagnosis_preliminary: row.diagnosis_preliminary,
            alert_message: row.alert_message,
            alert_time: row.alert_time,
            status,
            treatment_plan: row.treatment_plan,
            notes: row.notes,
            weight_entry: row.weight_entry,
            discharge_date: row.discharge_date,
            patient_name: row.patient_name,
            doctor_name: row.doctor_name,
        })
    }
}

fn map_check(row: &Row<'_>) -> rusqlite::Result<HospitalizationCheck> {
    Ok(HospitalizationCheck {
        id: row.get(0)?,
        hospitalization_id: row.get(1)?,
        check_time: row.get(2)?,
        temperature: row.get(3)?,
        heart_rate: row.get(4)?,
        respiratory_rate: row.get(5)?,
        observations: row.get(6)?,
    })
}

impl Database {
    /// Insert a new admission, returning the assigned id.
    pub fn insert_hospitalization(&self, h: &Hospitalization) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO hospitalizations (
                patient_id, doctor_id, entry_date, reason, diagnosis_preliminary,
                alert_message, alert_time, status, treatment_plan, notes, weight_entry
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                h.patient_id,
                h.doctor_id,
                h.entry_date,
                h.reason,
                h.diagnosis_preliminary,
                h.alert_message,
                h.alert_time,
                h.status.as_str(),
                h.treatment_plan,
                h.notes,
                h.weight_entry,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get an admission by id, with display names.
    pub fn get_hospitalization(&self, id: i64) -> DbResult<Option<Hospitalization>> {
        let sql = format!("{} WHERE h.id = ?", SELECT_HOSPITALIZATION);
        self.conn
            .query_row(&sql, [id], HospitalizationRow::from_row)
            .optional()?
            .map(Hospitalization::try_from)
            .transpose()
    }

    /// List all admissions, newest first, with display names.
    pub fn list_hospitalizations(&self) -> DbResult<Vec<Hospitalization>> {
        let sql = format!("{} ORDER BY h.id DESC", SELECT_HOSPITALIZATION);
        let mut stmt = self.conn.prepare(&sql)?;

        let rows = stmt.query_map([], HospitalizationRow::from_row)?;
        let mut admissions = Vec::new();
        for row in rows {
            admissions.push(row?.try_into()?);
        }
        Ok(admissions)
    }

    /// Apply a partial update. Absent fields are left untouched.
    pub fn update_hospitalization(&self, id: i64, patch: &HospitalizationPatch) -> DbResult<bool> {
        let mut sets: Vec<(&str, Value)> = Vec::new();
        if let Some(patient_id) = patch.patient_id {
            sets.push(("patient_id", patient_id.into()));
        }
        if let Some(doctor_id) = patch.doctor_id {
            sets.push(("doctor_id", doctor_id.into()));
        }
        if let Some(entry_date) = &patch.entry_date {
            sets.push(("entry_date", entry_date.clone().into()));
        }
        if let Some(reason) = &patch.reason {
            sets.push(("reason", reason.clone().into()));
        }
        if let Some(diagnosis) = &patch.diagnosis_preliminary {
            sets.push(("diagnosis_preliminary", diagnosis.clone().into()));
        }
        push_nullable(&mut sets, "alert_message", patch.alert_message.clone());
        push_nullable(&mut sets, "alert_time", patch.alert_time.clone());
        if let Some(status) = patch.status {
            sets.push(("status", status.as_str().to_string().into()));
        }
        push_nullable(&mut sets, "treatment_plan", patch.treatment_plan.clone());
        push_nullable(&mut sets, "notes", patch.notes.clone());
        push_nullable(&mut sets, "weight_entry", patch.weight_entry);
        push_nullable(&mut sets, "discharge_date", patch.discharge_date.clone());
        self.update_by_id("hospitalizations", sets, id)
    }

    /// Delete an admission.
    pub fn delete_hospitalization(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM hospitalizations WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Record a vitals check for an admission, returning the assigned id.
    pub fn insert_hospitalization_check(&self, check: &HospitalizationCheck) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO hospitalization_checks (
                hospitalization_id, check_time, temperature, heart_rate,
                respiratory_rate, observations
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                check.hospitalization_id,
                check.check_time,
                check.temperature,
                check.heart_rate,
                check.respiratory_rate,
                check.observations,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// List the vitals checks for one admission, most recent first.
    pub fn list_hospitalization_checks(
        &self,
        hospitalization_id: i64,
    ) -> DbResult<Vec<HospitalizationCheck>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, hospitalization_id, check_time, temperature,
                   heart_rate, respiratory_rate, observations
            FROM hospitalization_checks
            WHERE hospitalization_id = ?
            ORDER BY check_time DESC
            "#,
        )?;

        let rows = stmt.query_map([hospitalization_id], map_check)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{hash_password, Owner, Patient, StaffRole, StaffUser};

    fn setup_db() -> (Database, i64, i64) {
        let db = Database::open_in_memory().unwrap();
        let owner_id = db
            .insert_owner(&Owner::new("1-2345-6789".into(), "Carlos Gómez".into()))
            .unwrap();
        let patient_id = db
            .insert_patient(&Patient::new(owner_id, "Luna".into(), "Canino".into()))
            .unwrap();
        let mut doctor =
            StaffUser::new("2-2222-2222".into(), "Dr. Pérez".into(), StaffRole::Doctor);
        doctor.password_hash = hash_password("x");
        let doctor_id = db.insert_user(&doctor).unwrap();
        (db, patient_id, doctor_id)
    }

    #[test]
    fn test_admit_and_get() {
        let (db, patient_id, doctor_id) = setup_db();

        let mut h = Hospitalization::new(patient_id, doctor_id, "Parvovirus".into());
        h.diagnosis_preliminary = "Deshidratación severa".into();
        h.weight_entry = Some(12.4);
        let id = db.insert_hospitalization(&h).unwrap();

        let retrieved = db.get_hospitalization(id).unwrap().unwrap();
        assert_eq!(retrieved.reason, "Parvovirus");
        assert_eq!(retrieved.status, HospitalizationStatus::Observacion);
        assert_eq!(retrieved.patient_name.as_deref(), Some("Luna"));
        assert_eq!(retrieved.doctor_name.as_deref(), Some("Dr. Pérez"));
    }

    #[test]
    fn test_status_change_and_discharge() {
        let (db, patient_id, doctor_id) = setup_db();
        let id = db
            .insert_hospitalization(&Hospitalization::new(
                patient_id,
                doctor_id,
                "Fractura".into(),
            ))
            .unwrap();

        let patch = HospitalizationPatch {
            status: Some(HospitalizationStatus::Alta),
            discharge_date: Some(Some("2024-03-20T15:00:00".into())),
            ..Default::default()
        };
        assert!(db.update_hospitalization(id, &patch).unwrap());

        let retrieved = db.get_hospitalization(id).unwrap().unwrap();
        assert_eq!(retrieved.status, HospitalizationStatus::Alta);
        assert_eq!(
            retrieved.discharge_date.as_deref(),
            Some("2024-03-20T15:00:00")
        );
        assert_eq!(retrieved.reason, "Fractura"); // untouched
    }

    #[test]
    fn test_alert_set_and_clear() {
        let (db, patient_id, doctor_id) = setup_db();
        let id = db
            .insert_hospitalization(&Hospitalization::new(
                patient_id,
                doctor_id,
                "Observación".into(),
            ))
            .unwrap();

        let patch = HospitalizationPatch {
            alert_message: Some(Some("Administrar suero".into())),
            alert_time: Some(Some("14:30".into())),
            ..Default::default()
        };
        db.update_hospitalization(id, &patch).unwrap();
        let retrieved = db.get_hospitalization(id).unwrap().unwrap();
        assert_eq!(retrieved.alert_time.as_deref(), Some("14:30"));

        let patch = HospitalizationPatch {
            alert_message: Some(None),
            alert_time: Some(None),
            ..Default::default()
        };
        db.update_hospitalization(id, &patch).unwrap();
        let retrieved = db.get_hospitalization(id).unwrap().unwrap();
        assert!(retrieved.alert_time.is_none());
        assert!(retrieved.alert_message.is_none());
    }

    #[test]
    fn test_checks_listed_most_recent_first() {
        let (db, patient_id, doctor_id) = setup_db();
        let id = db
            .insert_hospitalization(&Hospitalization::new(
                patient_id,
                doctor_id,
                "Observación".into(),
            ))
            .unwrap();

        for (time, temp) in [
            ("2024-03-15T08:00:00", 38.5),
            ("2024-03-15T14:00:00", 39.1),
            ("2024-03-15T11:00:00", 38.8),
        ] {
            let mut check = HospitalizationCheck::new(id);
            check.check_time = time.into();
            check.temperature = Some(temp);
            db.insert_hospitalization_check(&check).unwrap();
        }

        let checks = db.list_hospitalization_checks(id).unwrap();
        assert_eq!(checks.len(), 3);
        assert_eq!(checks[0].check_time, "2024-03-15T14:00:00");
        assert_eq!(checks[2].check_time, "2024-03-15T08:00:00");
    }
}
