//! Medical record database operations.

use rusqlite::types::Value;
use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::{MedicalRecord, MedicalRecordPatch};

fn map_record(row: &Row<'_>) -> rusqlite::Result<MedicalRecord> {
    Ok(MedicalRecord {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        doctor_id: row.get(2)?,
        visit_date: row.get(3)?,
        observations: row.get(4)?,
        diagnosis: row.get(5)?,
        treatment: row.get(6)?,
        file_url: row.get(7)?,
        patient_name: row.get(8)?,
        doctor_name: row.get(9)?,
    })
}

impl Database {
    /// Insert a new record, returning the assigned id.
    pub fn insert_medical_record(&self, record: &MedicalRecord) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO medical_records
                (patient_id, doctor_id, visit_date, observations, diagnosis, treatment, file_url)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                record.patient_id,
                record.doctor_id,
                record.visit_date,
                record.observations,
                record.diagnosis,
                record.treatment,
                record.file_url,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a record by id, with display names.
    pub fn get_medical_record(&self, id: i64) -> DbResult<Option<MedicalRecord>> {
        self.conn
            .query_row(
                r#"
                SELECT mr.id, mr.patient_id, mr.doctor_id, mr.visit_date,
                       mr.observations, mr.diagnosis, mr.treatment, mr.file_url,
                       p.name AS patient_name, u.full_name AS doctor_name
                FROM medical_records mr
                LEFT JOIN patients p ON mr.patient_id = p.id
                LEFT JOIN users u ON mr.doctor_id = u.id
                WHERE mr.id = ?
                "#,
                [id],
                map_record,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all records, most recent visit first, with display names.
    pub fn list_medical_records(&self) -> DbResult<Vec<MedicalRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT mr.id, mr.patient_id, mr.doctor_id, mr.visit_date,
                   mr.observations, mr.diagnosis, mr.treatment, mr.file_url,
                   p.name AS patient_name, u.full_name AS doctor_name
            FROM medical_records mr
            LEFT JOIN patients p ON mr.patient_id = p.id
            LEFT JOIN users u ON mr.doctor_id = u.id
            ORDER BY mr.visit_date DESC
            "#,
        )?;

        let rows = stmt.query_map([], map_record)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Apply a partial update. Absent fields are left untouched.
    pub fn update_medical_record(&self, id: i64, patch: &MedicalRecordPatch) -> DbResult<bool> {
        let mut sets: Vec<(&str, Value)> = Vec::new();
        if let Some(patient_id) = patch.patient_id {
            sets.push(("patient_id", patient_id.into()));
        }
        if let Some(doctor_id) = patch.doctor_id {
            sets.push(("doctor_id", doctor_id.into()));
        }
        if let Some(visit_date) = patch.visit_date {
            sets.push(("visit_date", visit_date.into()));
        }
        if let Some(observations) = &patch.observations {
            sets.push(("observations", observations.clone().into()));
        }
        if let Some(diagnosis) = &patch.diagnosis {
            sets.push(("diagnosis", diagnosis.clone().into()));
        }
        if let Some(treatment) = &patch.treatment {
            sets.push(("treatment", treatment.clone().into()));
        }
        if let Some(file_url) = &patch.file_url {
            sets.push(("file_url", file_url.clone().into()));
        }
        self.update_by_id("medical_records", sets, id)
    }

    /// Delete a record.
    pub fn delete_medical_record(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM medical_records WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
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
    fn test_insert_and_list_most_recent_first() {
        let (db, patient_id, doctor_id) = setup_db();

        for (visit, diagnosis) in [(1_700_000_000_000_i64, "Otitis"), (1_710_000_000_000, "Control")] {
            let mut record = MedicalRecord::new(patient_id, doctor_id);
            record.visit_date = visit;
            record.diagnosis = diagnosis.into();
            db.insert_medical_record(&record).unwrap();
        }

        let records = db.list_medical_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].diagnosis, "Control");
        assert_eq!(records[0].patient_name.as_deref(), Some("Luna"));
        assert_eq!(records[0].doctor_name.as_deref(), Some("Dr. Pérez"));
    }

    #[test]
    fn test_attach_file_via_patch() {
        let (db, patient_id, doctor_id) = setup_db();
        let id = db
            .insert_medical_record(&MedicalRecord::new(patient_id, doctor_id))
            .unwrap();

        let patch = MedicalRecordPatch {
            file_url: Some("https://cdn.example.com/records/abc.pdf".into()),
            ..Default::default()
        };
        assert!(db.update_medical_record(id, &patch).unwrap());

        let retrieved = db.get_medical_record(id).unwrap().unwrap();
        assert_eq!(
            retrieved.file_url,
            "https://cdn.example.com/records/abc.pdf"
        );
    }

    #[test]
    fn test_delete() {
        let (db, patient_id, doctor_id) = setup_db();
        let id = db
            .insert_medical_record(&MedicalRecord::new(patient_id, doctor_id))
            .unwrap();
        assert!(db.delete_medical_record(id).unwrap());
        assert!(db.get_medical_record(id).unwrap().is_none());
    }
}
