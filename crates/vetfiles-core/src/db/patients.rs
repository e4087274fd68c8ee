//! Patient database operations.

use rusqlite::types::Value;
use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::{Patient, PatientPatch};

fn map_patient(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        species: row.get(3)?,
        breed: row.get(4)?,
        age_months: row.get(5)?,
        weight_kg: row.get(6)?,
        owner_name: row.get(7)?,
    })
}

impl Database {
    /// Insert a new patient, returning the assigned id.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO patients (owner_id, name, species, breed, age_months, weight_kg)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                patient.owner_id,
                patient.name,
                patient.species,
                patient.breed,
                patient.age_months,
                patient.weight_kg,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a patient by id, with the owner's display name.
    pub fn get_patient(&self, id: i64) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                r#"
                SELECT p.id, p.owner_id, p.name, p.species, p.breed,
                       p.age_months, p.weight_kg, o.full_name AS owner_name
                FROM patients p
                LEFT JOIN owners o ON p.owner_id = o.id
                WHERE p.id = ?
                "#,
                [id],
                map_patient,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all patients, newest first, with owner display names.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT p.id, p.owner_id, p.name, p.species, p.breed,
                   p.age_months, p.weight_kg, o.full_name AS owner_name
            FROM patients p
            LEFT JOIN owners o ON p.owner_id = o.id
            ORDER BY p.id DESC
            "#,
        )?;

        let rows = stmt.query_map([], map_patient)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Substring match on patient name, for the directory search.
    pub fn match_patients(&self, query: &str, limit: usize) -> DbResult<Vec<Patient>> {
        let pattern = format!("%{}%", query);
        let mut stmt = self.conn.prepare(
            r#"
            SELECT p.id, p.owner_id, p.name, p.species, p.breed,
                   p.age_months, p.weight_kg, o.full_name AS owner_name
            FROM patients p
            LEFT JOIN owners o ON p.owner_id = o.id
            WHERE p.name LIKE ?1
            ORDER BY p.name ASC
            LIMIT ?2
            "#,
        )?;

        let rows = stmt.query_map(params![pattern, limit as i64], map_patient)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Apply a partial update. Absent fields are left untouched; the
    /// joined owner name is never written.
    pub fn update_patient(&self, id: i64, patch: &PatientPatch) -> DbResult<bool> {
        let mut sets: Vec<(&str, Value)> = Vec::new();
        if let Some(owner_id) = patch.owner_id {
            sets.push(("owner_id", owner_id.into()));
        }
        if let Some(name) = &patch.name {
            sets.push(("name", name.clone().into()));
        }
        if let Some(species) = &patch.species {
            sets.push(("species", species.clone().into()));
        }
        if let Some(breed) = &patch.breed {
            sets.push(("breed", breed.clone().into()));
        }
        if let Some(age_months) = patch.age_months {
            sets.push(("age_months", age_months.into()));
        }
        if let Some(weight_kg) = patch.weight_kg {
            sets.push(("weight_kg", weight_kg.into()));
        }
        self.update_by_id("patients", sets, id)
    }

    /// Delete a patient.
    pub fn delete_patient(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM patients WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Owner;

    fn setup_db() -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        let owner_id = db
            .insert_owner(&Owner::new("1-2345-6789".into(), "Carlos Gómez".into()))
            .unwrap();
        (db, owner_id)
    }

    #[test]
    fn test_insert_and_get_with_owner_name() {
        let (db, owner_id) = setup_db();

        let mut patient = Patient::new(owner_id, "Luna".into(), "Canino".into());
        patient.breed = "Golden Retriever".into();
        patient.age_months = 36;
        patient.weight_kg = 28.5;

        let id = db.insert_patient(&patient).unwrap();

        let retrieved = db.get_patient(id).unwrap().unwrap();
        assert_eq!(retrieved.name, "Luna");
        assert_eq!(retrieved.weight_kg, 28.5);
        assert_eq!(retrieved.owner_name.as_deref(), Some("Carlos Gómez"));
    }

    #[test]
    fn test_list_newest_first() {
        let (db, owner_id) = setup_db();
        db.insert_patient(&Patient::new(owner_id, "Luna".into(), "Canino".into()))
            .unwrap();
        db.insert_patient(&Patient::new(owner_id, "Max".into(), "Felino".into()))
            .unwrap();

        let patients = db.list_patients().unwrap();
        assert_eq!(patients.len(), 2);
        assert_eq!(patients[0].name, "Max");
    }

    #[test]
    fn test_insert_requires_owner() {
        let db = Database::open_in_memory().unwrap();
        let result = db.insert_patient(&Patient::new(99, "Luna".into(), "Canino".into()));
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_update() {
        let (db, owner_id) = setup_db();
        let id = db
            .insert_patient(&Patient::new(owner_id, "Luna".into(), "Canino".into()))
            .unwrap();

        let patch = PatientPatch {
            weight_kg: Some(30.2),
            ..Default::default()
        };
        assert!(db.update_patient(id, &patch).unwrap());

        let retrieved = db.get_patient(id).unwrap().unwrap();
        assert_eq!(retrieved.weight_kg, 30.2);
        assert_eq!(retrieved.name, "Luna");
    }

    #[test]
    fn test_match_patients() {
        let (db, owner_id) = setup_db();
        db.insert_patient(&Patient::new(owner_id, "Luna".into(), "Canino".into()))
            .unwrap();
        db.insert_patient(&Patient::new(owner_id, "Lunares".into(), "Felino".into()))
            .unwrap();
        db.insert_patient(&Patient::new(owner_id, "Max".into(), "Canino".into()))
            .unwrap();

        let matches = db.match_patients("Luna", 10).unwrap();
        assert_eq!(matches.len(), 2);
    }
}
