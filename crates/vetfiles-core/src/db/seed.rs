//! Bulk loading of JSON fixtures.
//!
//! Two fixture shapes exist: the clinic directory (owners + patients) and
//! the schedule data set (users + appointments). Each seeder clears its
//! tables first and preserves the fixture ids, so the data sets can be
//! reloaded for clean test runs.

use rusqlite::params;
use serde::Deserialize;

use super::{Database, DbResult};

/// Rows written per committed batch.
const BATCH_SIZE: usize = 20;

/// Owner row as it appears in the clinic fixture.
#[derive(Debug, Deserialize)]
pub struct SeedOwner {
    pub id: i64,
    pub cedula: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

/// Patient row as it appears in the clinic fixture.
#[derive(Debug, Deserialize)]
pub struct SeedPatient {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub age_months: i64,
    #[serde(default)]
    pub weight_kg: f64,
}

/// Staff row as it appears in the schedule fixture.
#[derive(Debug, Deserialize)]
pub struct SeedUser {
    pub id: i64,
    pub cedula: String,
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub role: String,
    pub password_hash: String,
}

/// Appointment row as it appears in the schedule fixture.
#[derive(Debug, Deserialize)]
pub struct SeedAppointment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    #[serde(default)]
    pub assistant_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub start_time: String,
    pub duration_minutes: i64,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "Programada".to_string()
}

/// Clinic fixture: owners and their patients.
#[derive(Debug, Deserialize)]
pub struct ClinicFixture {
    pub owners: Vec<SeedOwner>,
    pub patients: Vec<SeedPatient>,
}

/// Schedule fixture: staff and appointments.
#[derive(Debug, Deserialize)]
pub struct ScheduleFixture {
    pub users: Vec<SeedUser>,
    pub appointments: Vec<SeedAppointment>,
}

/// Row counts written by a clinic-directory seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClinicSeedReport {
    pub owners: usize,
    pub patients: usize,
}

/// Row counts written by a schedule seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleSeedReport {
    pub users: usize,
    pub appointments: usize,
}

fn clear_tables(db: &Database, tables: &[&str]) -> DbResult<()> {
    for table in tables {
        db.conn()
            .execute(&format!("DELETE FROM {}", table), [])?;
    }
    // The sequence table only exists once an AUTOINCREMENT insert happened.
    let names = tables
        .iter()
        .map(|t| format!("'{}'", t))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = db.conn().execute(
        &format!("DELETE FROM sqlite_sequence WHERE name IN ({})", names),
        [],
    );
    Ok(())
}

/// Load the clinic directory fixture, replacing existing owners and
/// patients.
pub fn seed_clinic_data(db: &mut Database, json: &str) -> DbResult<ClinicSeedReport> {
    let fixture: ClinicFixture = serde_json::from_str(json)?;
    clear_tables(db, &["patients", "owners"])?;

    for chunk in fixture.owners.chunks(BATCH_SIZE) {
        let tx = db.transaction()?;
        for o in chunk {
            tx.execute(
                "INSERT INTO owners (id, cedula, full_name, phone, email, address)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![o.id, o.cedula, o.full_name, o.phone, o.email, o.address],
            )?;
        }
        tx.commit()?;
    }

    for chunk in fixture.patients.chunks(BATCH_SIZE) {
        let tx = db.transaction()?;
        for p in chunk {
            tx.execute(
                "INSERT INTO patients (id, owner_id, name, species, breed, age_months, weight_kg)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![p.id, p.owner_id, p.name, p.species, p.breed, p.age_months, p.weight_kg],
            )?;
        }
        tx.commit()?;
    }

    Ok(ClinicSeedReport {
        owners: fixture.owners.len(),
        patients: fixture.patients.len(),
    })
}

/// Load the schedule fixture, replacing existing users and appointments.
/// Role and status strings pass through unvalidated; the table CHECK
/// constraints are the only gate.
pub fn seed_schedule_data(db: &mut Database, json: &str) -> DbResult<ScheduleSeedReport> {
    let fixture: ScheduleFixture = serde_json::from_str(json)?;
    clear_tables(db, &["appointments", "users"])?;

    for chunk in fixture.users.chunks(BATCH_SIZE) {
        let tx = db.transaction()?;
        for u in chunk {
            tx.execute(
                "INSERT INTO users (id, cedula, full_name, email, phone, role, password_hash)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![u.id, u.cedula, u.full_name, u.email, u.phone, u.role, u.password_hash],
            )?;
        }
        tx.commit()?;
    }

    for chunk in fixture.appointments.chunks(BATCH_SIZE) {
        let tx = db.transaction()?;
        for a in chunk {
            tx.execute(
                "INSERT INTO appointments
                     (id, patient_id, doctor_id, assistant_id, type, start_time, duration_minutes, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    a.id,
                    a.patient_id,
                    a.doctor_id,
                    a.assistant_id,
                    a.kind,
                    a.start_time,
                    a.duration_minutes,
                    a.status
                ],
            )?;
        }
        tx.commit()?;
    }

    Ok(ScheduleSeedReport {
        users: fixture.users.len(),
        appointments: fixture.appointments.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLINIC_JSON: &str = r#"{
        "owners": [
            {"id": 1, "cedula": "1-1111-1111", "full_name": "Carlos Gómez", "phone": "8888-1234", "email": "carlos@example.com", "address": "San José"},
            {"id": 2, "cedula": "2-2222-2222", "full_name": "María Rodríguez"}
        ],
        "patients": [
            {"id": 1, "owner_id": 1, "name": "Luna", "species": "Canino", "breed": "Labrador", "age_months": 36, "weight_kg": 28.5},
            {"id": 2, "owner_id": 2, "name": "Max", "species": "Felino"}
        ]
    }"#;

    const SCHEDULE_JSON: &str = r#"{
        "users": [
            {"id": 1, "cedula": "3-3333-3333", "full_name": "Dr. Pérez", "role": "Doctor", "password_hash": "abc"},
            {"id": 2, "cedula": "4-4444-4444", "full_name": "Marta R.", "role": "Asistente", "password_hash": "def"}
        ],
        "appointments": [
            {"id": 1, "patient_id": 1, "doctor_id": 1, "assistant_id": 2, "type": "Consulta", "start_time": "2024-03-15T09:00:00", "duration_minutes": 30},
            {"id": 2, "patient_id": 2, "doctor_id": 1, "type": "Cirugía", "start_time": "2024-03-15T11:00:00", "duration_minutes": 120, "status": "Completada"}
        ]
    }"#;

    #[test]
    fn test_seed_clinic_data() {
        let mut db = Database::open_in_memory().unwrap();
        let report = seed_clinic_data(&mut db, CLINIC_JSON).unwrap();
        assert_eq!(
            report,
            ClinicSeedReport {
                owners: 2,
                patients: 2
            }
        );

        let patients = db.list_patients().unwrap();
        assert_eq!(patients.len(), 2);
        let luna = patients.iter().find(|p| p.name == "Luna").unwrap();
        assert_eq!(luna.id, 1);
        assert_eq!(luna.owner_name.as_deref(), Some("Carlos Gómez"));
    }

    #[test]
    fn test_seed_is_reloadable() {
        let mut db = Database::open_in_memory().unwrap();
        seed_clinic_data(&mut db, CLINIC_JSON).unwrap();
        seed_clinic_data(&mut db, CLINIC_JSON).unwrap();
        assert_eq!(db.list_owners().unwrap().len(), 2);
    }

    #[test]
    fn test_seed_schedule_data() {
        let mut db = Database::open_in_memory().unwrap();
        seed_clinic_data(&mut db, CLINIC_JSON).unwrap();
        let report = seed_schedule_data(&mut db, SCHEDULE_JSON).unwrap();
        assert_eq!(
            report,
            ScheduleSeedReport {
                users: 2,
                appointments: 2
            }
        );

        let appointments = db.list_appointments().unwrap();
        assert_eq!(appointments.len(), 2);
        // Default status filled in when the fixture omits it
        assert_eq!(appointments[0].status.as_str(), "Programada");
        assert_eq!(appointments[1].status.as_str(), "Completada");
    }

    #[test]
    fn test_bad_role_rejected_by_check_constraint() {
        let mut db = Database::open_in_memory().unwrap();
        seed_clinic_data(&mut db, CLINIC_JSON).unwrap();
        let bad = r#"{
            "users": [{"id": 1, "cedula": "x", "full_name": "X", "role": "Gerente", "password_hash": "y"}],
            "appointments": []
        }"#;
        assert!(seed_schedule_data(&mut db, bad).is_err());
    }

    #[test]
    fn test_malformed_fixture_is_json_error() {
        let mut db = Database::open_in_memory().unwrap();
        let result = seed_clinic_data(&mut db, "{not json");
        assert!(matches!(result, Err(crate::db::DbError::Json(_))));
    }
}
