//! Appointment planner: turns schedule-form input into persisted
//! appointments, filling the duration from the type configuration.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::config::{duration_for, AppointmentTypeConfig};
use crate::db::{Database, DbError};
use crate::models::{Appointment, AppointmentKind, AppointmentPatch};

/// Planner errors.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("No patient selected")]
    MissingPatient,

    #[error("No doctor selected")]
    MissingDoctor,

    #[error("Invalid start: {0}")]
    InvalidStart(String),
}

pub type PlannerResult<T> = Result<T, PlannerError>;

/// Schedule-form input. `patient_id`/`doctor_id` stay optional here
/// because the form allows submitting before a selection is made; the
/// planner is where that is rejected.
#[derive(Debug, Clone)]
pub struct AppointmentForm {
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
    pub assistant_id: Option<i64>,
    pub kind: AppointmentKind,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Wall-clock time, `HH:MM`
    pub time: String,
    /// Explicit duration override; the configured type default applies
    /// when absent
    pub duration_minutes: Option<i64>,
}

impl AppointmentForm {
    /// Empty form for a new appointment at the default 09:00 slot.
    pub fn blank(kind: AppointmentKind, date: NaiveDate) -> Self {
        Self {
            patient_id: None,
            doctor_id: None,
            assistant_id: None,
            kind,
            date: date.format("%Y-%m-%d").to_string(),
            time: "09:00".into(),
            duration_minutes: None,
        }
    }
}

/// Coordinates the schedule view's mutations against the database.
pub struct Planner<'a> {
    db: &'a Database,
    types: Vec<AppointmentTypeConfig>,
}

impl<'a> Planner<'a> {
    /// Create a planner using the given appointment-type configuration.
    pub fn new(db: &'a Database, types: Vec<AppointmentTypeConfig>) -> Self {
        Self { db, types }
    }

    /// Validate the form and insert a new appointment. Returns the
    /// assigned id.
    pub fn schedule(&self, form: &AppointmentForm) -> PlannerResult<i64> {
        let (patient_id, doctor_id) = self.required_selections(form)?;
        let start_time = compose_start(&form.date, &form.time)?;

        let mut appt = Appointment::new(
            patient_id,
            doctor_id,
            form.kind,
            start_time,
            self.duration(form),
        );
        appt.assistant_id = form.assistant_id;

        Ok(self.db.insert_appointment(&appt)?)
    }

    /// Validate the form and rewrite an existing appointment. The edit
    /// form always carries the full field set, including an explicit
    /// assistant (possibly none).
    pub fn reschedule(&self, id: i64, form: &AppointmentForm) -> PlannerResult<bool> {
        let (patient_id, doctor_id) = self.required_selections(form)?;
        let start_time = compose_start(&form.date, &form.time)?;

        let patch = AppointmentPatch {
            patient_id: Some(patient_id),
            doctor_id: Some(doctor_id),
            assistant_id: Some(form.assistant_id),
            kind: Some(form.kind),
            start_time: Some(start_time),
            duration_minutes: Some(self.duration(form)),
            status: None,
        };
        Ok(self.db.update_appointment(id, &patch)?)
    }

    /// Remove an appointment from the calendar. Hard delete; the
    /// confirmation prompt lives in the UI.
    pub fn cancel(&self, id: i64) -> PlannerResult<bool> {
        Ok(self.db.delete_appointment(id)?)
    }

    /// Appointments falling on one calendar day.
    pub fn appointments_on(&self, date: NaiveDate) -> PlannerResult<Vec<Appointment>> {
        let all = self.db.list_appointments()?;
        Ok(all.into_iter().filter(|a| a.is_on(date)).collect())
    }

    /// Count for the sidebar badge.
    pub fn today_count(&self, today: NaiveDate) -> PlannerResult<usize> {
        Ok(self.appointments_on(today)?.len())
    }

    fn required_selections(&self, form: &AppointmentForm) -> PlannerResult<(i64, i64)> {
        let patient_id = form.patient_id.ok_or(PlannerError::MissingPatient)?;
        let doctor_id = form.doctor_id.ok_or(PlannerError::MissingDoctor)?;
        Ok((patient_id, doctor_id))
    }

    fn duration(&self, form: &AppointmentForm) -> i64 {
        form.duration_minutes
            .unwrap_or_else(|| duration_for(&self.types, form.kind))
    }
}

fn compose_start(date: &str, time: &str) -> PlannerResult<String> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| PlannerError::InvalidStart(format!("{}: {}", date, e)))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|e| PlannerError::InvalidStart(format!("{}: {}", time, e)))?;
    Ok(date.and_time(time).format("%Y-%m-%dT%H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_appointment_types;
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

    fn filled_form(patient_id: i64, doctor_id: i64, kind: AppointmentKind) -> AppointmentForm {
        AppointmentForm {
            patient_id: Some(patient_id),
            doctor_id: Some(doctor_id),
            assistant_id: None,
            kind,
            date: "2024-03-15".into(),
            time: "09:30".into(),
            duration_minutes: None,
        }
    }

    #[test]
    fn test_schedule_fills_configured_duration() {
        let (db, patient_id, doctor_id) = setup_db();
        let planner = Planner::new(&db, default_appointment_types());

        let id = planner
            .schedule(&filled_form(patient_id, doctor_id, AppointmentKind::Cirugia))
            .unwrap();

        let appt = db.get_appointment(id).unwrap().unwrap();
        assert_eq!(appt.duration_minutes, 120);
        assert_eq!(appt.start_time, "2024-03-15T09:30:00");
    }

    #[test]
    fn test_explicit_duration_overrides_config() {
        let (db, patient_id, doctor_id) = setup_db();
        let planner = Planner::new(&db, default_appointment_types());

        let mut form = filled_form(patient_id, doctor_id, AppointmentKind::Cirugia);
        form.duration_minutes = Some(45);
        let id = planner.schedule(&form).unwrap();

        let appt = db.get_appointment(id).unwrap().unwrap();
        assert_eq!(appt.duration_minutes, 45);
    }

    #[test]
    fn test_missing_selections_rejected() {
        let (db, patient_id, doctor_id) = setup_db();
        let planner = Planner::new(&db, default_appointment_types());

        let mut form = filled_form(patient_id, doctor_id, AppointmentKind::Consulta);
        form.patient_id = None;
        assert!(matches!(
            planner.schedule(&form),
            Err(PlannerError::MissingPatient)
        ));

        let mut form = filled_form(patient_id, doctor_id, AppointmentKind::Consulta);
        form.doctor_id = None;
        assert!(matches!(
            planner.schedule(&form),
            Err(PlannerError::MissingDoctor)
        ));
    }

    #[test]
    fn test_bad_date_rejected() {
        let (db, patient_id, doctor_id) = setup_db();
        let planner = Planner::new(&db, default_appointment_types());

        let mut form = filled_form(patient_id, doctor_id, AppointmentKind::Consulta);
        form.date = "15/03/2024".into();
        assert!(matches!(
            planner.schedule(&form),
            Err(PlannerError::InvalidStart(_))
        ));
    }

    #[test]
    fn test_reschedule_moves_and_clears_assistant() {
        let (db, patient_id, doctor_id) = setup_db();
        let planner = Planner::new(&db, default_appointment_types());

        let id = planner
            .schedule(&filled_form(patient_id, doctor_id, AppointmentKind::Consulta))
            .unwrap();

        let mut form = filled_form(patient_id, doctor_id, AppointmentKind::Consulta);
        form.time = "14:00".into();
        assert!(planner.reschedule(id, &form).unwrap());

        let appt = db.get_appointment(id).unwrap().unwrap();
        assert_eq!(appt.start_time, "2024-03-15T14:00:00");
        assert!(appt.assistant_id.is_none());
    }

    #[test]
    fn test_cancel_then_day_filter() {
        let (db, patient_id, doctor_id) = setup_db();
        let planner = Planner::new(&db, default_appointment_types());

        let id = planner
            .schedule(&filled_form(patient_id, doctor_id, AppointmentKind::Consulta))
            .unwrap();
        let mut other_day = filled_form(patient_id, doctor_id, AppointmentKind::Vacuna);
        other_day.date = "2024-03-16".into();
        planner.schedule(&other_day).unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(planner.today_count(date).unwrap(), 1);

        assert!(planner.cancel(id).unwrap());
        assert_eq!(planner.today_count(date).unwrap(), 0);
    }
}
