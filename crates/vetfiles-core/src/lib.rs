//! VetFiles Core Library
//!
//! Client-embedded core for a veterinary clinic console: records, staff,
//! and the appointment calendar, over a local SQLite store.
//!
//! # Architecture
//!
//! ```text
//!                         UI (pages)
//!                             │
//!                     VetFilesCore facade
//!          ┌──────────┬───────┼────────┬───────────┐
//!          │          │       │        │           │
//!       db (CRUD   schedule  search  config      shell
//!       + joins)   (calendar (fuzzy  (local     (routes +
//!          │        math +   rank)   profile     session)
//!          │        planner)         store)
//!          ▼
//!       SQLite
//! ```
//!
//! Pages load rows through the facade, render them, and write back
//! through the same path. There is no caching layer and no conflict
//! detection: the last write wins, and a failed call surfaces exactly
//! once.
//!
//! # Modules
//!
//! - [`db`]: SQLite data layer, one operations file per entity
//! - [`models`]: Domain types (Owner, Patient, Appointment, etc.)
//! - [`schedule`]: Calendar math, grid geometry, and the planner
//! - [`config`]: Per-profile store and appointment-type configuration
//! - [`search`]: Fuzzy directory search
//! - [`shell`]: Route table and authentication gate

pub mod config;
pub mod db;
pub mod models;
pub mod schedule;
pub mod search;
pub mod shell;

// Re-export commonly used types
pub use config::{
    appointment_types, default_appointment_types, duration_for, save_appointment_types,
    AppointmentTypeConfig, LocalStore,
};
pub use db::Database;
pub use models::{
    Appointment, AppointmentKind, AppointmentStatus, Hospitalization, HospitalizationCheck,
    HospitalizationStatus, MedicalRecord, Owner, Patient, StaffRole, StaffUser,
};
pub use schedule::{
    block_geometry, days_to_show, navigate, AppointmentForm, BlockGeometry, CalendarView, Planner,
};
pub use search::DirectorySearch;
pub use shell::{resolve, Route, Session};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use db::DbError;
use schedule::PlannerError;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum VetFilesError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<DbError> for VetFilesError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(what) => VetFilesError::NotFound(what),
            other => VetFilesError::DatabaseError(other.to_string()),
        }
    }
}

impl From<PlannerError> for VetFilesError {
    fn from(e: PlannerError) -> Self {
        match e {
            PlannerError::Database(db) => db.into(),
            other => VetFilesError::InvalidInput(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for VetFilesError {
    fn from(e: serde_json::Error) -> Self {
        VetFilesError::SerializationError(e.to_string())
    }
}

impl From<config::ConfigError> for VetFilesError {
    fn from(e: config::ConfigError) -> Self {
        VetFilesError::ConfigError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for VetFilesError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        VetFilesError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create the clinic database and profile store at the given
/// paths.
#[uniffi::export]
pub fn open_clinic(db_path: String, profile_path: String) -> Result<Arc<VetFilesCore>, VetFilesError> {
    let db = Database::open(&db_path)?;
    Ok(Arc::new(VetFilesCore {
        db: Arc::new(Mutex::new(db)),
        prefs: LocalStore::new(profile_path),
    }))
}

/// Create an in-memory clinic with a profile store at the given path
/// (for testing).
#[uniffi::export]
pub fn open_clinic_in_memory(profile_path: String) -> Result<Arc<VetFilesCore>, VetFilesError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(VetFilesCore {
        db: Arc::new(Mutex::new(db)),
        prefs: LocalStore::new(profile_path),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe clinic core for FFI.
#[derive(uniffi::Object)]
pub struct VetFilesCore {
    db: Arc<Mutex<Database>>,
    prefs: LocalStore,
}

#[uniffi::export]
impl VetFilesCore {
    // =========================================================================
    // Session & Routing
    // =========================================================================

    /// Whether this profile holds a live session.
    pub fn is_authenticated(&self) -> bool {
        Session::new(self.prefs.clone()).is_authenticated()
    }

    /// Open a session. Credentials are not checked.
    pub fn log_in(&self) -> Result<(), VetFilesError> {
        Session::new(self.prefs.clone()).log_in()?;
        Ok(())
    }

    /// Close the session.
    pub fn log_out(&self) -> Result<(), VetFilesError> {
        Session::new(self.prefs.clone()).log_out()?;
        Ok(())
    }

    /// Resolve a requested path through the authentication gate,
    /// returning the path of the screen actually shown.
    pub fn resolve_route(&self, path: String) -> String {
        shell::resolve(&path, self.is_authenticated())
            .path()
            .to_string()
    }

    // =========================================================================
    // Owner Operations
    // =========================================================================

    /// List all owners, alphabetically.
    pub fn list_owners(&self) -> Result<Vec<FfiOwner>, VetFilesError> {
        let db = self.db.lock()?;
        let owners = db.list_owners()?;
        Ok(owners.into_iter().map(|o| o.into()).collect())
    }

    /// Register a new owner.
    pub fn create_owner(
        &self,
        cedula: String,
        full_name: String,
        phone: String,
        email: String,
        address: String,
    ) -> Result<FfiOwner, VetFilesError> {
        let db = self.db.lock()?;
        let mut owner = Owner::new(cedula, full_name);
        owner.phone = phone;
        owner.email = email;
        owner.address = address;
        owner.id = db.insert_owner(&owner)?;
        Ok(owner.into())
    }

    /// Apply a partial update to an owner.
    pub fn update_owner(&self, id: i64, patch: FfiOwnerPatch) -> Result<bool, VetFilesError> {
        let db = self.db.lock()?;
        Ok(db.update_owner(id, &patch.into())?)
    }

    /// Delete an owner.
    pub fn delete_owner(&self, id: i64) -> Result<bool, VetFilesError> {
        let db = self.db.lock()?;
        Ok(db.delete_owner(id)?)
    }

    /// Fuzzy search owners by name or cédula.
    pub fn search_owners(&self, query: String, limit: u32) -> Result<Vec<FfiOwner>, VetFilesError> {
        let db = self.db.lock()?;
        let found = DirectorySearch::new(&db).owners(&query, limit as usize)?;
        Ok(found.into_iter().map(|o| o.into()).collect())
    }

    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// List all patients, newest first, with owner display names.
    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, VetFilesError> {
        let db = self.db.lock()?;
        let patients = db.list_patients()?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    /// Register a new patient.
    pub fn create_patient(
        &self,
        owner_id: i64,
        name: String,
        species: String,
        breed: String,
        age_months: i64,
        weight_kg: f64,
    ) -> Result<FfiPatient, VetFilesError> {
        let db = self.db.lock()?;
        let mut patient = Patient::new(owner_id, name, species);
        patient.breed = breed;
        patient.age_months = age_months;
        patient.weight_kg = weight_kg;
        patient.id = db.insert_patient(&patient)?;
        Ok(patient.into())
    }

    /// Apply a partial update to a patient.
    pub fn update_patient(&self, id: i64, patch: FfiPatientPatch) -> Result<bool, VetFilesError> {
        let db = self.db.lock()?;
        Ok(db.update_patient(id, &patch.into())?)
    }

    /// Delete a patient.
    pub fn delete_patient(&self, id: i64) -> Result<bool, VetFilesError> {
        let db = self.db.lock()?;
        Ok(db.delete_patient(id)?)
    }

    /// Fuzzy search patients by name.
    pub fn search_patients(
        &self,
        query: String,
        limit: u32,
    ) -> Result<Vec<FfiPatient>, VetFilesError> {
        let db = self.db.lock()?;
        let found = DirectorySearch::new(&db).patients(&query, limit as usize)?;
        Ok(found.into_iter().map(|p| p.into()).collect())
    }

    // =========================================================================
    // Staff Operations
    // =========================================================================

    /// List all staff users, alphabetically.
    pub fn list_users(&self) -> Result<Vec<FfiStaffUser>, VetFilesError> {
        let db = self.db.lock()?;
        let users = db.list_users()?;
        Ok(users.into_iter().map(|u| u.into()).collect())
    }

    /// Register a staff account. The password is hashed here; the plain
    /// text is never stored.
    pub fn create_user(
        &self,
        cedula: String,
        full_name: String,
        email: String,
        phone: String,
        role: String,
        password: String,
    ) -> Result<FfiStaffUser, VetFilesError> {
        let role = parse_role(&role)?;
        let db = self.db.lock()?;
        let mut user = StaffUser::new(cedula, full_name, role);
        user.email = email;
        user.phone = phone;
        user.password_hash = models::hash_password(&password);
        user.id = db.insert_user(&user)?;
        Ok(user.into())
    }

    /// Apply a partial update to a staff account.
    pub fn update_user(&self, id: i64, patch: FfiStaffUserPatch) -> Result<bool, VetFilesError> {
        let patch = patch.into_patch()?;
        let db = self.db.lock()?;
        Ok(db.update_user(id, &patch)?)
    }

    /// Delete a staff account.
    pub fn delete_user(&self, id: i64) -> Result<bool, VetFilesError> {
        let db = self.db.lock()?;
        Ok(db.delete_user(id)?)
    }

    // =========================================================================
    // Appointment-Type Configuration
    // =========================================================================

    /// The appointment types for this profile, defaults when nothing is
    /// stored.
    pub fn get_appointment_types(&self) -> Vec<FfiAppointmentTypeConfig> {
        appointment_types(&self.prefs)
            .into_iter()
            .map(|t| t.into())
            .collect()
    }

    /// Persist the appointment types for this profile.
    pub fn save_appointment_types(
        &self,
        types: Vec<FfiAppointmentTypeConfig>,
    ) -> Result<(), VetFilesError> {
        let types: Vec<AppointmentTypeConfig> = types.into_iter().map(|t| t.into()).collect();
        config::save_appointment_types(&self.prefs, &types)?;
        Ok(())
    }

    /// Drop the stored configuration, reverting to defaults.
    pub fn reset_appointment_types(&self) -> Result<(), VetFilesError> {
        config::reset_appointment_types(&self.prefs)?;
        Ok(())
    }

    // =========================================================================
    // Schedule Operations
    // =========================================================================

    /// List the whole calendar in chronological order.
    pub fn list_appointments(&self) -> Result<Vec<FfiAppointment>, VetFilesError> {
        let db = self.db.lock()?;
        let appointments = db.list_appointments()?;
        Ok(appointments.into_iter().map(|a| a.into()).collect())
    }

    /// Validate the form and create an appointment, filling the duration
    /// from this profile's type configuration. Returns the new id.
    pub fn schedule_appointment(&self, form: FfiAppointmentForm) -> Result<i64, VetFilesError> {
        let form = form.into_form()?;
        let db = self.db.lock()?;
        let planner = Planner::new(&db, appointment_types(&self.prefs));
        Ok(planner.schedule(&form)?)
    }

    /// Validate the form and rewrite an existing appointment.
    pub fn reschedule_appointment(
        &self,
        id: i64,
        form: FfiAppointmentForm,
    ) -> Result<bool, VetFilesError> {
        let form = form.into_form()?;
        let db = self.db.lock()?;
        let planner = Planner::new(&db, appointment_types(&self.prefs));
        Ok(planner.reschedule(id, &form)?)
    }

    /// Remove an appointment from the calendar.
    pub fn cancel_appointment(&self, id: i64) -> Result<bool, VetFilesError> {
        let db = self.db.lock()?;
        let planner = Planner::new(&db, appointment_types(&self.prefs));
        Ok(planner.cancel(id)?)
    }

    /// Move an appointment through its lifecycle.
    pub fn set_appointment_status(&self, id: i64, status: String) -> Result<bool, VetFilesError> {
        let status = AppointmentStatus::parse(&status)
            .ok_or_else(|| VetFilesError::InvalidInput(format!("Unknown status: {}", status)))?;
        let db = self.db.lock()?;
        let patch = models::AppointmentPatch {
            status: Some(status),
            ..Default::default()
        };
        Ok(db.update_appointment(id, &patch)?)
    }

    /// Appointments falling on one calendar day (`YYYY-MM-DD`).
    pub fn appointments_on(&self, date: String) -> Result<Vec<FfiAppointment>, VetFilesError> {
        let date = parse_date(&date)?;
        let db = self.db.lock()?;
        let planner = Planner::new(&db, appointment_types(&self.prefs));
        let appointments = planner.appointments_on(date)?;
        Ok(appointments.into_iter().map(|a| a.into()).collect())
    }

    /// Appointment count for one day, for the sidebar badge.
    pub fn today_count(&self, date: String) -> Result<u32, VetFilesError> {
        let date = parse_date(&date)?;
        let db = self.db.lock()?;
        let planner = Planner::new(&db, appointment_types(&self.prefs));
        Ok(planner.today_count(date)? as u32)
    }

    // =========================================================================
    // Hospitalization Operations
    // =========================================================================

    /// List all admissions, newest first.
    pub fn list_hospitalizations(&self) -> Result<Vec<FfiHospitalization>, VetFilesError> {
        let db = self.db.lock()?;
        let admissions = db.list_hospitalizations()?;
        Ok(admissions.into_iter().map(|h| h.into()).collect())
    }

    /// Admit a patient. Returns the new admission id.
    pub fn admit_patient(&self, intake: FfiHospitalizationIntake) -> Result<i64, VetFilesError> {
        let h = intake.into_model()?;
        let db = self.db.lock()?;
        Ok(db.insert_hospitalization(&h)?)
    }

    /// Apply a partial update to an admission.
    pub fn update_hospitalization(
        &self,
        id: i64,
        patch: FfiHospitalizationPatch,
    ) -> Result<bool, VetFilesError> {
        let patch = patch.into_patch()?;
        let db = self.db.lock()?;
        Ok(db.update_hospitalization(id, &patch)?)
    }

    /// Delete an admission.
    pub fn delete_hospitalization(&self, id: i64) -> Result<bool, VetFilesError> {
        let db = self.db.lock()?;
        Ok(db.delete_hospitalization(id)?)
    }

    /// Record a vitals check. Returns the new check id.
    pub fn add_hospitalization_check(
        &self,
        check: FfiHospitalizationCheckInput,
    ) -> Result<i64, VetFilesError> {
        let db = self.db.lock()?;
        Ok(db.insert_hospitalization_check(&check.into_model())?)
    }

    /// Vitals checks for one admission, most recent first.
    pub fn list_hospitalization_checks(
        &self,
        hospitalization_id: i64,
    ) -> Result<Vec<FfiHospitalizationCheck>, VetFilesError> {
        let db = self.db.lock()?;
        let checks = db.list_hospitalization_checks(hospitalization_id)?;
        Ok(checks.into_iter().map(|c| c.into()).collect())
    }

    // =========================================================================
    // Medical Record Operations
    // =========================================================================

    /// List all records, most recent visit first.
    pub fn list_medical_records(&self) -> Result<Vec<FfiMedicalRecord>, VetFilesError> {
        let db = self.db.lock()?;
        let records = db.list_medical_records()?;
        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    /// File a visit entry. Returns the new record id.
    pub fn add_medical_record(
        &self,
        patient_id: i64,
        doctor_id: i64,
        visit_date: i64,
        observations: String,
        diagnosis: String,
        treatment: String,
        file_url: String,
    ) -> Result<i64, VetFilesError> {
        let db = self.db.lock()?;
        let mut record = MedicalRecord::new(patient_id, doctor_id);
        record.visit_date = visit_date;
        record.observations = observations;
        record.diagnosis = diagnosis;
        record.treatment = treatment;
        record.file_url = file_url;
        Ok(db.insert_medical_record(&record)?)
    }

    /// Attach an uploaded file's public URL to a record.
    pub fn attach_record_file(&self, id: i64, file_url: String) -> Result<bool, VetFilesError> {
        let db = self.db.lock()?;
        let patch = models::MedicalRecordPatch {
            file_url: Some(file_url),
            ..Default::default()
        };
        Ok(db.update_medical_record(id, &patch)?)
    }

    /// Delete a record.
    pub fn delete_medical_record(&self, id: i64) -> Result<bool, VetFilesError> {
        let db = self.db.lock()?;
        Ok(db.delete_medical_record(id)?)
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, VetFilesError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| VetFilesError::InvalidInput(format!("{}: {}", s, e)))
}

fn parse_role(s: &str) -> Result<StaffRole, VetFilesError> {
    StaffRole::parse(s).ok_or_else(|| VetFilesError::InvalidInput(format!("Unknown role: {}", s)))
}

fn parse_kind(s: &str) -> Result<AppointmentKind, VetFilesError> {
    AppointmentKind::parse(s)
        .ok_or_else(|| VetFilesError::InvalidInput(format!("Unknown appointment type: {}", s)))
}

fn parse_hospitalization_status(s: &str) -> Result<HospitalizationStatus, VetFilesError> {
    HospitalizationStatus::parse(s)
        .ok_or_else(|| VetFilesError::InvalidInput(format!("Unknown status: {}", s)))
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe owner.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiOwner {
    pub id: i64,
    pub cedula: String,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl From<Owner> for FfiOwner {
    fn from(owner: Owner) -> Self {
        Self {
            id: owner.id,
            cedula: owner.cedula,
            full_name: owner.full_name,
            phone: owner.phone,
            email: owner.email,
            address: owner.address,
        }
    }
}

/// FFI-safe partial owner update. Absent fields stay untouched.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiOwnerPatch {
    pub cedula: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl From<FfiOwnerPatch> for models::OwnerPatch {
    fn from(patch: FfiOwnerPatch) -> Self {
        Self {
            cedula: patch.cedula,
            full_name: patch.full_name,
            phone: patch.phone,
            email: patch.email,
            address: patch.address,
        }
    }
}

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age_months: i64,
    pub weight_kg: f64,
    pub owner_name: Option<String>,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            owner_id: patient.owner_id,
            name: patient.name,
            species: patient.species,
            breed: patient.breed,
            age_months: patient.age_months,
            weight_kg: patient.weight_kg,
            owner_name: patient.owner_name,
        }
    }
}

/// FFI-safe partial patient update.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientPatch {
    pub owner_id: Option<i64>,
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age_months: Option<i64>,
    pub weight_kg: Option<f64>,
}

impl From<FfiPatientPatch> for models::PatientPatch {
    fn from(patch: FfiPatientPatch) -> Self {
        Self {
            owner_id: patch.owner_id,
            name: patch.name,
            species: patch.species,
            breed: patch.breed,
            age_months: patch.age_months,
            weight_kg: patch.weight_kg,
        }
    }
}

/// FFI-safe staff user.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStaffUser {
    pub id: i64,
    pub cedula: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub created_at: i64,
    pub schedule: Option<String>,
}

impl From<StaffUser> for FfiStaffUser {
    fn from(user: StaffUser) -> Self {
        Self {
            id: user.id,
            cedula: user.cedula,
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
            role: user.role.as_str().to_string(),
            created_at: user.created_at,
            schedule: user.schedule,
        }
    }
}

/// FFI-safe partial staff update. `password` is hashed on apply;
/// `clear_schedule` writes NULL to the schedule column.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStaffUserPatch {
    pub cedula: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
    pub schedule: Option<String>,
    pub clear_schedule: bool,
}

impl FfiStaffUserPatch {
    fn into_patch(self) -> Result<models::StaffUserPatch, VetFilesError> {
        let role = self.role.as_deref().map(parse_role).transpose()?;
        let schedule = if self.clear_schedule {
            Some(None)
        } else {
            self.schedule.map(Some)
        };
        Ok(models::StaffUserPatch {
            cedula: self.cedula,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            role,
            password_hash: self.password.as_deref().map(models::hash_password),
            schedule,
        })
    }
}

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub assistant_id: Option<i64>,
    pub kind: String,
    pub start_time: String,
    pub duration_minutes: i64,
    pub status: String,
    pub patient_name: Option<String>,
    pub owner_name: Option<String>,
    pub doctor_name: Option<String>,
    pub assistant_name: Option<String>,
}

impl From<Appointment> for FfiAppointment {
    fn from(appt: Appointment) -> Self {
        Self {
            id: appt.id,
            patient_id: appt.patient_id,
            doctor_id: appt.doctor_id,
            assistant_id: appt.assistant_id,
            kind: appt.kind.as_str().to_string(),
            start_time: appt.start_time,
            duration_minutes: appt.duration_minutes,
            status: appt.status.as_str().to_string(),
            patient_name: appt.patient_name,
            owner_name: appt.owner_name,
            doctor_name: appt.doctor_name,
            assistant_name: appt.assistant_name,
        }
    }
}

/// FFI-safe schedule form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointmentForm {
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
    pub assistant_id: Option<i64>,
    pub kind: String,
    pub date: String,
    pub time: String,
    pub duration_minutes: Option<i64>,
}

impl FfiAppointmentForm {
    fn into_form(self) -> Result<AppointmentForm, VetFilesError> {
        Ok(AppointmentForm {
            patient_id: self.patient_id,
            doctor_id: self.doctor_id,
            assistant_id: self.assistant_id,
            kind: parse_kind(&self.kind)?,
            date: self.date,
            time: self.time,
            duration_minutes: self.duration_minutes,
        })
    }
}

/// FFI-safe appointment-type configuration entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointmentTypeConfig {
    pub id: String,
    pub label: String,
    pub duration: i64,
    pub color: String,
    pub icon: String,
}

impl From<AppointmentTypeConfig> for FfiAppointmentTypeConfig {
    fn from(t: AppointmentTypeConfig) -> Self {
        Self {
            id: t.id,
            label: t.label,
            duration: t.duration,
            color: t.color,
            icon: t.icon,
        }
    }
}

impl From<FfiAppointmentTypeConfig> for AppointmentTypeConfig {
    fn from(t: FfiAppointmentTypeConfig) -> Self {
        Self {
            id: t.id,
            label: t.label,
            duration: t.duration,
            color: t.color,
            icon: t.icon,
        }
    }
}

/// FFI-safe hospitalization.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHospitalization {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub entry_date: String,
    pub reason: String,
    pub diagnosis_preliminary: String,
    pub alert_message: Option<String>,
    pub alert_time: Option<String>,
    pub status: String,
    pub treatment_plan: Option<String>,
    pub notes: Option<String>,
    pub weight_entry: Option<f64>,
    pub discharge_date: Option<String>,
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
}

impl From<Hospitalization> for FfiHospitalization {
    fn from(h: Hospitalization) -> Self {
        Self {
            id: h.id,
            patient_id: h.patient_id,
            doctor_id: h.doctor_id,
            entry_date: h.entry_date,
            reason: h.reason,
            diagnosis_preliminary: h.diagnosis_preliminary,
            alert_message: h.alert_message,
            alert_time: h.alert_time,
            status: h.status.as_str().to_string(),
            treatment_plan: h.treatment_plan,
            notes: h.notes,
            weight_entry: h.weight_entry,
            discharge_date: h.discharge_date,
            patient_name: h.patient_name,
            doctor_name: h.doctor_name,
        }
    }
}

/// FFI-safe admission intake. `entry_date` defaults to now; `status`
/// defaults to Observación.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHospitalizationIntake {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub entry_date: Option<String>,
    pub reason: String,
    pub diagnosis_preliminary: String,
    pub alert_message: Option<String>,
    pub alert_time: Option<String>,
    pub status: Option<String>,
    pub treatment_plan: Option<String>,
    pub notes: Option<String>,
    pub weight_entry: Option<f64>,
}

impl FfiHospitalizationIntake {
    fn into_model(self) -> Result<Hospitalization, VetFilesError> {
        let mut h = Hospitalization::new(self.patient_id, self.doctor_id, self.reason);
        if let Some(entry_date) = self.entry_date {
            h.entry_date = entry_date;
        }
        h.diagnosis_preliminary = self.diagnosis_preliminary;
        h.alert_message = self.alert_message;
        h.alert_time = self.alert_time;
        if let Some(status) = self.status.as_deref() {
            h.status = parse_hospitalization_status(status)?;
        }
        h.treatment_plan = self.treatment_plan;
        h.notes = self.notes;
        h.weight_entry = self.weight_entry;
        Ok(h)
    }
}

/// FFI-safe partial hospitalization update. Fields only set values;
/// `clear_alert` removes both alert columns.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHospitalizationPatch {
    pub status: Option<String>,
    pub alert_message: Option<String>,
    pub alert_time: Option<String>,
    pub clear_alert: bool,
    pub treatment_plan: Option<String>,
    pub notes: Option<String>,
    pub weight_entry: Option<f64>,
    pub discharge_date: Option<String>,
}

impl FfiHospitalizationPatch {
    fn into_patch(self) -> Result<models::HospitalizationPatch, VetFilesError> {
        let status = self
            .status
            .as_deref()
            .map(parse_hospitalization_status)
            .transpose()?;
        let (alert_message, alert_time) = if self.clear_alert {
            (Some(None), Some(None))
        } else {
            (self.alert_message.map(Some), self.alert_time.map(Some))
        };
        Ok(models::HospitalizationPatch {
            status,
            alert_message,
            alert_time,
            treatment_plan: self.treatment_plan.map(Some),
            notes: self.notes.map(Some),
            weight_entry: self.weight_entry.map(Some),
            discharge_date: self.discharge_date.map(Some),
            ..Default::default()
        })
    }
}

/// FFI-safe vitals check.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHospitalizationCheck {
    pub id: i64,
    pub hospitalization_id: i64,
    pub check_time: String,
    pub temperature: Option<f64>,
    pub heart_rate: Option<i64>,
    pub respiratory_rate: Option<i64>,
    pub observations: Option<String>,
}

impl From<HospitalizationCheck> for FfiHospitalizationCheck {
    fn from(c: HospitalizationCheck) -> Self {
        Self {
            id: c.id,
            hospitalization_id: c.hospitalization_id,
            check_time: c.check_time,
            temperature: c.temperature,
            heart_rate: c.heart_rate,
            respiratory_rate: c.respiratory_rate,
            observations: c.observations,
        }
    }
}

/// FFI-safe vitals check input. `check_time` defaults to now.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHospitalizationCheckInput {
    pub hospitalization_id: i64,
    pub check_time: Option<String>,
    pub temperature: Option<f64>,
    pub heart_rate: Option<i64>,
    pub respiratory_rate: Option<i64>,
    pub observations: Option<String>,
}

impl FfiHospitalizationCheckInput {
    fn into_model(self) -> HospitalizationCheck {
        let mut check = HospitalizationCheck::new(self.hospitalization_id);
        if let Some(check_time) = self.check_time {
            check.check_time = check_time;
        }
        check.temperature = self.temperature;
        check.heart_rate = self.heart_rate;
        check.respiratory_rate = self.respiratory_rate;
        check.observations = self.observations;
        check
    }
}

/// FFI-safe medical record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicalRecord {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub visit_date: i64,
    pub observations: String,
    pub diagnosis: String,
    pub treatment: String,
    pub file_url: String,
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
}

impl From<MedicalRecord> for FfiMedicalRecord {
    fn from(r: MedicalRecord) -> Self {
        Self {
            id: r.id,
            patient_id: r.patient_id,
            doctor_id: r.doctor_id,
            visit_date: r.visit_date,
            observations: r.observations,
            diagnosis: r.diagnosis,
            treatment: r.treatment,
            file_url: r.file_url,
            patient_name: r.patient_name,
            doctor_name: r.doctor_name,
        }
    }
}
