//! Medical record (expediente) models.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One visit entry in a patient's medical history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalRecord {
    /// Database id (0 until inserted)
    pub id: i64,
    /// Patient seen
    pub patient_id: i64,
    /// Attending doctor
    pub doctor_id: i64,
    /// Visit time, epoch milliseconds
    pub visit_date: i64,
    /// Clinical observations
    pub observations: String,
    /// Diagnosis
    pub diagnosis: String,
    /// Prescribed treatment
    pub treatment: String,
    /// Public URL of the uploaded attachment, empty when none
    pub file_url: String,
    /// Patient display name, filled by list queries only
    pub patient_name: Option<String>,
    /// Doctor display name, filled by list queries only
    pub doctor_name: Option<String>,
}

impl MedicalRecord {
    /// Create a new record pending insertion, dated now.
    pub fn new(patient_id: i64, doctor_id: i64) -> Self {
        Self {
            id: 0,
            patient_id,
            doctor_id,
            visit_date: Utc::now().timestamp_millis(),
            observations: String::new(),
            diagnosis: String::new(),
            treatment: String::new(),
            file_url: String::new(),
            patient_name: None,
            doctor_name: None,
        }
    }

    /// Visit time as a datetime, when the epoch value is representable.
    pub fn visit_time(&self) -> Option<NaiveDateTime> {
        DateTime::from_timestamp_millis(self.visit_date).map(|dt| dt.naive_utc())
    }
}

/// Partial update for a medical record.
#[derive(Debug, Clone, Default)]
pub struct MedicalRecordPatch {
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
    pub visit_date: Option<i64>,
    pub observations: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub file_url: Option<String>,
}

impl MedicalRecordPatch {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.patient_id.is_none()
            && self.doctor_id.is_none()
            && self.visit_date.is_none()
            && self.observations.is_none()
            && self.diagnosis.is_none()
            && self.treatment.is_none()
            && self.file_url.is_none()
    }
}
