//! Hospitalization (inpatient admission) models.

use chrono::{DateTime, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Clinical state of a hospitalized patient.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HospitalizationStatus {
    Estable,
    Critico,
    Observacion,
    Alta,
}

impl HospitalizationStatus {
    /// Database string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            HospitalizationStatus::Estable => "Estable",
            HospitalizationStatus::Critico => "Crítico",
            HospitalizationStatus::Observacion => "Observación",
            HospitalizationStatus::Alta => "Alta",
        }
    }

    /// Parse a database string back into a status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Estable" => Some(HospitalizationStatus::Estable),
            "Crítico" => Some(HospitalizationStatus::Critico),
            "Observación" => Some(HospitalizationStatus::Observacion),
            "Alta" => Some(HospitalizationStatus::Alta),
            _ => None,
        }
    }
}

/// An inpatient admission tracking a patient's in-clinic stay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hospitalization {
    /// Database id (0 until inserted)
    pub id: i64,
    /// Admitted patient
    pub patient_id: i64,
    /// Responsible doctor
    pub doctor_id: i64,
    /// Admission time, ISO-8601
    pub entry_date: String,
    /// Reason for admission
    pub reason: String,
    /// Preliminary diagnosis
    pub diagnosis_preliminary: String,
    /// Text shown when the scheduled alert fires
    pub alert_message: Option<String>,
    /// Wall-clock alert time, `HH:MM`
    pub alert_time: Option<String>,
    /// Clinical state
    pub status: HospitalizationStatus,
    /// Treatment plan
    pub treatment_plan: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Weight at admission, kg
    pub weight_entry: Option<f64>,
    /// Discharge time, ISO-8601, once discharged
    pub discharge_date: Option<String>,
    /// Patient display name, filled by list queries only
    pub patient_name: Option<String>,
    /// Doctor display name, filled by list queries only
    pub doctor_name: Option<String>,
}

impl Hospitalization {
    /// Create a new admission pending insertion.
    pub fn new(patient_id: i64, doctor_id: i64, reason: String) -> Self {
        Self {
            id: 0,
            patient_id,
            doctor_id,
            entry_date: chrono::Utc::now().to_rfc3339(),
            reason,
            diagnosis_preliminary: String::new(),
            alert_message: None,
            alert_time: None,
            status: HospitalizationStatus::Observacion,
            treatment_plan: None,
            notes: None,
            weight_entry: None,
            discharge_date: None,
            patient_name: None,
            doctor_name: None,
        }
    }

    /// Whole days elapsed since admission, if the entry date parses.
    pub fn days_since_entry(&self, now: NaiveDateTime) -> Option<i64> {
        let entry = DateTime::parse_from_rfc3339(&self.entry_date)
            .map(|dt| dt.naive_utc())
            .or_else(|_| NaiveDateTime::parse_from_str(&self.entry_date, "%Y-%m-%dT%H:%M:%S"))
            .or_else(|_| NaiveDateTime::parse_from_str(&self.entry_date, "%Y-%m-%d %H:%M:%S"))
            .ok()?;
        Some((now - entry).num_days().abs())
    }

    /// The scheduled alert fires when the wall clock matches its `HH:MM`.
    pub fn is_alert_active(&self, now: NaiveTime) -> bool {
        match &self.alert_time {
            Some(alert) => *alert == now.format("%H:%M").to_string(),
            None => false,
        }
    }
}

/// A periodic vitals check recorded during a hospitalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HospitalizationCheck {
    /// Database id (0 until inserted)
    pub id: i64,
    /// Parent admission
    pub hospitalization_id: i64,
    /// Check time, ISO-8601
    pub check_time: String,
    /// Body temperature, °C
    pub temperature: Option<f64>,
    /// Heart rate, bpm
    pub heart_rate: Option<i64>,
    /// Respiratory rate, breaths/min
    pub respiratory_rate: Option<i64>,
    /// Observations at check time
    pub observations: Option<String>,
}

impl HospitalizationCheck {
    /// Create a new check pending insertion.
    pub fn new(hospitalization_id: i64) -> Self {
        Self {
            id: 0,
            hospitalization_id,
            check_time: chrono::Utc::now().to_rfc3339(),
            temperature: None,
            heart_rate: None,
            respiratory_rate: None,
            observations: None,
        }
    }
}

/// Partial update for a hospitalization. Nullable columns use nested
/// options: `None` leaves the column alone, `Some(None)` writes NULL.
#[derive(Debug, Clone, Default)]
pub struct HospitalizationPatch {
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
    pub entry_date: Option<String>,
    pub reason: Option<String>,
    pub diagnosis_preliminary: Option<String>,
    pub alert_message: Option<Option<String>>,
    pub alert_time: Option<Option<String>>,
    pub status: Option<HospitalizationStatus>,
    pub treatment_plan: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub weight_entry: Option<Option<f64>>,
    pub discharge_date: Option<Option<String>>,
}

impl HospitalizationPatch {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.patient_id.is_none()
            && self.doctor_id.is_none()
            && self.entry_date.is_none()
            && self.reason.is_none()
            && self.diagnosis_preliminary.is_none()
            && self.alert_message.is_none()
            && self.alert_time.is_none()
            && self.status.is_none()
            && self.treatment_plan.is_none()
            && self.notes.is_none()
            && self.weight_entry.is_none()
            && self.discharge_date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_status_round_trip() {
        for status in [
            HospitalizationStatus::Estable,
            HospitalizationStatus::Critico,
            HospitalizationStatus::Observacion,
            HospitalizationStatus::Alta,
        ] {
            assert_eq!(HospitalizationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(HospitalizationStatus::parse("Grave"), None);
    }

    #[test]
    fn test_alert_fires_on_matching_minute() {
        let mut h = Hospitalization::new(1, 2, "Fractura".into());
        h.alert_time = Some("14:30".into());

        assert!(h.is_alert_active(NaiveTime::from_hms_opt(14, 30, 45).unwrap()));
        assert!(!h.is_alert_active(NaiveTime::from_hms_opt(14, 31, 0).unwrap()));

        h.alert_time = None;
        assert!(!h.is_alert_active(NaiveTime::from_hms_opt(14, 30, 0).unwrap()));
    }

    #[test]
    fn test_days_since_entry() {
        let mut h = Hospitalization::new(1, 2, "Parvovirus".into());
        h.entry_date = "2024-03-10T08:00:00".into();

        let now = NaiveDate::from_ymd_opt(2024, 3, 13)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(h.days_since_entry(now), Some(3));

        h.entry_date = "garbage".into();
        assert_eq!(h.days_since_entry(now), None);
    }
}
