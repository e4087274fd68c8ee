//! Appointment models.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Service category for an appointment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentKind {
    Consulta,
    Vacuna,
    Cirugia,
    Examen,
}

impl AppointmentKind {
    /// Database string for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentKind::Consulta => "Consulta",
            AppointmentKind::Vacuna => "Vacuna",
            AppointmentKind::Cirugia => "Cirugía",
            AppointmentKind::Examen => "Examen",
        }
    }

    /// Parse a database string back into a kind.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Consulta" => Some(AppointmentKind::Consulta),
            "Vacuna" => Some(AppointmentKind::Vacuna),
            "Cirugía" => Some(AppointmentKind::Cirugia),
            "Examen" => Some(AppointmentKind::Examen),
            _ => None,
        }
    }

    /// All kinds, in display order.
    pub fn all() -> [AppointmentKind; 4] {
        [
            AppointmentKind::Consulta,
            AppointmentKind::Vacuna,
            AppointmentKind::Cirugia,
            AppointmentKind::Examen,
        ]
    }
}

/// Lifecycle state of an appointment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentStatus {
    Programada,
    Completada,
    Cancelada,
}

impl AppointmentStatus {
    /// Database string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Programada => "Programada",
            AppointmentStatus::Completada => "Completada",
            AppointmentStatus::Cancelada => "Cancelada",
        }
    }

    /// Parse a database string back into a status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Programada" => Some(AppointmentStatus::Programada),
            "Completada" => Some(AppointmentStatus::Completada),
            "Cancelada" => Some(AppointmentStatus::Cancelada),
            _ => None,
        }
    }
}

/// A scheduled visit on the clinic calendar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    /// Database id (0 until inserted)
    pub id: i64,
    /// Patient being seen
    pub patient_id: i64,
    /// Attending doctor
    pub doctor_id: i64,
    /// Optional assisting staff member
    pub assistant_id: Option<i64>,
    /// Service category
    pub kind: AppointmentKind,
    /// ISO-8601 start time (`YYYY-MM-DDTHH:MM:SS`)
    pub start_time: String,
    /// Duration in minutes
    pub duration_minutes: i64,
    /// Lifecycle state
    pub status: AppointmentStatus,
    /// Patient display name, filled by list queries only
    pub patient_name: Option<String>,
    /// Owner display name, filled by list queries only
    pub owner_name: Option<String>,
    /// Doctor display name, filled by list queries only
    pub doctor_name: Option<String>,
    /// Assistant display name, filled by list queries only
    pub assistant_name: Option<String>,
}

impl Appointment {
    /// Create a new appointment pending insertion.
    pub fn new(
        patient_id: i64,
        doctor_id: i64,
        kind: AppointmentKind,
        start_time: String,
        duration_minutes: i64,
    ) -> Self {
        Self {
            id: 0,
            patient_id,
            doctor_id,
            assistant_id: None,
            kind,
            start_time,
            duration_minutes,
            status: AppointmentStatus::Programada,
            patient_name: None,
            owner_name: None,
            doctor_name: None,
            assistant_name: None,
        }
    }

    /// Parse the stored start time. Accepts the naive ISO form written by
    /// the scheduler and RFC 3339 for rows written by other tools.
    pub fn start(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.start_time, "%Y-%m-%dT%H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(&self.start_time, "%Y-%m-%dT%H:%M"))
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(&self.start_time)
                    .ok()
                    .map(|dt| dt.naive_utc())
            })
    }

    /// End time, when the start time parses.
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.start()
            .and_then(|s| s.checked_add_signed(TimeDelta::minutes(self.duration_minutes)))
    }

    /// Whether this appointment falls on the given calendar day.
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.start().map(|s| s.date() == date).unwrap_or(false)
    }
}

/// Partial update for an appointment. `assistant_id` uses a nested option
/// so a caller can distinguish "leave alone" (`None`) from "set NULL"
/// (`Some(None)`). Joined display names are not patchable.
#[derive(Debug, Clone, Default)]
pub struct AppointmentPatch {
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
    pub assistant_id: Option<Option<i64>>,
    pub kind: Option<AppointmentKind>,
    pub start_time: Option<String>,
    pub duration_minutes: Option<i64>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentPatch {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.patient_id.is_none()
            && self.doctor_id.is_none()
            && self.assistant_id.is_none()
            && self.kind.is_none()
            && self.start_time.is_none()
            && self.duration_minutes.is_none()
            && self.status.is_none()
    }
}
