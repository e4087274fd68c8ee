//! Local profile store and appointment-type configuration.
//!
//! `LocalStore` is a small JSON key/value file holding one workstation
//! profile's settings. It is local by contract: the appointment-type
//! durations it holds govern a schedule shared by all staff, yet are
//! never synced between profiles.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::AppointmentKind;

/// Key holding the authentication flag.
pub const AUTH_KEY: &str = "vet_auth";

/// Key holding the appointment-type configuration blob.
pub const APPOINTMENT_TYPES_KEY: &str = "vet_appointment_types";

/// Configuration store errors. Reads never fail (they fall back to
/// defaults); writes do.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A per-profile key/value file.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Use the store file at the given path, creating it lazily on first
    /// write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read one key. A missing file, unreadable file, or malformed
    /// content all read as an absent key.
    pub fn get(&self, key: &str) -> Option<String> {
        self.read_map().remove(key)
    }

    /// Write one key.
    pub fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    /// Remove one key.
    pub fn remove(&self, key: &str) -> Result<(), ConfigError> {
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }

    fn read_map(&self) -> BTreeMap<String, String> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(map)?)?;
        Ok(())
    }
}

/// One configurable appointment category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentTypeConfig {
    /// Stable identifier, matching [`AppointmentKind`] database strings
    pub id: String,
    /// Display label
    pub label: String,
    /// Default duration in minutes
    pub duration: i64,
    /// Display color token
    pub color: String,
    /// Display icon name
    pub icon: String,
}

/// Built-in appointment types used until staff customize them.
pub fn default_appointment_types() -> Vec<AppointmentTypeConfig> {
    vec![
        AppointmentTypeConfig {
            id: "Consulta".into(),
            label: "Consulta".into(),
            duration: 30,
            color: "bg-primary".into(),
            icon: "stethoscope".into(),
        },
        AppointmentTypeConfig {
            id: "Vacuna".into(),
            label: "Vacuna".into(),
            duration: 20,
            color: "bg-emerald-500".into(),
            icon: "vaccines".into(),
        },
        AppointmentTypeConfig {
            id: "Cirugía".into(),
            label: "Cirugía".into(),
            duration: 120,
            color: "bg-secondary".into(),
            icon: "precision_manufacturing".into(),
        },
        AppointmentTypeConfig {
            id: "Examen".into(),
            label: "Examen".into(),
            duration: 30,
            color: "bg-accent".into(),
            icon: "biotech".into(),
        },
    ]
}

/// Load the configured appointment types. Absent or malformed stored
/// JSON silently yields the defaults.
pub fn appointment_types(store: &LocalStore) -> Vec<AppointmentTypeConfig> {
    match store.get(APPOINTMENT_TYPES_KEY) {
        Some(saved) => serde_json::from_str(&saved).unwrap_or_else(|_| default_appointment_types()),
        None => default_appointment_types(),
    }
}

/// Persist the appointment types for this profile.
pub fn save_appointment_types(
    store: &LocalStore,
    types: &[AppointmentTypeConfig],
) -> Result<(), ConfigError> {
    store.set(APPOINTMENT_TYPES_KEY, &serde_json::to_string(types)?)
}

/// Drop the stored configuration, reverting to defaults.
pub fn reset_appointment_types(store: &LocalStore) -> Result<(), ConfigError> {
    store.remove(APPOINTMENT_TYPES_KEY)
}

/// Default duration for a kind: the configured entry when present,
/// otherwise the built-in default for that kind.
pub fn duration_for(types: &[AppointmentTypeConfig], kind: AppointmentKind) -> i64 {
    if let Some(configured) = types.iter().find(|t| t.id == kind.as_str()) {
        return configured.duration;
    }
    default_appointment_types()
        .iter()
        .find(|t| t.id == kind.as_str())
        .map(|t| t.duration)
        .unwrap_or(30)
}
