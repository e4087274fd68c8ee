//! Patient models.

use serde::{Deserialize, Serialize};

/// A patient (animal) belonging to an owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Database id (0 until inserted)
    pub id: i64,
    /// Owning client
    pub owner_id: i64,
    /// Patient name
    pub name: String,
    /// Species (e.g., "Canino", "Felino")
    pub species: String,
    /// Breed
    pub breed: String,
    /// Age in months
    pub age_months: i64,
    /// Weight in kg
    pub weight_kg: f64,
    /// Owner display name, filled by list queries only
    pub owner_name: Option<String>,
}

impl Patient {
    /// Create a new patient pending insertion.
    pub fn new(owner_id: i64, name: String, species: String) -> Self {
        Self {
            id: 0,
            owner_id,
            name,
            species,
            breed: String::new(),
            age_months: 0,
            weight_kg: 0.0,
            owner_name: None,
        }
    }
}

/// Partial update for a patient. The joined `owner_name` is display-only
/// and deliberately absent here.
#[derive(Debug, Clone, Default)]
pub struct PatientPatch {
    pub owner_id: Option<i64>,
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age_months: Option<i64>,
    pub weight_kg: Option<f64>,
}

impl PatientPatch {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.owner_id.is_none()
            && self.name.is_none()
            && self.species.is_none()
            && self.breed.is_none()
            && self.age_months.is_none()
            && self.weight_kg.is_none()
    }
}
