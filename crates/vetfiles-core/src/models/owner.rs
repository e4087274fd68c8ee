//! Owner (client) models.

use serde::{Deserialize, Serialize};

/// A pet owner registered with the clinic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Owner {
    /// Database id (0 until inserted)
    pub id: i64,
    /// National identity document number
    pub cedula: String,
    /// Full legal name
    pub full_name: String,
    /// Contact phone
    pub phone: String,
    /// Contact email
    pub email: String,
    /// Street address
    pub address: String,
}

impl Owner {
    /// Create a new owner pending insertion.
    pub fn new(cedula: String, full_name: String) -> Self {
        Self {
            id: 0,
            cedula,
            full_name,
            phone: String::new(),
            email: String::new(),
            address: String::new(),
        }
    }
}

/// Partial update for an owner. Fields left as `None` are not touched.
#[derive(Debug, Clone, Default)]
pub struct OwnerPatch {
    pub cedula: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl OwnerPatch {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.cedula.is_none()
            && self.full_name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.address.is_none()
    }
}
