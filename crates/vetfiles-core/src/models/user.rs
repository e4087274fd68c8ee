//! Staff user models.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Role a staff member holds at the clinic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StaffRole {
    Doctor,
    Asistente,
    Administrativo,
}

impl StaffRole {
    /// Database string for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Doctor => "Doctor",
            StaffRole::Asistente => "Asistente",
            StaffRole::Administrativo => "Administrativo",
        }
    }

    /// Parse a database string back into a role.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Doctor" => Some(StaffRole::Doctor),
            "Asistente" => Some(StaffRole::Asistente),
            "Administrativo" => Some(StaffRole::Administrativo),
            _ => None,
        }
    }
}

/// A staff member with a login account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffUser {
    /// Database id (0 until inserted)
    pub id: i64,
    /// National identity document number
    pub cedula: String,
    /// Full legal name
    pub full_name: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// Clinic role
    pub role: StaffRole,
    /// Hex-encoded SHA-256 of the password
    pub password_hash: String,
    /// Account creation time, epoch milliseconds
    pub created_at: i64,
    /// Free-form weekly schedule text, added by migration
    pub schedule: Option<String>,
}

impl StaffUser {
    /// Create a new staff user pending insertion.
    pub fn new(cedula: String, full_name: String, role: StaffRole) -> Self {
        Self {
            id: 0,
            cedula,
            full_name,
            email: String::new(),
            phone: String::new(),
            role,
            password_hash: String::new(),
            created_at: chrono::Utc::now().timestamp_millis(),
            schedule: None,
        }
    }
}

/// Partial update for a staff user. `schedule` uses a nested option so a
/// caller can distinguish "leave alone" (`None`) from "set NULL"
/// (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct StaffUserPatch {
    pub cedula: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<StaffRole>,
    pub password_hash: Option<String>,
    pub schedule: Option<Option<String>>,
}

impl StaffUserPatch {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.cedula.is_none()
            && self.full_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.role.is_none()
            && self.password_hash.is_none()
            && self.schedule.is_none()
    }
}

/// Hash a plaintext password for storage.
pub fn hash_password(plain: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plain.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a plaintext password against a stored hash.
pub fn verify_password(plain: &str, stored_hash: &str) -> bool {
    hash_password(plain) == stored_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [
            StaffRole::Doctor,
            StaffRole::Asistente,
            StaffRole::Administrativo,
        ] {
            assert_eq!(StaffRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(StaffRole::parse("Gerente"), None);
    }

    #[test]
    fn test_password_hashing() {
        let hash = hash_password("hunter2");
        assert_eq!(hash.len(), 64);
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn test_new_user_has_creation_time() {
        let user = StaffUser::new("1-1111-1111".into(), "Dra. Rojas".into(), StaffRole::Doctor);
        assert!(user.created_at > 0);
        assert!(user.schedule.is_none());
    }
}
