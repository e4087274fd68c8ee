//! SQLite schema definition.

/// Complete database schema for VetFiles.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Owners (clients)
-- ============================================================================

CREATE TABLE IF NOT EXISTS owners (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    cedula TEXT NOT NULL,
    full_name TEXT NOT NULL,
    phone TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT '',
    address TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_owners_full_name ON owners(full_name);
CREATE INDEX IF NOT EXISTS idx_owners_cedula ON owners(cedula);

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id INTEGER NOT NULL REFERENCES owners(id),
    name TEXT NOT NULL,
    species TEXT NOT NULL,
    breed TEXT NOT NULL DEFAULT '',
    age_months INTEGER NOT NULL DEFAULT 0,
    weight_kg REAL NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_patients_owner ON patients(owner_id);
CREATE INDEX IF NOT EXISTS idx_patients_name ON patients(name);

-- ============================================================================
-- Staff users
-- ============================================================================

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    cedula TEXT NOT NULL,
    full_name TEXT NOT NULL,
    email TEXT NOT NULL DEFAULT '',
    phone TEXT NOT NULL DEFAULT '',
    role TEXT NOT NULL CHECK (role IN ('Doctor', 'Asistente', 'Administrativo')),
    password_hash TEXT NOT NULL,
    created_at INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_users_full_name ON users(full_name);

-- ============================================================================
-- Appointments
-- ============================================================================

CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL REFERENCES patients(id),
    doctor_id INTEGER NOT NULL REFERENCES users(id),
    assistant_id INTEGER REFERENCES users(id),
    type TEXT NOT NULL CHECK (type IN ('Consulta', 'Vacuna', 'Cirugía', 'Examen')),
    start_time TEXT NOT NULL,
    duration_minutes INTEGER NOT NULL,
    status TEXT NOT NULL DEFAULT 'Programada'
        CHECK (status IN ('Programada', 'Completada', 'Cancelada'))
);

CREATE INDEX IF NOT EXISTS idx_appointments_start ON appointments(start_time);
CREATE INDEX IF NOT EXISTS idx_appointments_patient ON appointments(patient_id);

-- ============================================================================
-- Hospitalizations
-- ============================================================================

CREATE TABLE IF NOT EXISTS hospitalizations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL REFERENCES patients(id),
    doctor_id INTEGER NOT NULL REFERENCES users(id),
    entry_date TEXT NOT NULL DEFAULT (datetime('now')),
    reason TEXT NOT NULL,
    diagnosis_preliminary TEXT NOT NULL DEFAULT '',
    alert_message TEXT,
    alert_time TEXT,
    status TEXT NOT NULL DEFAULT 'Observación'
        CHECK (status IN ('Estable', 'Crítico', 'Observación', 'Alta')),
    treatment_plan TEXT,
    notes TEXT,
    weight_entry REAL,
    discharge_date TEXT
);

CREATE INDEX IF NOT EXISTS idx_hospitalizations_patient ON hospitalizations(patient_id);
CREATE INDEX IF NOT EXISTS idx_hospitalizations_status ON hospitalizations(status);

CREATE TABLE IF NOT EXISTS hospitalization_checks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    hospitalization_id INTEGER NOT NULL REFERENCES hospitalizations(id),
    check_time TEXT NOT NULL DEFAULT (datetime('now')),
    temperature REAL,
    heart_rate INTEGER,
    respiratory_rate INTEGER,
    observations TEXT
);

CREATE INDEX IF NOT EXISTS idx_checks_hospitalization
    ON hospitalization_checks(hospitalization_id);

-- ============================================================================
-- Medical records
-- ============================================================================

CREATE TABLE IF NOT EXISTS medical_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL REFERENCES patients(id),
    doctor_id INTEGER NOT NULL REFERENCES users(id),
    visit_date INTEGER NOT NULL,
    observations TEXT NOT NULL DEFAULT '',
    diagnosis TEXT NOT NULL DEFAULT '',
    treatment TEXT NOT NULL DEFAULT '',
    file_url TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_records_visit_date ON medical_records(visit_date);
CREATE INDEX IF NOT EXISTS idx_records_patient ON medical_records(patient_id);
"#;
