//! SQLite schema definition.

/// Complete database schema for clinic records.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id TEXT PRIMARY KEY,                          -- pat-<uuid>, assigned by the core
    doctor_id TEXT NOT NULL CHECK (length(trim(doctor_id)) > 0),
    specialty TEXT NOT NULL DEFAULT 'odontology',
    first_name TEXT NOT NULL CHECK (length(trim(first_name)) > 0),
    last_name TEXT NOT NULL CHECK (length(trim(last_name)) > 0),
    document_id TEXT,
    phone TEXT,
    email TEXT,
    birth_date TEXT,
    medical_background TEXT NOT NULL DEFAULT '[]',  -- JSON array of MedicalBackground
    image_keys TEXT NOT NULL DEFAULT '[]',          -- JSON array of strings
    created_at TEXT NOT NULL                        -- RFC 3339, UTC, nanosecond precision
);

CREATE INDEX IF NOT EXISTS idx_patients_doctor ON patients(doctor_id, created_at);

-- created_at is write-once
CREATE TRIGGER IF NOT EXISTS patients_created_at_immutable BEFORE UPDATE OF id, created_at ON patients
BEGIN
    SELECT RAISE(ABORT, 'Patient id and created_at are immutable');
END;
"#;
