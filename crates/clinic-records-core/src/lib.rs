//! Clinic Records Core Library
//!
//! Patient onboarding and lookup for a dental clinic records system.
//!
//! # Architecture
//!
//! ```text
//!   FFI / embedding host
//!           │
//!           ▼
//!   PatientService ── validate ── default specialty ── stamp id + created_at
//!           │
//!           ▼
//!   PatientRepository (trait)
//!       ├── SqlitePatientRepository  (rusqlite)
//!       └── InMemoryPatientRepository
//! ```
//!
//! # Core Principle
//!
//! **Validation happens before any side effect.** A rejected request never
//! reaches the repository, and repository errors are surfaced unchanged.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, NewPatient, Specialty, MedicalBackground)
//! - [`service`]: Onboarding and lookup use cases
//! - [`repo`]: Persistence abstraction and its implementations
//! - [`db`]: SQLite database layer
//! - [`error`]: Validation / repository / service errors
//! - [`config`]: Environment-driven configuration
//! - [`logging`]: Logger bootstrap

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod repo;
pub mod service;

// Re-export commonly used types
pub use config::ClinicConfig;
pub use db::Database;
pub use error::{ErrorClass, PatientError, PatientResult, RepoError, ValidationError};
pub use models::{MedicalBackground, NewPatient, Patient, Specialty};
pub use repo::{InMemoryPatientRepository, PatientRepository, SqlitePatientRepository};
pub use service::PatientService;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicRecordsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<ValidationError> for ClinicRecordsError {
    fn from(e: ValidationError) -> Self {
        ClinicRecordsError::InvalidInput(e.message().to_string())
    }
}

impl From<RepoError> for ClinicRecordsError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(id) => ClinicRecordsError::NotFound(id),
            RepoError::Conflict(id) => ClinicRecordsError::Conflict(id),
            RepoError::Database(db::DbError::Json(e)) => {
                ClinicRecordsError::SerializationError(e.to_string())
            }
            other => ClinicRecordsError::DatabaseError(other.to_string()),
        }
    }
}

impl From<PatientError> for ClinicRecordsError {
    fn from(e: PatientError) -> Self {
        match e {
            PatientError::Validation(v) => v.into(),
            PatientError::Repository(r) => r.into(),
        }
    }
}

impl From<serde_json::Error> for ClinicRecordsError {
    fn from(e: serde_json::Error) -> Self {
        ClinicRecordsError::SerializationError(e.to_string())
    }
}

impl From<logging::LoggingError> for ClinicRecordsError {
    fn from(e: logging::LoggingError) -> Self {
        ClinicRecordsError::InvalidInput(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<ClinicRecordsCore>, ClinicRecordsError> {
    let repo = SqlitePatientRepository::open(&path)?;
    Ok(Arc::new(ClinicRecordsCore::with_repository(repo)))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<ClinicRecordsCore>, ClinicRecordsError> {
    let repo = SqlitePatientRepository::open_in_memory()?;
    Ok(Arc::new(ClinicRecordsCore::with_repository(repo)))
}

/// Open using `CLINIC_*` environment settings, starting logging on the way.
///
/// Logging configured earlier by the host is left as is.
#[uniffi::export]
pub fn open_from_config() -> Result<Arc<ClinicRecordsCore>, ClinicRecordsError> {
    open_with_config(&ClinicConfig::from_env())
}

/// Open using an explicit configuration, starting logging on the way.
pub fn open_with_config(config: &ClinicConfig) -> Result<Arc<ClinicRecordsCore>, ClinicRecordsError> {
    match logging::init_logging(&config.log_level, config.log_dir.as_deref()) {
        Ok(()) | Err(logging::LoggingError::AlreadyInitialized(_)) => {}
        Err(e) => return Err(e.into()),
    }

    let repo = match &config.database_path {
        Some(path) => SqlitePatientRepository::open(path)?,
        None => SqlitePatientRepository::open_in_memory()?,
    };
    Ok(Arc::new(ClinicRecordsCore::with_repository(repo)))
}

/// Start logging. `log_dir` switches from stderr to rotating files.
#[uniffi::export]
pub fn init_logging(level: String, log_dir: Option<String>) -> Result<(), ClinicRecordsError> {
    logging::init_logging(&level, log_dir.as_deref().map(std::path::Path::new))?;
    Ok(())
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe records handle for FFI.
#[derive(uniffi::Object)]
pub struct ClinicRecordsCore {
    service: PatientService<SqlitePatientRepository>,
}

impl ClinicRecordsCore {
    pub fn with_repository(repo: SqlitePatientRepository) -> Self {
        Self {
            service: PatientService::new(repo),
        }
    }
}

#[uniffi::export]
impl ClinicRecordsCore {
    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Onboard a new patient.
    pub fn onboard_patient(&self, input: FfiNewPatient) -> Result<FfiPatient, ClinicRecordsError> {
        let input = NewPatient::try_from(input)?;
        let patient = self.service.onboard(input)?;
        Ok(patient.into())
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: String) -> Result<FfiPatient, ClinicRecordsError> {
        let patient = self.service.find_by_id(&id)?;
        Ok(patient.into())
    }

    /// List a doctor's patients, oldest first.
    pub fn list_patients_for_doctor(
        &self,
        doctor_id: String,
    ) -> Result<Vec<FfiPatient>, ClinicRecordsError> {
        let patients = self.service.list_for_doctor(&doctor_id)?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    /// Get a patient as JSON.
    pub fn get_patient_json(&self, id: String) -> Result<String, ClinicRecordsError> {
        let patient = self.service.find_by_id(&id)?;
        Ok(patient.to_json()?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe medical background entry.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiMedicalBackground {
    pub kind: String,
    pub description: String,
    pub recorded_at: Option<String>,
}

impl From<MedicalBackground> for FfiMedicalBackground {
    fn from(entry: MedicalBackground) -> Self {
        Self {
            kind: entry.kind,
            description: entry.description,
            recorded_at: entry.recorded_at,
        }
    }
}

impl From<FfiMedicalBackground> for MedicalBackground {
    fn from(entry: FfiMedicalBackground) -> Self {
        MedicalBackground {
            kind: entry.kind,
            description: entry.description,
            recorded_at: entry.recorded_at,
        }
    }
}

/// FFI-safe onboarding input.
///
/// `specialty` is `None` or blank for the default; unknown names are rejected.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPatient {
    pub doctor_id: String,
    pub specialty: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub document_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<String>,
    pub medical_background: Vec<FfiMedicalBackground>,
    pub image_keys: Vec<String>,
}

impl TryFrom<FfiNewPatient> for NewPatient {
    type Error = ValidationError;

    fn try_from(input: FfiNewPatient) -> Result<Self, Self::Error> {
        Ok(NewPatient {
            doctor_id: input.doctor_id,
            specialty: models::parse_specialty_input(input.specialty.as_deref())?,
            first_name: input.first_name,
            last_name: input.last_name,
            document_id: input.document_id,
            phone: input.phone,
            email: input.email,
            birth_date: input.birth_date,
            medical_background: input
                .medical_background
                .into_iter()
                .map(|e| e.into())
                .collect(),
            image_keys: input.image_keys,
        })
    }
}

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub doctor_id: String,
    pub specialty: String,
    pub first_name: String,
    pub last_name: String,
    pub document_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<String>,
    pub medical_background: Vec<FfiMedicalBackground>,
    pub image_keys: Vec<String>,
    /// RFC 3339, UTC
    pub created_at: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            doctor_id: patient.doctor_id,
            specialty: patient.specialty.to_string(),
            first_name: patient.first_name,
            last_name: patient.last_name,
            document_id: patient.document_id,
            phone: patient.phone,
            email: patient.email,
            birth_date: patient.birth_date,
            medical_background: patient
                .medical_background
                .into_iter()
                .map(|e| e.into())
                .collect(),
            image_keys: patient.image_keys,
            created_at: patient.created_at.to_rfc3339(),
        }
    }
}
