//! SQLite-backed patient repository.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use super::{PatientRepository, RepoError, RepoResult};
use crate::db::{Database, DbError};
use crate::models::Patient;

/// Repository over a single SQLite connection.
///
/// The connection is serialized behind a mutex so the repository can be
/// shared across threads.
pub struct SqlitePatientRepository {
    db: Mutex<Database>,
}

impl SqlitePatientRepository {
    pub fn new(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }

    /// Open (or create) a database file.
    pub fn open<P: AsRef<Path>>(path: P) -> RepoResult<Self> {
        Ok(Self::new(Database::open(path)?))
    }

    pub fn open_in_memory() -> RepoResult<Self> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Database>> {
        self.db
            .lock()
            .map_err(|e| RepoError::Storage(format!("Lock poisoned: {}", e)))
    }
}

impl PatientRepository for SqlitePatientRepository {
    fn create(&self, patient: Patient) -> RepoResult<Patient> {
        let db = self.lock()?;
        match db.insert_patient(&patient) {
            Ok(()) => Ok(patient),
            // Primary key collision vs. a CHECK failure on a required column
            Err(DbError::Constraint(msg)) => {
                if db.get_patient(&patient.id)?.is_some() {
                    Err(RepoError::Conflict(patient.id))
                } else {
                    Err(DbError::Constraint(msg).into())
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get_by_id(&self, id: &str) -> RepoResult<Patient> {
        let db = self.lock()?;
        db.get_patient(id)?
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }

    fn list_by_doctor(&self, doctor_id: &str) -> RepoResult<Vec<Patient>> {
        let db = self.lock()?;
        Ok(db.list_patients_for_doctor(doctor_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_get() {
        let repo = SqlitePatientRepository::open_in_memory().unwrap();
        let patient = Patient::new("doc1".into(), "Ana".into(), "Gomez".into());

        repo.create(patient.clone()).unwrap();
        assert_eq!(repo.get_by_id(&patient.id).unwrap(), patient);
    }

    #[test]
    fn test_missing_is_not_found() {
        let repo = SqlitePatientRepository::open_in_memory().unwrap();
        let err = repo.get_by_id("pat-nope").unwrap_err();
        assert!(matches!(err, RepoError::NotFound(ref id) if id == "pat-nope"));
    }

    #[test]
    fn test_duplicate_is_conflict() {
        let repo = SqlitePatientRepository::open_in_memory().unwrap();
        let patient = Patient::new("doc1".into(), "Ana".into(), "Gomez".into());
        repo.create(patient.clone()).unwrap();

        let err = repo.create(patient).unwrap_err();
        assert!(matches!(err, RepoError::Conflict(_)));
    }

    #[test]
    fn test_blank_required_column_is_not_conflict() {
        let repo = SqlitePatientRepository::open_in_memory().unwrap();
        let patient = Patient::new("doc1".into(), " ".into(), "Gomez".into());

        let err = repo.create(patient).unwrap_err();
        assert!(matches!(err, RepoError::Database(DbError::Constraint(_))));
    }
}
