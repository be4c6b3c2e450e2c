//! In-memory patient repository.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{PatientRepository, RepoError, RepoResult};
use crate::models::Patient;

/// Process-local repository backed by a `HashMap`.
///
/// Suitable for tests and embedders that do not need durability.
#[derive(Debug, Default)]
pub struct InMemoryPatientRepository {
    patients: RwLock<HashMap<String, Patient>>,
}

impl InMemoryPatientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored patients.
    pub fn len(&self) -> usize {
        self.patients
            .read()
            .map(|p| p.len())
            .unwrap_or_else(|e| e.into_inner().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> RepoError {
    RepoError::Storage(format!("Lock poisoned: {}", e))
}

impl PatientRepository for InMemoryPatientRepository {
    fn create(&self, patient: Patient) -> RepoResult<Patient> {
        let mut patients = self.patients.write().map_err(poisoned)?;
        if patients.contains_key(&patient.id) {
            return Err(RepoError::Conflict(patient.id));
        }
        patients.insert(patient.id.clone(), patient.clone());
        Ok(patient)
    }

    fn get_by_id(&self, id: &str) -> RepoResult<Patient> {
        let patients = self.patients.read().map_err(poisoned)?;
        patients
            .get(id)
            .cloned()
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }

    fn list_by_doctor(&self, doctor_id: &str) -> RepoResult<Vec<Patient>> {
        let patients = self.patients.read().map_err(poisoned)?;
        let mut owned: Vec<Patient> = patients
            .values()
            .filter(|p| p.doctor_id == doctor_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_get() {
        let repo = InMemoryPatientRepository::new();
        let patient = Patient::new("doc1".into(), "Ana".into(), "Gomez".into());

        let stored = repo.create(patient.clone()).unwrap();
        assert_eq!(stored, patient);
        assert_eq!(repo.get_by_id(&patient.id).unwrap(), patient);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_missing_is_not_found() {
        let repo = InMemoryPatientRepository::new();
        let err = repo.get_by_id("pat-nope").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_duplicate_is_conflict() {
        let repo = InMemoryPatientRepository::new();
        let patient = Patient::new("doc1".into(), "Ana".into(), "Gomez".into());
        repo.create(patient.clone()).unwrap();

        let err = repo.create(patient).unwrap_err();
        assert!(matches!(err, RepoError::Conflict(_)));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_len_survives_poisoned_lock() {
        let repo = std::sync::Arc::new(InMemoryPatientRepository::new());
        repo.create(Patient::new("doc1".into(), "Ana".into(), "Gomez".into()))
            .unwrap();

        let poisoner = std::sync::Arc::clone(&repo);
        let result = std::thread::spawn(move || {
            let _guard = poisoner.patients.write().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(result.is_err());

        assert_eq!(repo.len(), 1);
        assert!(!repo.is_empty());
        assert!(matches!(repo.get_by_id("pat-x"), Err(RepoError::Storage(_))));
    }

    #[test]
    fn test_list_by_doctor() {
        let repo = InMemoryPatientRepository::new();
        let first = Patient::new("doc1".into(), "Ana".into(), "Gomez".into());
        let mut second = Patient::new("doc1".into(), "Luis".into(), "Perez".into());
        second.created_at = first.created_at + chrono::Duration::seconds(1);

        repo.create(second.clone()).unwrap();
        repo.create(first.clone()).unwrap();
        repo.create(Patient::new("doc2".into(), "Eva".into(), "Diaz".into()))
            .unwrap();

        let listed = repo.list_by_doctor("doc1").unwrap();
        assert_eq!(listed, vec![first, second]);
        assert!(repo.list_by_doctor("doc3").unwrap().is_empty());
    }
}
