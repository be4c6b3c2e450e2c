//! Persistence abstraction for patient records.
//!
//! The service layer only sees [`PatientRepository`]; storage details stay
//! behind it.
//!
//! # Contract
//! - `create` persists durably before returning and may return an enriched copy.
//! - `get_by_id` reports a missing record as [`RepoError::NotFound`], distinct
//!   from storage failures.

mod memory;
mod sqlite;

pub use memory::InMemoryPatientRepository;
pub use sqlite::SqlitePatientRepository;

use std::sync::Arc;

pub use crate::error::{RepoError, RepoResult};
use crate::models::Patient;

/// Storage capability consumed by [`crate::service::PatientService`].
pub trait PatientRepository: Send + Sync {
    /// Persist a newly constructed patient.
    fn create(&self, patient: Patient) -> RepoResult<Patient>;

    /// Fetch one patient by id.
    fn get_by_id(&self, id: &str) -> RepoResult<Patient>;

    /// All patients owned by a doctor, oldest first.
    fn list_by_doctor(&self, doctor_id: &str) -> RepoResult<Vec<Patient>>;
}

impl<R: PatientRepository + ?Sized> PatientRepository for &R {
    fn create(&self, patient: Patient) -> RepoResult<Patient> {
        (**self).create(patient)
    }

    fn get_by_id(&self, id: &str) -> RepoResult<Patient> {
        (**self).get_by_id(id)
    }

    fn list_by_doctor(&self, doctor_id: &str) -> RepoResult<Vec<Patient>> {
        (**self).list_by_doctor(doctor_id)
    }
}

impl<R: PatientRepository + ?Sized> PatientRepository for Arc<R> {
    fn create(&self, patient: Patient) -> RepoResult<Patient> {
        (**self).create(patient)
    }

    fn get_by_id(&self, id: &str) -> RepoResult<Patient> {
        (**self).get_by_id(id)
    }

    fn list_by_doctor(&self, doctor_id: &str) -> RepoResult<Vec<Patient>> {
        (**self).list_by_doctor(doctor_id)
    }
}

impl<R: PatientRepository + ?Sized> PatientRepository for Box<R> {
    fn create(&self, patient: Patient) -> RepoResult<Patient> {
        (**self).create(patient)
    }

    fn get_by_id(&self, id: &str) -> RepoResult<Patient> {
        (**self).get_by_id(id)
    }

    fn list_by_doctor(&self, doctor_id: &str) -> RepoResult<Vec<Patient>> {
        (**self).list_by_doctor(doctor_id)
    }
}
