//! Patient use-case service.
//!
//! # Responsibility
//! - Validate onboarding and lookup input before touching storage.
//! - Assign patient ids and creation timestamps.
//! - Delegate persistence to an injected [`PatientRepository`].
//!
//! # Invariants
//! - A validation failure never reaches the repository.
//! - Each successful-validation call makes exactly one repository call.
//! - Repository errors are returned wrapped, never rewritten.

use log::{debug, info, warn};

use crate::error::{PatientError, PatientResult, ValidationError};
use crate::models::{NewPatient, Patient};
use crate::repo::PatientRepository;

/// Onboarding and lookup of patient records.
///
/// Holds no mutable state; safe to share across threads when `R` is.
pub struct PatientService<R: PatientRepository> {
    repo: R,
}

impl<R: PatientRepository> PatientService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Access the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Validate, construct and persist a new patient.
    ///
    /// # Contract
    /// - `doctor_id`, `first_name` and `last_name` must be non-blank; every
    ///   missing field is listed in the returned [`ValidationError`].
    /// - An unspecified specialty becomes [`crate::models::Specialty::default`].
    /// - Returns the record as handed back by the repository.
    pub fn onboard(&self, input: NewPatient) -> PatientResult<Patient> {
        let missing = input.missing_required_fields();
        if !missing.is_empty() {
            warn!(
                "event=patient_onboard module=service status=rejected missing={}",
                missing.join(",")
            );
            return Err(ValidationError::missing_fields(&missing).into());
        }

        let NewPatient {
            doctor_id,
            specialty,
            first_name,
            last_name,
            document_id,
            phone,
            email,
            birth_date,
            medical_background,
            image_keys,
        } = input;

        let mut patient = Patient::new(doctor_id, first_name, last_name);
        patient.specialty = specialty.unwrap_or_default();
        patient.document_id = document_id;
        patient.phone = phone;
        patient.email = email;
        patient.birth_date = birth_date;
        patient.medical_background = medical_background;
        patient.image_keys = image_keys;

        let id = patient.id.clone();
        match self.repo.create(patient) {
            Ok(stored) => {
                info!(
                    "event=patient_onboard module=service status=ok id={} doctor_id={} specialty={}",
                    stored.id, stored.doctor_id, stored.specialty
                );
                Ok(stored)
            }
            Err(e) => {
                warn!(
                    "event=patient_onboard module=service status=error id={} error={}",
                    id, e
                );
                Err(PatientError::Repository(e))
            }
        }
    }

    /// Fetch a patient by id.
    ///
    /// A blank id fails validation; a missing record surfaces as the
    /// repository's not-found error.
    pub fn find_by_id(&self, id: &str) -> PatientResult<Patient> {
        if id.trim().is_empty() {
            return Err(ValidationError::new("patient id must not be empty").into());
        }

        let patient = self.repo.get_by_id(id).map_err(|e| {
            debug!(
                "event=patient_lookup module=service status=error id={} not_found={}",
                id,
                e.is_not_found()
            );
            PatientError::Repository(e)
        })?;
        debug!("event=patient_lookup module=service status=ok id={}", id);
        Ok(patient)
    }

    /// List a doctor's patients, oldest first.
    pub fn list_for_doctor(&self, doctor_id: &str) -> PatientResult<Vec<Patient>> {
        if doctor_id.trim().is_empty() {
            return Err(ValidationError::new("doctor id must not be empty").into());
        }
        Ok(self.repo.list_by_doctor(doctor_id)?)
    }
}
