//! Patient models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::specialty::Specialty;
use crate::error::ValidationError;

/// Prefix marking an identifier as a patient id.
pub const PATIENT_ID_PREFIX: &str = "pat";

/// Generate a fresh patient identifier (`pat-<uuid v4>`).
pub fn new_patient_id() -> String {
    format!("{}-{}", PATIENT_ID_PREFIX, uuid::Uuid::new_v4())
}

/// A patient record owned by a doctor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Generated at onboarding, never caller-supplied
    pub id: String,
    /// Owning doctor
    pub doctor_id: String,
    /// Practice area the record is filed under
    pub specialty: Specialty,
    pub first_name: String,
    pub last_name: String,
    /// National ID / passport number (free-form)
    pub document_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Birth date as entered (free-form)
    pub birth_date: Option<String>,
    /// Medical background entries, in entry order
    pub medical_background: Vec<MedicalBackground>,
    /// Object storage keys for attached images, in upload order
    pub image_keys: Vec<String>,
    /// Creation timestamp (UTC), set once
    pub created_at: DateTime<Utc>,
}

impl Patient {
    /// Create a new patient with required fields and the default specialty.
    pub fn new(doctor_id: String, first_name: String, last_name: String) -> Self {
        Self {
            id: new_patient_id(),
            doctor_id,
            specialty: Specialty::default(),
            first_name,
            last_name,
            document_id: None,
            phone: None,
            email: None,
            birth_date: None,
            medical_background: Vec::new(),
            image_keys: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One entry of a patient's medical background.
///
/// Stored and returned as-is; the core never interprets it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MedicalBackground {
    /// Entry kind (e.g. "allergy", "surgery", "medication")
    pub kind: String,
    pub description: String,
    /// When the condition was recorded, as entered
    pub recorded_at: Option<String>,
}

/// Onboarding input for a new patient.
///
/// Carries no id or timestamp; both are assigned during onboarding.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewPatient {
    pub doctor_id: String,
    /// `None` means unspecified and falls back to [`Specialty::default`]
    pub specialty: Option<Specialty>,
    pub first_name: String,
    pub last_name: String,
    pub document_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<String>,
    #[serde(default)]
    pub medical_background: Vec<MedicalBackground>,
    #[serde(default)]
    pub image_keys: Vec<String>,
}

impl NewPatient {
    /// Input with only the required fields set.
    pub fn new(
        doctor_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            doctor_id: doctor_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Default::default()
        }
    }

    /// Set the specialty from a raw string.
    ///
    /// See [`parse_specialty_input`] for how blank and unknown values behave.
    pub fn with_specialty_str(mut self, specialty: Option<&str>) -> Result<Self, ValidationError> {
        self.specialty = parse_specialty_input(specialty)?;
        Ok(self)
    }

    /// Names of required fields that are empty or whitespace-only.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("doctor_id", &self.doctor_id),
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Interpret a specialty coming from a string boundary.
///
/// Absent and blank values mean "unspecified"; anything else must name a
/// known [`Specialty`].
pub fn parse_specialty_input(value: Option<&str>) -> Result<Option<Specialty>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Specialty::parse(raw).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patient() {
        let patient = Patient::new("doc1".into(), "Ana".into(), "Gomez".into());
        assert_eq!(patient.doctor_id, "doc1");
        assert_eq!(patient.full_name(), "Ana Gomez");
        assert_eq!(patient.specialty, Specialty::Odontology);
        assert!(patient.id.starts_with("pat-"));
        assert_eq!(patient.id.len(), 4 + 36); // prefix + UUID format
        assert!(patient.medical_background.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = new_patient_id();
        let b = new_patient_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_missing_required_fields() {
        let input = NewPatient::new("", "Ana", "  ");
        assert_eq!(input.missing_required_fields(), vec!["doctor_id", "last_name"]);

        let input = NewPatient::new("doc1", "Ana", "Gomez");
        assert!(input.missing_required_fields().is_empty());
    }

    #[test]
    fn test_parse_specialty_input() {
        assert_eq!(parse_specialty_input(None).unwrap(), None);
        assert_eq!(parse_specialty_input(Some("   ")).unwrap(), None);
        assert_eq!(
            parse_specialty_input(Some("orthodontics")).unwrap(),
            Some(Specialty::Orthodontics)
        );
        assert!(parse_specialty_input(Some("astrology")).is_err());
    }

    #[test]
    fn test_patient_json() {
        let mut patient = Patient::new("doc1".into(), "Ana".into(), "Gomez".into());
        patient.medical_background.push(MedicalBackground {
            kind: "allergy".into(),
            description: "penicillin".into(),
            recorded_at: None,
        });

        let json = patient.to_json().unwrap();
        assert!(json.contains("\"specialty\":\"odontology\""));

        let back: Patient = serde_json::from_str(&json).unwrap();
        assert_eq!(back, patient);
    }
}
