//! Patient database operations.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{Patient, Specialty};

const PATIENT_COLUMNS: &str = r#"
    id, doctor_id, specialty, first_name, last_name, document_id, phone,
    email, birth_date, medical_background, image_keys, created_at
"#;

impl Database {
    /// Insert a new patient.
    ///
    /// A duplicate id is reported as [`DbError::Constraint`].
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<()> {
        let background_json = serde_json::to_string(&patient.medical_background)?;
        let image_keys_json = serde_json::to_string(&patient.image_keys)?;

        let result = self.conn.execute(
            r#"
            INSERT INTO patients (
                id, doctor_id, specialty, first_name, last_name, document_id, phone,
                email, birth_date, medical_background, image_keys, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                patient.id,
                patient.doctor_id,
                patient.specialty.as_str(),
                patient.first_name,
                patient.last_name,
                patient.document_id,
                patient.phone,
                patient.email,
                patient.birth_date,
                background_json,
                image_keys_json,
                format_timestamp(&patient.created_at),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, msg))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(DbError::Constraint(
                    msg.unwrap_or_else(|| format!("patient {} rejected", patient.id)),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: &str) -> DbResult<Option<Patient>> {
        let sql = format!("SELECT {} FROM patients WHERE id = ?", PATIENT_COLUMNS);
        let row = self
            .conn
            .query_row(&sql, [id], PatientRow::from_row)
            .optional()?;

        row.map(Patient::try_from).transpose()
    }

    /// List a doctor's patients, oldest first.
    pub fn list_patients_for_doctor(&self, doctor_id: &str) -> DbResult<Vec<Patient>> {
        let sql = format!(
            "SELECT {} FROM patients WHERE doctor_id = ? ORDER BY created_at, id",
            PATIENT_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([doctor_id], PatientRow::from_row)?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        Ok(patients)
    }

    /// Count stored patients.
    pub fn count_patients(&self) -> DbResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| DbError::InvalidData(format!("patient count {}", count)))
    }
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(raw: &str) -> DbResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DbError::InvalidData(format!("created_at {:?}: {}", raw, e)))
}

/// Intermediate row struct for database mapping.
struct PatientRow {
    id: String,
    doctor_id: String,
    specialty: String,
    first_name: String,
    last_name: String,
    document_id: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    birth_date: Option<String>,
    medical_background: String,
    image_keys: String,
    created_at: String,
}

impl PatientRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            doctor_id: row.get(1)?,
            specialty: row.get(2)?,
            first_name: row.get(3)?,
            last_name: row.get(4)?,
            document_id: row.get(5)?,
            phone: row.get(6)?,
            email: row.get(7)?,
            birth_date: row.get(8)?,
            medical_background: row.get(9)?,
            image_keys: row.get(10)?,
            created_at: row.get(11)?,
        })
    }
}

impl TryFrom<PatientRow> for Patient {
    type Error = DbError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        let specialty = Specialty::parse(&row.specialty)
            .map_err(|e| DbError::InvalidData(e.message().to_string()))?;

        Ok(Patient {
            id: row.id,
            doctor_id: row.doctor_id,
            specialty,
            first_name: row.first_name,
            last_name: row.last_name,
            document_id: row.document_id,
            phone: row.phone,
            email: row.email,
            birth_date: row.birth_date,
            medical_background: serde_json::from_str(&row.medical_background)?,
            image_keys: serde_json::from_str(&row.image_keys)?,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MedicalBackground;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();

        let mut patient = Patient::new("doc1".into(), "Ana".into(), "Gomez".into());
        patient.specialty = Specialty::Orthodontics;
        patient.phone = Some("+54 11 5555 0000".into());
        patient.medical_background = vec![
            MedicalBackground {
                kind: "allergy".into(),
                description: "latex".into(),
                recorded_at: Some("2023-04-01".into()),
            },
            MedicalBackground {
                kind: "medication".into(),
                description: "ibuprofen".into(),
                recorded_at: None,
            },
        ];
        patient.image_keys = vec!["xray/1.png".into(), "xray/2.png".into()];

        db.insert_patient(&patient).unwrap();

        let retrieved = db.get_patient(&patient.id).unwrap().unwrap();
        assert_eq!(retrieved, patient);
        assert_eq!(retrieved.medical_background[1].description, "ibuprofen");
        assert_eq!(retrieved.image_keys[0], "xray/1.png");
    }

    #[test]
    fn test_get_missing() {
        let db = setup_db();
        assert!(db.get_patient("pat-missing").unwrap().is_none());
        assert_eq!(db.count_patients().unwrap(), 0);
    }

    #[test]
    fn test_duplicate_id_is_constraint() {
        let db = setup_db();
        let patient = Patient::new("doc1".into(), "Ana".into(), "Gomez".into());
        db.insert_patient(&patient).unwrap();

        let err = db.insert_patient(&patient).unwrap_err();
        assert!(matches!(err, DbError::Constraint(_)));
        assert_eq!(db.count_patients().unwrap(), 1);
    }

    #[test]
    fn test_list_for_doctor_ordered() {
        let db = setup_db();

        let first = Patient::new("doc1".into(), "Ana".into(), "Gomez".into());
        let mut second = Patient::new("doc1".into(), "Luis".into(), "Perez".into());
        second.created_at = first.created_at + chrono::Duration::seconds(5);
        let other = Patient::new("doc2".into(), "Eva".into(), "Diaz".into());

        db.insert_patient(&second).unwrap();
        db.insert_patient(&other).unwrap();
        db.insert_patient(&first).unwrap();

        let listed = db.list_patients_for_doctor("doc1").unwrap();
        let ids: Vec<_> = listed.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);
    }

    #[test]
    fn test_corrupt_specialty_rejected() {
        let db = setup_db();
        db.conn()
            .execute(
                "INSERT INTO patients (id, doctor_id, specialty, first_name, last_name, created_at) VALUES ('pat-x', 'doc1', 'astrology', 'Ana', 'Gomez', '2024-01-15T10:00:00Z')",
                [],
            )
            .unwrap();

        let err = db.get_patient("pat-x").unwrap_err();
        assert!(matches!(err, DbError::InvalidData(_)));
    }
}
