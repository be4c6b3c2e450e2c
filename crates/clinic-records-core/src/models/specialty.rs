//! Practice-area classification for a patient's owning doctor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Closed set of dental specialties a patient record can be filed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialty {
    /// General dentistry (the clinic default)
    #[default]
    Odontology,
    Orthodontics,
    Endodontics,
    Periodontics,
    Prosthodontics,
    OralSurgery,
    PediatricDentistry,
}

impl Specialty {
    pub const ALL: [Specialty; 7] = [
        Specialty::Odontology,
        Specialty::Orthodontics,
        Specialty::Endodontics,
        Specialty::Periodontics,
        Specialty::Prosthodontics,
        Specialty::OralSurgery,
        Specialty::PediatricDentistry,
    ];

    /// Canonical wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::Odontology => "odontology",
            Specialty::Orthodontics => "orthodontics",
            Specialty::Endodontics => "endodontics",
            Specialty::Periodontics => "periodontics",
            Specialty::Prosthodontics => "prosthodontics",
            Specialty::OralSurgery => "oral_surgery",
            Specialty::PediatricDentistry => "pediatric_dentistry",
        }
    }

    /// Parse a specialty name, ignoring case and `-`/space vs `_`.
    ///
    /// Unknown names are rejected rather than stored verbatim.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let canonical = value.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.as_str() == canonical)
            .ok_or_else(|| ValidationError::new(format!("unknown specialty: {:?}", value.trim())))
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Specialty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
