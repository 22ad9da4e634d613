//! Patient profiles with age-adjusted critical limits.

use serde::{Deserialize, Serialize};

use crate::domain::VitalType;
use crate::range_table::VitalLimits;

/// Coarse population group a profile belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    #[default]
    Adult,
    Pediatric,
    Geriatric,
}

/// Who the readings belong to. Only affects limits, never the algorithm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub age: Option<u32>,
    pub kind: ProfileKind,
}

impl PatientProfile {
    /// Profile for a patient of known age; the kind follows from the age.
    pub fn with_age(age: u32) -> Self {
        let kind = if age > 65 {
            ProfileKind::Geriatric
        } else if age < 18 {
            ProfileKind::Pediatric
        } else {
            ProfileKind::Adult
        };
        Self {
            age: Some(age),
            kind,
        }
    }

    /// Critical limits for `vital` in its canonical unit.
    ///
    /// Only the pulse window moves with age: 50–90 bpm for geriatric and
    /// 80–120 bpm for pediatric patients.
    pub fn limits(&self, vital: VitalType) -> VitalLimits {
        match (vital, self.kind) {
            (VitalType::PulseRate, ProfileKind::Geriatric) => VitalLimits::new(50.0, 90.0),
            (VitalType::PulseRate, ProfileKind::Pediatric) => VitalLimits::new(80.0, 120.0),
            _ => VitalLimits::adult(vital),
        }
    }
}
