//! Vital types and the readings taken for them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::VitalsError;

/// A category of physiological measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalType {
    Temperature,
    PulseRate,
    Spo2,
}

impl VitalType {
    /// Every vital type, in display order.
    pub const ALL: [VitalType; 3] = [VitalType::Temperature, VitalType::PulseRate, VitalType::Spo2];

    pub fn as_str(self) -> &'static str {
        match self {
            VitalType::Temperature => "temperature",
            VitalType::PulseRate => "pulse_rate",
            VitalType::Spo2 => "spo2",
        }
    }
}

impl fmt::Display for VitalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VitalType {
    type Err = VitalsError;

    /// Accepts snake_case names plus the camelCase and short forms used by
    /// bedside tooling (`pulseRate`, `pulse`, `temp`, `SpO2`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "temperature" | "temp" => Ok(VitalType::Temperature),
            "pulse_rate" | "pulserate" | "pulse" => Ok(VitalType::PulseRate),
            "spo2" => Ok(VitalType::Spo2),
            _ => Err(VitalsError::UnknownVitalType(s.to_string())),
        }
    }
}

/// A single raw measurement as supplied by the caller.
///
/// Immutable once built; the builder methods consume and return `self`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    vital: VitalType,
    value: f64,
    unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl Reading {
    pub fn new(vital: VitalType, value: f64, unit: impl Into<String>) -> Self {
        Self {
            vital,
            value,
            unit: unit.into(),
            timestamp: None,
            source: None,
        }
    }

    /// Attach the time the measurement was taken.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Attach a source label such as `sensor` or `manual`.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn vital(&self) -> VitalType {
        self.vital
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}
