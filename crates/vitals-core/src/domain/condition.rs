//! Condition tags, their severities, and the overall verdict scale.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::vital::VitalType;

/// Classification label for a range of canonical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionTag {
    // Temperature
    Hypothermia,
    NearHypothermia,
    Normal,
    NearHyperthermia,
    Hyperthermia,

    // Pulse rate
    Bradycardia,
    NearBradycardia,
    NearTachycardia,
    Tachycardia,

    // SpO2
    LowOxygen,
    NearLowOxygen,
    NearHighOxygen,
    HighOxygen,
}

impl ConditionTag {
    pub const ALL: [ConditionTag; 13] = [
        ConditionTag::Hypothermia,
        ConditionTag::NearHypothermia,
        ConditionTag::Normal,
        ConditionTag::NearHyperthermia,
        ConditionTag::Hyperthermia,
        ConditionTag::Bradycardia,
        ConditionTag::NearBradycardia,
        ConditionTag::NearTachycardia,
        ConditionTag::Tachycardia,
        ConditionTag::LowOxygen,
        ConditionTag::NearLowOxygen,
        ConditionTag::NearHighOxygen,
        ConditionTag::HighOxygen,
    ];

    pub fn severity(self) -> Severity {
        match self {
            ConditionTag::Normal => Severity::Normal,
            ConditionTag::NearHypothermia
            | ConditionTag::NearHyperthermia
            | ConditionTag::NearBradycardia
            | ConditionTag::NearTachycardia
            | ConditionTag::NearLowOxygen
            | ConditionTag::NearHighOxygen => Severity::Warning,
            ConditionTag::Hypothermia
            | ConditionTag::Hyperthermia
            | ConditionTag::Bradycardia
            | ConditionTag::Tachycardia
            | ConditionTag::LowOxygen
            | ConditionTag::HighOxygen => Severity::Critical,
        }
    }

    pub fn is_normal(self) -> bool {
        self == ConditionTag::Normal
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConditionTag::Hypothermia => "hypothermia",
            ConditionTag::NearHypothermia => "near_hypothermia",
            ConditionTag::Normal => "normal",
            ConditionTag::NearHyperthermia => "near_hyperthermia",
            ConditionTag::Hyperthermia => "hyperthermia",
            ConditionTag::Bradycardia => "bradycardia",
            ConditionTag::NearBradycardia => "near_bradycardia",
            ConditionTag::NearTachycardia => "near_tachycardia",
            ConditionTag::Tachycardia => "tachycardia",
            ConditionTag::LowOxygen => "low_oxygen",
            ConditionTag::NearLowOxygen => "near_low_oxygen",
            ConditionTag::NearHighOxygen => "near_high_oxygen",
            ConditionTag::HighOxygen => "high_oxygen",
        }
    }
}

impl fmt::Display for ConditionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How urgent a single condition is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

/// Worst-case verdict across every vital in one reading-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Ok,
    Warning,
    Critical,
}

impl OverallStatus {
    pub const ALL: [OverallStatus; 3] = [
        OverallStatus::Ok,
        OverallStatus::Warning,
        OverallStatus::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OverallStatus::Ok => "ok",
            OverallStatus::Warning => "warning",
            OverallStatus::Critical => "critical",
        }
    }
}

impl From<Severity> for OverallStatus {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Normal => OverallStatus::Ok,
            Severity::Warning => OverallStatus::Warning,
            Severity::Critical => OverallStatus::Critical,
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five tags a vital's range table is built from, low to high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionBands {
    pub low_critical: ConditionTag,
    pub low_warning: ConditionTag,
    pub normal: ConditionTag,
    pub high_warning: ConditionTag,
    pub high_critical: ConditionTag,
}

impl ConditionBands {
    pub fn for_vital(vital: VitalType) -> Self {
        match vital {
            VitalType::Temperature => Self {
                low_critical: ConditionTag::Hypothermia,
                low_warning: ConditionTag::NearHypothermia,
                normal: ConditionTag::Normal,
                high_warning: ConditionTag::NearHyperthermia,
                high_critical: ConditionTag::Hyperthermia,
            },
            VitalType::PulseRate => Self {
                low_critical: ConditionTag::Bradycardia,
                low_warning: ConditionTag::NearBradycardia,
                normal: ConditionTag::Normal,
                high_warning: ConditionTag::NearTachycardia,
                high_critical: ConditionTag::Tachycardia,
            },
            VitalType::Spo2 => Self {
                low_critical: ConditionTag::LowOxygen,
                low_warning: ConditionTag::NearLowOxygen,
                normal: ConditionTag::Normal,
                high_warning: ConditionTag::NearHighOxygen,
                high_critical: ConditionTag::HighOxygen,
            },
        }
    }

    /// Tags in ascending value order.
    pub fn in_order(&self) -> [ConditionTag; 5] {
        [
            self.low_critical,
            self.low_warning,
            self.normal,
            self.high_warning,
            self.high_critical,
        ]
    }
}
