//! Domain-level error taxonomy for vitalwatch.

use super::vital::VitalType;

/// Vitalwatch domain errors.
#[derive(Debug, thiserror::Error)]
pub enum VitalsError {
    #[error("unsupported unit '{unit}' for {vital}")]
    UnsupportedUnit { unit: String, vital: VitalType },

    #[error("invalid value for {vital}: {value} is not a finite number")]
    InvalidValue { vital: VitalType, value: f64 },

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("unknown vital type: {0}")]
    UnknownVitalType(String),

    #[error("invalid range table for {vital}: {reason}")]
    InvalidRangeTable { vital: VitalType, reason: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("duplicate reading for {0}")]
    DuplicateReading(VitalType),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for vitalwatch domain operations.
pub type Result<T> = std::result::Result<T, VitalsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_unit_display() {
        let err = VitalsError::UnsupportedUnit {
            unit: "X".to_string(),
            vital: VitalType::Temperature,
        };
        let msg = err.to_string();
        assert!(msg.contains("unsupported unit"));
        assert!(msg.contains("'X'"));
        assert!(msg.contains("temperature"));
    }

    #[test]
    fn test_invalid_value_display() {
        let err = VitalsError::InvalidValue {
            vital: VitalType::PulseRate,
            value: f64::NAN,
        };
        assert!(err.to_string().contains("not a finite number"));
    }

    #[test]
    fn test_range_table_error() {
        let err = VitalsError::InvalidRangeTable {
            vital: VitalType::Spo2,
            reason: "gap at 91.5".to_string(),
        };
        assert!(err.to_string().contains("spo2"));
        assert!(err.to_string().contains("gap at 91.5"));
    }
}
