//! The assessment facade.
//!
//! [`VitalsMonitor`] composes the pipeline stages over a shared, immutable
//! [`VitalsConfig`]: normalize → classify → look up messages → aggregate.
//! It holds no mutable state, so one monitor can serve any number of callers.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate, AggregateStatus, Finding};
use crate::config::VitalsConfig;
use crate::domain::{ConditionTag, Reading, Result, Severity, VitalType, VitalsError};
use crate::obs::{
    emit_assessment_error, emit_config_loaded, emit_status_aggregated, emit_vital_assessed,
    AssessmentSpan,
};
use crate::profile::PatientProfile;
use crate::reporting::{StatusReport, REPORT_SCHEMA_VERSION};

/// Full result for one reading, including the canonical value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VitalAssessment {
    pub vital: VitalType,
    pub value: f64,
    pub unit: String,
    pub canonical_value: f64,
    pub canonical_unit: String,
    pub condition: ConditionTag,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Entry point for assessing readings against one configuration.
#[derive(Debug, Clone, Default)]
pub struct VitalsMonitor {
    config: Arc<VitalsConfig>,
}

impl VitalsMonitor {
    pub fn new(config: VitalsConfig) -> Self {
        Self::shared(Arc::new(config))
    }

    /// Wrap an already shared configuration.
    pub fn shared(config: Arc<VitalsConfig>) -> Self {
        match config.digest() {
            Ok(digest) => emit_config_loaded(
                &digest,
                config.tolerance_percent(),
                config.default_language(),
            ),
            Err(e) => tracing::warn!(event = "config.digest_error", error = %e),
        }
        Self { config }
    }

    /// Monitor with built-in units and catalog and profile-adjusted limits.
    pub fn for_profile(profile: &PatientProfile) -> Result<Self> {
        Ok(Self::new(VitalsConfig::for_profile(profile)?))
    }

    pub fn config(&self) -> &VitalsConfig {
        &self.config
    }

    /// Normalize and classify a single value.
    ///
    /// # Errors
    ///
    /// - `VitalsError::UnknownVitalType`: no table or units for `vital`.
    /// - `VitalsError::UnsupportedUnit`: `unit` is not registered for `vital`.
    /// - `VitalsError::InvalidValue`: `value` is not finite.
    pub fn assess_reading(
        &self,
        value: f64,
        unit: &str,
        vital: VitalType,
    ) -> Result<ConditionTag> {
        self.classify_value(value, unit, vital).map(|(_, tag)| tag)
    }

    fn classify_value(
        &self,
        value: f64,
        unit: &str,
        vital: VitalType,
    ) -> Result<(f64, ConditionTag)> {
        if !value.is_finite() {
            return Err(VitalsError::InvalidValue { vital, value });
        }
        let canonical = self.config.units().normalize(value, unit, vital)?;
        let tag = self.config.tables().classify(canonical, vital)?;
        Ok((canonical, tag))
    }

    /// Assess one reading and render its message in `language`.
    pub fn assess(&self, reading: &Reading, language: &str) -> Result<VitalAssessment> {
        let vital = reading.vital();
        let (canonical_value, condition) =
            match self.classify_value(reading.value(), reading.unit(), vital) {
                Ok(classified) => classified,
                Err(e) => {
                    emit_assessment_error(vital, &e);
                    return Err(e);
                }
            };
        emit_vital_assessed(vital, canonical_value, condition);

        Ok(VitalAssessment {
            vital,
            value: reading.value(),
            unit: reading.unit().to_string(),
            canonical_value,
            canonical_unit: self.config.units().canonical_unit(vital)?.to_string(),
            condition,
            severity: condition.severity(),
            message: self.config.catalog().lookup(condition, language)?.to_string(),
            timestamp: reading.timestamp(),
            source: reading.source().map(str::to_string),
        })
    }

    fn assess_each(&self, readings: &[Reading], language: &str) -> Result<Vec<VitalAssessment>> {
        if !self.config.catalog().supports(language) {
            return Err(VitalsError::UnsupportedLanguage(language.to_string()));
        }
        let mut seen = BTreeSet::new();
        for reading in readings {
            if !seen.insert(reading.vital()) {
                return Err(VitalsError::DuplicateReading(reading.vital()));
            }
        }
        readings.iter().map(|r| self.assess(r, language)).collect()
    }

    /// Assess a reading-set (at most one reading per vital) and aggregate
    /// the result. Findings keep the order of `readings`.
    pub fn assess_all(&self, readings: &[Reading], language: &str) -> Result<AggregateStatus> {
        let _span = AssessmentSpan::enter(readings.len());
        let assessed = self.assess_each(readings, language)?;
        self.aggregate_assessed(&assessed, language)
    }

    fn aggregate_assessed(
        &self,
        assessed: &[VitalAssessment],
        language: &str,
    ) -> Result<AggregateStatus> {
        let conditions: Vec<(VitalType, ConditionTag)> =
            assessed.iter().map(|a| (a.vital, a.condition)).collect();
        let status = aggregate(&conditions, self.config.catalog(), language)?;
        emit_status_aggregated(
            status.overall,
            status.failures().len(),
            status.warnings().len(),
        );
        Ok(status)
    }

    /// Like [`assess_all`](Self::assess_all), plus per-vital detail, the
    /// localized summary and recommendation, and the config digest.
    pub fn report(&self, readings: &[Reading], language: &str) -> Result<StatusReport> {
        let _span = AssessmentSpan::enter(readings.len());
        let vitals = self.assess_each(readings, language)?;
        let status = self.aggregate_assessed(&vitals, language)?;
        let catalog = self.config.catalog();

        Ok(StatusReport {
            schema_version: REPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            language: language.to_string(),
            config_digest: self.config.digest()?,
            overall: status.overall,
            summary: catalog.status_summary(status.overall, language)?.to_string(),
            recommendation: catalog
                .recommendation(status.overall, language)?
                .map(str::to_string),
            vitals,
            findings: status.findings,
        })
    }
}

/// Compatibility check with built-in configuration and default language:
/// `true` only when every vital is normal. Warnings count as issues.
pub fn vitals_ok(readings: &[Reading]) -> Result<(bool, Vec<Finding>)> {
    let monitor = VitalsMonitor::default();
    let language = monitor.config().default_language().to_string();
    let status = monitor.assess_all(readings, &language)?;
    Ok((status.findings.is_empty(), status.findings))
}
