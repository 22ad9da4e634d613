//! Structured observability hooks for the assessment pipeline.
//!
//! This module provides:
//! - A reading-set scoped tracing span via the `AssessmentSpan` RAII guard
//! - Emission functions for config load, per-vital classification, and the
//!   aggregated verdict
//!
//! Normal vitals are logged at `info!`, anything else at `warn!` so that
//! abnormal readings stand out in a filtered log (`RUST_LOG=warn`).

use tracing::{info, warn};

use crate::domain::{ConditionTag, OverallStatus, VitalType};

/// RAII guard that enters an assessment span for one reading-set.
///
/// # Example
///
/// ```ignore
/// let _span = AssessmentSpan::enter(3);
/// // every event below carries readings = 3
/// ```
pub struct AssessmentSpan {
    _span: tracing::span::EnteredSpan,
}

impl AssessmentSpan {
    pub fn enter(readings: usize) -> Self {
        let span = tracing::info_span!("vitals.assessment", readings = readings);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: configuration built and validated.
pub fn emit_config_loaded(digest: &str, tolerance_percent: f64, default_language: &str) {
    info!(
        event = "config.loaded",
        digest = %digest,
        tolerance_percent = tolerance_percent,
        default_language = %default_language,
    );
}

/// Emit event: one vital classified.
pub fn emit_vital_assessed(vital: VitalType, canonical_value: f64, condition: ConditionTag) {
    if condition.is_normal() {
        info!(
            event = "vital.assessed",
            vital = %vital,
            value = canonical_value,
            condition = %condition,
        );
    } else {
        warn!(
            event = "vital.assessed",
            vital = %vital,
            value = canonical_value,
            condition = %condition,
            severity = ?condition.severity(),
        );
    }
}

/// Emit event: overall verdict for a reading-set.
pub fn emit_status_aggregated(overall: OverallStatus, failures: usize, warnings: usize) {
    info!(
        event = "status.aggregated",
        overall = %overall,
        failures = failures,
        warnings = warnings,
    );
}

/// Emit event: a reading could not be assessed (warning level).
pub fn emit_assessment_error(vital: VitalType, error: &dyn std::fmt::Display) {
    warn!(event = "vital.error", vital = %vital, error = %error);
}
