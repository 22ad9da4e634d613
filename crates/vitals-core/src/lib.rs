//! Vitalwatch Core Library
//!
//! Classifies vital-sign readings (body temperature, pulse rate, SpO2) into
//! clinical condition tags and folds a reading-set into an overall verdict.
//!
//! The pipeline is `normalize → classify → lookup → aggregate`, driven by a
//! single immutable [`VitalsConfig`] that holds unit rules, range tables and
//! the message catalog. [`VitalsMonitor`] wires the stages together.

pub mod aggregate;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod domain;
pub mod monitor;
pub mod obs;
pub mod profile;
pub mod range_table;
pub mod reporting;
pub mod telemetry;
pub mod units;

pub use domain::{
    ConditionBands, ConditionTag, OverallStatus, Reading, Result, Severity, VitalType,
    VitalsError,
};

pub use aggregate::{aggregate, overall_status, AggregateStatus, Finding};
pub use catalog::{LanguagePack, MessageCatalog, DEFAULT_LANGUAGE};
pub use classify::classify;
pub use config::{ConfigFile, TableSpec, VitalSpec, VitalsConfig};
pub use monitor::{vitals_ok, VitalAssessment, VitalsMonitor};
pub use profile::{PatientProfile, ProfileKind};
pub use range_table::{
    tolerance_width, Edge, Range, RangeTable, RangeTables, VitalLimits,
    DEFAULT_TOLERANCE_PERCENT,
};
pub use reporting::{render_status_text, write_status_json, StatusReport, REPORT_SCHEMA_VERSION};
pub use units::{UnitRegistry, UnitRule, VitalUnits};

pub use obs::{
    emit_assessment_error, emit_config_loaded, emit_status_aggregated, emit_vital_assessed,
    AssessmentSpan,
};
pub use telemetry::init_tracing;

/// Vitalwatch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
