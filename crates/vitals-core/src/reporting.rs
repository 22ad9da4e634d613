//! Status report artifacts: JSON persistence and terminal rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::aggregate::Finding;
use crate::domain::{OverallStatus, Result, Severity};
use crate::monitor::VitalAssessment;

/// Current `schema_version` written into [`StatusReport`].
pub const REPORT_SCHEMA_VERSION: &str = "1.0";

/// Persisted result of assessing one reading-set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusReport {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub language: String,
    pub config_digest: String,
    pub overall: OverallStatus,
    /// Localized one-line summary of `overall`.
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    pub vitals: Vec<VitalAssessment>,
    pub findings: Vec<Finding>,
}

/// Write a status report in pretty JSON format.
pub fn write_status_json(path: &Path, report: &StatusReport) -> Result<()> {
    let content = serde_json::to_string_pretty(report)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Render a plain-text status block for terminal output.
pub fn render_status_text(report: &StatusReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Status: {} ({})\n",
        report.overall.as_str().to_uppercase(),
        report.summary
    ));

    for a in &report.vitals {
        let marker = match a.severity {
            Severity::Normal => " ",
            Severity::Warning => "!",
            Severity::Critical => "X",
        };
        let converted = if a.unit.trim().eq_ignore_ascii_case(&a.canonical_unit) {
            String::new()
        } else {
            format!(" (= {:.2} {})", a.canonical_value, a.canonical_unit)
        };
        out.push_str(&format!(
            "  [{}] {:<12} {} {}{}: {}\n",
            marker,
            a.vital.as_str(),
            a.value,
            a.unit,
            converted,
            a.message
        ));
    }

    if let Some(rec) = &report.recommendation {
        out.push_str(&format!("Recommendation: {}\n", rec));
    }
    out
}
