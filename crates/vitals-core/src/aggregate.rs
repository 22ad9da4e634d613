//! Status aggregator.
//!
//! Folds the per-vital [`ConditionTag`]s of one reading-set into an
//! [`AggregateStatus`]: the worst severity wins (critical over warning over
//! ok), and every non-normal vital is reported as a [`Finding`] in input
//! order.

use serde::{Deserialize, Serialize};

use crate::catalog::MessageCatalog;
use crate::domain::{ConditionTag, OverallStatus, Result, Severity, VitalType, VitalsError};

/// A single non-normal vital.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Finding {
    pub vital: VitalType,
    pub condition: ConditionTag,
    pub severity: Severity,
    /// Catalog message in the requested language.
    pub message: String,
}

/// Outcome of aggregating one reading-set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregateStatus {
    pub overall: OverallStatus,
    /// Non-normal vitals, in input order.
    pub findings: Vec<Finding>,
}

impl AggregateStatus {
    fn ok() -> Self {
        Self {
            overall: OverallStatus::Ok,
            findings: Vec::new(),
        }
    }

    /// Whether every assessed vital is normal.
    pub fn is_ok(&self) -> bool {
        self.overall == OverallStatus::Ok
    }

    /// Critical findings, in input order.
    pub fn failures(&self) -> Vec<&Finding> {
        self.with_severity(Severity::Critical)
    }

    /// Near-critical findings, in input order.
    pub fn warnings(&self) -> Vec<&Finding> {
        self.with_severity(Severity::Warning)
    }

    fn with_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .collect()
    }
}

/// Worst-case verdict over a set of condition tags. Empty input is `Ok`.
pub fn overall_status<I>(conditions: I) -> OverallStatus
where
    I: IntoIterator<Item = ConditionTag>,
{
    conditions
        .into_iter()
        .map(ConditionTag::severity)
        .max()
        .unwrap_or(Severity::Normal)
        .into()
}

/// Aggregate classified vitals into an [`AggregateStatus`].
///
/// `conditions` holds at most one entry per vital type; its order is kept in
/// `findings`. Messages are rendered in `language`.
///
/// # Errors
///
/// - `VitalsError::UnsupportedLanguage`: `language` is not in `catalog`.
pub fn aggregate(
    conditions: &[(VitalType, ConditionTag)],
    catalog: &MessageCatalog,
    language: &str,
) -> Result<AggregateStatus> {
    if !catalog.supports(language) {
        return Err(VitalsError::UnsupportedLanguage(language.to_string()));
    }
    if conditions.is_empty() {
        return Ok(AggregateStatus::ok());
    }

    let findings = conditions
        .iter()
        .filter(|(_, tag)| !tag.is_normal())
        .map(|&(vital, condition)| {
            Ok(Finding {
                vital,
                condition,
                severity: condition.severity(),
                message: catalog.lookup(condition, language)?.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AggregateStatus {
        overall: overall_status(conditions.iter().map(|&(_, tag)| tag)),
        findings,
    })
}
