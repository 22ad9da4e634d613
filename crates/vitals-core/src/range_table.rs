//! Range tables: ordered, contiguous, boundary-labelled intervals per vital.
//!
//! A table covers the whole real line. Every split point between two
//! neighbouring ranges is claimed by exactly one of them (one side
//! [`Edge::Inclusive`], the other [`Edge::Exclusive`]), so any finite value
//! falls into exactly one range. Tables are validated once at construction;
//! classification never has to handle gaps or overlaps.
//!
//! Near-critical bands are derived from a vital's critical limits with
//! [`RangeTable::from_limits`]: the band width is a fixed percentage of the
//! upper critical limit, rounded to hundredths.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{ConditionBands, ConditionTag, Result, VitalType, VitalsError};

/// Tolerance used when the configuration does not override it.
pub const DEFAULT_TOLERANCE_PERCENT: f64 = 1.5;

/// Boundary of a range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Edge {
    Unbounded,
    Inclusive(f64),
    Exclusive(f64),
}

impl Edge {
    fn value(self) -> Option<f64> {
        match self {
            Edge::Unbounded => None,
            Edge::Inclusive(v) | Edge::Exclusive(v) => Some(v),
        }
    }

    fn is_inclusive(self) -> bool {
        matches!(self, Edge::Inclusive(_))
    }
}

/// One labelled interval of a range table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub lower: Edge,
    pub upper: Edge,
    pub condition: ConditionTag,
}

impl Range {
    pub fn new(lower: Edge, upper: Edge, condition: ConditionTag) -> Self {
        Self {
            lower,
            upper,
            condition,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        let above_lower = match self.lower {
            Edge::Unbounded => true,
            Edge::Inclusive(b) => value >= b,
            Edge::Exclusive(b) => value > b,
        };
        let below_upper = match self.upper {
            Edge::Unbounded => true,
            Edge::Inclusive(b) => value <= b,
            Edge::Exclusive(b) => value < b,
        };
        above_lower && below_upper
    }

    fn is_empty(&self) -> bool {
        match (self.lower.value(), self.upper.value()) {
            (Some(lo), Some(hi)) => {
                lo > hi || (lo == hi && !(self.lower.is_inclusive() && self.upper.is_inclusive()))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lower {
            Edge::Unbounded => write!(f, "(-inf")?,
            Edge::Inclusive(v) => write!(f, "[{v}")?,
            Edge::Exclusive(v) => write!(f, "({v}")?,
        }
        match self.upper {
            Edge::Unbounded => write!(f, ", +inf)")?,
            Edge::Inclusive(v) => write!(f, ", {v}]")?,
            Edge::Exclusive(v) => write!(f, ", {v})")?,
        }
        write!(f, " -> {}", self.condition)
    }
}

/// Critical limits of a vital, in its canonical unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalLimits {
    pub low: f64,
    pub high: f64,
}

impl VitalLimits {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Adult reference limits: 95–102 °F, 60–100 bpm, 90–100 % SpO2.
    pub fn adult(vital: VitalType) -> Self {
        match vital {
            VitalType::Temperature => Self::new(95.0, 102.0),
            VitalType::PulseRate => Self::new(60.0, 100.0),
            VitalType::Spo2 => Self::new(90.0, 100.0),
        }
    }
}

/// Width of each near-critical band for the given upper limit.
pub fn tolerance_width(high: f64, tolerance_percent: f64) -> f64 {
    round_hundredths(high * tolerance_percent / 100.0)
}

fn round_hundredths(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Validated range table for one vital type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeTable {
    vital: VitalType,
    ranges: Vec<Range>,
}

impl RangeTable {
    /// Validate and build a table from explicit ranges, ordered low to high.
    pub fn new(vital: VitalType, ranges: Vec<Range>) -> Result<Self> {
        let invalid = |reason: String| VitalsError::InvalidRangeTable { vital, reason };

        let (first, last) = match (ranges.first(), ranges.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(invalid("table has no ranges".to_string())),
        };
        if first.lower != Edge::Unbounded {
            return Err(invalid("first range must be unbounded below".to_string()));
        }
        if last.upper != Edge::Unbounded {
            return Err(invalid("last range must be unbounded above".to_string()));
        }

        let allowed = ConditionBands::for_vital(vital).in_order();
        for (i, range) in ranges.iter().enumerate() {
            if !allowed.contains(&range.condition) {
                return Err(invalid(format!(
                    "range {i} uses '{}', which does not describe {vital}",
                    range.condition
                )));
            }
            if [range.lower, range.upper]
                .iter()
                .filter_map(|e| e.value())
                .any(|v| !v.is_finite())
            {
                return Err(invalid(format!("range {i} has a non-finite bound")));
            }
            if range.is_empty() {
                return Err(invalid(format!("range {i} ({range}) is empty")));
            }
        }

        for (i, pair) in ranges.windows(2).enumerate() {
            let (a, b) = (&pair[0], &pair[1]);
            match (a.upper.value(), b.lower.value()) {
                (Some(hi), Some(lo)) if hi == lo => {
                    if a.upper.is_inclusive() == b.lower.is_inclusive() {
                        let problem = if a.upper.is_inclusive() {
                            "claimed by both"
                        } else {
                            "claimed by neither"
                        };
                        return Err(invalid(format!(
                            "split point {hi} between ranges {i} and {} is {problem}",
                            i + 1
                        )));
                    }
                }
                (Some(hi), Some(lo)) if hi < lo => {
                    return Err(invalid(format!(
                        "gap between {hi} and {lo} (ranges {i} and {})",
                        i + 1
                    )));
                }
                (Some(hi), Some(lo)) => {
                    return Err(invalid(format!(
                        "ranges {i} and {} overlap between {lo} and {hi}",
                        i + 1
                    )));
                }
                _ => {
                    return Err(invalid(format!(
                        "inner edge between ranges {i} and {} is unbounded",
                        i + 1
                    )));
                }
            }
        }

        Ok(Self { vital, ranges })
    }

    /// Derive the five-band table for `vital` from its critical limits.
    ///
    /// With `t = tolerance_width(high, pct)`:
    /// `(-inf, low)`, `[low, low + t]`, `(low + t, high - t)`,
    /// `[high - t, high)`, `[high, +inf)`.
    pub fn from_limits(
        vital: VitalType,
        limits: VitalLimits,
        tolerance_percent: f64,
    ) -> Result<Self> {
        let VitalLimits { low, high } = limits;
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(VitalsError::InvalidRangeTable {
                vital,
                reason: format!("limits must be finite with low < high (got {low}..{high})"),
            });
        }
        if !tolerance_percent.is_finite() || tolerance_percent <= 0.0 {
            return Err(VitalsError::InvalidConfig(format!(
                "tolerance percent must be positive (got {tolerance_percent})"
            )));
        }

        let t = tolerance_width(high, tolerance_percent);
        let near_low = round_hundredths(low + t);
        let near_high = round_hundredths(high - t);
        if t <= 0.0 || near_low >= near_high {
            return Err(VitalsError::InvalidRangeTable {
                vital,
                reason: format!(
                    "tolerance {tolerance_percent}% leaves no normal range between {low} and {high}"
                ),
            });
        }

        let bands = ConditionBands::for_vital(vital);
        Self::new(
            vital,
            vec![
                Range::new(Edge::Unbounded, Edge::Exclusive(low), bands.low_critical),
                Range::new(Edge::Inclusive(low), Edge::Inclusive(near_low), bands.low_warning),
                Range::new(Edge::Exclusive(near_low), Edge::Exclusive(near_high), bands.normal),
                Range::new(Edge::Inclusive(near_high), Edge::Exclusive(high), bands.high_warning),
                Range::new(Edge::Inclusive(high), Edge::Unbounded, bands.high_critical),
            ],
        )
    }

    pub fn vital(&self) -> VitalType {
        self.vital
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// Distinct condition tags used by this table.
    pub fn conditions(&self) -> Vec<ConditionTag> {
        let mut tags: Vec<ConditionTag> = self.ranges.iter().map(|r| r.condition).collect();
        tags.sort();
        tags.dedup();
        tags
    }
}

/// One range table per configured vital type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RangeTables {
    tables: BTreeMap<VitalType, RangeTable>,
}

impl RangeTables {
    pub fn new(tables: impl IntoIterator<Item = RangeTable>) -> Self {
        Self {
            tables: tables.into_iter().map(|t| (t.vital(), t)).collect(),
        }
    }

    /// Adult limits for every vital type with the given tolerance.
    pub fn builtin(tolerance_percent: f64) -> Result<Self> {
        let tables = VitalType::ALL
            .iter()
            .map(|&v| RangeTable::from_limits(v, VitalLimits::adult(v), tolerance_percent))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(tables))
    }

    pub fn get(&self, vital: VitalType) -> Result<&RangeTable> {
        self.tables
            .get(&vital)
            .ok_or_else(|| VitalsError::UnknownVitalType(vital.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RangeTable> {
        self.tables.values()
    }
}
