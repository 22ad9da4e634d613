//! Condition classifier.
//!
//! Maps a canonical value onto the single range of a validated
//! [`RangeTable`] that contains it.

use crate::domain::{ConditionTag, Result, VitalType, VitalsError};
use crate::range_table::{RangeTable, RangeTables};

/// Classify `value` (already in canonical units) against `table`.
///
/// # Errors
///
/// - `VitalsError::InvalidValue`: `value` is NaN or infinite.
pub fn classify(table: &RangeTable, value: f64) -> Result<ConditionTag> {
    if !value.is_finite() {
        return Err(VitalsError::InvalidValue {
            vital: table.vital(),
            value,
        });
    }

    // Construction guarantees a match for any finite value.
    table
        .ranges()
        .iter()
        .find(|r| r.contains(value))
        .map(|r| r.condition)
        .ok_or_else(|| VitalsError::InvalidRangeTable {
            vital: table.vital(),
            reason: format!("no range contains {value}"),
        })
}

impl RangeTables {
    /// Classify a canonical value using the table registered for `vital`.
    pub fn classify(&self, value: f64, vital: VitalType) -> Result<ConditionTag> {
        classify(self.get(vital)?, value)
    }
}
