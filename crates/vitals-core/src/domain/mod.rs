//! Domain models for vitalwatch.
//!
//! Canonical definitions for the core entities:
//! - `VitalType` / `Reading`: what was measured and the raw measurement
//! - `ConditionTag` / `Severity`: the classification result and its urgency
//! - `OverallStatus`: worst-case verdict across a reading-set

pub mod condition;
pub mod error;
pub mod vital;

// Re-export main types and errors
pub use condition::{ConditionBands, ConditionTag, OverallStatus, Severity};
pub use error::{Result, VitalsError};
pub use vital::{Reading, VitalType};
