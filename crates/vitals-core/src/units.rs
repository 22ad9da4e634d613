//! Unit normalization.
//!
//! Every vital type has one canonical unit that its range table is written
//! in. Other units are registered as affine rules
//! (`canonical = value * scale + offset`), so adding a unit is a data change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Result, VitalType, VitalsError};

/// Affine conversion from one non-canonical unit into the canonical unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRule {
    pub unit: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub scale: f64,
    pub offset: f64,
}

impl UnitRule {
    pub fn new(unit: &str, scale: f64, offset: f64) -> Self {
        Self {
            unit: unit.to_string(),
            aliases: Vec::new(),
            scale,
            offset,
        }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    fn accepts(&self, unit: &str) -> bool {
        same_unit(&self.unit, unit) || self.aliases.iter().any(|a| same_unit(a, unit))
    }
}

/// Unit registration for a single vital type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalUnits {
    pub canonical_unit: String,
    /// Alternative spellings of the canonical unit.
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub conversions: Vec<UnitRule>,
}

impl VitalUnits {
    pub fn canonical(unit: &str) -> Self {
        Self {
            canonical_unit: unit.to_string(),
            aliases: Vec::new(),
            conversions: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn with_conversion(mut self, rule: UnitRule) -> Self {
        self.conversions.push(rule);
        self
    }

    fn is_canonical(&self, unit: &str) -> bool {
        same_unit(&self.canonical_unit, unit) || self.aliases.iter().any(|a| same_unit(a, unit))
    }

    /// `None` means the unit is canonical (identity).
    fn rule_for(&self, vital: VitalType, unit: &str) -> Result<Option<&UnitRule>> {
        if self.is_canonical(unit) {
            return Ok(None);
        }
        self.conversions
            .iter()
            .find(|r| r.accepts(unit))
            .map(Some)
            .ok_or_else(|| VitalsError::UnsupportedUnit {
                unit: unit.to_string(),
                vital,
            })
    }

    pub fn to_canonical(&self, vital: VitalType, value: f64, unit: &str) -> Result<f64> {
        Ok(match self.rule_for(vital, unit)? {
            None => value,
            Some(rule) => value * rule.scale + rule.offset,
        })
    }

    pub fn from_canonical(&self, vital: VitalType, canonical: f64, unit: &str) -> Result<f64> {
        Ok(match self.rule_for(vital, unit)? {
            None => canonical,
            Some(rule) => (canonical - rule.offset) / rule.scale,
        })
    }

    fn validate(&self, vital: VitalType) -> Result<()> {
        if self.canonical_unit.trim().is_empty() {
            return Err(VitalsError::InvalidConfig(format!(
                "{vital}: canonical unit must not be empty"
            )));
        }
        for rule in &self.conversions {
            if !rule.scale.is_finite() || rule.scale == 0.0 || !rule.offset.is_finite() {
                return Err(VitalsError::InvalidConfig(format!(
                    "{vital}: conversion for '{}' needs a finite non-zero scale and finite offset",
                    rule.unit
                )));
            }
        }

        // Every spelling must resolve to exactly one registration.
        let spellings = std::iter::once(&self.canonical_unit)
            .chain(&self.aliases)
            .chain(
                self.conversions
                    .iter()
                    .flat_map(|r| std::iter::once(&r.unit).chain(&r.aliases)),
            );
        let mut seen: Vec<&str> = Vec::new();
        for spelling in spellings {
            if let Some(prev) = seen.iter().find(|p| same_unit(p, spelling)) {
                return Err(VitalsError::InvalidConfig(format!(
                    "{vital}: unit '{spelling}' collides with '{prev}'"
                )));
            }
            seen.push(spelling);
        }
        Ok(())
    }
}

fn same_unit(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Canonical units and conversions for every configured vital type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitRegistry {
    units: BTreeMap<VitalType, VitalUnits>,
}

impl UnitRegistry {
    /// Build a registry, rejecting empty canonical units and degenerate rules.
    pub fn new(units: BTreeMap<VitalType, VitalUnits>) -> Result<Self> {
        for (vital, u) in &units {
            u.validate(*vital)?;
        }
        Ok(Self { units })
    }

    /// Fahrenheit, beats per minute and percent saturation, with Celsius
    /// and Kelvin accepted for temperature.
    pub fn builtin() -> Self {
        let mut units = BTreeMap::new();
        units.insert(VitalType::Temperature, builtin_units(VitalType::Temperature));
        units.insert(VitalType::PulseRate, builtin_units(VitalType::PulseRate));
        units.insert(VitalType::Spo2, builtin_units(VitalType::Spo2));
        Self { units }
    }

    pub fn get(&self, vital: VitalType) -> Result<&VitalUnits> {
        self.units
            .get(&vital)
            .ok_or_else(|| VitalsError::UnknownVitalType(vital.to_string()))
    }

    pub fn canonical_unit(&self, vital: VitalType) -> Result<&str> {
        Ok(self.get(vital)?.canonical_unit.as_str())
    }

    /// Convert `value` in `unit` into the canonical unit of `vital`.
    pub fn normalize(&self, value: f64, unit: &str, vital: VitalType) -> Result<f64> {
        self.get(vital)?.to_canonical(vital, value, unit)
    }

    /// Inverse of [`normalize`](Self::normalize).
    pub fn denormalize(&self, canonical: f64, unit: &str, vital: VitalType) -> Result<f64> {
        self.get(vital)?.from_canonical(vital, canonical, unit)
    }

    pub fn vitals(&self) -> impl Iterator<Item = VitalType> + '_ {
        self.units.keys().copied()
    }
}

pub(crate) fn builtin_units(vital: VitalType) -> VitalUnits {
    match vital {
        VitalType::Temperature => VitalUnits::canonical("F")
            .with_alias("°F")
            .with_alias("degF")
            .with_conversion(
                UnitRule::new("C", 9.0 / 5.0, 32.0)
                    .with_alias("°C")
                    .with_alias("degC"),
            )
            .with_conversion(UnitRule::new("K", 9.0 / 5.0, -459.67)),
        VitalType::PulseRate => VitalUnits::canonical("bpm").with_alias("/min"),
        VitalType::Spo2 => VitalUnits::canonical("%").with_alias("percent"),
    }
}
