//! Process-wide, immutable vitals configuration.
//!
//! A [`VitalsConfig`] bundles everything the pipeline reads: the unit
//! registry, one range table per vital, the message catalog, and the
//! tolerance percentage used to derive near-critical bands. It is built once
//! (from built-ins, a JSON file, environment variables, or a patient profile),
//! validated as a whole, and then only read.
//!
//! Environment variables read by [`ConfigFile::from_env`]:
//! - `VITALS_CONFIG`: path to a JSON config file
//! - `VITALS_LANG`: overrides `default_language`
//! - `VITALS_TOLERANCE_PERCENT`: overrides `tolerance_percent`

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::catalog::{LanguagePack, MessageCatalog, DEFAULT_LANGUAGE};
use crate::domain::{ConditionTag, Result, VitalType, VitalsError};
use crate::profile::PatientProfile;
use crate::range_table::{Range, RangeTable, RangeTables, VitalLimits, DEFAULT_TOLERANCE_PERCENT};
use crate::units::{builtin_units, UnitRegistry, UnitRule, VitalUnits};

/// How a vital's range table is defined in a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableSpec {
    /// Five bands derived from the critical limits and the system tolerance.
    Limits { low: f64, high: f64 },
    /// Hand-written ranges, ordered low to high.
    Explicit { ranges: Vec<Range> },
}

impl TableSpec {
    fn build(&self, vital: VitalType, tolerance_percent: f64) -> Result<RangeTable> {
        match self {
            TableSpec::Limits { low, high } => {
                RangeTable::from_limits(vital, VitalLimits::new(*low, *high), tolerance_percent)
            }
            TableSpec::Explicit { ranges } => RangeTable::new(vital, ranges.clone()),
        }
    }
}

/// Per-vital section of a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSpec {
    pub vital: VitalType,
    pub canonical_unit: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub conversions: Vec<UnitRule>,
    pub table: TableSpec,
}

impl VitalSpec {
    fn units(&self) -> VitalUnits {
        VitalUnits {
            canonical_unit: self.canonical_unit.clone(),
            aliases: self.aliases.clone(),
            conversions: self.conversions.clone(),
        }
    }
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE_PERCENT
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// On-disk (JSON) form of the configuration.
///
/// Vitals not listed in `vitals` keep their built-in units and get tables
/// derived from adult (or profile-adjusted) limits. Entries in `messages`
/// are merged over the built-in `en`/`de` catalogs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default = "default_tolerance")]
    pub tolerance_percent: f64,
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default)]
    pub vitals: Vec<VitalSpec>,
    #[serde(default)]
    pub messages: BTreeMap<String, LanguagePack>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            tolerance_percent: default_tolerance(),
            default_language: default_language(),
            vitals: Vec::new(),
            messages: BTreeMap::new(),
        }
    }
}

impl ConfigFile {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Load the file named by `VITALS_CONFIG` (or start from defaults) and
    /// apply the environment overrides.
    pub fn from_env() -> Result<Self> {
        let file = match std::env::var("VITALS_CONFIG") {
            Ok(path) => Self::read(path)?,
            Err(_) => Self::default(),
        };
        file.with_env_overrides()
    }

    /// Apply `VITALS_LANG` and `VITALS_TOLERANCE_PERCENT` on top of this file.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(
            std::env::var("VITALS_LANG").ok(),
            std::env::var("VITALS_TOLERANCE_PERCENT").ok(),
        )
    }

    fn with_overrides(mut self, lang: Option<String>, tolerance: Option<String>) -> Result<Self> {
        if let Some(lang) = lang {
            self.default_language = lang;
        }
        if let Some(raw) = tolerance {
            self.tolerance_percent = raw.trim().parse().map_err(|_| {
                VitalsError::InvalidConfig(format!(
                    "VITALS_TOLERANCE_PERCENT is not a number: {raw}"
                ))
            })?;
        }
        Ok(self)
    }

    /// Resolve into a validated [`VitalsConfig`].
    ///
    /// `profile` adjusts the limits of vitals the file does not define.
    pub fn build(&self, profile: Option<&PatientProfile>) -> Result<VitalsConfig> {
        let mut specs: BTreeMap<VitalType, &VitalSpec> = BTreeMap::new();
        for spec in &self.vitals {
            if specs.insert(spec.vital, spec).is_some() {
                return Err(VitalsError::InvalidConfig(format!(
                    "vital '{}' is configured more than once",
                    spec.vital
                )));
            }
        }

        let mut units = BTreeMap::new();
        let mut tables = Vec::with_capacity(VitalType::ALL.len());
        for vital in VitalType::ALL {
            match specs.get(&vital) {
                Some(spec) => {
                    units.insert(vital, spec.units());
                    tables.push(spec.table.build(vital, self.tolerance_percent)?);
                }
                None => {
                    let limits = profile
                        .map(|p| p.limits(vital))
                        .unwrap_or_else(|| VitalLimits::adult(vital));
                    units.insert(vital, builtin_units(vital));
                    tables.push(RangeTable::from_limits(vital, limits, self.tolerance_percent)?);
                }
            }
        }

        let mut packs: BTreeMap<String, LanguagePack> = MessageCatalog::builtin().into_languages();
        for (code, pack) in &self.messages {
            let entry = packs.entry(code.clone()).or_default();
            entry.conditions.extend(pack.conditions.clone());
            entry.statuses.extend(pack.statuses.clone());
            entry.recommendations.extend(pack.recommendations.clone());
        }
        let catalog = MessageCatalog::new(self.default_language.clone(), packs)?;

        VitalsConfig::new(
            self.tolerance_percent,
            UnitRegistry::new(units)?,
            RangeTables::new(tables),
            catalog,
        )
    }
}

/// Validated configuration shared read-only by every assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VitalsConfig {
    tolerance_percent: f64,
    units: UnitRegistry,
    tables: RangeTables,
    catalog: MessageCatalog,
}

impl Default for VitalsConfig {
    /// Built-in adult tables, units and `en`/`de` catalog.
    fn default() -> Self {
        ConfigFile::default()
            .build(None)
            .expect("built-in vitals config is valid")
    }
}

impl VitalsConfig {
    /// Assemble a configuration, checking that every table has a unit
    /// registration and that every tag a table uses has a message in every
    /// catalog language.
    pub fn new(
        tolerance_percent: f64,
        units: UnitRegistry,
        tables: RangeTables,
        catalog: MessageCatalog,
    ) -> Result<Self> {
        if !tolerance_percent.is_finite() || tolerance_percent <= 0.0 {
            return Err(VitalsError::InvalidConfig(format!(
                "tolerance percent must be positive (got {tolerance_percent})"
            )));
        }

        for table in tables.iter() {
            if units.get(table.vital()).is_err() {
                return Err(VitalsError::InvalidConfig(format!(
                    "no unit registration for {}",
                    table.vital()
                )));
            }
        }

        let mut used: Vec<ConditionTag> = tables.iter().flat_map(|t| t.conditions()).collect();
        used.sort();
        used.dedup();
        let missing = catalog.missing_entries(&used);
        if !missing.is_empty() {
            let listed: Vec<String> = missing
                .iter()
                .map(|(lang, tag)| format!("{lang}/{tag}"))
                .collect();
            return Err(VitalsError::InvalidConfig(format!(
                "missing messages: {}",
                listed.join(", ")
            )));
        }

        Ok(Self {
            tolerance_percent,
            units,
            tables,
            catalog,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        ConfigFile::from_json_str(json)?.build(None)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        ConfigFile::read(path)?.build(None)
    }

    pub fn from_env() -> Result<Self> {
        ConfigFile::from_env()?.build(None)
    }

    /// Built-in units and catalog with limits adjusted for `profile`.
    pub fn for_profile(profile: &PatientProfile) -> Result<Self> {
        ConfigFile::default().build(Some(profile))
    }

    pub fn tolerance_percent(&self) -> f64 {
        self.tolerance_percent
    }

    pub fn units(&self) -> &UnitRegistry {
        &self.units
    }

    pub fn tables(&self) -> &RangeTables {
        &self.tables
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    pub fn default_language(&self) -> &str {
        self.catalog.default_language()
    }

    /// SHA-256 hex digest of the canonical JSON form, for audit trails.
    pub fn digest(&self) -> Result<String> {
        let json = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&json)))
    }
}
