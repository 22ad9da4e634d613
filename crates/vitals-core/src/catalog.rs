//! Message catalog: (condition tag, language) → display string.
//!
//! There is no process-wide "current language". Callers pass the language
//! code on every lookup; the catalog only knows which language to fall back
//! to when a registered language is missing an entry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{ConditionTag, OverallStatus, Result, VitalsError};

/// Language code every built-in catalog falls back to.
pub const DEFAULT_LANGUAGE: &str = "en";

/// All strings for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePack {
    #[serde(default)]
    pub conditions: BTreeMap<ConditionTag, String>,
    /// One-line summary per overall verdict.
    #[serde(default)]
    pub statuses: BTreeMap<OverallStatus, String>,
    /// Advice attached to a verdict; `ok` normally has none.
    #[serde(default)]
    pub recommendations: BTreeMap<OverallStatus, String>,
}

impl LanguagePack {
    pub fn condition(mut self, tag: ConditionTag, text: &str) -> Self {
        self.conditions.insert(tag, text.to_string());
        self
    }

    pub fn status(mut self, status: OverallStatus, text: &str) -> Self {
        self.statuses.insert(status, text.to_string());
        self
    }

    pub fn recommendation(mut self, status: OverallStatus, text: &str) -> Self {
        self.recommendations.insert(status, text.to_string());
        self
    }
}

/// Two-level mapping language → tag → string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageCatalog {
    default_language: String,
    languages: BTreeMap<String, LanguagePack>,
}

impl MessageCatalog {
    /// Build a catalog; `default_language` must be one of `languages`.
    pub fn new(
        default_language: impl Into<String>,
        languages: BTreeMap<String, LanguagePack>,
    ) -> Result<Self> {
        let default_language = default_language.into();
        if !languages.contains_key(&default_language) {
            return Err(VitalsError::UnsupportedLanguage(default_language));
        }
        Ok(Self {
            default_language,
            languages,
        })
    }

    /// English and German catalogs, English as default.
    pub fn builtin() -> Self {
        let mut languages = BTreeMap::new();
        languages.insert("en".to_string(), english());
        languages.insert("de".to_string(), german());
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            languages,
        }
    }

    /// Register (or replace) a language.
    pub fn with_language(mut self, code: impl Into<String>, pack: LanguagePack) -> Self {
        self.languages.insert(code.into(), pack);
        self
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    pub fn supports(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    fn pack(&self, language: &str) -> Result<&LanguagePack> {
        self.languages
            .get(language)
            .ok_or_else(|| VitalsError::UnsupportedLanguage(language.to_string()))
    }

    fn default_pack(&self) -> Option<&LanguagePack> {
        self.languages.get(&self.default_language)
    }

    /// Display string for `tag` in `language`.
    ///
    /// # Errors
    ///
    /// - `VitalsError::UnsupportedLanguage`: `language` was never registered.
    pub fn lookup(&self, tag: ConditionTag, language: &str) -> Result<&str> {
        let pack = self.pack(language)?;
        if let Some(text) = pack.conditions.get(&tag) {
            return Ok(text.as_str());
        }

        warn!(
            event = "catalog.missing_entry",
            language = %language,
            condition = %tag,
            fallback = %self.default_language,
        );
        Ok(self
            .default_pack()
            .and_then(|p| p.conditions.get(&tag))
            .map(String::as_str)
            .unwrap_or_else(|| tag.as_str()))
    }

    /// One-line summary for an overall verdict.
    pub fn status_summary(&self, status: OverallStatus, language: &str) -> Result<&str> {
        let pack = self.pack(language)?;
        Ok(pack
            .statuses
            .get(&status)
            .or_else(|| self.default_pack().and_then(|p| p.statuses.get(&status)))
            .map(String::as_str)
            .unwrap_or_else(|| status.as_str()))
    }

    /// Advice for an overall verdict, if the catalog has any.
    pub fn recommendation(&self, status: OverallStatus, language: &str) -> Result<Option<&str>> {
        let pack = self.pack(language)?;
        Ok(pack
            .recommendations
            .get(&status)
            .or_else(|| self.default_pack().and_then(|p| p.recommendations.get(&status)))
            .map(String::as_str))
    }

    pub(crate) fn into_languages(self) -> BTreeMap<String, LanguagePack> {
        self.languages
    }

    /// `(language, tag)` pairs for which no message is registered.
    pub fn missing_entries(&self, tags: &[ConditionTag]) -> Vec<(String, ConditionTag)> {
        self.languages
            .iter()
            .flat_map(|(code, pack)| {
                tags.iter()
                    .filter(|t| !pack.conditions.contains_key(*t))
                    .map(move |t| (code.clone(), *t))
            })
            .collect()
    }
}

fn english() -> LanguagePack {
    use ConditionTag::*;
    LanguagePack::default()
        .condition(Hypothermia, "Temperature critical! Hypothermia detected")
        .condition(NearHypothermia, "Warning: Approaching hypothermia")
        .condition(Normal, "Within normal range")
        .condition(NearHyperthermia, "Warning: Approaching hyperthermia")
        .condition(Hyperthermia, "Temperature critical! Hyperthermia detected")
        .condition(Bradycardia, "Pulse Rate critical! Bradycardia detected")
        .condition(NearBradycardia, "Warning: Approaching bradycardia")
        .condition(NearTachycardia, "Warning: Approaching tachycardia")
        .condition(Tachycardia, "Pulse Rate critical! Tachycardia detected")
        .condition(LowOxygen, "Oxygen Saturation critical! Hypoxemia detected")
        .condition(NearLowOxygen, "Warning: Approaching low oxygen saturation")
        .condition(NearHighOxygen, "Warning: Approaching high oxygen saturation")
        .condition(HighOxygen, "Oxygen Saturation critical! Hyperoxemia detected")
        .status(OverallStatus::Ok, "All vitals normal")
        .status(OverallStatus::Warning, "Warning conditions detected")
        .status(OverallStatus::Critical, "Critical vital signs detected")
        .recommendation(
            OverallStatus::Warning,
            "Monitor closely and consider medical consultation",
        )
        .recommendation(OverallStatus::Critical, "Immediate medical attention required")
}

fn german() -> LanguagePack {
    use ConditionTag::*;
    LanguagePack::default()
        .condition(Hypothermia, "Temperatur kritisch! Unterkühlung erkannt")
        .condition(NearHypothermia, "Warnung: Annäherung an Unterkühlung")
        .condition(Normal, "Im Normalbereich")
        .condition(NearHyperthermia, "Warnung: Annäherung an Überhitzung")
        .condition(Hyperthermia, "Temperatur kritisch! Überhitzung erkannt")
        .condition(Bradycardia, "Puls kritisch! Bradykardie erkannt")
        .condition(NearBradycardia, "Warnung: Annäherung an Bradykardie")
        .condition(NearTachycardia, "Warnung: Annäherung an Tachykardie")
        .condition(Tachycardia, "Puls kritisch! Tachykardie erkannt")
        .condition(LowOxygen, "Sauerstoffsättigung kritisch! Hypoxämie erkannt")
        .condition(NearLowOxygen, "Warnung: Annäherung an niedrige Sauerstoffsättigung")
        .condition(NearHighOxygen, "Warnung: Annäherung an hohe Sauerstoffsättigung")
        .condition(HighOxygen, "Sauerstoffsättigung kritisch! Hyperoxämie erkannt")
        .status(OverallStatus::Ok, "Alle Vitalwerte normal")
        .status(OverallStatus::Warning, "Warnzustände erkannt")
        .status(OverallStatus::Critical, "Kritische Vitalwerte erkannt")
        .recommendation(
            OverallStatus::Warning,
            "Engmaschig überwachen und ärztliche Abklärung erwägen",
        )
        .recommendation(OverallStatus::Critical, "Sofortige ärztliche Hilfe erforderlich")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_language() {
        let catalog = MessageCatalog::builtin();
        assert_eq!(
            catalog.lookup(ConditionTag::Bradycardia, "en").unwrap(),
            "Pulse Rate critical! Bradycardia detected"
        );
        assert_eq!(
            catalog.lookup(ConditionTag::Bradycardia, "de").unwrap(),
            "Puls kritisch! Bradykardie erkannt"
        );
    }

    #[test]
    fn test_unregistered_language_is_error() {
        let catalog = MessageCatalog::builtin();
        let err = catalog.lookup(ConditionTag::Normal, "fr").unwrap_err();
        assert!(matches!(err, VitalsError::UnsupportedLanguage(ref l) if l == "fr"));
    }

    #[test]
    fn test_builtin_parity() {
        let catalog = MessageCatalog::builtin();
        assert!(catalog.missing_entries(&ConditionTag::ALL).is_empty());
        for lang in ["en", "de"] {
            for status in OverallStatus::ALL {
                assert!(!catalog.status_summary(status, lang).unwrap().is_empty());
            }
        }
    }

    #[test]
    fn test_missing_tag_falls_back_to_default_language() {
        let partial = LanguagePack::default().condition(ConditionTag::Normal, "Normal");
        let catalog = MessageCatalog::builtin().with_language("fr", partial);

        assert_eq!(catalog.lookup(ConditionTag::Normal, "fr").unwrap(), "Normal");
        assert_eq!(
            catalog.lookup(ConditionTag::Tachycardia, "fr").unwrap(),
            "Pulse Rate critical! Tachycardia detected"
        );
        assert_eq!(
            catalog.status_summary(OverallStatus::Critical, "fr").unwrap(),
            "Critical vital signs detected"
        );

        let missing = catalog.missing_entries(&[ConditionTag::Tachycardia]);
        assert_eq!(missing, vec![("fr".to_string(), ConditionTag::Tachycardia)]);
    }

    #[test]
    fn test_recommendations() {
        let catalog = MessageCatalog::builtin();
        assert_eq!(catalog.recommendation(OverallStatus::Ok, "en").unwrap(), None);
        assert_eq!(
            catalog.recommendation(OverallStatus::Critical, "en").unwrap(),
            Some("Immediate medical attention required")
        );
    }

    #[test]
    fn test_default_language_must_be_registered() {
        let err = MessageCatalog::new("xx", BTreeMap::new()).unwrap_err();
        assert!(matches!(err, VitalsError::UnsupportedLanguage(_)));
    }

    #[test]
    fn test_language_pack_json_uses_tag_names() {
        let json = r#"{ "conditions": { "normal": "ok", "near_bradycardia": "slow" } }"#;
        let pack: LanguagePack = serde_json::from_str(json).expect("deserialize");
        assert_eq!(pack.conditions[&ConditionTag::NearBradycardia], "slow");
        assert!(pack.statuses.is_empty());
    }
}
