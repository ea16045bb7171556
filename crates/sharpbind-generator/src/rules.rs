//! GeneratorRules - the rules/configuration document.
//!
//! Consumed once at pass-start. Covers type inclusion, the default-value
//! remap table, the force-constant list, and the naming-convention knobs the
//! passes key off. Loaded from JSON.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use sharpbind_core::GeneratorError;

/// Rules document steering a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorRules {
    /// Type-inclusion patterns over fully qualified source names. An exact
    /// name, a `Scope::*` prefix wildcard, or `*` for everything.
    pub include_types: Vec<String>,

    /// Default-value remap table, keyed by fully qualified source symbol.
    /// Values replace whatever the conversion pass produced.
    pub default_overrides: FxHashMap<String, String>,

    /// Symbols that must stay compile-time constants in the target language
    /// even when the override heuristic would demote them to read-only.
    pub force_constants: Vec<String>,

    /// Name of the flag-set helper template used to detect bitmask enums.
    pub flag_template: String,

    /// Type name of event-name constants (the string-hash-like type).
    pub event_name_type: String,

    /// Prefix marking event-name constants.
    pub event_constant_prefix: String,

    /// Identifier prefixes exempt from renaming (event/parameter constants).
    pub rename_exempt_prefixes: Vec<String>,

    /// Anonymous-enum merge heuristic: member-name prefix -> target enum
    /// name. A prefix missing here makes the merge pass drop the enum with a
    /// warning.
    pub enum_prefixes: FxHashMap<String, String>,
}

impl Default for GeneratorRules {
    fn default() -> Self {
        Self {
            include_types: Vec::new(),
            default_overrides: FxHashMap::default(),
            force_constants: Vec::new(),
            flag_template: "FlagSet".into(),
            event_name_type: "StringHash".into(),
            event_constant_prefix: "E_".into(),
            rename_exempt_prefixes: vec!["E_".into(), "P_".into()],
            enum_prefixes: FxHashMap::default(),
        }
    }
}

impl GeneratorRules {
    /// Rules that include every type (useful defaults for tests and tools).
    pub fn permissive() -> Self {
        Self {
            include_types: vec!["*".into()],
            ..Self::default()
        }
    }

    /// Parse a rules document from JSON.
    pub fn from_json(text: &str) -> Result<Self, GeneratorError> {
        serde_json::from_str(text).map_err(|e| GeneratorError::InvalidRules {
            detail: e.to_string(),
        })
    }

    /// Whether a fully qualified source type name matches the inclusion
    /// rule-set.
    pub fn includes_type(&self, unique_name: &str) -> bool {
        self.include_types.iter().any(|pattern| {
            if pattern == "*" {
                true
            } else if let Some(prefix) = pattern.strip_suffix("::*") {
                unique_name
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with("::"))
            } else {
                pattern == unique_name
            }
        })
    }

    /// Whether an identifier is exempt from renaming (conventionally prefixed
    /// event/parameter constants).
    pub fn is_rename_exempt(&self, source_name: &str) -> bool {
        self.rename_exempt_prefixes
            .iter()
            .any(|p| source_name.starts_with(p.as_str()))
    }

    /// Whether a source name is an event-name constant.
    pub fn is_event_constant(&self, source_name: &str) -> bool {
        source_name.starts_with(self.event_constant_prefix.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inclusion_patterns() {
        let mut rules = GeneratorRules::default();
        rules.include_types = vec!["Engine::*".into(), "Vector3".into()];
        assert!(rules.includes_type("Engine::Node"));
        assert!(rules.includes_type("Engine::Scene::Node"));
        assert!(rules.includes_type("Vector3"));
        assert!(!rules.includes_type("EngineExtras::Node"));
        assert!(!rules.includes_type("Other"));

        assert!(GeneratorRules::permissive().includes_type("Anything"));
    }

    #[test]
    fn rename_exemptions() {
        let rules = GeneratorRules::default();
        assert!(rules.is_rename_exempt("E_COLLISIONSTART"));
        assert!(rules.is_rename_exempt("P_BODY"));
        assert!(!rules.is_rename_exempt("MAX_LIGHTS"));
    }

    #[test]
    fn from_json_round_trip() {
        let rules = GeneratorRules::from_json(
            r#"{
                "include_types": ["*"],
                "default_overrides": {"Engine::DEFAULT_NAME": "\"node\""},
                "enum_prefixes": {"DD": "DragDropMode"}
            }"#,
        )
        .unwrap();
        assert!(rules.includes_type("Engine::Node"));
        assert_eq!(
            rules.default_overrides.get("Engine::DEFAULT_NAME").unwrap(),
            "\"node\""
        );
        // Unspecified fields keep their defaults.
        assert_eq!(rules.flag_template, "FlagSet");
        assert_eq!(rules.event_name_type, "StringHash");
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(GeneratorRules::from_json("{not json").is_err());
    }
}
