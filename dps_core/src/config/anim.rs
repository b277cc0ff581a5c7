//! Animation-duration table: unit id -> animation key -> entry (frames)

use super::{load_json, parse_json, ConfigError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// One recorded animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnimEntry {
    /// Length only, no hit-event frame
    Bare(f64),
    /// Length plus the frame the hit lands on
    Timed {
        duration: f64,
        #[serde(rename = "OnAttack")]
        on_attack: f64,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationTable {
    units: HashMap<String, BTreeMap<String, AnimEntry>>,
}

impl AnimationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        parse_json(content)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_json(path)
    }

    /// All keys recorded for a unit, sorted
    pub fn keys(&self, unit: &str) -> Vec<&str> {
        self.units
            .get(unit)
            .map(|entries| entries.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn get(&self, unit: &str, key: &str) -> Option<AnimEntry> {
        self.units.get(unit).and_then(|entries| entries.get(key)).copied()
    }

    pub fn insert(&mut self, unit: &str, key: &str, entry: AnimEntry) {
        self.units
            .entry(unit.to_string())
            .or_default()
            .insert(key.to_string(), entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_entries() {
        let json = r#"{
            "char_010_chen": {
                "Attack": {"duration": 40, "OnAttack": 20},
                "Skill_1": 55
            }
        }"#;
        let table = AnimationTable::from_json(json).unwrap();
        assert_eq!(
            table.get("char_010_chen", "Attack"),
            Some(AnimEntry::Timed {
                duration: 40.0,
                on_attack: 20.0
            })
        );
        assert_eq!(table.get("char_010_chen", "Skill_1"), Some(AnimEntry::Bare(55.0)));
        assert_eq!(table.keys("char_010_chen"), vec!["Attack", "Skill_1"]);
        assert!(table.keys("char_unknown").is_empty());
    }
}
