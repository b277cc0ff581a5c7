//! dps_simple - closed-form skill DPS for a handful of units
//!
//! Each unit is a small struct over precomputed constants (ATK, attack
//! interval, talent and skill parameter arrays). Nothing here runs the buff
//! or duration pipeline of `dps_core`, so the figures are estimates and can
//! differ from a full `calculate_dps` run.

mod units;

pub use units::{Exusiai, Eyjafjalla, Schwarz, SilverAsh};

use dps_core::config::{parse_toml, ConfigError};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const EMBEDDED_UNITS: &str = include_str!("../config/units.toml");

static DEFAULT_REGISTRY: Lazy<ClosedFormRegistry> =
    Lazy::new(|| match ClosedFormRegistry::from_toml(EMBEDDED_UNITS) {
        Ok(registry) => registry,
        Err(e) => {
            tracing::warn!("embedded closed-form table failed to parse: {}", e);
            ClosedFormRegistry::default()
        }
    });

/// Enemy profile: flat defense and resistance percent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub defense: f64,
    pub res: f64,
}

impl Enemy {
    pub fn new(defense: f64, res: f64) -> Self {
        Enemy { defense, res }
    }
}

/// Precomputed constants for one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitConstants {
    pub atk: f64,
    /// Seconds per attack
    pub attack_interval: f64,
    #[serde(default)]
    pub talent: Vec<f64>,
    #[serde(default)]
    pub skill: Vec<f64>,
}

impl UnitConstants {
    /// Talent parameter `i`, zero when absent
    pub fn talent(&self, i: usize) -> f64 {
        self.talent.get(i).copied().unwrap_or(0.0)
    }

    /// Skill parameter `i`, zero when absent
    pub fn skill(&self, i: usize) -> f64 {
        self.skill.get(i).copied().unwrap_or(0.0)
    }

    fn per_second(&self, per_attack: f64) -> f64 {
        if self.attack_interval <= 0.0 {
            return 0.0;
        }
        per_attack / self.attack_interval
    }
}

pub trait ClosedFormDps: Send + Sync {
    fn char_id(&self) -> &str;

    /// Average damage per second while the skill is active
    fn skill_dps(&self, enemy: &Enemy) -> f64;
}

fn build_model(char_id: &str, consts: UnitConstants) -> Option<Box<dyn ClosedFormDps>> {
    let model: Box<dyn ClosedFormDps> = match char_id {
        "char_340_shwaz" => Box::new(Schwarz { consts }),
        "char_103_angel" => Box::new(Exusiai { consts }),
        "char_180_amgoat" => Box::new(Eyjafjalla { consts }),
        "char_172_svrash" => Box::new(SilverAsh { consts }),
        _ => return None,
    };
    Some(model)
}

/// Closed-form units by character id
#[derive(Default)]
pub struct ClosedFormRegistry {
    units: HashMap<String, Box<dyn ClosedFormDps>>,
}

impl ClosedFormRegistry {
    /// The table shipped with the crate
    pub fn embedded() -> &'static ClosedFormRegistry {
        &DEFAULT_REGISTRY
    }

    /// Build from a `[char_id]` -> constants table; unknown ids are skipped
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let table: HashMap<String, UnitConstants> = parse_toml(content)?;
        let mut units = HashMap::new();
        for (char_id, consts) in table {
            match build_model(&char_id, consts) {
                Some(model) => {
                    units.insert(char_id, model);
                }
                None => tracing::warn!(%char_id, "no closed-form model, skipped"),
            }
        }
        Ok(ClosedFormRegistry { units })
    }

    pub fn by_char_id(&self, char_id: &str) -> Option<&dyn ClosedFormDps> {
        self.units.get(char_id).map(|u| u.as_ref())
    }

    /// Character ids with a model, sorted
    pub fn char_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.units.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Look a unit up in the embedded table
pub fn by_char_id(char_id: &str) -> Option<&'static dyn ClosedFormDps> {
    ClosedFormRegistry::embedded().by_char_id(char_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_registry() {
        let registry = ClosedFormRegistry::embedded();
        assert_eq!(
            registry.char_ids(),
            vec!["char_103_angel", "char_172_svrash", "char_180_amgoat", "char_340_shwaz"]
        );
        let unit = by_char_id("char_340_shwaz").unwrap();
        assert_eq!(unit.char_id(), "char_340_shwaz");
        assert!(unit.skill_dps(&Enemy::new(500.0, 0.0)) > 0.0);
        assert!(by_char_id("char_002_amiya").is_none());
    }

    #[test]
    fn test_from_toml_skips_unknown() {
        let toml = r#"
[char_172_svrash]
atk = 700.0
attack_interval = 1.0
skill = [1.0]

[char_999_none]
atk = 1.0
attack_interval = 1.0
"#;
        let registry = ClosedFormRegistry::from_toml(toml).unwrap();
        assert_eq!(registry.len(), 1);
        let dps = registry.by_char_id("char_172_svrash").unwrap().skill_dps(&Enemy::new(400.0, 0.0));
        assert!((dps - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(ClosedFormRegistry::from_toml("[char_172_svrash]\natk = \"x\"").is_err());
    }

    #[test]
    fn test_defense_monotone() {
        for id in ClosedFormRegistry::embedded().char_ids() {
            let unit = by_char_id(id).unwrap();
            let mut last = f64::INFINITY;
            for def in [0.0, 200.0, 500.0, 1000.0, 2000.0] {
                let dps = unit.skill_dps(&Enemy::new(def, 0.0));
                assert!(dps <= last + 1e-9, "{} not monotone at {}", id, def);
                last = dps;
            }
        }
    }
}
