//! Engine constants configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunable engine constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConstants {
    #[serde(default)]
    pub timing: TimingConstants,
    #[serde(default)]
    pub duration: DurationConstants,
    #[serde(default)]
    pub damage: DamageConstants,
}

impl EngineConstants {
    /// Reject values that would make the cadence or duration math meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timing;
        if t.fps <= 0.0 {
            return Err(ConfigError::Validation(format!("fps must be positive, got {}", t.fps)));
        }
        if t.attack_speed_min <= 0.0 || t.attack_speed_min > t.attack_speed_max {
            return Err(ConfigError::Validation(format!(
                "invalid attack speed bounds [{}, {}]",
                t.attack_speed_min, t.attack_speed_max
            )));
        }
        if t.anim_scale_min <= 0.0 || t.anim_scale_min > t.anim_scale_max {
            return Err(ConfigError::Validation(format!(
                "invalid animation scale bounds [{}, {}]",
                t.anim_scale_min, t.anim_scale_max
            )));
        }
        if self.duration.sim_horizon <= 0.0 {
            return Err(ConfigError::Validation("sim_horizon must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.damage.min_damage_floor) {
            return Err(ConfigError::Validation(format!(
                "min_damage_floor must be within [0, 1], got {}",
                self.damage.min_damage_floor
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConstants {
    /// Game tick rate
    #[serde(default = "default_fps")]
    pub fps: f64,
    #[serde(default = "default_attack_speed_min")]
    pub attack_speed_min: f64,
    #[serde(default = "default_attack_speed_max")]
    pub attack_speed_max: f64,
    #[serde(default = "default_anim_scale_min")]
    pub anim_scale_min: f64,
    /// Animation scale cap when no per-unit override exists
    #[serde(default = "default_anim_scale_max")]
    pub anim_scale_max: f64,
    /// Frame gap above which the realized interval rounds up and adds a frame
    #[serde(default = "default_reconcile_gap")]
    pub reconcile_gap: f64,
}

impl Default for TimingConstants {
    fn default() -> Self {
        TimingConstants {
            fps: 30.0,
            attack_speed_min: 10.0,
            attack_speed_max: 600.0,
            anim_scale_min: 0.1,
            anim_scale_max: 99.0,
            reconcile_gap: 0.5,
        }
    }
}

fn default_fps() -> f64 {
    30.0
}
fn default_attack_speed_min() -> f64 {
    10.0
}
fn default_attack_speed_max() -> f64 {
    600.0
}
fn default_anim_scale_min() -> f64 {
    0.1
}
fn default_anim_scale_max() -> f64 {
    99.0
}
fn default_reconcile_gap() -> f64 {
    0.5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationConstants {
    /// Discrete-event simulation window (seconds)
    #[serde(default = "default_sim_horizon")]
    pub sim_horizon: f64,
    /// Window for infinite-duration skills (seconds)
    #[serde(default = "default_toggle_horizon")]
    pub toggle_horizon: f64,
    /// Same, with `short_mode` set
    #[serde(default = "default_toggle_short_horizon")]
    pub toggle_short_horizon: f64,
    /// Assumed hits taken per second for hit-recovery skills
    #[serde(default = "default_hit_recovery_rate")]
    pub hit_recovery_rate: f64,
}

impl Default for DurationConstants {
    fn default() -> Self {
        DurationConstants {
            sim_horizon: 120.0,
            toggle_horizon: 1000.0,
            toggle_short_horizon: 180.0,
            hit_recovery_rate: 1.0,
        }
    }
}

fn default_sim_horizon() -> f64 {
    120.0
}
fn default_toggle_horizon() -> f64 {
    1000.0
}
fn default_toggle_short_horizon() -> f64 {
    180.0
}
fn default_hit_recovery_rate() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageConstants {
    /// Chip damage floor as a fraction of ATK
    #[serde(default = "default_min_damage_floor")]
    pub min_damage_floor: f64,
    /// Falloff per bounce for chain casters
    #[serde(default = "default_chain_decay")]
    pub chain_decay: f64,
}

impl Default for DamageConstants {
    fn default() -> Self {
        DamageConstants {
            min_damage_floor: 0.05,
            chain_decay: 0.85,
        }
    }
}

fn default_min_damage_floor() -> f64 {
    0.05
}
fn default_chain_decay() -> f64 {
    0.85
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = EngineConstants::default();
        assert!((constants.timing.fps - 30.0).abs() < f64::EPSILON);
        assert!((constants.duration.sim_horizon - 120.0).abs() < f64::EPSILON);
        assert!((constants.damage.min_damage_floor - 0.05).abs() < f64::EPSILON);
        assert!(constants.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_constants() {
        let toml = r#"
[duration]
toggle_short_horizon = 120

[damage]
chain_decay = 0.9
"#;

        let constants: EngineConstants = toml::from_str(toml).unwrap();
        assert!((constants.duration.toggle_short_horizon - 120.0).abs() < f64::EPSILON);
        assert!((constants.duration.toggle_horizon - 1000.0).abs() < f64::EPSILON);
        assert!((constants.damage.chain_decay - 0.9).abs() < f64::EPSILON);
        assert!((constants.timing.attack_speed_max - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validation_rejects_bad_bounds() {
        let mut constants = EngineConstants::default();
        constants.timing.attack_speed_min = 700.0;
        assert!(matches!(constants.validate(), Err(ConfigError::Validation(_))));

        let mut constants = EngineConstants::default();
        constants.damage.min_damage_floor = 1.5;
        assert!(constants.validate().is_err());
    }
}
