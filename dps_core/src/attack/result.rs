//! DpsResult - outcome of one attack calculation

use crate::damage::DamagePool;
use crate::duration::Duration;
use crate::frame::FinalAttributes;
use crate::types::DamageType;
use serde::{Deserialize, Serialize};

/// Everything computed for one skill state (active or inactive)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DpsResult {
    pub is_skill: bool,
    /// Final attack power (heal-scaled for healers)
    pub atk: f64,
    pub dps: f64,
    pub hps: f64,
    pub dur: Duration,
    pub damage_type: DamageType,

    // === Per hit ===
    pub hit_damage: f64,
    pub crit_damage: f64,

    // === Totals ===
    pub extra_damage: f64,
    pub extra_heal: f64,
    pub total_damage: f64,
    pub total_heal: f64,
    pub damage_pool: DamagePool,
    pub extra_damage_pool: DamagePool,

    /// Effective targets per attack
    pub max_target: f64,
    /// Realized seconds per attack
    pub attack_time: f64,
    /// Realized frames per attack
    pub frame: f64,
    pub attack_count: f64,
    pub sp_type: String,
    /// DPS/HPS denominator in seconds
    pub time: f64,
    pub final_attributes: FinalAttributes,
}

impl DpsResult {
    pub fn summary(&self) -> String {
        let mut parts = vec![format!(
            "{} {}",
            if self.is_skill { "skill" } else { "normal" },
            self.damage_type.label()
        )];

        if self.total_damage > 0.0 {
            parts.push(format!("{:.0} damage ({:.1} dps)", self.total_damage, self.dps));
        }
        if self.total_heal != 0.0 {
            parts.push(format!("{:.0} heal ({:.1} hps)", self.total_heal, self.hps));
        }
        parts.push(format!(
            "{} attacks over {:.2}s",
            self.attack_count, self.time
        ));
        if self.dur.crit_count > 0.0 {
            parts.push(format!("{} crits", self.dur.crit_count));
        }

        parts.join(", ")
    }
}

/// Whole-cycle figures: one skill activation plus the basic attacks leading up to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DpsReport {
    pub skill: Option<DpsResult>,
    pub normal: DpsResult,
    pub global_dps: f64,
    pub global_hps: f64,
}

impl DpsReport {
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        if let Some(skill) = &self.skill {
            lines.push(skill.summary());
        }
        lines.push(self.normal.summary());
        lines.push(format!(
            "cycle: {:.1} dps, {:.1} hps",
            self.global_dps, self.global_hps
        ));
        lines.join("\n")
    }
}
