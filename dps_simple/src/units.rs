//! Per-unit closed-form models

use crate::{ClosedFormDps, Enemy, UnitConstants};
use dps_core::damage::{arts_hit, physical_hit};

const MIN_DAMAGE: f64 = 0.05;

/// Schwarz S3: ATK up, crits that also ignore part of DEF
#[derive(Debug, Clone)]
pub struct Schwarz {
    pub consts: UnitConstants,
}

impl ClosedFormDps for Schwarz {
    fn char_id(&self) -> &str {
        "char_340_shwaz"
    }

    fn skill_dps(&self, enemy: &Enemy) -> f64 {
        let c = &self.consts;
        let atk = c.atk * (1.0 + c.skill(0));
        let crit_prob = c.skill(1).max(c.talent(0)).clamp(0.0, 1.0);
        let crit_def = enemy.defense * (1.0 - c.skill(2));
        let normal = physical_hit(atk, enemy.defense, MIN_DAMAGE);
        let crit = physical_hit(atk * c.talent(1), crit_def, MIN_DAMAGE);
        let avg = normal * (1.0 - crit_prob) + crit * crit_prob;
        c.per_second(avg)
    }
}

/// Exusiai S3: multi-arrow volleys at a compressed interval
#[derive(Debug, Clone)]
pub struct Exusiai {
    pub consts: UnitConstants,
}

impl ClosedFormDps for Exusiai {
    fn char_id(&self) -> &str {
        "char_103_angel"
    }

    fn skill_dps(&self, enemy: &Enemy) -> f64 {
        let c = &self.consts;
        let atk = c.atk * (1.0 + c.talent(0)) * c.skill(0);
        let volley = physical_hit(atk, enemy.defense, MIN_DAMAGE) * c.skill(1);
        let interval = c.attack_interval * c.skill(2);
        if interval <= 0.0 {
            return 0.0;
        }
        volley / interval
    }
}

/// Eyjafjalla S3: large ATK bonus, arts damage
#[derive(Debug, Clone)]
pub struct Eyjafjalla {
    pub consts: UnitConstants,
}

impl ClosedFormDps for Eyjafjalla {
    fn char_id(&self) -> &str {
        "char_180_amgoat"
    }

    fn skill_dps(&self, enemy: &Enemy) -> f64 {
        let c = &self.consts;
        let atk = c.atk * (1.0 + c.talent(0) + c.skill(0));
        let res = (enemy.res - c.skill(1)).clamp(0.0, 100.0) / 100.0;
        c.per_second(arts_hit(atk, res, MIN_DAMAGE))
    }
}

/// SilverAsh S3: ATK bonus, per-target DPS
#[derive(Debug, Clone)]
pub struct SilverAsh {
    pub consts: UnitConstants,
}

impl ClosedFormDps for SilverAsh {
    fn char_id(&self) -> &str {
        "char_172_svrash"
    }

    fn skill_dps(&self, enemy: &Enemy) -> f64 {
        let c = &self.consts;
        let atk = c.atk * (1.0 + c.skill(0));
        c.per_second(physical_hit(atk, enemy.defense, MIN_DAMAGE))
    }
}
