//! BuffFrame - accumulator for every buff contribution in one resolution pass
//!
//! Each field has exactly one combination rule, looked up through
//! [`FrameField::rule`]; all writes go through [`BuffFrame::combine`].

mod final_attrs;

pub use final_attrs::{get_buffed_attributes, get_buffed_attributes_within, FinalAttributes};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How a contribution folds into a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combine {
    Add,
    Mul,
    /// Keep the larger value
    Max,
    /// Latest write wins
    Override,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameField {
    Atk,
    Def,
    MaxHp,
    AttackSpeed,
    BaseAttackTime,
    SpRecoveryPerSec,
    AtkScale,
    DefScale,
    HealScale,
    DamageScale,
    EdefScale,
    EmrScale,
    Edef,
    EdefPene,
    EmrPene,
    Emr,
    EdefPeneScale,
    MaxTarget,
    Times,
    Prob,
    SpRecoverRatio,
}

impl FrameField {
    pub fn rule(self) -> Combine {
        use FrameField::*;
        match self {
            Atk | Def | MaxHp | AttackSpeed | BaseAttackTime | SpRecoveryPerSec => Combine::Add,
            Edef | EdefPene | EmrPene | Emr | SpRecoverRatio => Combine::Add,
            AtkScale | DefScale | HealScale | DamageScale | EdefScale | EmrScale => Combine::Mul,
            EdefPeneScale => Combine::Max,
            MaxTarget | Times | Prob => Combine::Override,
        }
    }
}

/// Extra SP granted every `interval` seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpInterval {
    pub interval: f64,
    pub sp: f64,
    /// Buff tag that granted it
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuffFrame {
    pub atk: f64,
    pub def: f64,
    pub max_hp: f64,
    pub attack_speed: f64,
    pub base_attack_time: f64,
    pub sp_recovery_per_sec: f64,

    pub atk_scale: f64,
    pub def_scale: f64,
    pub heal_scale: f64,
    pub damage_scale: f64,
    pub edef_scale: f64,
    pub emr_scale: f64,

    pub edef: f64,
    pub edef_pene: f64,
    pub emr_pene: f64,
    pub emr: f64,
    pub edef_pene_scale: f64,

    pub max_target: f64,
    pub times: f64,
    pub prob: Option<f64>,

    /// Extra SP per attack
    pub sp_recover_ratio: f64,
    pub sp_recover_intervals: Vec<SpInterval>,

    /// Resolved buff tags already folded in this pass
    pub applied: BTreeSet<String>,
    /// Tags gated off this pass (condition unmet, option off, module unequipped)
    pub suppressed: BTreeSet<String>,
}

impl Default for BuffFrame {
    fn default() -> Self {
        BuffFrame {
            atk: 0.0,
            def: 0.0,
            max_hp: 0.0,
            attack_speed: 0.0,
            base_attack_time: 0.0,
            sp_recovery_per_sec: 0.0,
            atk_scale: 1.0,
            def_scale: 1.0,
            heal_scale: 1.0,
            damage_scale: 1.0,
            edef_scale: 1.0,
            emr_scale: 1.0,
            edef: 0.0,
            edef_pene: 0.0,
            emr_pene: 0.0,
            emr: 0.0,
            edef_pene_scale: 0.0,
            max_target: 1.0,
            times: 1.0,
            prob: None,
            sp_recover_ratio: 0.0,
            sp_recover_intervals: Vec::new(),
            applied: BTreeSet::new(),
            suppressed: BTreeSet::new(),
        }
    }
}

impl BuffFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `value` into `field` using the field's rule
    pub fn combine(&mut self, field: FrameField, value: f64) {
        let rule = field.rule();
        let Some(slot) = self.slot_mut(field) else {
            self.prob = Some(value);
            return;
        };
        match rule {
            Combine::Add => *slot += value,
            Combine::Mul => *slot *= value,
            Combine::Max => *slot = slot.max(value),
            Combine::Override => *slot = value,
        }
    }

    /// Current value; an unset `prob` reads as 0
    pub fn get(&self, field: FrameField) -> f64 {
        use FrameField::*;
        match field {
            Atk => self.atk,
            Def => self.def,
            MaxHp => self.max_hp,
            AttackSpeed => self.attack_speed,
            BaseAttackTime => self.base_attack_time,
            SpRecoveryPerSec => self.sp_recovery_per_sec,
            AtkScale => self.atk_scale,
            DefScale => self.def_scale,
            HealScale => self.heal_scale,
            DamageScale => self.damage_scale,
            EdefScale => self.edef_scale,
            EmrScale => self.emr_scale,
            Edef => self.edef,
            EdefPene => self.edef_pene,
            EmrPene => self.emr_pene,
            Emr => self.emr,
            EdefPeneScale => self.edef_pene_scale,
            MaxTarget => self.max_target,
            Times => self.times,
            Prob => self.prob.unwrap_or(0.0),
            SpRecoverRatio => self.sp_recover_ratio,
        }
    }

    /// Numeric storage for `field`; `prob` is an `Option` and has none
    fn slot_mut(&mut self, field: FrameField) -> Option<&mut f64> {
        use FrameField::*;
        let slot = match field {
            Atk => &mut self.atk,
            Def => &mut self.def,
            MaxHp => &mut self.max_hp,
            AttackSpeed => &mut self.attack_speed,
            BaseAttackTime => &mut self.base_attack_time,
            SpRecoveryPerSec => &mut self.sp_recovery_per_sec,
            AtkScale => &mut self.atk_scale,
            DefScale => &mut self.def_scale,
            HealScale => &mut self.heal_scale,
            DamageScale => &mut self.damage_scale,
            EdefScale => &mut self.edef_scale,
            EmrScale => &mut self.emr_scale,
            Edef => &mut self.edef,
            EdefPene => &mut self.edef_pene,
            EmrPene => &mut self.emr_pene,
            Emr => &mut self.emr,
            EdefPeneScale => &mut self.edef_pene_scale,
            MaxTarget => &mut self.max_target,
            Times => &mut self.times,
            SpRecoverRatio => &mut self.sp_recover_ratio,
            Prob => return None,
        };
        Some(slot)
    }

    pub fn is_applied(&self, tag: &str) -> bool {
        self.applied.contains(tag)
    }

    /// Record `tag`; returns false if it was already recorded
    pub fn mark_applied(&mut self, tag: &str) -> bool {
        self.applied.insert(tag.to_string())
    }

    pub fn suppress(&mut self, tag: &str) {
        self.suppressed.insert(tag.to_string());
    }

    pub fn is_suppressed(&self, tag: &str) -> bool {
        self.suppressed.contains(tag)
    }

    pub fn push_sp_interval(&mut self, interval: f64, sp: f64, tag: &str) {
        self.sp_recover_intervals.push(SpInterval {
            interval,
            sp,
            tag: tag.to_string(),
        });
    }
}
