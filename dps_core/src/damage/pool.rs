//! Five-slot damage pool: physical, arts, heal, true, shield

use crate::types::DamageType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolSlot {
    Physical,
    Arts,
    Heal,
    True,
    Shield,
}

impl PoolSlot {
    pub const ALL: [PoolSlot; 5] = [
        PoolSlot::Physical,
        PoolSlot::Arts,
        PoolSlot::Heal,
        PoolSlot::True,
        PoolSlot::Shield,
    ];

    fn index(self) -> usize {
        match self {
            PoolSlot::Physical => 0,
            PoolSlot::Arts => 1,
            PoolSlot::Heal => 2,
            PoolSlot::True => 3,
            PoolSlot::Shield => 4,
        }
    }

    pub fn is_damage(self) -> bool {
        matches!(self, PoolSlot::Physical | PoolSlot::Arts | PoolSlot::True)
    }
}

impl From<DamageType> for PoolSlot {
    fn from(dt: DamageType) -> Self {
        match dt {
            DamageType::Physical => PoolSlot::Physical,
            DamageType::Arts => PoolSlot::Arts,
            DamageType::Heal => PoolSlot::Heal,
            DamageType::True => PoolSlot::True,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DamagePool([f64; 5]);

impl DamagePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: PoolSlot) -> f64 {
        self.0[slot.index()]
    }

    pub fn add(&mut self, slot: impl Into<PoolSlot>, amount: f64) {
        self.0[slot.into().index()] += amount;
    }

    pub fn set(&mut self, slot: impl Into<PoolSlot>, amount: f64) {
        self.0[slot.into().index()] = amount;
    }

    pub fn clear(&mut self) {
        self.0 = [0.0; 5];
    }

    /// Physical + arts + true
    pub fn total_damage(&self) -> f64 {
        PoolSlot::ALL
            .iter()
            .filter(|s| s.is_damage())
            .map(|s| self.get(*s))
            .sum()
    }

    /// Heal + shield
    pub fn total_heal(&self) -> f64 {
        self.get(PoolSlot::Heal) + self.get(PoolSlot::Shield)
    }

    pub fn merged(&self, other: &DamagePool) -> DamagePool {
        let mut out = *self;
        for (a, b) in out.0.iter_mut().zip(other.0.iter()) {
            *a += b;
        }
        out
    }

    pub fn as_array(&self) -> [f64; 5] {
        self.0
    }
}
