//! Calculation errors
//!
//! Only missing data for the unit being evaluated is fatal; everything else
//! inside the engine degrades to documented defaults.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Unknown character: {0}")]
    MissingCharacter(String),
    #[error("Unknown skill: {0}")]
    MissingSkill(String),
    #[error("Skill {skill_id} has no level {level}")]
    MissingSkillLevel { skill_id: String, level: usize },
    #[error("Character {char_id} has no promotion phase {phase}")]
    MissingPhase { char_id: String, phase: usize },
    #[error("Unknown module: {0}")]
    MissingModule(String),
}
