//! Damage type classifier
//!
//! Priority: special-tag override (skill, then unit) > skill description
//! keywords > unit trait keywords > profession default.

use crate::config::SpecialTags;
use crate::data::UnitContext;
use crate::types::{DamageType, Profession};

const TRUE_KEYWORDS: [&str; 2] = ["true damage", "真实伤害"];
const ARTS_KEYWORDS: [&str; 2] = ["arts damage", "法术伤害"];

fn keyword_type(text: &str) -> Option<DamageType> {
    let lower = text.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));
    if has(&TRUE_KEYWORDS) {
        Some(DamageType::True)
    } else if has(&ARTS_KEYWORDS) {
        Some(DamageType::Arts)
    } else {
        None
    }
}

fn profession_type(unit: &UnitContext) -> DamageType {
    match unit.profession {
        Profession::Medic if unit.sub_profession_id == "incantationmedic" => DamageType::Arts,
        Profession::Medic => DamageType::Heal,
        Profession::Supporter if unit.sub_profession_id == "bard" => DamageType::Heal,
        Profession::Caster | Profession::Supporter => DamageType::Arts,
        _ => DamageType::Physical,
    }
}

fn special_type(special: &SpecialTags, id: &str) -> Option<DamageType> {
    special
        .number(id, "damage_type")
        .and_then(|n| DamageType::from_index(n as i64))
}

pub fn classify_damage_type(unit: &UnitContext, is_skill: bool, special: &SpecialTags) -> DamageType {
    let skill_id = unit.skill_id().filter(|_| is_skill);

    if let Some(dt) = skill_id.and_then(|id| special_type(special, id)) {
        return dt;
    }
    if let Some(dt) = special_type(special, &unit.char_id) {
        return dt;
    }

    if let Some(skill) = unit.skill.as_ref().filter(|_| is_skill) {
        if let Some(dt) = keyword_type(&skill.description) {
            return dt;
        }
    }

    if let Some(dt) = keyword_type(&unit.description) {
        return dt;
    }
    profession_type(unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blackboard::Blackboard;
    use crate::config::TagValue;
    use crate::data::{BasicAttributes, SkillLevelData, SpData};
    use crate::types::{SkillType, SpType};

    fn unit(profession: Profession, sub: &str) -> UnitContext {
        let mut u = UnitContext::new("char_test", profession, BasicAttributes::default());
        u.sub_profession_id = sub.to_string();
        u
    }

    fn with_skill(u: UnitContext, id: &str, description: &str) -> UnitContext {
        u.with_skill(
            id,
            SkillLevelData {
                name: "S".to_string(),
                description: description.to_string(),
                skill_type: SkillType::Manual,
                duration: 10.0,
                sp_data: SpData {
                    sp_type: SpType::IncreaseWithTime,
                    sp_cost: 10.0,
                    init_sp: 0.0,
                    increment: 1.0,
                },
                blackboard: Blackboard::new(),
            },
        )
    }

    #[test]
    fn test_profession_defaults() {
        let special = SpecialTags::default();
        let cases = [
            (Profession::Guard, "", DamageType::Physical),
            (Profession::Caster, "", DamageType::Arts),
            (Profession::Medic, "physician", DamageType::Heal),
            (Profession::Medic, "incantationmedic", DamageType::Arts),
            (Profession::Supporter, "bard", DamageType::Heal),
            (Profession::Supporter, "slower", DamageType::Arts),
            (Profession::Sniper, "", DamageType::Physical),
        ];
        for (p, sub, expected) in cases {
            assert_eq!(classify_damage_type(&unit(p, sub), false, &special), expected);
        }
    }

    #[test]
    fn test_skill_keywords_only_while_active() {
        let special = SpecialTags::default();
        let u = with_skill(
            unit(Profession::Guard, "sword"),
            "skchr_test_1",
            "ATK +100%, attacks deal Arts damage",
        );
        assert_eq!(classify_damage_type(&u, true, &special), DamageType::Arts);
        assert_eq!(classify_damage_type(&u, false, &special), DamageType::Physical);

        let u = with_skill(unit(Profession::Sniper, ""), "skchr_test_2", "攻击造成真实伤害");
        assert_eq!(classify_damage_type(&u, true, &special), DamageType::True);
    }

    #[test]
    fn test_trait_keywords() {
        let special = SpecialTags::default();
        let mut u = unit(Profession::Guard, "artsfghter");
        u.description = "Deals Arts damage".to_string();
        assert_eq!(classify_damage_type(&u, false, &special), DamageType::Arts);
    }

    #[test]
    fn test_special_override_wins() {
        let mut special = SpecialTags::default();
        special.insert("skchr_test_1", "damage_type", TagValue::Number(3.0));
        let u = with_skill(
            unit(Profession::Guard, ""),
            "skchr_test_1",
            "attacks deal Arts damage",
        );
        assert_eq!(classify_damage_type(&u, true, &special), DamageType::True);

        special.insert("char_test", "damage_type", TagValue::Number(1.0));
        assert_eq!(classify_damage_type(&u, false, &special), DamageType::Arts);

        // Out-of-range override is ignored
        special.insert("char_test", "damage_type", TagValue::Number(9.0));
        assert_eq!(classify_damage_type(&u, false, &special), DamageType::Physical);
    }

    #[test]
    fn test_medic_damage_skill() {
        let special = SpecialTags::default();
        let u = with_skill(unit(Profession::Medic, "physician"), "skchr_test_3", "Heals allies continuously");
        assert_eq!(classify_damage_type(&u, true, &special), DamageType::Heal);
    }
}
