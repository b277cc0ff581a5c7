//! Integration test: game data -> unit -> buffs -> durations -> damage
//!
//! Validates the full flow from parsed game tables to cycle DPS.

use dps_core::{
    attack::{calculate_attack, calculate_dps, CalcRequest},
    blackboard::Blackboard,
    buff::{apply_buff, BuffEnv},
    config::{AnimEntry, AnimationTable, SpecialTags, TimingConstants},
    data::{BasicAttributes, GameData, SkillLevelData, SpData, UnitContext, UnitSpec},
    frame::{get_buffed_attributes, BuffFrame},
    tables::GameTables,
    timing::{resolve_animation, AnimRequest},
    trace::Trace,
    types::{CalcOptions, DamageType, EnemyProfile, Profession, SkillType, SpType},
};
use proptest::prelude::*;

/// Helper to print a separator
fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

const GAME_JSON: &str = r#"{
    "characters": {
        "char_340_shwaz": {
            "name": "Schwarz",
            "profession": "SNIPER",
            "sub_profession_id": "siegesniper",
            "phases": [
                {"max_level": 50, "attributes_key_frames": [
                    {"level": 1, "data": {"atk": 400, "def": 50, "max_hp": 800, "base_attack_time": 2.7}},
                    {"level": 50, "data": {"atk": 600, "def": 80, "max_hp": 1000, "base_attack_time": 2.7}}
                ]},
                {"max_level": 80, "attributes_key_frames": [
                    {"level": 1, "data": {"atk": 600, "def": 80, "max_hp": 1000, "base_attack_time": 2.7}},
                    {"level": 80, "data": {"atk": 900, "def": 100, "max_hp": 1300, "base_attack_time": 2.7}}
                ]}
            ],
            "favor_key_frames": [
                {"level": 0, "data": {}},
                {"level": 50, "data": {"atk": 60}}
            ],
            "skills": ["skchr_shwaz_1", "skchr_shwaz_3"],
            "talents": [{"candidates": [
                {"tag": "tachr_340_shwaz_1", "required_phase": 1,
                 "blackboard": [{"key": "prob", "value": 0.2}, {"key": "atk_scale", "value": 1.6}]}
            ]}]
        },
        "char_2013_cerber": {
            "name": "Ceobe",
            "profession": "CASTER",
            "sub_profession_id": "corecaster",
            "phases": [{"max_level": 50, "attributes_key_frames": [
                {"level": 1, "data": {"atk": 500, "base_attack_time": 1.6}},
                {"level": 50, "data": {"atk": 700, "base_attack_time": 1.6}}
            ]}],
            "skills": ["skchr_cerber_2"]
        }
    },
    "skills": {
        "skchr_shwaz_3": {"levels": [{
            "name": "Final Tactics",
            "duration": 20,
            "sp_data": {"sp_type": "INCREASE_WITH_TIME", "sp_cost": 40, "init_sp": 15},
            "blackboard": [{"key": "atk", "value": 0.6}, {"key": "attack_speed", "value": 20}]
        }]},
        "skchr_cerber_2": {"levels": [{
            "name": "Dissolve",
            "sp_data": {"sp_type": "INCREASE_WHEN_ATTACK", "sp_cost": 4},
            "blackboard": [{"key": "atk_scale", "value": 2.0}]
        }]}
    }
}"#;

fn tables() -> GameTables {
    GameTables::new(GameData::from_json(GAME_JSON).unwrap())
}

#[test]
fn test_full_cycle_with_crits() {
    separator("Schwarz S3 vs 300 DEF");

    let tables = tables();
    let spec = UnitSpec {
        favor: 100.0,
        ..UnitSpec::new("char_340_shwaz")
            .with_level(1, 80)
            .with_skill("skchr_shwaz_3", 1)
    };
    let req = CalcRequest::from_spec(&tables, &spec)
        .unwrap()
        .with_enemy(EnemyProfile::new(300.0, 0.0, 1))
        .with_options(CalcOptions {
            crit: true,
            ..Default::default()
        });

    assert!((req.unit.basic.atk - 960.0).abs() < f64::EPSILON);

    let mut trace = Trace::new();
    let report = calculate_dps(&tables, &req, &mut trace);
    println!("{}", report.summary());

    let skill = report.skill.as_ref().unwrap();
    assert_eq!(skill.damage_type, DamageType::Physical);
    // 960 * 1.6 = 1536 ATK during the skill
    assert!((skill.atk - 1536.0).abs() < 1e-9);
    assert!(skill.crit_damage > skill.hit_damage);
    assert!(skill.dur.crit_count > 0.0);
    assert!(
        (skill.dur.hit_count + skill.dur.crit_hit_count - skill.attack_count * skill.dur.times).abs() < 1e-9
    );
    assert!(report.global_dps > report.normal.dps);
    assert!(report.global_dps < skill.dps);
    assert!(!trace.is_empty());
}

#[test]
fn test_missing_data_is_an_error() {
    let tables = tables();
    let spec = UnitSpec::new("char_999_none");
    assert!(CalcRequest::from_spec(&tables, &spec).is_err());
}

#[test]
fn test_physical_scenario() {
    separator("1000 ATK x1.5 vs 200 DEF");

    let skill = SkillLevelData {
        name: "Power Strike".to_string(),
        description: String::new(),
        skill_type: SkillType::Manual,
        duration: 10.0,
        sp_data: SpData {
            sp_type: SpType::IncreaseWithTime,
            sp_cost: 30.0,
            init_sp: 0.0,
            increment: 1.0,
        },
        blackboard: Blackboard::from_pairs(&[("atk_scale", 1.5)]),
    };
    let unit = UnitContext::new(
        "char_test",
        Profession::Guard,
        BasicAttributes {
            atk: 1000.0,
            base_attack_time: 1.0,
            ..Default::default()
        },
    )
    .with_skill("skchr_test_1", skill);
    let tables = GameTables::new(GameData::default()).with_special(SpecialTags::default());
    let req = CalcRequest::new(unit).with_enemy(EnemyProfile::new(200.0, 0.0, 1));

    let result = calculate_attack(&tables, &req, true, &mut Trace::disabled());
    println!("{}", result.summary());
    assert!((result.hit_damage - 1300.0).abs() < 1e-9);
    assert!((result.dur.times - 1.0).abs() < f64::EPSILON);
    assert!((result.dur.hit_count - 10.0).abs() < f64::EPSILON);
    assert!((result.total_damage - 13000.0).abs() < 1e-9);
}

#[test]
fn test_arts_scenario() {
    let unit = UnitContext::new(
        "char_test",
        Profession::Caster,
        BasicAttributes {
            atk: 800.0,
            ..Default::default()
        },
    );
    let tables = GameTables::new(GameData::default());
    let req = CalcRequest::new(unit).with_enemy(EnemyProfile::new(0.0, 30.0, 1));
    let result = calculate_attack(&tables, &req, false, &mut Trace::disabled());
    assert!((result.hit_damage - 560.0).abs() < 1e-9);
}

#[test]
fn test_max_hp_fraction_vs_flat() {
    let unit = UnitContext::new(
        "char_test",
        Profession::Defender,
        BasicAttributes {
            max_hp: 3000.0,
            ..Default::default()
        },
    );
    let options = CalcOptions::default();
    let enemy = EnemyProfile::default();
    let special = SpecialTags::default();
    let env = BuffEnv {
        unit: &unit,
        options: &options,
        enemy: &enemy,
        special: &special,
    };

    let mut trace = Trace::disabled();
    let frac = apply_buff(
        &env,
        BuffFrame::new(),
        "tachr_a_1",
        &Blackboard::from_pairs(&[("max_hp", 0.1)]),
        false,
        false,
        &mut trace,
    );
    let flat = apply_buff(
        &env,
        BuffFrame::new(),
        "tachr_b_1",
        &Blackboard::from_pairs(&[("max_hp", 500.0)]),
        false,
        false,
        &mut trace,
    );
    assert!((get_buffed_attributes(&unit.basic, &frac).max_hp - 3300.0).abs() < 1e-9);
    assert!((get_buffed_attributes(&unit.basic, &flat).max_hp - 3500.0).abs() < 1e-9);
}

#[test]
fn test_buff_applied_once_per_pass() {
    let unit = UnitContext::new("char_test", Profession::Guard, BasicAttributes::default());
    let options = CalcOptions::default();
    let enemy = EnemyProfile::default();
    let special = SpecialTags::default();
    let env = BuffEnv {
        unit: &unit,
        options: &options,
        enemy: &enemy,
        special: &special,
    };
    let bb = Blackboard::from_pairs(&[("atk_flat", 100.0)]);
    let mut trace = Trace::disabled();
    let once = apply_buff(&env, BuffFrame::new(), "tachr_a_1", &bb, false, false, &mut trace);
    let twice = apply_buff(&env, once.clone(), "tachr_a_1", &bb, false, false, &mut trace);
    assert_eq!(once, twice);
}

#[test]
fn test_animation_scenario() {
    let mut anim = AnimationTable::new();
    anim.insert(
        "char_test",
        "Attack",
        AnimEntry::Timed {
            duration: 40.0,
            on_attack: 20.0,
        },
    );
    let timing = TimingConstants::default();
    let result = resolve_animation(
        &anim,
        &SpecialTags::default(),
        &timing,
        &AnimRequest {
            unit_id: "char_test",
            skill_id: None,
            skill_index: 0,
            is_skill: false,
            attack_frame: 48.0,
        },
        &mut Trace::disabled(),
    );
    assert!((result.pre_delay - 24.0).abs() < f64::EPSILON);
    assert!((result.post_delay - 24.0).abs() < f64::EPSILON);
    assert!((result.real_attack_frame - 48.0).abs() < f64::EPSILON);
}

#[test]
fn test_simulated_skill_is_deterministic() {
    separator("Ceobe S2 (simulated)");

    let tables = tables();
    let spec = UnitSpec::new("char_2013_cerber").with_level(0, 50).with_skill("skchr_cerber_2", 1);
    let req = CalcRequest::from_spec(&tables, &spec)
        .unwrap()
        .with_enemy(EnemyProfile::new(0.0, 20.0, 1));

    let a = calculate_dps(&tables, &req, &mut Trace::disabled());
    let b = calculate_dps(&tables, &req, &mut Trace::disabled());
    println!("{}", a.summary());
    assert_eq!(a, b);

    let skill = a.skill.as_ref().unwrap();
    assert_eq!(skill.dur.tags, vec!["sim".to_string()]);
    assert_eq!(skill.damage_type, DamageType::Arts);
    assert!(skill.dur.skill_count > 0.0);
    // Every attack slot in the horizon is either a cast or a basic attack
    assert!((skill.attack_count + a.normal.attack_count - 75.0).abs() < f64::EPSILON);
}

fn caster_request(def: f64, res: f64) -> CalcRequest {
    let unit = UnitContext::new(
        "char_test",
        Profession::Guard,
        BasicAttributes {
            atk: 700.0,
            ..Default::default()
        },
    );
    CalcRequest::new(unit).with_enemy(EnemyProfile::new(def, res, 1))
}

proptest! {
    #[test]
    fn test_dps_monotone_in_defense(d1 in 0.0f64..2000.0, d2 in 0.0f64..2000.0) {
        let tables = GameTables::new(GameData::default());
        let (lo, hi) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
        let weak = calculate_attack(&tables, &caster_request(lo, 0.0), false, &mut Trace::disabled());
        let strong = calculate_attack(&tables, &caster_request(hi, 0.0), false, &mut Trace::disabled());
        prop_assert!(strong.dps <= weak.dps + 1e-9);
        // Chip floor
        let floor = strong.dur.hit_count * 700.0 * 0.05 / strong.time;
        prop_assert!(strong.dps >= floor - 1e-9);
    }

    #[test]
    fn test_dps_monotone_in_resistance(r1 in 0.0f64..100.0, r2 in 0.0f64..100.0) {
        let tables = GameTables::new(GameData::default());
        let (lo, hi) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };
        let mut weak_req = caster_request(0.0, lo);
        weak_req.unit.profession = Profession::Caster;
        let mut strong_req = caster_request(0.0, hi);
        strong_req.unit.profession = Profession::Caster;
        let weak = calculate_attack(&tables, &weak_req, false, &mut Trace::disabled());
        let strong = calculate_attack(&tables, &strong_req, false, &mut Trace::disabled());
        prop_assert!(strong.dps <= weak.dps + 1e-9);
    }
}
