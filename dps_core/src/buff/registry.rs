use super::hooks::BuffHooks;
use super::implementations::{conditional, modules, skills, stacking, talents};
use once_cell::sync::Lazy;
use std::collections::HashMap;

static BUFF_REGISTRY: Lazy<HashMap<&'static str, BuffHooks>> = Lazy::new(|| {
    let mut registry = HashMap::new();

    // =========================================================================
    // Conditional talents
    // =========================================================================
    registry.insert("tachr_290_vigna_1", BuffHooks {
        on_cond_true: Some(conditional::vigna_first_strike as _),
        on_cond_false: Some(conditional::unmet_skip as _),
        ..BuffHooks::NONE
    });
    registry.insert("tachr_113_cqbw_2", BuffHooks {
        on_cond_true: Some(conditional::cqbw_stun_bonus as _),
        on_cond_false: Some(conditional::unmet_skip as _),
        ..BuffHooks::NONE
    });
    registry.insert("tachr_188_helage_1", BuffHooks {
        on_cond_true: Some(conditional::helage_low_hp as _),
        on_cond_false: Some(conditional::helage_high_hp as _),
        ..BuffHooks::NONE
    });
    registry.insert("tachr_149_scave_1", BuffHooks {
        on_cond_true: Some(conditional::scave_blocking as _),
        on_cond_false: Some(conditional::unmet_skip as _),
        ..BuffHooks::NONE
    });
    registry.insert("tachr_145_prove_1", BuffHooks {
        on_cond_true: Some(conditional::prove_execute as _),
        on_cond_false: Some(conditional::prove_execute_average as _),
        ..BuffHooks::NONE
    });
    registry.insert("tachr_202_demkni_1", BuffHooks {
        on_cond_true: Some(conditional::demkni_wounded_heal as _),
        ..BuffHooks::NONE
    });
    registry.insert("tachr_017_huang_1", BuffHooks {
        on_cond_true: Some(conditional::huang_blocked_enemies as _),
        on_cond_false: Some(conditional::unmet_skip as _),
        ..BuffHooks::NONE
    });

    // =========================================================================
    // Stacking talents
    // =========================================================================
    registry.insert("tachr_356_broca_1", BuffHooks {
        on_stack: Some(stacking::broca_linear_scale as _),
        ..BuffHooks::NONE
    });
    registry.insert("tachr_4043_erato_1", BuffHooks {
        on_stack: Some(stacking::shred_per_stack as _),
        ..BuffHooks::NONE
    });
    registry.insert("tachr_1013_chen2_1", BuffHooks {
        on_stack: Some(stacking::skill_built_stacks as _),
        ..BuffHooks::NONE
    });
    registry.insert("tachr_4009_irene_2", BuffHooks {
        on_stack: Some(stacking::skill_only_stacks as _),
        ..BuffHooks::NONE
    });

    // =========================================================================
    // Talents
    // =========================================================================
    registry.insert("tachr_185_frncat_1", BuffHooks {
        on_apply: Some(talents::frncat_double_strike as _),
        ..BuffHooks::NONE
    });
    registry.insert("tachr_293_thorns_1", BuffHooks {
        on_apply: Some(talents::damage_only as _),
        ..BuffHooks::NONE
    });
    registry.insert("tachr_188_helage_2", BuffHooks {
        on_apply: Some(talents::damage_only as _),
        ..BuffHooks::NONE
    });
    registry.insert("tachr_128_plosis_1", BuffHooks {
        on_apply: Some(talents::plosis_sp_aura as _),
        ..BuffHooks::NONE
    });
    registry.insert("tachr_010_chen_1", BuffHooks {
        on_apply: Some(talents::team_aura_only as _),
        ..BuffHooks::NONE
    });
    registry.insert("tachr_107_liskam_2", BuffHooks {
        on_apply: Some(talents::team_aura_only as _),
        ..BuffHooks::NONE
    });
    registry.insert("tachr_190_clour_2", BuffHooks {
        on_apply: Some(talents::team_aura_only as _),
        ..BuffHooks::NONE
    });
    registry.insert("tachr_164_nightm_1", BuffHooks {
        on_apply: Some(talents::skill_state_only as _),
        ..BuffHooks::NONE
    });
    registry.insert("tachr_2014_nian_2", BuffHooks {
        on_apply: Some(talents::atk_scale_as_damage as _),
        ..BuffHooks::NONE
    });
    registry.insert("tachr_222_bpipe_1", BuffHooks {
        on_apply: Some(talents::expected_proc as _),
        ..BuffHooks::NONE
    });
    registry.insert("tachr_311_mudrok_2", BuffHooks {
        on_apply: Some(talents::per_enemy_in_range as _),
        ..BuffHooks::NONE
    });
    registry.insert("tachr_263_skadi_2", BuffHooks {
        on_apply: Some(talents::anti_air_only as _),
        ..BuffHooks::NONE
    });

    // =========================================================================
    // Skills
    // =========================================================================
    registry.insert("skchr_angel_3", BuffHooks {
        on_apply: Some(skills::angel_interval as _),
        ..BuffHooks::NONE
    });
    registry.insert("skchr_shwaz_3", BuffHooks {
        on_apply: Some(skills::shwaz_crit_override as _),
        ..BuffHooks::NONE
    });
    registry.insert("skchr_thorns_3", BuffHooks {
        on_apply: Some(skills::thorns_warmup as _),
        ..BuffHooks::NONE
    });
    registry.insert("skchr_cqbw_3", BuffHooks {
        on_apply: Some(skills::burst_replaces_attack as _),
        ..BuffHooks::NONE
    });
    registry.insert("skchr_ghost2_3", BuffHooks {
        on_apply: Some(skills::burst_replaces_attack as _),
        ..BuffHooks::NONE
    });
    registry.insert("skchr_horn_3", BuffHooks {
        on_apply: Some(skills::horn_overdrive as _),
        ..BuffHooks::NONE
    });
    registry.insert("skchr_bena_1", BuffHooks {
        on_apply: Some(skills::no_combat_effect as _),
        ..BuffHooks::NONE
    });
    registry.insert("skchr_fartth_3", BuffHooks {
        on_apply: Some(skills::fartth_mid_range as _),
        ..BuffHooks::NONE
    });
    registry.insert("skchr_amgoat_2", BuffHooks {
        on_apply: Some(skills::amgoat_primary_only as _),
        ..BuffHooks::NONE
    });
    registry.insert("skchr_surtr_3", BuffHooks {
        on_apply: Some(skills::surtr_res_penetration as _),
        ..BuffHooks::NONE
    });
    registry.insert("skchr_svrash_3", BuffHooks {
        on_apply: Some(skills::svrash_ignore_def_penalty as _),
        ..BuffHooks::NONE
    });
    registry.insert("skchr_ifrit_3", BuffHooks {
        on_apply: Some(skills::ifrit_res_shred as _),
        ..BuffHooks::NONE
    });
    registry.insert("skchr_ctable_2", BuffHooks {
        on_apply: Some(skills::ramping_attack_speed as _),
        ..BuffHooks::NONE
    });

    // =========================================================================
    // Modules
    // =========================================================================
    registry.insert("uniequip_002_shwaz", BuffHooks {
        on_module: Some(modules::shwaz_module as _),
        ..BuffHooks::NONE
    });
    registry.insert("uniequip_002_cerber", BuffHooks {
        on_module: Some(modules::cerber_module as _),
        ..BuffHooks::NONE
    });
    registry.insert("uniequip_002_svrash", BuffHooks {
        on_module: Some(modules::svrash_module as _),
        ..BuffHooks::NONE
    });
    registry.insert("uniequip_002_angel", BuffHooks {
        on_module: Some(modules::angel_module as _),
        ..BuffHooks::NONE
    });
    registry.insert("uniequip_002_amgoat", BuffHooks {
        on_module: Some(modules::amgoat_module as _),
        ..BuffHooks::NONE
    });
    registry.insert("uniequip_002_chen", BuffHooks {
        on_module: Some(modules::chen_module as _),
        ..BuffHooks::NONE
    });
    registry.insert("uniequip_002_vigna", BuffHooks {
        on_module: Some(modules::conditional_talent_module as _),
        ..BuffHooks::NONE
    });
    registry.insert("uniequip_002_helage", BuffHooks {
        on_module: Some(modules::conditional_talent_module as _),
        ..BuffHooks::NONE
    });

    registry
});

/// Handlers registered for a resolved buff tag
pub fn hooks_for(tag: &str) -> Option<&'static BuffHooks> {
    BUFF_REGISTRY.get(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_slots() {
        let helage = hooks_for("tachr_188_helage_1").unwrap();
        assert!(helage.on_cond_true.is_some());
        assert!(helage.on_cond_false.is_some());
        assert!(helage.on_apply.is_none());

        assert!(hooks_for("uniequip_002_cerber").unwrap().on_module.is_some());
        assert!(hooks_for("tachr_4043_erato_1").unwrap().on_stack.is_some());
        assert!(hooks_for("tachr_202_demkni_1").unwrap().on_cond_false.is_none());
        assert!(hooks_for("tachr_unknown_1").is_none());
    }
}
