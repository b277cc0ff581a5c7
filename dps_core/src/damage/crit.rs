//! Critical-hit counting
//!
//! Crit hits are carved out of the normal hit count, so after
//! [`apply_crit`] `hit_count + crit_hit_count` equals the pre-crit hit count.

use crate::config::SpecialTags;
use crate::duration::Duration;

/// How a unit's crits are counted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CritRule {
    /// `floor(attack_count * prob)` attacks crit
    Default,
    /// Every hit rolls independently; expected counts, no flooring
    PerHit,
    /// Every n-th attack crits
    EveryNth(f64),
    /// One crit every n seconds
    Timed(f64),
    /// Fixed number of crits per engagement
    Fixed(f64),
    /// Each dodged hit (chance `prob`) empowers the next attack; the
    /// parameter is incoming hits per second
    Evasion(f64),
}

impl CritRule {
    /// Read `crit_rule`/`crit_param` for a unit; unknown rules use the default
    pub fn for_unit(char_id: &str, special: &SpecialTags) -> CritRule {
        let param = special.number(char_id, "crit_param").unwrap_or(0.0);
        match special.text(char_id, "crit_rule") {
            Some("per_hit") => CritRule::PerHit,
            Some("every_nth") if param > 0.0 => CritRule::EveryNth(param),
            Some("timed") if param > 0.0 => CritRule::Timed(param),
            Some("fixed") => CritRule::Fixed(param),
            Some("evasion") if param > 0.0 => CritRule::Evasion(param),
            _ => CritRule::Default,
        }
    }
}

/// Fill `crit_count`/`crit_hit_count` and subtract the converted hits
pub fn apply_crit(dur: &mut Duration, rule: CritRule, prob: f64, hits_per_attack: f64) {
    let prob = prob.clamp(0.0, 1.0);
    let (crit_count, crit_hit_count) = match rule {
        CritRule::Default => {
            let n = (dur.attack_count * prob).floor();
            (n, n * hits_per_attack)
        }
        CritRule::PerHit => (dur.attack_count * prob, dur.hit_count * prob),
        CritRule::EveryNth(n) => {
            let c = (dur.attack_count / n).floor();
            (c, c * hits_per_attack)
        }
        CritRule::Timed(secs) => {
            let c = (dur.duration / secs).floor().min(dur.attack_count);
            (c, c * hits_per_attack)
        }
        CritRule::Fixed(n) => {
            let c = n.min(dur.attack_count).max(0.0);
            (c, c * hits_per_attack)
        }
        CritRule::Evasion(incoming) => {
            let dodges = (dur.duration * incoming * prob).floor();
            let c = dodges.min(dur.attack_count);
            (c, c * hits_per_attack)
        }
    };

    let crit_hit_count = crit_hit_count.min(dur.hit_count).max(0.0);
    dur.crit_count = crit_count;
    dur.crit_hit_count = crit_hit_count;
    dur.hit_count -= crit_hit_count;
}
