//! Complete behavior trees for agent archetypes.
//!
//! Presets compose [`patterns`](super::patterns) under a root selector with a
//! fallback that always succeeds, so a preset never leaves the agent without
//! an intent. Attacks reach exactly as far as the agent's own
//! [`CombatStats::attack_range`](game_core::CombatStats), so one tree serves
//! personalities with different reach.
//!
//! ```text
//! skirmisher()
//!   └─ Selector
//!       ├─ patterns::flee_when_low_health(0.35)
//!       ├─ patterns::flee_when_outnumbered(2)
//!       ├─ patterns::engage()
//!       ├─ patterns::follow_path_when_clear()
//!       ├─ patterns::patrol_when_quiet()
//!       └─ patterns::hold_fallback()
//! ```

use behavior_tree::builder::selector;
use game_core::{BehaviorTree, Personality};

use super::patterns;

/// Preset names understood by [`by_name`].
pub const NAMES: [&str; 5] = ["brute", "skirmisher", "coward", "sentry", "swarmling"];

// ============================================================================
// Melee
// ============================================================================

/// Charges the target and never retreats.
///
/// 1. Attack if in range, otherwise chase
/// 2. Follow a path if one is set
/// 3. Hold
pub fn brute() -> BehaviorTree {
    selector(vec![
        patterns::engage(),
        patterns::follow_path_when_clear(),
        patterns::hold_fallback(),
    ])
}

/// Ranged harasser that disengages when hurt or outnumbered.
pub fn skirmisher() -> BehaviorTree {
    selector(vec![
        patterns::flee_when_low_health(0.35),
        patterns::flee_when_outnumbered(2),
        patterns::engage(),
        patterns::follow_path_when_clear(),
        patterns::patrol_when_quiet(),
        patterns::hold_fallback(),
    ])
}

// ============================================================================
// Passive
// ============================================================================

/// Runs from anything that hurts it and only fights back when cornered.
pub fn coward() -> BehaviorTree {
    selector(vec![
        patterns::flee_when_low_health(0.8),
        patterns::flee_when_outnumbered(0),
        patterns::retaliate_when_attacked(),
        patterns::patrol_when_quiet(),
        patterns::hold_fallback(),
    ])
}

/// Holds a post, engages intruders, and walks back when things calm down.
pub fn sentry() -> BehaviorTree {
    selector(vec![
        patterns::flee_when_low_health(0.15),
        patterns::engage(),
        patterns::return_when_quiet(),
        patterns::hold_fallback(),
    ])
}

/// Pack fighter: commits only with friends around.
pub fn swarmling() -> BehaviorTree {
    selector(vec![
        patterns::flee_when_outnumbered(1),
        patterns::attack_when_supported(2),
        patterns::chase_when_visible(),
        patterns::follow_path_when_clear(),
        patterns::hold_fallback(),
    ])
}

// ============================================================================
// Lookup
// ============================================================================

/// Default preset for a personality.
pub fn for_personality(personality: Personality) -> BehaviorTree {
    match personality {
        Personality::Aggressive | Personality::Berserker => brute(),
        Personality::Tactical | Personality::Hunter => skirmisher(),
        Personality::Coward | Personality::Defensive => coward(),
        Personality::Guardian => sentry(),
        Personality::Swarm | Personality::Support => swarmling(),
    }
}

/// Looks up a preset by name. Case-insensitive.
pub fn by_name(name: &str) -> Option<BehaviorTree> {
    match name.to_ascii_lowercase().as_str() {
        "brute" => Some(brute()),
        "skirmisher" => Some(skirmisher()),
        "coward" => Some(coward()),
        "sentry" => Some(sentry()),
        "swarmling" => Some(swarmling()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use game_core::{AgentRecord, DecisionContext, EntityRef, Intent, Timestamp, Vec2};

    use super::*;

    fn agent(personality: Personality) -> AgentRecord {
        let mut agent = AgentRecord::new(EntityRef(1), personality, Timestamp::ZERO);
        agent.set_target(EntityRef(2), Some(Vec2::new(30.0, 0.0)));
        agent
    }

    #[test]
    fn every_preset_produces_an_intent() {
        let ctx = DecisionContext::new();
        for name in NAMES {
            let tree = by_name(name).unwrap();
            let mut agent = agent(Personality::Aggressive);
            assert!(behavior_tree::execute(&tree, &mut agent, &ctx), "{name}");
            assert!(agent.intent().is_some(), "{name}");
        }
        assert!(by_name("Sentry").is_some());
        assert!(by_name("dragon").is_none());
    }

    #[test]
    fn every_personality_has_a_preset() {
        for personality in Personality::ALL {
            assert!(for_personality(personality).node_count() > 1);
        }
    }

    #[test]
    fn brute_attacks_while_coward_flees() {
        let ctx = DecisionContext::new()
            .with_distance(30.0)
            .with_enemies(1)
            .with_health(0.5);

        let mut brute_agent = agent(Personality::Berserker);
        behavior_tree::execute(&brute(), &mut brute_agent, &ctx);
        assert_eq!(brute_agent.intent(), Some(&Intent::Attack(EntityRef(2))));

        let mut coward_agent = agent(Personality::Coward);
        behavior_tree::execute(&coward(), &mut coward_agent, &ctx);
        assert_eq!(
            coward_agent.intent(),
            Some(&Intent::FleeFrom(Vec2::new(30.0, 0.0)))
        );
    }

    #[test]
    fn swarmling_waits_for_its_pack() {
        let tree = swarmling();
        let alone = DecisionContext::new().with_distance(30.0).with_enemies(1);

        let mut lone = agent(Personality::Swarm);
        behavior_tree::execute(&tree, &mut lone, &alone);
        assert_eq!(lone.intent(), Some(&Intent::MoveTo(Vec2::new(30.0, 0.0))));

        let mut packed = agent(Personality::Swarm);
        behavior_tree::execute(&tree, &mut packed, &alone.with_allies(3));
        assert_eq!(packed.intent(), Some(&Intent::Attack(EntityRef(2))));
    }

    #[test]
    fn presets_never_attack_beyond_reach() {
        for personality in Personality::ALL {
            let reach = personality.default_stats().attack_range;
            for name in NAMES {
                let tree = by_name(name).unwrap();
                let mut agent = agent(personality);
                let ctx = DecisionContext::new()
                    .with_distance(reach + 1.0)
                    .with_enemies(1)
                    .with_allies(3)
                    .with_under_attack(true);
                behavior_tree::execute(&tree, &mut agent, &ctx);
                assert!(
                    !matches!(agent.intent(), Some(Intent::Attack(_))),
                    "{name} attacked at {} as {personality}",
                    reach + 1.0
                );
            }
        }
    }

    #[test]
    fn hunter_skirmisher_chases_outside_reach() {
        let mut hunter = agent(Personality::Hunter);
        let ctx = DecisionContext::new().with_distance(100.0).with_enemies(1);
        behavior_tree::execute(&skirmisher(), &mut hunter, &ctx);
        assert_eq!(hunter.intent(), Some(&Intent::MoveTo(Vec2::new(30.0, 0.0))));
    }
}
