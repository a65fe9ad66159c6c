//! Basic if-then patterns.
//!
//! Each pattern pairs one condition with one action, or wraps a single action
//! as a fallback. Patterns follow the `action_when_condition()` naming so the
//! if-then reads off the name.

use behavior_tree::builder::{inverter, selector, sequence};
use game_core::BehaviorTree;

use super::nodes::{
    allies_at_least, approach_target, attack_target, enemy_nearby, flee_from_threat, follow_path,
    has_path, health_below, hold, is_stuck, outnumbered, patrol_waypoint, return_to_post,
    target_visible, target_within, under_attack,
};

// ============================================================================
// Combat
// ============================================================================

/// Attack when the target is within the agent's own attack range.
pub fn attack_when_in_reach() -> BehaviorTree {
    attack_target()
}

/// Attack when the target is within `range`. The agent's attack range still
/// caps the reach, so `range` can only narrow it.
pub fn attack_when_in_range(range: f32) -> BehaviorTree {
    sequence(vec![target_within(range), attack_target()])
}

/// Close distance on a visible target.
pub fn chase_when_visible() -> BehaviorTree {
    sequence(vec![target_visible(), approach_target()])
}

/// Attack only with at least `allies` friends nearby.
pub fn attack_when_supported(allies: u32) -> BehaviorTree {
    sequence(vec![allies_at_least(allies), attack_when_in_reach()])
}

/// Strike back at whoever is hitting us when the target is close.
pub fn retaliate_when_attacked() -> BehaviorTree {
    sequence(vec![under_attack(), attack_when_in_reach()])
}

// ============================================================================
// Survival
// ============================================================================

/// Flee when the health ratio drops below `ratio`.
pub fn flee_when_low_health(ratio: f32) -> BehaviorTree {
    sequence(vec![health_below(ratio), flee_from_threat()])
}

/// Flee when enemies exceed allies by more than `margin`.
pub fn flee_when_outnumbered(margin: u32) -> BehaviorTree {
    sequence(vec![outnumbered(margin), flee_from_threat()])
}

// ============================================================================
// Movement
// ============================================================================

/// Follow the pathfinder route while one exists and we are not stuck.
pub fn follow_path_when_clear() -> BehaviorTree {
    sequence(vec![has_path(), inverter(is_stuck()), follow_path()])
}

/// Walk the patrol route when no enemy is around.
pub fn patrol_when_quiet() -> BehaviorTree {
    sequence(vec![inverter(enemy_nearby()), patrol_waypoint()])
}

/// Head back to the post when no enemy is around.
pub fn return_when_quiet() -> BehaviorTree {
    sequence(vec![inverter(enemy_nearby()), return_to_post()])
}

// ============================================================================
// Fallback
// ============================================================================

/// Hold position. Always succeeds, so it belongs last in a selector.
pub fn hold_fallback() -> BehaviorTree {
    hold()
}

/// Engage a target: attack in reach, otherwise chase.
pub fn engage() -> BehaviorTree {
    selector(vec![attack_when_in_reach(), chase_when_visible()])
}

#[cfg(test)]
mod tests {
    use game_core::{AgentRecord, DecisionContext, EntityRef, Intent, Personality, Timestamp, Vec2};

    use super::*;

    fn targeted_agent() -> AgentRecord {
        let mut agent = AgentRecord::new(EntityRef(1), Personality::Aggressive, Timestamp::ZERO);
        agent.set_target(EntityRef(2), Some(Vec2::new(40.0, 0.0)));
        agent
    }

    #[test]
    fn engage_attacks_in_range_and_chases_otherwise() {
        let tree = engage();

        let mut agent = targeted_agent();
        let close = DecisionContext::new().with_distance(40.0);
        assert!(behavior_tree::execute(&tree, &mut agent, &close));
        assert_eq!(agent.take_intent(), Some(Intent::Attack(EntityRef(2))));

        // Aggressive agents reach 60 units.
        let far = DecisionContext::new().with_distance(80.0);
        assert!(behavior_tree::execute(&tree, &mut agent, &far));
        assert_eq!(agent.take_intent(), Some(Intent::MoveTo(Vec2::new(40.0, 0.0))));
    }

    #[test]
    fn supported_attack_needs_allies() {
        let tree = attack_when_supported(2);
        let mut agent = targeted_agent();

        let alone = DecisionContext::new().with_distance(10.0).with_allies(1);
        assert!(!behavior_tree::execute(&tree, &mut agent, &alone));
        assert!(agent.intent().is_none());

        let pack = alone.with_allies(3);
        assert!(behavior_tree::execute(&tree, &mut agent, &pack));
    }

    #[test]
    fn patrol_stops_when_enemies_appear() {
        let tree = patrol_when_quiet();
        let mut agent = targeted_agent();
        agent.set_patrol_path(vec![Vec2::new(5.0, 5.0), Vec2::ZERO]);

        assert!(behavior_tree::execute(&tree, &mut agent, &DecisionContext::new()));
        assert_eq!(agent.take_intent(), Some(Intent::Patrol(Vec2::new(5.0, 5.0))));

        let busy = DecisionContext::new().with_enemies(1);
        assert!(!behavior_tree::execute(&tree, &mut agent, &busy));
    }

    #[test]
    fn stuck_agents_stop_following_paths() {
        let tree = follow_path_when_clear();
        let mut agent = targeted_agent();
        agent.set_path(vec![Vec2::ONE]);

        let clear = DecisionContext::new().with_path(true);
        assert!(behavior_tree::execute(&tree, &mut agent, &clear));
        assert_eq!(agent.take_intent(), Some(Intent::MoveTo(Vec2::ONE)));

        let stuck = clear.with_stuck(true);
        assert!(!behavior_tree::execute(&tree, &mut agent, &stuck));
    }

    #[test]
    fn explicit_range_only_narrows_reach() {
        let mut agent = targeted_agent();
        let ctx = DecisionContext::new().with_distance(50.0);

        assert!(!behavior_tree::execute(&attack_when_in_range(45.0), &mut agent, &ctx));
        let far = ctx.clone().with_distance(90.0);
        assert!(!behavior_tree::execute(&attack_when_in_range(500.0), &mut agent, &far));
        assert!(behavior_tree::execute(&attack_when_in_range(500.0), &mut agent, &ctx));
    }
}
