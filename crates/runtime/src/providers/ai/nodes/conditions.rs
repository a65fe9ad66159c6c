//! Condition nodes.
//!
//! Every node here reads the decision context only and never mutates the
//! agent.

use behavior_tree::builder::condition;
use game_core::{BehaviorTree, DecisionContext};

/// Succeeds when at least one enemy is nearby.
pub fn enemy_nearby() -> BehaviorTree {
    condition(|ctx: &DecisionContext| ctx.nearby_enemies > 0)
}

/// Succeeds when the target exists and lies within `range`.
pub fn target_within(range: f32) -> BehaviorTree {
    condition(move |ctx: &DecisionContext| ctx.target_within(range))
}

pub fn target_visible() -> BehaviorTree {
    condition(|ctx: &DecisionContext| ctx.target_visible)
}

/// Succeeds when the health ratio is strictly below `ratio`.
pub fn health_below(ratio: f32) -> BehaviorTree {
    condition(move |ctx: &DecisionContext| ctx.health_ratio < ratio)
}

/// Succeeds when enemies exceed allies by more than `margin`.
pub fn outnumbered(margin: u32) -> BehaviorTree {
    condition(move |ctx: &DecisionContext| {
        ctx.nearby_enemies > ctx.nearby_allies.saturating_add(margin)
    })
}

pub fn allies_at_least(count: u32) -> BehaviorTree {
    condition(move |ctx: &DecisionContext| ctx.nearby_allies >= count)
}

pub fn under_attack() -> BehaviorTree {
    condition(|ctx: &DecisionContext| ctx.under_attack)
}

pub fn has_path() -> BehaviorTree {
    condition(|ctx: &DecisionContext| ctx.has_path)
}

pub fn is_stuck() -> BehaviorTree {
    condition(|ctx: &DecisionContext| ctx.is_stuck)
}

#[cfg(test)]
mod tests {
    use game_core::{AgentRecord, EntityRef, Personality, Timestamp};

    use super::*;

    fn check(node: &BehaviorTree, ctx: &DecisionContext) -> bool {
        let mut agent = AgentRecord::new(EntityRef(1), Personality::Swarm, Timestamp::ZERO);
        behavior_tree::execute(node, &mut agent, ctx)
    }

    #[test]
    fn conditions_read_context() {
        let ctx = DecisionContext::new()
            .with_enemies(4)
            .with_allies(1)
            .with_distance(25.0)
            .with_health(0.3);
        assert!(check(&enemy_nearby(), &ctx));
        assert!(check(&target_within(30.0), &ctx));
        assert!(!check(&target_within(20.0), &ctx));
        assert!(check(&health_below(0.5), &ctx));
        assert!(check(&outnumbered(2), &ctx));
        assert!(!check(&allies_at_least(2), &ctx));
        assert!(!check(&is_stuck(), &ctx));
    }
}
