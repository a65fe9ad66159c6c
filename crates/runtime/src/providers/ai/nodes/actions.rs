//! Action nodes.
//!
//! Actions translate the agent's own data (target, waypoints, posts) into an
//! [`Intent`]. They fail when that data is missing, so a selector can fall
//! through to the next option.

use behavior_tree::builder::action;
use game_core::{AgentRecord, BehaviorTree, DecisionContext, Intent};

/// Attacks the current target when it lies within the agent's own
/// `attack_range`. Fails otherwise.
pub fn attack_target() -> BehaviorTree {
    action(|agent: &mut AgentRecord, ctx: &DecisionContext| {
        let Some(target) = agent.target_id() else {
            return false;
        };
        if !ctx.target_within(agent.stats().attack_range) {
            return false;
        }
        agent.set_intent(Intent::Attack(target));
        true
    })
}

/// Moves toward the last known target position.
pub fn approach_target() -> BehaviorTree {
    action(|agent: &mut AgentRecord, _ctx: &DecisionContext| {
        let Some(position) = agent.target_position() else {
            return false;
        };
        agent.set_intent(Intent::MoveTo(position));
        true
    })
}

/// Moves away from the last known target position, or from the strongest
/// remembered threat when there is no target.
pub fn flee_from_threat() -> BehaviorTree {
    action(|agent: &mut AgentRecord, _ctx: &DecisionContext| {
        let threat_position = agent
            .highest_threat()
            .and_then(|threat| agent.memory().last_seen(threat));
        let Some(position) = agent.target_position().or(threat_position) else {
            return false;
        };
        agent.set_intent(Intent::FleeFrom(position));
        true
    })
}

/// Heads for the current patrol waypoint.
pub fn patrol_waypoint() -> BehaviorTree {
    action(|agent: &mut AgentRecord, _ctx: &DecisionContext| {
        let Some(waypoint) = agent.current_waypoint() else {
            return false;
        };
        agent.set_intent(Intent::Patrol(waypoint));
        true
    })
}

/// Follows the pathfinder route.
pub fn follow_path() -> BehaviorTree {
    action(|agent: &mut AgentRecord, _ctx: &DecisionContext| {
        let Some(node) = agent.next_path_node() else {
            return false;
        };
        agent.set_intent(Intent::MoveTo(node));
        true
    })
}

/// Returns to the guard post, or home when there is none.
pub fn return_to_post() -> BehaviorTree {
    action(|agent: &mut AgentRecord, _ctx: &DecisionContext| {
        let Some(post) = agent.guard_position().or(agent.home_position()) else {
            return false;
        };
        agent.set_intent(Intent::MoveTo(post));
        true
    })
}

/// Stays put. Always succeeds.
pub fn hold() -> BehaviorTree {
    action(|agent: &mut AgentRecord, _ctx: &DecisionContext| {
        agent.set_intent(Intent::Hold);
        true
    })
}
