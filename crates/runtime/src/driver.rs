//! Per-tick decision pipeline.
//!
//! The embedding system gathers perception into a [`DecisionContext`] and
//! hands it to [`AgentDriver::tick`], which runs, in order:
//!
//! 1. the clock check; a rejected tick leaves the agent untouched
//! 2. stuck sampling and path availability, folded into the context
//! 3. the state machine ([`AgentRecord::evaluate_state`])
//! 4. the attached behavior tree, unless the agent is stunned or dead
//! 5. steering with the pattern chosen for the resulting state
//!
//! The driver holds no per-agent state, so one instance serves every agent.

use game_core::{
    AgentRecord, AgentState, DecisionContext, EngineConfig, Intent, MovementPattern, Timestamp,
    Vec2,
};
use serde::Serialize;

/// Outcome of one tick for one agent.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Decision {
    /// True when the state machine changed state this tick.
    pub transitioned: bool,
    /// Behavior tree verdict, `None` when no tree ran.
    pub behavior: Option<bool>,
    pub state: AgentState,
    pub pattern: MovementPattern,
    pub direction: Vec2,
    /// Intent written by the behavior tree this tick.
    pub intent: Option<Intent>,
}

/// Stateless per-tick driver.
#[derive(Clone, Debug, Default)]
pub struct AgentDriver {
    config: EngineConfig,
}

impl AgentDriver {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs the full pipeline for an agent at `from` whose steering target is
    /// `to`.
    pub fn tick(
        &self,
        agent: &mut AgentRecord,
        ctx: &mut DecisionContext,
        now: Timestamp,
        from: Vec2,
        to: Vec2,
    ) -> game_core::Result<Decision> {
        agent.check_clock(now)?;
        agent.update_stuck(from, self.config.stuck_distance);
        ctx.is_stuck |= agent.is_stuck(self.config.stuck_limit);
        ctx.has_path |= agent.has_path();

        let transitioned = agent.evaluate_state(ctx, now)?;
        let state = agent.current_state();

        if state.is_incapacitated() {
            agent.take_intent();
            return Ok(Decision {
                transitioned,
                behavior: None,
                state,
                pattern: MovementPattern::Direct,
                direction: Vec2::ZERO,
                intent: None,
            });
        }

        let behavior = agent
            .behavior_tree()
            .is_some()
            .then(|| agent.execute_behavior(ctx));
        let intent = agent.take_intent();

        let pattern = agent.movement_pattern();
        let direction = agent.resolve_direction(pattern, from, to, now);

        if transitioned {
            tracing::debug!(
                "agent {} now {} steering {} ({:?})",
                agent.id(),
                state,
                pattern,
                intent
            );
        }

        Ok(Decision {
            transitioned,
            behavior,
            state,
            pattern,
            direction,
            intent,
        })
    }

    /// Like [`tick`](Self::tick), but only when the agent's throttle says it
    /// is due. Marks the agent updated when it runs.
    pub fn tick_if_due(
        &self,
        agent: &mut AgentRecord,
        ctx: &mut DecisionContext,
        now: Timestamp,
        from: Vec2,
        to: Vec2,
    ) -> game_core::Result<Option<Decision>> {
        if !agent.should_update(now) {
            return Ok(None);
        }
        let decision = self.tick(agent, ctx, now, from, to)?;
        agent.mark_updated(now);
        Ok(Some(decision))
    }
}
