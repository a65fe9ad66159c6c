//! Deterministic decision engine for real-time game agents.
//!
//! `game-core` turns a per-tick perception snapshot into intent. Each agent
//! owns an [`AgentRecord`] holding its behavioral phase, personality, memory
//! of hostile entities and path cursors. A tick runs in three steps, all
//! synchronous and allocation-light:
//!
//! 1. [`AgentRecord::evaluate_state`] walks the prioritized
//!    [`TransitionTable`] and commits at most one phase change.
//! 2. [`AgentRecord::execute_behavior`] runs the attached, shared
//!    [`BehaviorTree`], whose actions write an [`Intent`].
//! 3. [`AgentRecord::resolve_direction`] turns a target into a heading with
//!    one of the [`MovementPattern`]s.
//!
//! Entities outside the agent are only ever named by [`EntityRef`] and
//! resolved through an [`EntityLookup`]. Contract violations surface as
//! [`MalformedState`]; everything else is a documented no-op.
pub mod agent;
pub mod config;
pub mod context;
pub mod env;
pub mod error;
pub mod fsm;
pub mod geometry;
pub mod memory;
pub mod movement;
#[cfg(feature = "serde")]
pub mod snapshot;
pub mod state;
pub mod traits;

pub use agent::{AgentBuilder, AgentRecord, Intent, PathEndPolicy};
pub use config::EngineConfig;
pub use context::DecisionContext;
pub use env::{EntityLookup, StaticLookup};
pub use error::{MalformedState, Result};
pub use fsm::{
    Condition, CustomCondition, Transition, TransitionCallback, TransitionSpec, TransitionTable,
};
pub use geometry::Vec2;
pub use memory::{ThreatEntry, ThreatMemory};
pub use movement::{MovementPattern, resolve_direction};
#[cfg(feature = "serde")]
pub use snapshot::AgentSnapshot;
pub use state::{AgentState, EntityRef, Timestamp};
pub use traits::{CombatStats, Personality, Traits};

/// Behavior tree evaluated against an agent and its decision context.
pub type BehaviorTree = behavior_tree::Node<AgentRecord, DecisionContext>;
