//! Prioritized, conditioned state machine over [`AgentState`](crate::AgentState).
//!
//! The transition table is plain data: every rule names its source and
//! target phase, a [`Condition`] evaluated against the agent and the current
//! [`DecisionContext`](crate::DecisionContext), a priority, and an optional
//! re-entry cooldown. Evaluation lives on [`AgentRecord`](crate::AgentRecord)
//! (see `machine.rs`) because firing a rule mutates the record.
mod condition;
mod machine;
mod transition;

pub use condition::{Condition, CustomCondition};
pub use transition::{Transition, TransitionCallback, TransitionSpec, TransitionTable};
