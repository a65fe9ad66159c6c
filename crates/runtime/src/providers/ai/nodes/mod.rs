//! Leaf nodes for agent behavior trees.
//!
//! - `conditions`: predicates over the decision context
//! - `actions`: functions that write an intent into the agent

pub mod actions;
pub mod conditions;

pub use actions::*;
pub use conditions::*;
