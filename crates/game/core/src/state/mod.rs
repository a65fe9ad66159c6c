//! Identifiers, engine time and behavioral phases.
//!
//! These are the small value types every other module speaks in: weak entity
//! references, validated timestamps, and the enumerated [`AgentState`].
mod common;
mod phase;

pub use common::{EntityRef, Timestamp};
pub use phase::AgentState;
