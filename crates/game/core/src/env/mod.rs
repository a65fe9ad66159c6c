//! Read-only view of the world outside the agent.
//!
//! Agents refer to other entities only through [`EntityRef`](crate::EntityRef).
//! Resolving one goes through an [`EntityLookup`] oracle supplied by the
//! embedding system; a miss means "gone or not visible" and is never an error.
mod lookup;

pub use lookup::{EntityLookup, StaticLookup};
