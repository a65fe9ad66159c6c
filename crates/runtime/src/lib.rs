//! Runtime glue for driving agent decisions.
//!
//! `game-core` owns the decision rules; this crate packages them for an
//! embedding simulation:
//! - [`driver`] runs the per-tick pipeline (state machine, behavior tree,
//!   steering) and reports a [`Decision`]
//! - [`providers::ai`] supplies reusable behavior-tree nodes and archetype
//!   presets
//! - [`repository`] persists agent snapshots
//! - [`spawn`] turns content templates into agents with preset trees

pub mod driver;
pub mod providers;
pub mod repository;
pub mod spawn;

pub use driver::{AgentDriver, Decision};
pub use providers::ai::presets;
pub use repository::{
    FileSnapshotRepository, InMemorySnapshotRepository, RepositoryError, Result,
    SnapshotRepository,
};
pub use spawn::{spawn_agent, spawn_with_rules};
