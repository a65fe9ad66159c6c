//! Persistence for agent snapshots.
//!
//! Repositories store [`AgentSnapshot`](game_core::AgentSnapshot)s keyed by
//! agent id. They never store transition tables or behavior trees; callers
//! re-attach those after loading.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSnapshotRepository;
pub use memory::InMemorySnapshotRepository;
pub use traits::SnapshotRepository;
