//! Repository contract for agent snapshots.

use game_core::{AgentRecord, AgentSnapshot, EngineConfig, EntityRef};

use super::Result;

/// Save and load agent snapshots by id.
pub trait SnapshotRepository: Send + Sync {
    /// Stores a snapshot, replacing any previous one for the same agent.
    fn save(&self, snapshot: &AgentSnapshot) -> Result<()>;

    fn load(&self, id: EntityRef) -> Result<Option<AgentSnapshot>>;

    fn exists(&self, id: EntityRef) -> bool;

    /// Removes a snapshot. Deleting a missing id is not an error.
    fn delete(&self, id: EntityRef) -> Result<()>;

    /// Stored ids in ascending order.
    fn list_ids(&self) -> Result<Vec<EntityRef>>;

    /// Snapshots and stores a live agent.
    fn save_agent(&self, agent: &AgentRecord) -> Result<()> {
        self.save(&agent.snapshot())
    }

    /// Loads and restores an agent with the table derived from `config`.
    fn load_agent(&self, id: EntityRef, config: &EngineConfig) -> Result<Option<AgentRecord>> {
        match self.load(id)? {
            Some(snapshot) => Ok(Some(AgentRecord::restore_with_config(snapshot, config)?)),
            None => Ok(None),
        }
    }
}
