//! In-memory snapshot repository for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use game_core::{AgentSnapshot, EntityRef};

use super::{RepositoryError, Result, SnapshotRepository};

/// Snapshots held in a map behind a lock.
pub struct InMemorySnapshotRepository {
    snapshots: RwLock<BTreeMap<EntityRef, AgentSnapshot>>,
}

impl InMemorySnapshotRepository {
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemorySnapshotRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotRepository for InMemorySnapshotRepository {
    fn save(&self, snapshot: &AgentSnapshot) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        snapshots.insert(snapshot.id, snapshot.clone());
        Ok(())
    }

    fn load(&self, id: EntityRef) -> Result<Option<AgentSnapshot>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(snapshots.get(&id).cloned())
    }

    fn exists(&self, id: EntityRef) -> bool {
        self.snapshots
            .read()
            .map(|snapshots| snapshots.contains_key(&id))
            .unwrap_or(false)
    }

    fn delete(&self, id: EntityRef) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        snapshots.remove(&id);
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<EntityRef>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(snapshots.keys().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use game_core::{AgentRecord, EngineConfig, Personality, Timestamp, Vec2};

    use super::*;

    #[test]
    fn agents_survive_a_round_trip() {
        let repo = InMemorySnapshotRepository::new();
        let mut agent = AgentRecord::new(EntityRef(3), Personality::Guardian, Timestamp::ZERO);
        agent.record_damage(EntityRef(9), 40.0);
        agent.set_guard_position(Some(Vec2::new(8.0, 8.0)));

        repo.save_agent(&agent).unwrap();
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.list_ids().unwrap(), vec![EntityRef(3)]);

        let restored = repo
            .load_agent(EntityRef(3), &EngineConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(restored.snapshot(), agent.snapshot());
        assert!(
            repo.load_agent(EntityRef(4), &EngineConfig::default())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn invalid_snapshots_fail_to_restore() {
        let repo = InMemorySnapshotRepository::default();
        let mut snapshot =
            AgentRecord::new(EntityRef(1), Personality::Coward, Timestamp::ZERO).snapshot();
        snapshot.traits.fear = -0.5;
        repo.save(&snapshot).unwrap();

        assert!(matches!(
            repo.load_agent(EntityRef(1), &EngineConfig::default()),
            Err(RepositoryError::Snapshot(_))
        ));
    }
}
