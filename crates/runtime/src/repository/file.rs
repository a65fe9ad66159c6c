//! File-based snapshot repository.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::{AgentSnapshot, EntityRef, MalformedState};

use super::{RepositoryError, Result, SnapshotRepository};

/// Stores each snapshot as `agent_{id}.bin` (bincode) under one directory.
///
/// Writes go to a `.bin.tmp` sibling first and are renamed into place, so a
/// crash mid-write never leaves a truncated snapshot behind.
pub struct FileSnapshotRepository {
    base_dir: PathBuf,
}

impl FileSnapshotRepository {
    /// Opens a repository rooted at `base_dir`, creating it if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the snapshot file for `id`.
    pub fn snapshot_path(&self, id: EntityRef) -> PathBuf {
        self.base_dir.join(format!("agent_{}.bin", id.raw()))
    }
}

impl SnapshotRepository for FileSnapshotRepository {
    fn save(&self, snapshot: &AgentSnapshot) -> Result<()> {
        let path = self.snapshot_path(snapshot.id);
        let temp_path = path.with_extension("bin.tmp");

        let bytes = snapshot.to_bytes()?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved agent[{}] to {}", snapshot.id, path.display());
        Ok(())
    }

    fn load(&self, id: EntityRef) -> Result<Option<AgentSnapshot>> {
        let path = self.snapshot_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let snapshot = AgentSnapshot::from_bytes(&bytes)?;
        if snapshot.id != id {
            return Err(RepositoryError::Snapshot(MalformedState::InvalidSnapshot(
                format!("{} holds agent {}", path.display(), snapshot.id),
            )));
        }

        tracing::debug!("Loaded agent[{}] from {}", id, path.display());
        Ok(Some(snapshot))
    }

    fn exists(&self, id: EntityRef) -> bool {
        self.snapshot_path(id).exists()
    }

    fn delete(&self, id: EntityRef) -> Result<()> {
        let path = self.snapshot_path(id);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted agent[{}]", id);
        }
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<EntityRef>> {
        let mut ids = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(raw) = filename
                    .strip_prefix("agent_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && let Ok(raw) = raw.parse::<u32>()
            {
                ids.push(EntityRef::new(raw));
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use game_core::{AgentRecord, Personality, Timestamp};

    use super::*;

    fn snapshot(id: u32) -> AgentSnapshot {
        AgentRecord::new(EntityRef(id), Personality::Hunter, Timestamp::ZERO).snapshot()
    }

    #[test]
    fn save_load_delete() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path()).unwrap();

        repo.save(&snapshot(7)).unwrap();
        assert!(repo.exists(EntityRef(7)));
        assert_eq!(repo.load(EntityRef(7)).unwrap(), Some(snapshot(7)));
        assert!(!repo.snapshot_path(EntityRef(7)).with_extension("bin.tmp").exists());

        repo.delete(EntityRef(7)).unwrap();
        assert!(!repo.exists(EntityRef(7)));
        assert_eq!(repo.load(EntityRef(7)).unwrap(), None);
        repo.delete(EntityRef(7)).unwrap();
    }

    #[test]
    fn list_ignores_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path()).unwrap();
        for id in [12, 3, 40] {
            repo.save(&snapshot(id)).unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        fs::write(dir.path().join("agent_x.bin"), "junk").unwrap();

        assert_eq!(
            repo.list_ids().unwrap(),
            vec![EntityRef(3), EntityRef(12), EntityRef(40)]
        );
    }

    #[test]
    fn corrupt_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path()).unwrap();
        fs::write(repo.snapshot_path(EntityRef(5)), [1u8, 2, 3]).unwrap();

        assert!(matches!(
            repo.load(EntityRef(5)),
            Err(RepositoryError::Snapshot(_))
        ));
    }

    #[test]
    fn renamed_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path()).unwrap();
        repo.save(&snapshot(1)).unwrap();
        fs::rename(
            repo.snapshot_path(EntityRef(1)),
            repo.snapshot_path(EntityRef(2)),
        )
        .unwrap();

        assert!(repo.load(EntityRef(2)).is_err());
    }
}
