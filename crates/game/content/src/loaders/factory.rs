//! Content factory for loading every data file from one directory.

use std::path::{Path, PathBuf};

use game_core::{EngineConfig, TransitionSpec};

use crate::loaders::{ConfigLoader, LoadResult, RuleLoader, TemplateLoader};
use crate::templates::AgentTemplate;

/// Content factory that loads engine content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── engine.toml
/// ├── agents.ron
/// └── rules/
///     └── guard_investigate.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data directory shipped in this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load engine tuning from `engine.toml`.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        ConfigLoader::load(&self.data_dir.join("engine.toml"))
    }

    /// Load agent templates from `agents.ron`.
    pub fn load_templates(&self) -> LoadResult<Vec<AgentTemplate>> {
        TemplateLoader::load(&self.data_dir.join("agents.ron"))
    }

    /// Load a rule set from `rules/{name}.ron`.
    pub fn load_rules(&self, name: &str) -> LoadResult<Vec<TransitionSpec>> {
        let path = self.data_dir.join("rules").join(format!("{}.ron", name));
        RuleLoader::load(&path)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
