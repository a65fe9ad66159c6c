//! Engine configuration loader.

use std::path::Path;

use game_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load an [`EngineConfig`] from a TOML file. Missing keys keep their
    /// defaults.
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EngineConfig> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse engine config TOML: {}", e))?;
        Ok(config)
    }

    /// The tuning file shipped with this crate.
    pub fn builtin() -> LoadResult<EngineConfig> {
        Self::parse(include_str!("../../data/engine.toml"))
    }
}
