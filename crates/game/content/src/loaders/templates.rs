//! Agent template loader.

use std::collections::HashSet;
use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::templates::AgentTemplate;

/// Loader for agent templates from RON files.
///
/// File format: `Vec<AgentTemplate>`. Template names must be unique.
pub struct TemplateLoader;

impl TemplateLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<AgentTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load templates from {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<AgentTemplate>> {
        let templates: Vec<AgentTemplate> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse templates RON: {}", e))?;

        let mut seen = HashSet::new();
        for template in &templates {
            if !seen.insert(template.name.as_str()) {
                anyhow::bail!("Duplicate agent template '{}'", template.name);
            }
            if let Some(traits) = &template.traits
                && traits.validate().is_err()
            {
                tracing::warn!(
                    "template '{}' has traits outside [0, 1]; they will be clamped",
                    template.name
                );
            }
        }
        Ok(templates)
    }

    /// The templates shipped with this crate.
    pub fn builtin() -> LoadResult<Vec<AgentTemplate>> {
        Self::parse(include_str!("../../data/agents.ron"))
    }
}
