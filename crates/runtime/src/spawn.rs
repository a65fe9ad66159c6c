//! Turning content templates into live agents.

use std::sync::Arc;

use game_content::AgentTemplate;
use game_core::{AgentRecord, EngineConfig, EntityRef, Timestamp, Transition};

use crate::presets;

/// Builds an agent from `template` with the preset tree for its personality.
pub fn spawn_agent(
    template: &AgentTemplate,
    id: EntityRef,
    config: &EngineConfig,
    now: Timestamp,
) -> AgentRecord {
    let tree = Arc::new(presets::for_personality(template.personality));
    let agent = template
        .builder(id)
        .config(config.clone())
        .behavior(tree)
        .build(now);
    tracing::debug!(
        "spawned {} as agent {} ({})",
        template.name,
        id,
        template.personality
    );
    agent
}

/// Like [`spawn_agent`], then appends `rules` after the default table.
pub fn spawn_with_rules(
    template: &AgentTemplate,
    id: EntityRef,
    config: &EngineConfig,
    now: Timestamp,
    rules: impl IntoIterator<Item = Transition>,
) -> AgentRecord {
    let mut agent = spawn_agent(template, id, config, now);
    agent.transitions_mut().extend(rules);
    agent
}
