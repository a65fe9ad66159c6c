//! Agent templates: a named personality plus optional overrides.

use game_core::{AgentBuilder, AgentRecord, CombatStats, EntityRef, Personality, Traits, Vec2};

/// Blueprint for spawning agents of one kind (e.g. "goblin_scout").
///
/// Unset overrides fall back to the personality defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentTemplate {
    pub name: String,
    pub personality: Personality,
    #[cfg_attr(feature = "serde", serde(default))]
    pub traits: Option<Traits>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: Option<CombatStats>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub guard_post: Option<Vec2>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub patrol_path: Vec<Vec2>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub update_priority: Option<f32>,
}

impl AgentTemplate {
    pub fn new(name: impl Into<String>, personality: Personality) -> Self {
        Self {
            name: name.into(),
            personality,
            traits: None,
            stats: None,
            guard_post: None,
            patrol_path: Vec::new(),
            update_priority: None,
        }
    }

    /// Starts an agent builder seeded from this template.
    pub fn builder(&self, id: EntityRef) -> AgentBuilder {
        let mut builder =
            AgentRecord::builder(id, self.personality).patrol_path(self.patrol_path.clone());
        if let Some(traits) = self.traits {
            builder = builder.traits(traits);
        }
        if let Some(stats) = self.stats {
            builder = builder.stats(stats);
        }
        if let Some(post) = self.guard_post {
            builder = builder.guard_post(post);
        }
        if let Some(priority) = self.update_priority {
            builder = builder.update_priority(priority);
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{AgentState, Timestamp};

    #[test]
    fn template_overrides_personality_defaults() {
        let mut template = AgentTemplate::new("sentry", Personality::Guardian);
        template.guard_post = Some(Vec2::new(10.0, 10.0));
        template.traits = Some(Traits::new(0.9, 0.1, 0.5, 0.5));

        let agent = template.builder(EntityRef(3)).build(Timestamp::ZERO);
        assert_eq!(agent.current_state(), AgentState::Idle);
        assert_eq!(agent.traits().aggression, 0.9);
        assert_eq!(agent.guard_position(), Some(Vec2::new(10.0, 10.0)));
        assert_eq!(*agent.stats(), Personality::Guardian.default_stats());
    }
}
