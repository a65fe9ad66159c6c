use std::collections::BTreeMap;
use std::sync::Arc;

use crate::BehaviorTree;
use crate::config::EngineConfig;
use crate::fsm::TransitionTable;
use crate::geometry::Vec2;
use crate::memory::ThreatMemory;
use crate::state::{AgentState, EntityRef, Timestamp};
use crate::traits::{CombatStats, Personality, Traits};

use super::AgentRecord;
use super::perception::sanitize_priority;

/// Builder for [`AgentRecord`].
///
/// Anything left unset falls back to the personality defaults and the
/// default transition table.
pub struct AgentBuilder {
    id: EntityRef,
    personality: Personality,
    traits: Option<Traits>,
    stats: Option<CombatStats>,
    config: Option<EngineConfig>,
    transitions: Option<TransitionTable>,
    home: Option<Vec2>,
    guard_post: Option<Vec2>,
    patrol_path: Vec<Vec2>,
    behavior: Option<Arc<BehaviorTree>>,
    update_priority: Option<f32>,
}

impl AgentBuilder {
    pub(super) fn new(id: EntityRef, personality: Personality) -> Self {
        Self {
            id,
            personality,
            traits: None,
            stats: None,
            config: None,
            transitions: None,
            home: None,
            guard_post: None,
            patrol_path: Vec::new(),
            behavior: None,
            update_priority: None,
        }
    }

    /// Overrides the personality traits. Values are clamped to [0, 1].
    pub fn traits(mut self, traits: Traits) -> Self {
        self.traits = Some(traits.clamped());
        self
    }

    /// Overrides the combat stats. Negative or NaN values clamp to 0.
    pub fn stats(mut self, stats: CombatStats) -> Self {
        self.stats = Some(stats.clamped());
        self
    }

    /// Engine tuning. Also seeds the transition table unless one is set.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn transitions(mut self, transitions: TransitionTable) -> Self {
        self.transitions = Some(transitions);
        self
    }

    pub fn home(mut self, position: Vec2) -> Self {
        self.home = Some(position);
        self
    }

    pub fn guard_post(mut self, position: Vec2) -> Self {
        self.guard_post = Some(position);
        self
    }

    pub fn patrol_path(mut self, waypoints: Vec<Vec2>) -> Self {
        self.patrol_path = waypoints;
        self
    }

    pub fn behavior(mut self, tree: Arc<BehaviorTree>) -> Self {
        self.behavior = Some(tree);
        self
    }

    pub fn update_priority(mut self, priority: f32) -> Self {
        self.update_priority = Some(sanitize_priority(priority));
        self
    }

    /// Builds the record in [`AgentState::Idle`], entered at `now`.
    pub fn build(self, now: Timestamp) -> AgentRecord {
        let config = self.config.unwrap_or_default();
        let transitions = self
            .transitions
            .unwrap_or_else(|| TransitionTable::from_config(&config));

        AgentRecord {
            id: self.id,
            current_state: AgentState::Idle,
            previous_state: AgentState::Idle,
            state_entered_at: now,
            cooldowns: BTreeMap::new(),
            personality: self.personality,
            traits: self.traits.unwrap_or_else(|| self.personality.traits()),
            stats: self
                .stats
                .unwrap_or_else(|| self.personality.default_stats()),
            target_id: None,
            target_position: None,
            home_position: self.home,
            guard_position: self.guard_post,
            patrol_path: self.patrol_path,
            path_index: 0,
            last_attack_at: None,
            memory: ThreatMemory::with_capacity(config.memory_capacity),
            current_path: Vec::new(),
            path_cursor: 0,
            stuck_counter: 0,
            last_known_position: None,
            behavior_tree: self.behavior,
            transitions,
            update_interval_ms: config.update_interval_ms,
            update_priority: self.update_priority.unwrap_or(1.0),
            last_update_at: None,
            intent: None,
        }
    }
}
