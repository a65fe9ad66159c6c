//! Persistable form of an [`AgentRecord`].
//!
//! A snapshot carries everything needed to resume an agent: state and
//! timestamps, scalars, memory, path cursors. It does not carry the
//! transition table or the behavior tree. Restoring installs the default
//! table; custom rules and trees must be re-attached by the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::agent::AgentRecord;
use crate::config::EngineConfig;
use crate::error::{MalformedState, Result};
use crate::fsm::TransitionTable;
use crate::geometry::Vec2;
use crate::memory::{ThreatEntry, ThreatMemory};
use crate::state::{AgentState, EntityRef, Timestamp};
use crate::traits::{CombatStats, Personality, Traits};

/// Serialized agent state.
///
/// Maps are stored as ordered pair lists so every format can encode them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id: EntityRef,
    pub current_state: AgentState,
    pub previous_state: AgentState,
    pub state_entered_at: Timestamp,
    pub cooldowns: Vec<(AgentState, Timestamp)>,
    pub personality: Personality,
    pub traits: Traits,
    pub stats: CombatStats,
    pub target_id: Option<EntityRef>,
    pub target_position: Option<Vec2>,
    pub home_position: Option<Vec2>,
    pub guard_position: Option<Vec2>,
    pub patrol_path: Vec<Vec2>,
    pub path_index: usize,
    pub last_attack_at: Option<Timestamp>,
    pub memory_capacity: usize,
    pub memory: Vec<(EntityRef, ThreatEntry)>,
    pub current_path: Vec<Vec2>,
    pub path_cursor: usize,
    pub stuck_counter: u32,
    pub last_known_position: Option<Vec2>,
    pub update_interval_ms: f64,
    pub update_priority: f32,
    pub last_update_at: Option<Timestamp>,
}

impl AgentSnapshot {
    /// Encodes with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| MalformedState::Encode(e.to_string()))
    }

    /// Decodes a bincode payload. Truncated or malformed input fails with
    /// [`MalformedState::Decode`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| MalformedState::Decode(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| MalformedState::Encode(e.to_string()))
    }

    /// Decodes JSON. Missing fields fail with [`MalformedState::Decode`].
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MalformedState::Decode(e.to_string()))
    }

    /// Checks invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        self.traits.validate()?;

        let stats = &self.stats;
        for (name, value) in [
            ("sight_range", stats.sight_range),
            ("hearing_range", stats.hearing_range),
            ("attack_range", stats.attack_range),
            ("flee_distance", stats.flee_distance),
            ("field_of_view_deg", stats.field_of_view_deg),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{name} must be finite and non-negative")));
            }
        }
        if !stats.attack_cooldown_ms.is_finite() || stats.attack_cooldown_ms < 0.0 {
            return Err(invalid("attack_cooldown_ms must be finite and non-negative"));
        }

        if self.path_index >= self.patrol_path.len().max(1) {
            return Err(invalid(format!(
                "path_index {} outside patrol path of {}",
                self.path_index,
                self.patrol_path.len()
            )));
        }
        if self.path_cursor > self.current_path.len() {
            return Err(invalid(format!(
                "path_cursor {} past path of {}",
                self.path_cursor,
                self.current_path.len()
            )));
        }
        if self.memory_capacity == 0 || self.memory.len() > self.memory_capacity {
            return Err(invalid(format!(
                "{} memory entries with capacity {}",
                self.memory.len(),
                self.memory_capacity
            )));
        }
        for (entity, entry) in &self.memory {
            if !(0.0..=1.0).contains(&entry.threat) || !entry.damage.is_finite() {
                return Err(invalid(format!("memory entry for {entity} out of range")));
            }
        }
        if !self.update_interval_ms.is_finite() || self.update_interval_ms < 0.0 {
            return Err(invalid("update_interval_ms must be finite and non-negative"));
        }
        if !self.update_priority.is_finite() {
            return Err(invalid("update_priority must be finite"));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> MalformedState {
    MalformedState::InvalidSnapshot(message.into())
}

impl AgentRecord {
    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            id: self.id,
            current_state: self.current_state,
            previous_state: self.previous_state,
            state_entered_at: self.state_entered_at,
            cooldowns: self.cooldowns.iter().map(|(s, t)| (*s, *t)).collect(),
            personality: self.personality,
            traits: self.traits,
            stats: self.stats,
            target_id: self.target_id,
            target_position: self.target_position,
            home_position: self.home_position,
            guard_position: self.guard_position,
            patrol_path: self.patrol_path.clone(),
            path_index: self.path_index,
            last_attack_at: self.last_attack_at,
            memory_capacity: self.memory.capacity(),
            memory: self.memory.iter().map(|(e, entry)| (e, *entry)).collect(),
            current_path: self.current_path.clone(),
            path_cursor: self.path_cursor,
            stuck_counter: self.stuck_counter,
            last_known_position: self.last_known_position,
            update_interval_ms: self.update_interval_ms,
            update_priority: self.update_priority,
            last_update_at: self.last_update_at,
        }
    }

    /// Rebuilds an agent with the default transition table.
    pub fn restore(snapshot: AgentSnapshot) -> Result<Self> {
        Self::restore_with_config(snapshot, &EngineConfig::default())
    }

    /// Rebuilds an agent with the table derived from `config`.
    pub fn restore_with_config(snapshot: AgentSnapshot, config: &EngineConfig) -> Result<Self> {
        snapshot.validate()?;
        tracing::debug!(
            "restoring agent {} in {} ({} memory entries)",
            snapshot.id,
            snapshot.current_state,
            snapshot.memory.len()
        );

        Ok(Self {
            id: snapshot.id,
            current_state: snapshot.current_state,
            previous_state: snapshot.previous_state,
            state_entered_at: snapshot.state_entered_at,
            cooldowns: snapshot.cooldowns.into_iter().collect::<BTreeMap<_, _>>(),
            personality: snapshot.personality,
            traits: snapshot.traits,
            stats: snapshot.stats,
            target_id: snapshot.target_id,
            target_position: snapshot.target_position,
            home_position: snapshot.home_position,
            guard_position: snapshot.guard_position,
            patrol_path: snapshot.patrol_path,
            path_index: snapshot.path_index,
            last_attack_at: snapshot.last_attack_at,
            memory: ThreatMemory::from_entries(snapshot.memory_capacity, snapshot.memory),
            current_path: snapshot.current_path,
            path_cursor: snapshot.path_cursor,
            stuck_counter: snapshot.stuck_counter,
            last_known_position: snapshot.last_known_position,
            behavior_tree: None,
            transitions: TransitionTable::from_config(config),
            update_interval_ms: snapshot.update_interval_ms,
            update_priority: snapshot.update_priority,
            last_update_at: snapshot.last_update_at,
            intent: None,
        })
    }
}
