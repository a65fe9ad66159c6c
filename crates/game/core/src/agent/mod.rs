//! Per-entity decision state.
//!
//! An [`AgentRecord`] is owned by whichever simulation slot holds the agent.
//! It is mutated only by the decision engine (state machine, behavior tree
//! actions) and by the event handlers that feed its memory. State-machine
//! evaluation lives in `fsm::machine`, perception and throttling in
//! `perception`, patrol and pathfinder cursors in `path`.
mod builder;
mod intent;
mod path;
mod perception;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use builder::AgentBuilder;
pub use intent::Intent;
pub use path::PathEndPolicy;

use crate::BehaviorTree;
use crate::context::DecisionContext;
use crate::env::EntityLookup;
use crate::fsm::{Transition, TransitionTable};
use crate::geometry::Vec2;
use crate::memory::ThreatMemory;
use crate::movement::{self, MovementPattern};
use crate::state::{AgentState, EntityRef, Timestamp};
use crate::traits::{CombatStats, Personality, Traits};

/// Decision state of one agent.
#[derive(Clone)]
pub struct AgentRecord {
    pub(crate) id: EntityRef,
    pub(crate) current_state: AgentState,
    pub(crate) previous_state: AgentState,
    pub(crate) state_entered_at: Timestamp,
    /// Earliest re-entry time per state.
    pub(crate) cooldowns: BTreeMap<AgentState, Timestamp>,
    pub(crate) personality: Personality,
    pub(crate) traits: Traits,
    pub(crate) stats: CombatStats,

    pub(crate) target_id: Option<EntityRef>,
    pub(crate) target_position: Option<Vec2>,
    pub(crate) home_position: Option<Vec2>,
    pub(crate) guard_position: Option<Vec2>,

    pub(crate) patrol_path: Vec<Vec2>,
    pub(crate) path_index: usize,
    pub(crate) last_attack_at: Option<Timestamp>,
    pub(crate) memory: ThreatMemory,

    pub(crate) current_path: Vec<Vec2>,
    pub(crate) path_cursor: usize,
    pub(crate) stuck_counter: u32,
    pub(crate) last_known_position: Option<Vec2>,

    pub(crate) behavior_tree: Option<Arc<BehaviorTree>>,
    pub(crate) transitions: TransitionTable,

    pub(crate) update_interval_ms: f64,
    pub(crate) update_priority: f32,
    pub(crate) last_update_at: Option<Timestamp>,

    pub(crate) intent: Option<Intent>,
}

impl AgentRecord {
    /// Creates an idle agent with personality defaults and the default
    /// transition table.
    pub fn new(id: EntityRef, personality: Personality, now: Timestamp) -> Self {
        Self::builder(id, personality).build(now)
    }

    pub fn builder(id: EntityRef, personality: Personality) -> AgentBuilder {
        AgentBuilder::new(id, personality)
    }

    pub fn id(&self) -> EntityRef {
        self.id
    }

    pub fn current_state(&self) -> AgentState {
        self.current_state
    }

    pub fn previous_state(&self) -> AgentState {
        self.previous_state
    }

    pub fn state_entered_at(&self) -> Timestamp {
        self.state_entered_at
    }

    pub fn personality(&self) -> Personality {
        self.personality
    }

    pub fn traits(&self) -> &Traits {
        &self.traits
    }

    pub fn stats(&self) -> &CombatStats {
        &self.stats
    }

    pub fn home_position(&self) -> Option<Vec2> {
        self.home_position
    }

    pub fn set_home_position(&mut self, position: Option<Vec2>) {
        self.home_position = position;
    }

    pub fn guard_position(&self) -> Option<Vec2> {
        self.guard_position
    }

    pub fn set_guard_position(&mut self, position: Option<Vec2>) {
        self.guard_position = position;
    }

    // ===== transition table =====

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn transitions_mut(&mut self) -> &mut TransitionTable {
        &mut self.transitions
    }

    pub fn add_transition(&mut self, rule: Transition) {
        self.transitions.push(rule);
    }

    pub fn replace_transitions(&mut self, table: TransitionTable) {
        self.transitions = table;
    }

    // ===== behavior tree =====

    pub fn behavior_tree(&self) -> Option<&Arc<BehaviorTree>> {
        self.behavior_tree.as_ref()
    }

    pub fn attach_behavior(&mut self, tree: Arc<BehaviorTree>) {
        self.behavior_tree = Some(tree);
    }

    pub fn detach_behavior(&mut self) -> Option<Arc<BehaviorTree>> {
        self.behavior_tree.take()
    }

    /// Runs the attached behavior tree. False when none is attached.
    pub fn execute_behavior(&mut self, ctx: &DecisionContext) -> bool {
        let Some(tree) = self.behavior_tree.clone() else {
            return false;
        };
        behavior_tree::execute(&tree, self, ctx)
    }

    // ===== movement =====

    /// Heading from `from` toward `to` under `pattern`, using this agent's
    /// attack range for the circular pattern.
    pub fn resolve_direction(
        &self,
        pattern: MovementPattern,
        from: Vec2,
        to: Vec2,
        now: Timestamp,
    ) -> Vec2 {
        movement::resolve_direction(pattern, from, to, now, self.stats.attack_range)
    }

    /// Default steering pattern for the current state.
    pub fn movement_pattern(&self) -> MovementPattern {
        MovementPattern::for_state(self.current_state, self.personality)
    }

    // ===== memory and targeting =====

    pub fn memory(&self) -> &ThreatMemory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut ThreatMemory {
        &mut self.memory
    }

    pub fn record_damage(&mut self, source: EntityRef, amount: f32) {
        self.memory.record_damage(source, amount);
    }

    /// Remembers where `source` was seen, refreshing the target position when
    /// `source` is the current target.
    pub fn record_sighting(&mut self, source: EntityRef, position: Vec2) {
        self.memory.record_sighting(source, position);
        if self.target_id == Some(source) && position.is_finite() {
            self.target_position = Some(position);
        }
    }

    pub fn highest_threat(&self) -> Option<EntityRef> {
        self.memory.highest_threat()
    }

    pub fn target_id(&self) -> Option<EntityRef> {
        self.target_id
    }

    /// Last known target position.
    pub fn target_position(&self) -> Option<Vec2> {
        self.target_position
    }

    pub fn set_target(&mut self, target: EntityRef, position: Option<Vec2>) {
        self.target_id = Some(target);
        self.target_position = position;
    }

    pub fn clear_target(&mut self) {
        self.target_id = None;
        self.target_position = None;
    }

    /// Resolves the current target through `lookup`. A miss means "not
    /// visible" and yields `None`.
    pub fn target_position_via<L: EntityLookup + ?Sized>(&self, lookup: &L) -> Option<Vec2> {
        self.target_id.and_then(|id| lookup.position(id))
    }

    /// Retargets onto the highest live threat.
    ///
    /// The position comes from the lookup, falling back to the last sighting.
    /// When no remembered threat is alive, a current target the lookup no
    /// longer knows is dropped.
    pub fn reselect_target<L: EntityLookup + ?Sized>(&mut self, lookup: &L) -> Option<EntityRef> {
        match self.memory.highest_live_threat(lookup) {
            Some(entity) => {
                if self.target_id != Some(entity) {
                    tracing::debug!("agent {} retargets onto {}", self.id, entity);
                }
                let position = lookup
                    .position(entity)
                    .or_else(|| self.memory.last_seen(entity));
                self.set_target(entity, position);
            }
            None => {
                if let Some(current) = self.target_id
                    && !lookup.is_alive(current)
                {
                    tracing::debug!("agent {} lost target {}", self.id, current);
                    self.clear_target();
                }
            }
        }
        self.target_id
    }

    // ===== intent =====

    pub fn intent(&self) -> Option<&Intent> {
        self.intent.as_ref()
    }

    /// Replaces any pending intent.
    pub fn set_intent(&mut self, intent: Intent) {
        self.intent = Some(intent);
    }

    pub fn take_intent(&mut self) -> Option<Intent> {
        self.intent.take()
    }
}

impl std::fmt::Debug for AgentRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRecord")
            .field("id", &self.id)
            .field("current_state", &self.current_state)
            .field("previous_state", &self.previous_state)
            .field("state_entered_at", &self.state_entered_at)
            .field("personality", &self.personality)
            .field("target_id", &self.target_id)
            .field("memory_entries", &self.memory.len())
            .field("rules", &self.transitions.len())
            .field("has_behavior", &self.behavior_tree.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::StaticLookup;
    use behavior_tree::builder::{action, condition, sequence};

    fn agent() -> AgentRecord {
        AgentRecord::new(EntityRef(1), Personality::Hunter, Timestamp::ZERO)
    }

    #[test]
    fn construction_applies_personality_defaults() {
        let agent = agent();
        assert_eq!(agent.current_state(), AgentState::Idle);
        assert_eq!(*agent.traits(), Personality::Hunter.traits());
        assert_eq!(agent.stats().sight_range, 260.0);
        assert_eq!(agent.transitions().len(), TransitionTable::default_table().len());
        assert_eq!(agent.memory().capacity(), 64);
    }

    #[test]
    fn builder_clamps_trait_overrides() {
        let agent = AgentRecord::builder(EntityRef(2), Personality::Swarm)
            .traits(Traits::new(0.2, 0.2, 0.2, 0.2))
            .traits(Traits {
                aggression: 3.0,
                fear: -1.0,
                curiosity: 0.5,
                loyalty: 0.5,
            })
            .guard_post(Vec2::new(4.0, 4.0))
            .build(Timestamp::ZERO);
        assert_eq!(agent.traits().aggression, 1.0);
        assert_eq!(agent.traits().fear, 0.0);
        assert_eq!(agent.guard_position(), Some(Vec2::new(4.0, 4.0)));
    }

    #[test]
    fn behavior_runs_against_agent() {
        let mut agent = agent();
        assert!(!agent.execute_behavior(&DecisionContext::new()));

        let tree: BehaviorTree = sequence(vec![
            condition(|ctx: &DecisionContext| ctx.nearby_enemies > 0),
            action(|agent: &mut AgentRecord, _ctx: &DecisionContext| {
                agent.set_intent(Intent::Hold);
                true
            }),
        ]);
        agent.attach_behavior(Arc::new(tree));

        assert!(!agent.execute_behavior(&DecisionContext::new()));
        assert!(agent.intent().is_none());
        assert!(agent.execute_behavior(&DecisionContext::new().with_enemies(1)));
        assert_eq!(agent.take_intent(), Some(Intent::Hold));
        assert!(agent.detach_behavior().is_some());
    }

    #[test]
    fn reselect_prefers_live_threats() {
        let mut agent = agent();
        agent.record_damage(EntityRef(10), 80.0);
        agent.record_damage(EntityRef(11), 20.0);
        agent.record_sighting(EntityRef(11), Vec2::new(7.0, 7.0));

        let mut lookup = StaticLookup::new()
            .with(EntityRef(10), Vec2::new(1.0, 2.0))
            .with(EntityRef(11), Vec2::new(9.0, 9.0));
        assert_eq!(agent.reselect_target(&lookup), Some(EntityRef(10)));
        assert_eq!(agent.target_position(), Some(Vec2::new(1.0, 2.0)));

        lookup.remove(EntityRef(10));
        assert_eq!(agent.target_position_via(&lookup), None);
        assert_eq!(agent.reselect_target(&lookup), Some(EntityRef(11)));

        lookup.remove(EntityRef(11));
        assert_eq!(agent.reselect_target(&lookup), None);
        assert_eq!(agent.target_position(), None);
    }

    #[test]
    fn sighting_refreshes_current_target() {
        let mut agent = agent();
        agent.set_target(EntityRef(3), None);
        agent.record_sighting(EntityRef(3), Vec2::new(2.0, 0.0));
        assert_eq!(agent.target_position(), Some(Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn direction_uses_attack_range() {
        let agent = agent();
        let dir = agent.resolve_direction(
            MovementPattern::Circular,
            Vec2::ZERO,
            Vec2::new(80.0, 0.0),
            Timestamp::ZERO,
        );
        assert_eq!(dir, Vec2::Y);
    }
}
