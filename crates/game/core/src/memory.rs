//! Bounded per-hostile memory: last-seen position, damage taken, threat.
//!
//! Keys are weak [`EntityRef`]s. Nothing here keeps a referenced entity alive;
//! callers drop forgotten entities with [`ThreatMemory::prune`] or skip them
//! with [`ThreatMemory::highest_live_threat`].
//!
//! The store is ordered by entity id, which makes every tie-break explicit:
//! the highest threat ties to the lowest id, and eviction removes the lowest
//! threat, tying to the highest id.

use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::env::EntityLookup;
use crate::geometry::Vec2;
use crate::state::EntityRef;
use crate::traits::clamp_unit;

/// What an agent remembers about one hostile entity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThreatEntry {
    pub last_seen: Option<Vec2>,
    /// Cumulative damage received from this entity.
    pub damage: f32,
    /// Threat score in [0, 1].
    pub threat: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ThreatMemory {
    entries: BTreeMap<EntityRef, ThreatEntry>,
    capacity: usize,
}

impl ThreatMemory {
    /// Damage divided by this is added to threat.
    pub const DAMAGE_PER_THREAT: f32 = 100.0;

    /// Creates an empty memory holding at most `capacity` entities (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Rebuilds a memory from stored entries. Threat values are clamped and
    /// the lowest threats are evicted if there are more entries than room.
    pub fn from_entries(
        capacity: usize,
        entries: impl IntoIterator<Item = (EntityRef, ThreatEntry)>,
    ) -> Self {
        let mut memory = Self::with_capacity(capacity);
        for (entity, mut entry) in entries {
            entry.threat = clamp_unit(entry.threat);
            memory.entries.insert(entity, entry);
        }
        memory.shrink_to_capacity();
        memory
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the capacity, evicting entries if the memory is over it.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.shrink_to_capacity();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, entity: EntityRef) -> bool {
        self.entries.contains_key(&entity)
    }

    pub fn entry(&self, entity: EntityRef) -> Option<&ThreatEntry> {
        self.entries.get(&entity)
    }

    /// Entries in ascending entity order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityRef, &ThreatEntry)> {
        self.entries.iter().map(|(entity, entry)| (*entity, entry))
    }

    /// Threat score for `entity`, zero when unknown.
    pub fn threat(&self, entity: EntityRef) -> f32 {
        self.entry(entity).map_or(0.0, |e| e.threat)
    }

    /// Cumulative damage from `entity`, zero when unknown.
    pub fn damage(&self, entity: EntityRef) -> f32 {
        self.entry(entity).map_or(0.0, |e| e.damage)
    }

    pub fn last_seen(&self, entity: EntityRef) -> Option<Vec2> {
        self.entry(entity).and_then(|e| e.last_seen)
    }

    /// Adds `amount` to the damage taken from `source` and raises its threat
    /// by `amount / 100`, clamped to [0, 1].
    ///
    /// Negative or non-finite amounts are ignored. The total saturates at
    /// `f32::MAX`.
    pub fn record_damage(&mut self, source: EntityRef, amount: f32) {
        if !amount.is_finite() || amount < 0.0 {
            tracing::warn!("ignoring damage {} from {}", amount, source);
            return;
        }
        let entry = self.entry_mut(source);
        entry.damage = (entry.damage + amount).min(f32::MAX);
        entry.threat = clamp_unit(entry.threat + amount / Self::DAMAGE_PER_THREAT);
    }

    pub fn record_sighting(&mut self, source: EntityRef, position: Vec2) {
        if !position.is_finite() {
            tracing::warn!("ignoring non-finite sighting of {}", source);
            return;
        }
        self.entry_mut(source).last_seen = Some(position);
    }

    /// Shifts the threat of `source` by `delta`, clamped to [0, 1].
    pub fn adjust_threat(&mut self, source: EntityRef, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        let entry = self.entry_mut(source);
        entry.threat = clamp_unit(entry.threat + delta);
    }

    /// Entity with the highest threat; ties go to the lowest id.
    pub fn highest_threat(&self) -> Option<EntityRef> {
        Self::max_threat(self.iter())
    }

    /// Like [`highest_threat`](Self::highest_threat), skipping entities the
    /// lookup no longer knows.
    pub fn highest_live_threat<L: EntityLookup + ?Sized>(&self, lookup: &L) -> Option<EntityRef> {
        Self::max_threat(self.iter().filter(|(entity, _)| lookup.is_alive(*entity)))
    }

    pub fn forget(&mut self, entity: EntityRef) -> Option<ThreatEntry> {
        self.entries.remove(&entity)
    }

    /// Forgets every entity the lookup no longer knows. Returns how many.
    pub fn prune<L: EntityLookup + ?Sized>(&mut self, lookup: &L) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entity, _| lookup.is_alive(*entity));
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn max_threat<'a>(
        entries: impl Iterator<Item = (EntityRef, &'a ThreatEntry)>,
    ) -> Option<EntityRef> {
        let mut best: Option<(EntityRef, f32)> = None;
        for (entity, entry) in entries {
            if best.is_none_or(|(_, threat)| entry.threat > threat) {
                best = Some((entity, entry.threat));
            }
        }
        best.map(|(entity, _)| entity)
    }

    fn entry_mut(&mut self, entity: EntityRef) -> &mut ThreatEntry {
        if !self.entries.contains_key(&entity) && self.entries.len() >= self.capacity {
            self.evict_one();
        }
        self.entries.entry(entity).or_default()
    }

    fn shrink_to_capacity(&mut self) {
        while self.entries.len() > self.capacity {
            self.evict_one();
        }
    }

    fn evict_one(&mut self) {
        let victim = self
            .entries
            .iter()
            .min_by(|(a_id, a), (b_id, b)| a.threat.total_cmp(&b.threat).then(b_id.cmp(a_id)))
            .map(|(entity, _)| *entity);
        if let Some(entity) = victim {
            tracing::debug!("threat memory full, evicting {}", entity);
            self.entries.remove(&entity);
        }
    }
}

impl Default for ThreatMemory {
    fn default() -> Self {
        Self::with_capacity(EngineConfig::DEFAULT_MEMORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::StaticLookup;

    #[test]
    fn threat_stays_clamped() {
        let mut memory = ThreatMemory::default();
        for _ in 0..50 {
            memory.record_damage(EntityRef(1), 1.0e6);
        }
        assert_eq!(memory.threat(EntityRef(1)), 1.0);
        memory.adjust_threat(EntityRef(1), -5.0);
        assert_eq!(memory.threat(EntityRef(1)), 0.0);
        assert_eq!(memory.damage(EntityRef(1)), 5.0e7);
    }

    #[test]
    fn damage_raises_threat_by_hundredths() {
        let mut memory = ThreatMemory::default();
        memory.record_damage(EntityRef(4), 25.0);
        memory.record_damage(EntityRef(4), 5.0);
        assert!((memory.threat(EntityRef(4)) - 0.3).abs() < 1e-6);
        assert_eq!(memory.damage(EntityRef(4)), 30.0);
    }

    #[test]
    fn damage_total_saturates() {
        let mut memory = ThreatMemory::default();
        memory.record_damage(EntityRef(2), 3.0e38);
        memory.record_damage(EntityRef(2), 3.0e38);
        assert_eq!(memory.damage(EntityRef(2)), f32::MAX);
    }

    #[test]
    fn bad_damage_is_ignored() {
        let mut memory = ThreatMemory::default();
        memory.record_damage(EntityRef(1), f32::NAN);
        memory.record_damage(EntityRef(1), f32::INFINITY);
        memory.record_damage(EntityRef(1), -3.0);
        assert!(memory.is_empty());
    }

    #[test]
    fn highest_threat_ties_to_lowest_id() {
        let mut memory = ThreatMemory::default();
        assert_eq!(memory.highest_threat(), None);
        memory.record_damage(EntityRef(9), 40.0);
        memory.record_damage(EntityRef(3), 40.0);
        memory.record_damage(EntityRef(5), 10.0);
        assert_eq!(memory.highest_threat(), Some(EntityRef(3)));
    }

    #[test]
    fn live_threat_skips_destroyed_entities() {
        let mut memory = ThreatMemory::default();
        memory.record_damage(EntityRef(1), 90.0);
        memory.record_damage(EntityRef(2), 10.0);
        let lookup = StaticLookup::new().with(EntityRef(2), Vec2::ZERO);

        assert_eq!(memory.highest_live_threat(&lookup), Some(EntityRef(2)));
        assert_eq!(memory.prune(&lookup), 1);
        assert!(!memory.contains(EntityRef(1)));
    }

    #[test]
    fn eviction_drops_lowest_threat() {
        let mut memory = ThreatMemory::with_capacity(2);
        memory.record_damage(EntityRef(1), 50.0);
        memory.record_sighting(EntityRef(2), Vec2::new(1.0, 1.0));
        memory.record_sighting(EntityRef(3), Vec2::new(2.0, 2.0));
        assert_eq!(memory.len(), 2);
        assert!(memory.contains(EntityRef(1)));
        assert!(!memory.contains(EntityRef(2)));
        assert_eq!(memory.last_seen(EntityRef(3)), Some(Vec2::new(2.0, 2.0)));
    }

    #[test]
    fn eviction_ties_drop_highest_id() {
        let mut memory = ThreatMemory::with_capacity(3);
        for id in [1, 2, 3] {
            memory.record_sighting(EntityRef(id), Vec2::ZERO);
        }
        memory.set_capacity(2);
        assert!(memory.contains(EntityRef(1)));
        assert!(memory.contains(EntityRef(2)));
        assert!(!memory.contains(EntityRef(3)));
    }
}
