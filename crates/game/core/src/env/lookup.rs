use std::collections::BTreeMap;

use crate::geometry::Vec2;
use crate::state::EntityRef;

/// Liveness and position oracle for weak entity references.
pub trait EntityLookup {
    /// Returns true while the referenced entity still exists.
    fn is_alive(&self, entity: EntityRef) -> bool;

    /// Current position of the entity, `None` when unknown or gone.
    fn position(&self, entity: EntityRef) -> Option<Vec2>;
}

impl<T> EntityLookup for &T
where
    T: EntityLookup + ?Sized,
{
    fn is_alive(&self, entity: EntityRef) -> bool {
        (**self).is_alive(entity)
    }

    fn position(&self, entity: EntityRef) -> Option<Vec2> {
        (**self).position(entity)
    }
}

/// A map from entity to position: present means alive.
impl EntityLookup for BTreeMap<EntityRef, Vec2> {
    fn is_alive(&self, entity: EntityRef) -> bool {
        self.contains_key(&entity)
    }

    fn position(&self, entity: EntityRef) -> Option<Vec2> {
        self.get(&entity).copied()
    }
}

/// Owned lookup table, handy for tools and tests.
#[derive(Clone, Debug, Default)]
pub struct StaticLookup {
    entities: BTreeMap<EntityRef, Vec2>,
}

impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, entity: EntityRef, position: Vec2) -> Self {
        self.insert(entity, position);
        self
    }

    pub fn insert(&mut self, entity: EntityRef, position: Vec2) {
        self.entities.insert(entity, position);
    }

    /// Removes the entity, simulating its destruction.
    pub fn remove(&mut self, entity: EntityRef) -> Option<Vec2> {
        self.entities.remove(&entity)
    }
}

impl EntityLookup for StaticLookup {
    fn is_alive(&self, entity: EntityRef) -> bool {
        self.entities.is_alive(entity)
    }

    fn position(&self, entity: EntityRef) -> Option<Vec2> {
        self.entities.position(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removed_entities_are_misses() {
        let mut lookup = StaticLookup::new().with(EntityRef(1), Vec2::new(3.0, 4.0));
        assert!(lookup.is_alive(EntityRef(1)));
        assert_eq!(lookup.position(EntityRef(1)), Some(Vec2::new(3.0, 4.0)));

        lookup.remove(EntityRef(1));
        assert!(!lookup.is_alive(EntityRef(1)));
        assert_eq!((&lookup).position(EntityRef(1)), None);
    }
}
