use crate::geometry::Vec2;
use crate::state::EntityRef;

/// What the agent decided to do this tick.
///
/// Written by behavior-tree actions, consumed by the embedding system's
/// movement and combat code. Only the most recent intent is kept.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    MoveTo(Vec2),
    Attack(EntityRef),
    /// Move away from this point.
    FleeFrom(Vec2),
    /// Walk toward the current patrol waypoint.
    Patrol(Vec2),
    Hold,
}

impl Intent {
    /// Point the intent steers toward or away from, if any.
    pub fn point(&self) -> Option<Vec2> {
        match self {
            Intent::MoveTo(p) | Intent::FleeFrom(p) | Intent::Patrol(p) => Some(*p),
            Intent::Attack(_) | Intent::Hold => None,
        }
    }
}
