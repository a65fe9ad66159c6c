use crate::geometry::{Vec2, angle_between_deg};
use crate::state::Timestamp;

use super::AgentRecord;

impl AgentRecord {
    /// Lowest accepted update priority; keeps the throttle interval finite.
    pub const MIN_UPDATE_PRIORITY: f32 = 0.01;

    /// True when `to_target` lies within the field-of-view cone around
    /// `facing`. Zero-length vectors count as inside.
    pub fn in_field_of_view(&self, facing: Vec2, to_target: Vec2) -> bool {
        angle_between_deg(facing, to_target)
            .is_none_or(|angle| angle <= self.stats.field_of_view_deg / 2.0)
    }

    pub fn can_see(&self, distance: f32, line_of_sight: bool) -> bool {
        line_of_sight && distance <= self.stats.sight_range
    }

    pub fn can_hear(&self, distance: f32) -> bool {
        distance <= self.stats.hearing_range
    }

    /// True when the attack cooldown has elapsed or the agent never attacked.
    pub fn can_attack(&self, now: Timestamp) -> bool {
        self.last_attack_at
            .is_none_or(|last| now.elapsed_since(last) >= self.stats.attack_cooldown_ms)
    }

    pub fn record_attack(&mut self, now: Timestamp) {
        self.last_attack_at = Some(now);
    }

    pub fn last_attack_at(&self) -> Option<Timestamp> {
        self.last_attack_at
    }

    /// True when the agent is due for its expensive update.
    ///
    /// The effective interval is `update_interval_ms / update_priority`, so a
    /// higher priority updates more often.
    pub fn should_update(&self, now: Timestamp) -> bool {
        let interval = self.update_interval_ms / f64::from(self.effective_priority());
        self.last_update_at
            .is_none_or(|last| now.elapsed_since(last) >= interval)
    }

    pub fn mark_updated(&mut self, now: Timestamp) {
        self.last_update_at = Some(now);
    }

    pub fn update_priority(&self) -> f32 {
        self.update_priority
    }

    /// Sets the throttle priority. NaN resets it to 1 and infinities clamp to
    /// the finite range.
    pub fn set_update_priority(&mut self, priority: f32) {
        self.update_priority = sanitize_priority(priority);
    }

    pub fn update_interval_ms(&self) -> f64 {
        self.update_interval_ms
    }

    fn effective_priority(&self) -> f32 {
        if self.update_priority.is_nan() {
            return 1.0;
        }
        self.update_priority.max(Self::MIN_UPDATE_PRIORITY)
    }
}

pub(super) fn sanitize_priority(priority: f32) -> f32 {
    if priority.is_nan() {
        1.0
    } else {
        priority.clamp(f32::MIN, f32::MAX)
    }
}
