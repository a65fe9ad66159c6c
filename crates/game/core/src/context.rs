/// Perception snapshot fed into one evaluation pass.
///
/// Built fresh by the caller from world queries and never persisted. The
/// state machine writes only [`time_in_state_ms`](Self::time_in_state_ms),
/// recomputed at the start of every [`evaluate_state`] call.
///
/// [`evaluate_state`]: crate::AgentRecord::evaluate_state
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionContext {
    /// Current health over maximum health.
    pub health_ratio: f32,
    /// `None` when the agent has no target.
    pub distance_to_target: Option<f32>,
    pub target_visible: bool,
    pub nearby_allies: u32,
    pub nearby_enemies: u32,
    pub under_attack: bool,
    /// `None` when the agent was never attacked.
    pub time_since_last_attack_ms: Option<f64>,
    pub time_in_state_ms: f64,
    pub has_path: bool,
    pub is_stuck: bool,
}

impl DecisionContext {
    pub fn new() -> Self {
        Self {
            health_ratio: 1.0,
            distance_to_target: None,
            target_visible: false,
            nearby_allies: 0,
            nearby_enemies: 0,
            under_attack: false,
            time_since_last_attack_ms: None,
            time_in_state_ms: 0.0,
            has_path: false,
            is_stuck: false,
        }
    }

    pub fn with_health(mut self, health_ratio: f32) -> Self {
        self.health_ratio = health_ratio;
        self
    }

    /// Sets the distance to the current target and marks it visible.
    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance_to_target = Some(distance);
        self.target_visible = true;
        self
    }

    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.target_visible = visible;
        self
    }

    pub fn with_allies(mut self, count: u32) -> Self {
        self.nearby_allies = count;
        self
    }

    pub fn with_enemies(mut self, count: u32) -> Self {
        self.nearby_enemies = count;
        self
    }

    pub fn with_under_attack(mut self, under_attack: bool) -> Self {
        self.under_attack = under_attack;
        self
    }

    pub fn with_time_since_last_attack(mut self, elapsed_ms: f64) -> Self {
        self.time_since_last_attack_ms = Some(elapsed_ms);
        self
    }

    pub fn with_path(mut self, has_path: bool) -> Self {
        self.has_path = has_path;
        self
    }

    pub fn with_stuck(mut self, is_stuck: bool) -> Self {
        self.is_stuck = is_stuck;
        self
    }

    /// Clears target information, leaving the rest untouched.
    pub fn without_target(mut self) -> Self {
        self.distance_to_target = None;
        self.target_visible = false;
        self
    }

    /// True when a target exists and lies within `range`.
    #[inline]
    pub fn target_within(&self, range: f32) -> bool {
        self.distance_to_target.is_some_and(|d| d <= range)
    }
}

impl Default for DecisionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let ctx = DecisionContext::new()
            .with_enemies(2)
            .with_distance(50.0)
            .with_health(0.4);
        assert_eq!(ctx.nearby_enemies, 2);
        assert_eq!(ctx.distance_to_target, Some(50.0));
        assert!(ctx.target_visible);
        assert_eq!(ctx.health_ratio, 0.4);
        assert!(ctx.target_within(60.0));
        assert!(!ctx.without_target().target_within(60.0));
    }
}
