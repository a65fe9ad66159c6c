use crate::geometry::{Vec2, distance};

use super::AgentRecord;

/// What happens when the patrol cursor passes the last waypoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PathEndPolicy {
    /// Start over from the first waypoint.
    #[default]
    Wrap,
    /// Stay on the last waypoint.
    Halt,
}

impl AgentRecord {
    pub fn patrol_path(&self) -> &[Vec2] {
        &self.patrol_path
    }

    pub fn has_patrol_path(&self) -> bool {
        !self.patrol_path.is_empty()
    }

    /// Replaces the patrol route and rewinds the cursor.
    pub fn set_patrol_path(&mut self, waypoints: Vec<Vec2>) {
        self.patrol_path = waypoints;
        self.path_index = 0;
    }

    pub fn path_index(&self) -> usize {
        self.path_index
    }

    /// Waypoint the agent is heading to, `None` without a patrol route.
    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.patrol_path.get(self.path_index).copied()
    }

    /// Moves the cursor to the next waypoint and returns it.
    pub fn advance_waypoint(&mut self, policy: PathEndPolicy) -> Option<Vec2> {
        let len = self.patrol_path.len();
        if len == 0 {
            return None;
        }
        self.path_index = match policy {
            PathEndPolicy::Wrap => (self.path_index + 1) % len,
            PathEndPolicy::Halt => (self.path_index + 1).min(len - 1),
        };
        self.current_waypoint()
    }

    pub fn current_path(&self) -> &[Vec2] {
        &self.current_path
    }

    pub fn path_cursor(&self) -> usize {
        self.path_cursor
    }

    /// Stores a pathfinder route and rewinds the cursor.
    pub fn set_path(&mut self, waypoints: Vec<Vec2>) {
        self.current_path = waypoints;
        self.path_cursor = 0;
    }

    /// Next node of the pathfinder route, `None` once exhausted.
    pub fn next_path_node(&self) -> Option<Vec2> {
        self.current_path.get(self.path_cursor).copied()
    }

    /// Steps past the current node. Returns true while nodes remain.
    pub fn advance_path(&mut self) -> bool {
        if self.path_cursor < self.current_path.len() {
            self.path_cursor += 1;
        }
        self.path_cursor < self.current_path.len()
    }

    pub fn clear_path(&mut self) {
        self.current_path.clear();
        self.path_cursor = 0;
    }

    pub fn has_path(&self) -> bool {
        self.next_path_node().is_some()
    }

    /// Samples the agent's position for stuck detection.
    ///
    /// Moving less than `threshold` since the previous sample bumps the stuck
    /// counter; anything else resets it.
    pub fn update_stuck(&mut self, position: Vec2, threshold: f32) {
        match self.last_known_position {
            Some(last) if distance(last, position) < threshold => {
                self.stuck_counter = self.stuck_counter.saturating_add(1);
            }
            _ => self.stuck_counter = 0,
        }
        self.last_known_position = Some(position);
    }

    pub fn is_stuck(&self, limit: u32) -> bool {
        self.stuck_counter >= limit
    }

    pub fn stuck_counter(&self) -> u32 {
        self.stuck_counter
    }

    pub fn last_known_position(&self) -> Option<Vec2> {
        self.last_known_position
    }
}
