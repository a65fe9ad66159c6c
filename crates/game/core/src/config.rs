/// Tunable parameters of the decision engine.
///
/// Every field has a default, so a partial TOML table only overrides the keys
/// it names. [`crate::TransitionTable::from_config`] reads the thresholds and
/// durations; [`crate::AgentRecord`] reads the memory and throttling values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Multiplied by the fear trait to get the health ratio below which an
    /// engaged agent flees.
    pub flee_health_factor: f32,
    /// Health ratio a fleeing agent needs before it re-engages.
    pub recover_health_ratio: f32,
    pub flee_cooldown_ms: f64,
    pub retreat_cooldown_ms: f64,
    /// Time spent retreating before the agent seeks again.
    pub retreat_duration_ms: f64,
    pub investigate_duration_ms: f64,
    /// Idle time before an agent with a patrol path starts patrolling.
    pub idle_patrol_delay_ms: f64,
    pub stun_duration_ms: f64,
    /// Enemies must exceed allies by more than this to count as outnumbered.
    pub outnumbered_margin: u32,
    pub support_min_allies: u32,

    /// Maximum number of hostile entities tracked in threat memory.
    pub memory_capacity: usize,
    /// Movement below this distance between samples counts as stuck.
    pub stuck_distance: f32,
    /// Consecutive stuck samples before `is_stuck` reports true.
    pub stuck_limit: u32,
    pub update_interval_ms: f64,
}

impl EngineConfig {
    pub const DEFAULT_FLEE_HEALTH_FACTOR: f32 = 0.5;
    pub const DEFAULT_RECOVER_HEALTH_RATIO: f32 = 0.6;
    pub const DEFAULT_FLEE_COOLDOWN_MS: f64 = 5000.0;
    pub const DEFAULT_RETREAT_COOLDOWN_MS: f64 = 3000.0;
    pub const DEFAULT_RETREAT_DURATION_MS: f64 = 1500.0;
    pub const DEFAULT_INVESTIGATE_DURATION_MS: f64 = 3000.0;
    pub const DEFAULT_IDLE_PATROL_DELAY_MS: f64 = 2000.0;
    pub const DEFAULT_STUN_DURATION_MS: f64 = 1000.0;
    pub const DEFAULT_OUTNUMBERED_MARGIN: u32 = 2;
    pub const DEFAULT_SUPPORT_MIN_ALLIES: u32 = 2;

    pub const DEFAULT_MEMORY_CAPACITY: usize = 64;
    pub const DEFAULT_STUCK_DISTANCE: f32 = 1.0;
    pub const DEFAULT_STUCK_LIMIT: u32 = 30;
    pub const DEFAULT_UPDATE_INTERVAL_MS: f64 = 100.0;

    pub fn new() -> Self {
        Self {
            flee_health_factor: Self::DEFAULT_FLEE_HEALTH_FACTOR,
            recover_health_ratio: Self::DEFAULT_RECOVER_HEALTH_RATIO,
            flee_cooldown_ms: Self::DEFAULT_FLEE_COOLDOWN_MS,
            retreat_cooldown_ms: Self::DEFAULT_RETREAT_COOLDOWN_MS,
            retreat_duration_ms: Self::DEFAULT_RETREAT_DURATION_MS,
            investigate_duration_ms: Self::DEFAULT_INVESTIGATE_DURATION_MS,
            idle_patrol_delay_ms: Self::DEFAULT_IDLE_PATROL_DELAY_MS,
            stun_duration_ms: Self::DEFAULT_STUN_DURATION_MS,
            outnumbered_margin: Self::DEFAULT_OUTNUMBERED_MARGIN,
            support_min_allies: Self::DEFAULT_SUPPORT_MIN_ALLIES,
            memory_capacity: Self::DEFAULT_MEMORY_CAPACITY,
            stuck_distance: Self::DEFAULT_STUCK_DISTANCE,
            stuck_limit: Self::DEFAULT_STUCK_LIMIT,
            update_interval_ms: Self::DEFAULT_UPDATE_INTERVAL_MS,
        }
    }

    pub fn with_memory_capacity(mut self, memory_capacity: usize) -> Self {
        self.memory_capacity = memory_capacity;
        self
    }

    pub fn with_update_interval(mut self, update_interval_ms: f64) -> Self {
        self.update_interval_ms = update_interval_ms;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
