//! Personality archetypes and the behavioral traits they seed.
//!
//! Every agent is created with one [`Personality`]. The archetype seeds four
//! scalar [`Traits`] (aggression, fear, curiosity, loyalty) that parameterize
//! transition conditions, plus the default detection and combat scalars in
//! [`CombatStats`]. Traits are fixed once the agent is built.

use crate::error::{MalformedState, Result};

/// Fixed behavioral archetype chosen at creation.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Personality {
    /// Presses the attack, rarely breaks off.
    #[default]
    Aggressive,
    /// Holds back and disengages early.
    Defensive,
    /// Runs at the first sign of trouble.
    Coward,
    /// Fearless; never flees.
    Berserker,
    /// Curious and disciplined, pulls back when outnumbered.
    Tactical,
    /// Sticks close to allies.
    Support,
    /// Holds a post.
    Guardian,
    /// Long sight, follows up on disturbances.
    Hunter,
    /// Weak alone, dangerous in numbers.
    Swarm,
}

impl Personality {
    pub const ALL: [Personality; 9] = [
        Personality::Aggressive,
        Personality::Defensive,
        Personality::Coward,
        Personality::Berserker,
        Personality::Tactical,
        Personality::Support,
        Personality::Guardian,
        Personality::Hunter,
        Personality::Swarm,
    ];

    /// Parses a personality name, falling back to the default archetype.
    pub fn from_name_or_default(name: &str) -> Self {
        name.trim().parse().unwrap_or_default()
    }

    /// Trait values seeded by this archetype.
    pub const fn traits(self) -> Traits {
        let (aggression, fear, curiosity, loyalty) = match self {
            Personality::Aggressive => (0.8, 0.2, 0.4, 0.4),
            Personality::Defensive => (0.3, 0.6, 0.4, 0.6),
            Personality::Coward => (0.1, 0.9, 0.3, 0.2),
            Personality::Berserker => (1.0, 0.0, 0.2, 0.1),
            Personality::Tactical => (0.5, 0.4, 0.6, 0.6),
            Personality::Support => (0.2, 0.5, 0.4, 0.9),
            Personality::Guardian => (0.5, 0.3, 0.3, 0.8),
            Personality::Hunter => (0.7, 0.2, 0.8, 0.3),
            Personality::Swarm => (0.6, 0.3, 0.2, 0.7),
        };
        Traits {
            aggression,
            fear,
            curiosity,
            loyalty,
        }
    }

    /// Detection and combat scalars for this archetype.
    pub fn default_stats(self) -> CombatStats {
        let base = CombatStats::default();
        match self {
            Personality::Coward => CombatStats {
                flee_distance: 400.0,
                ..base
            },
            Personality::Berserker => CombatStats {
                attack_cooldown_ms: 700.0,
                flee_distance: 0.0,
                ..base
            },
            Personality::Tactical => CombatStats {
                attack_range: 120.0,
                field_of_view_deg: 150.0,
                ..base
            },
            Personality::Guardian => CombatStats {
                sight_range: 150.0,
                hearing_range: 300.0,
                ..base
            },
            Personality::Hunter => CombatStats {
                sight_range: 260.0,
                field_of_view_deg: 90.0,
                ..base
            },
            Personality::Swarm => CombatStats {
                attack_range: 40.0,
                attack_cooldown_ms: 800.0,
                ..base
            },
            Personality::Aggressive | Personality::Defensive | Personality::Support => base,
        }
    }
}

/// Four scalar traits in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Traits {
    pub aggression: f32,
    pub fear: f32,
    pub curiosity: f32,
    pub loyalty: f32,
}

impl Traits {
    /// Creates a trait set, clamping every value into [0, 1].
    pub fn new(aggression: f32, fear: f32, curiosity: f32, loyalty: f32) -> Self {
        Self {
            aggression,
            fear,
            curiosity,
            loyalty,
        }
        .clamped()
    }

    /// Copy with every value clamped into [0, 1]. NaN becomes 0.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            aggression: clamp_unit(self.aggression),
            fear: clamp_unit(self.fear),
            curiosity: clamp_unit(self.curiosity),
            loyalty: clamp_unit(self.loyalty),
        }
    }

    /// Fails with [`MalformedState::TraitOutOfRange`] on the first value
    /// outside [0, 1].
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("aggression", self.aggression),
            ("fear", self.fear),
            ("curiosity", self.curiosity),
            ("loyalty", self.loyalty),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MalformedState::TraitOutOfRange { name, value });
            }
        }
        Ok(())
    }
}

impl Default for Traits {
    fn default() -> Self {
        Personality::default().traits()
    }
}

/// Clamps into [0, 1]; NaN maps to 0.
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Detection and combat scalars.
///
/// Distances are in world units, durations in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub sight_range: f32,
    pub hearing_range: f32,
    pub attack_range: f32,
    pub flee_distance: f32,
    pub field_of_view_deg: f32,
    pub attack_cooldown_ms: f64,
}

impl CombatStats {
    pub const DEFAULT_SIGHT_RANGE: f32 = 180.0;
    pub const DEFAULT_HEARING_RANGE: f32 = 240.0;
    pub const DEFAULT_ATTACK_RANGE: f32 = 60.0;
    pub const DEFAULT_FLEE_DISTANCE: f32 = 300.0;
    pub const DEFAULT_FIELD_OF_VIEW_DEG: f32 = 120.0;
    pub const DEFAULT_ATTACK_COOLDOWN_MS: f64 = 1000.0;
}

impl CombatStats {
    /// Copy with every scalar clamped into `[0, MAX]`. NaN becomes 0.
    #[must_use]
    pub fn clamped(self) -> Self {
        fn distance(value: f32) -> f32 {
            if value.is_nan() {
                0.0
            } else {
                value.clamp(0.0, f32::MAX)
            }
        }
        Self {
            sight_range: distance(self.sight_range),
            hearing_range: distance(self.hearing_range),
            attack_range: distance(self.attack_range),
            flee_distance: distance(self.flee_distance),
            field_of_view_deg: distance(self.field_of_view_deg),
            attack_cooldown_ms: if self.attack_cooldown_ms.is_nan() {
                0.0
            } else {
                self.attack_cooldown_ms.clamp(0.0, f64::MAX)
            },
        }
    }
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            sight_range: Self::DEFAULT_SIGHT_RANGE,
            hearing_range: Self::DEFAULT_HEARING_RANGE,
            attack_range: Self::DEFAULT_ATTACK_RANGE,
            flee_distance: Self::DEFAULT_FLEE_DISTANCE,
            field_of_view_deg: Self::DEFAULT_FIELD_OF_VIEW_DEG,
            attack_cooldown_ms: Self::DEFAULT_ATTACK_COOLDOWN_MS,
        }
    }
}
