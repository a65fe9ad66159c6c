//! Steering patterns: turn "where is the target" into a heading.

use crate::geometry::{Vec2, distance, normalize, perpendicular, subtract};
use crate::state::{AgentState, Timestamp};
use crate::traits::Personality;

/// Named steering pattern.
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
pub enum MovementPattern {
    /// Straight at the target.
    #[default]
    Direct,
    /// Strafe around the target once close, otherwise close in.
    Circular,
    /// Direct, with a sinusoidal lateral wobble.
    Zigzag,
    /// Straight away from the target.
    Retreat,
}

impl MovementPattern {
    /// Strafing starts below this multiple of attack range.
    pub const CIRCLE_RANGE_FACTOR: f32 = 1.5;
    pub const ZIGZAG_AMPLITUDE: f32 = 0.5;
    /// Radians per millisecond.
    pub const ZIGZAG_FREQUENCY: f64 = 0.01;

    /// Parses a pattern name; unknown names fall back to [`MovementPattern::Direct`].
    pub fn from_name(name: &str) -> Self {
        name.trim().parse().unwrap_or_default()
    }

    /// Default pattern for an agent in `state`.
    pub fn for_state(state: AgentState, personality: Personality) -> Self {
        match state {
            AgentState::Attacking => MovementPattern::Circular,
            AgentState::Fleeing | AgentState::Retreating => MovementPattern::Retreat,
            AgentState::Seeking
                if matches!(personality, Personality::Swarm | Personality::Hunter) =>
            {
                MovementPattern::Zigzag
            }
            _ => MovementPattern::Direct,
        }
    }
}

/// Heading from `current` given a target at `target`.
///
/// Direct, circular and retreat return unit vectors. Zigzag is not
/// renormalized, so its length swings up to about 1.12. Coincident points
/// yield the zero vector.
pub fn resolve_direction(
    pattern: MovementPattern,
    current: Vec2,
    target: Vec2,
    now: Timestamp,
    attack_range: f32,
) -> Vec2 {
    let to_target = subtract(target, current);
    let direct = normalize(to_target);
    match pattern {
        MovementPattern::Direct => direct,
        MovementPattern::Circular => {
            if distance(current, target) < attack_range * MovementPattern::CIRCLE_RANGE_FACTOR {
                perpendicular(direct)
            } else {
                direct
            }
        }
        MovementPattern::Zigzag => {
            let phase = (now.as_millis() * MovementPattern::ZIGZAG_FREQUENCY).sin() as f32;
            direct + perpendicular(direct) * MovementPattern::ZIGZAG_AMPLITUDE * phase
        }
        MovementPattern::Retreat => normalize(subtract(current, target)),
    }
}
