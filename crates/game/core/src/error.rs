//! Error infrastructure for game-core.
//!
//! The decision engine favors silent, well-defined no-ops for expected edge
//! cases (missing target, empty path, empty tree, unknown names). Only genuine
//! contract violations surface as errors, and they all share one type:
//! [`MalformedState`]. These indicate upstream corruption that the owning
//! system must not silently absorb; it decides whether to disable the agent,
//! reset it, or destroy the entity.
//!
//! Nothing in this crate retries. Computation is synchronous and pure, so a
//! failure is returned once to the caller.

use thiserror::Error;

/// Contract violation detected while evaluating or restoring an agent.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MalformedState {
    /// A timestamp was negative, NaN or infinite.
    #[error("invalid timestamp {value}: engine time must be finite and non-negative")]
    InvalidTimestamp { value: f64 },

    /// The clock went backwards relative to the last state transition.
    #[error("clock regression: now={now}ms is earlier than state entry at {entered_at}ms")]
    ClockRegression { now: f64, entered_at: f64 },

    /// A personality trait was outside [0, 1].
    #[error("trait `{name}` out of range: {value} (expected 0.0..=1.0)")]
    TraitOutOfRange { name: &'static str, value: f32 },

    /// A snapshot decoded but describes an impossible agent.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// A snapshot failed to decode (truncated payload, missing field, ...).
    #[error("snapshot decode failed: {0}")]
    Decode(String),

    /// A snapshot failed to encode.
    #[error("snapshot encode failed: {0}")]
    Encode(String),
}

impl MalformedState {
    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, metrics, and testing.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTimestamp { .. } => "invalid_timestamp",
            Self::ClockRegression { .. } => "clock_regression",
            Self::TraitOutOfRange { .. } => "trait_out_of_range",
            Self::InvalidSnapshot(_) => "invalid_snapshot",
            Self::Decode(_) => "decode",
            Self::Encode(_) => "encode",
        }
    }
}

pub type Result<T> = std::result::Result<T, MalformedState>;
