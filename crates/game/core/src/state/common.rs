use std::fmt;

use crate::error::{MalformedState, Result};

/// Weak reference to another entity.
///
/// Lookup only: holding an `EntityRef` carries no ownership or lifetime
/// guarantee. The referenced entity may be destroyed independently, so every
/// resolution goes through an [`EntityLookup`](crate::EntityLookup) and a miss
/// is a normal outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityRef(pub u32);

impl EntityRef {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Engine time in milliseconds.
///
/// Always finite and non-negative: construction (including deserialization)
/// rejects anything else with [`MalformedState::InvalidTimestamp`]. The engine
/// never reads the wall clock itself; callers supply a monotonic source.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct Timestamp(f64);

impl Timestamp {
    pub const ZERO: Self = Self(0.0);

    /// Validates a raw millisecond value.
    pub fn from_millis(millis: f64) -> Result<Self> {
        if millis.is_finite() && millis >= 0.0 {
            Ok(Self(millis))
        } else {
            Err(MalformedState::InvalidTimestamp { value: millis })
        }
    }

    #[inline]
    pub const fn as_millis(self) -> f64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, saturating at zero.
    #[inline]
    pub fn elapsed_since(self, earlier: Timestamp) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }

    /// This timestamp shifted forward by `duration_ms`.
    ///
    /// Negative or non-finite durations count as zero, and the result never
    /// overflows to infinity.
    pub fn after(self, duration_ms: f64) -> Timestamp {
        let duration = if duration_ms.is_finite() {
            duration_ms.max(0.0)
        } else {
            0.0
        };
        Self((self.0 + duration).min(f64::MAX))
    }
}

impl TryFrom<f64> for Timestamp {
    type Error = MalformedState;

    fn try_from(value: f64) -> Result<Self> {
        Self::from_millis(value)
    }
}

impl From<Timestamp> for f64 {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_and_nan() {
        assert!(matches!(
            Timestamp::from_millis(-1.0),
            Err(MalformedState::InvalidTimestamp { .. })
        ));
        assert!(Timestamp::from_millis(f64::NAN).is_err());
        assert!(Timestamp::from_millis(f64::INFINITY).is_err());
        assert!(Timestamp::from_millis(0.0).is_ok());
    }

    #[test]
    fn elapsed_saturates() {
        let early = Timestamp::from_millis(100.0).unwrap();
        let late = Timestamp::from_millis(250.0).unwrap();
        assert_eq!(late.elapsed_since(early), 150.0);
        assert_eq!(early.elapsed_since(late), 0.0);
    }

    #[test]
    fn after_ignores_bad_durations() {
        let t = Timestamp::from_millis(10.0).unwrap();
        assert_eq!(t.after(5.0).as_millis(), 15.0);
        assert_eq!(t.after(-5.0).as_millis(), 10.0);
        assert_eq!(t.after(f64::NAN).as_millis(), 10.0);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn deserialization_validates() {
        let ok: Timestamp = serde_json::from_str("42.5").unwrap();
        assert_eq!(ok.as_millis(), 42.5);
        assert!(serde_json::from_str::<Timestamp>("-3.0").is_err());
    }

    #[test]
    fn entity_ref_display() {
        assert_eq!(EntityRef(7).to_string(), "#7");
    }
}
