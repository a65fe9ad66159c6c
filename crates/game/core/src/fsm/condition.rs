use std::fmt;
use std::sync::Arc;

use crate::agent::AgentRecord;
use crate::context::DecisionContext;

/// Guard of a transition rule.
///
/// Every variant except [`Condition::Custom`] is plain data, so rule sets can
/// be written to and read from files. Conditions only read; they never mutate
/// the agent or the context.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    Always,
    /// An enemy is nearby and the target lies within sight range.
    EnemyDetected,
    TargetInAttackRange,
    /// A target exists but lies beyond attack range.
    TargetOutOfAttackRange,
    /// No enemies nearby, or the target is gone or beyond sight range.
    TargetLost,
    /// Health ratio below `fear * factor`.
    LowHealth { factor: f32 },
    /// Health ratio at or above the threshold.
    HealthAbove(f32),
    /// No enemies nearby, or the target is at least flee distance away.
    SafeDistance,
    UnderAttack,
    /// More than `margin` extra enemies versus allies, and the agent is not
    /// aggressive enough to hold.
    Outnumbered { margin: u32 },
    /// Loyal agent with at least `min_allies` allies nearby.
    AllySupport { min_allies: u32 },
    /// Hit by something it cannot see, and curious enough to look.
    Disturbance,
    /// Time in the current state reached the given milliseconds.
    TimeInState(f64),
    HasPatrolPath,
    HasGuardPost,
    Stuck,
    All(Vec<Condition>),
    Any(Vec<Condition>),
    Not(Box<Condition>),
    /// Closure guard for rules built in code. Never serialized.
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(CustomCondition),
}

impl Condition {
    const AGGRESSION_HOLD: f32 = 0.5;
    const LOYALTY_SUPPORT: f32 = 0.6;
    const CURIOSITY_INVESTIGATE: f32 = 0.3;

    /// Wraps a closure as a condition.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&AgentRecord, &DecisionContext) -> bool + Send + Sync + 'static,
    {
        Condition::Custom(CustomCondition(Arc::new(predicate)))
    }

    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::All(conditions.into_iter().collect())
    }

    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Any(conditions.into_iter().collect())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(condition: Condition) -> Self {
        Condition::Not(Box::new(condition))
    }

    /// Returns true when this condition or a nested one is a closure.
    pub fn is_custom(&self) -> bool {
        match self {
            Condition::Custom(_) => true,
            Condition::All(items) | Condition::Any(items) => items.iter().any(Self::is_custom),
            Condition::Not(inner) => inner.is_custom(),
            _ => false,
        }
    }

    pub fn evaluate(&self, agent: &AgentRecord, ctx: &DecisionContext) -> bool {
        let traits = agent.traits();
        let stats = agent.stats();
        match self {
            Condition::Always => true,
            Condition::EnemyDetected => {
                ctx.nearby_enemies > 0 && ctx.target_within(stats.sight_range)
            }
            Condition::TargetInAttackRange => ctx.target_within(stats.attack_range),
            Condition::TargetOutOfAttackRange => ctx
                .distance_to_target
                .is_some_and(|d| d > stats.attack_range),
            Condition::TargetLost => {
                ctx.nearby_enemies == 0 || !ctx.target_within(stats.sight_range)
            }
            Condition::LowHealth { factor } => ctx.health_ratio < traits.fear * factor,
            Condition::HealthAbove(threshold) => ctx.health_ratio >= *threshold,
            Condition::SafeDistance => {
                ctx.nearby_enemies == 0
                    || ctx
                        .distance_to_target
                        .is_none_or(|d| d >= stats.flee_distance)
            }
            Condition::UnderAttack => ctx.under_attack,
            Condition::Outnumbered { margin } => {
                ctx.nearby_enemies > ctx.nearby_allies.saturating_add(*margin)
                    && traits.aggression < Self::AGGRESSION_HOLD
            }
            Condition::AllySupport { min_allies } => {
                traits.loyalty >= Self::LOYALTY_SUPPORT && ctx.nearby_allies >= *min_allies
            }
            Condition::Disturbance => {
                ctx.under_attack
                    && !ctx.target_visible
                    && traits.curiosity >= Self::CURIOSITY_INVESTIGATE
            }
            Condition::TimeInState(ms) => ctx.time_in_state_ms >= *ms,
            Condition::HasPatrolPath => agent.has_patrol_path(),
            Condition::HasGuardPost => agent.guard_position().is_some(),
            Condition::Stuck => ctx.is_stuck,
            Condition::All(items) => items.iter().all(|c| c.evaluate(agent, ctx)),
            Condition::Any(items) => items.iter().any(|c| c.evaluate(agent, ctx)),
            Condition::Not(inner) => !inner.evaluate(agent, ctx),
            Condition::Custom(custom) => (custom.0)(agent, ctx),
        }
    }
}

/// Shared closure behind [`Condition::Custom`].
#[derive(Clone)]
pub struct CustomCondition(pub Arc<dyn Fn(&AgentRecord, &DecisionContext) -> bool + Send + Sync>);

impl fmt::Debug for CustomCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomCondition(..)")
    }
}

/// Two custom conditions are equal only when they share the same closure.
impl PartialEq for CustomCondition {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EntityRef, Timestamp};
    use crate::traits::Personality;

    fn agent(personality: Personality) -> AgentRecord {
        AgentRecord::new(EntityRef(1), personality, Timestamp::ZERO)
    }

    #[test]
    fn detection_uses_sight_range() {
        let agent = agent(Personality::Defensive);
        let near = DecisionContext::new().with_enemies(1).with_distance(50.0);
        let far = DecisionContext::new().with_enemies(1).with_distance(500.0);
        assert!(Condition::EnemyDetected.evaluate(&agent, &near));
        assert!(!Condition::EnemyDetected.evaluate(&agent, &far));
        assert!(Condition::TargetLost.evaluate(&agent, &far));
        assert!(Condition::TargetLost.evaluate(&agent, &DecisionContext::new()));
    }

    #[test]
    fn low_health_scales_with_fear() {
        let ctx = DecisionContext::new().with_health(0.15);
        let low = Condition::LowHealth { factor: 0.5 };
        assert!(low.evaluate(&agent(Personality::Defensive), &ctx));
        assert!(!low.evaluate(&agent(Personality::Berserker), &ctx));
    }

    #[test]
    fn outnumbered_requires_low_aggression() {
        let ctx = DecisionContext::new().with_enemies(5).with_allies(1);
        let rule = Condition::Outnumbered { margin: 2 };
        assert!(rule.evaluate(&agent(Personality::Coward), &ctx));
        assert!(!rule.evaluate(&agent(Personality::Aggressive), &ctx));
    }

    #[test]
    fn combinators_and_custom() {
        let agent = agent(Personality::Tactical);
        let ctx = DecisionContext::new().with_under_attack(true);
        let rule = Condition::all([
            Condition::UnderAttack,
            Condition::not(Condition::Stuck),
            Condition::any([Condition::HasGuardPost, Condition::custom(|_, c| c.under_attack)]),
        ]);
        assert!(rule.evaluate(&agent, &ctx));
        assert!(rule.is_custom());
        assert!(Condition::Disturbance.evaluate(&agent, &ctx));
    }

    #[test]
    #[cfg(feature = "serde")]
    fn data_conditions_serialize() {
        let rule = Condition::all([Condition::HasPatrolPath, Condition::TimeInState(2000.0)]);
        let json = serde_json::to_string(&rule).unwrap();
        let back: Condition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }
}
