use std::fmt;
use std::sync::Arc;

use super::condition::Condition;
use crate::agent::AgentRecord;
use crate::config::EngineConfig;
use crate::context::DecisionContext;
use crate::state::AgentState;

/// Lifecycle hook run when a rule fires.
pub type TransitionCallback = Arc<dyn Fn(&mut AgentRecord) + Send + Sync>;

/// One rule of the state machine.
#[derive(Clone)]
pub struct Transition {
    pub from: AgentState,
    pub to: AgentState,
    pub condition: Condition,
    /// Higher wins. Equal priorities resolve to the rule declared first.
    pub priority: i32,
    /// When set, firing this rule blocks re-entry into `to` for this long.
    pub cooldown_ms: Option<f64>,
    pub on_exit: Option<TransitionCallback>,
    pub on_enter: Option<TransitionCallback>,
}

impl Transition {
    pub fn new(from: AgentState, to: AgentState, condition: Condition) -> Self {
        Self {
            from,
            to,
            condition,
            priority: 0,
            cooldown_ms: None,
            on_exit: None,
            on_enter: None,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_cooldown(mut self, cooldown_ms: f64) -> Self {
        self.cooldown_ms = Some(cooldown_ms);
        self
    }

    /// Callback run before the agent leaves `from`.
    pub fn on_exit<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut AgentRecord) + Send + Sync + 'static,
    {
        self.on_exit = Some(Arc::new(callback));
        self
    }

    /// Callback run after the agent entered `to`.
    pub fn on_enter<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut AgentRecord) + Send + Sync + 'static,
    {
        self.on_enter = Some(Arc::new(callback));
        self
    }

    /// True when this rule may fire for the agent right now (cooldowns aside).
    pub fn applies(&self, agent: &AgentRecord, ctx: &DecisionContext) -> bool {
        self.from == agent.current_state() && self.condition.evaluate(agent, ctx)
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("condition", &self.condition)
            .field("priority", &self.priority)
            .field("cooldown_ms", &self.cooldown_ms)
            .field("on_exit", &self.on_exit.is_some())
            .field("on_enter", &self.on_enter.is_some())
            .finish()
    }
}

/// Ordered list of transition rules.
///
/// Declaration order matters: among applicable rules of equal priority, the
/// first one declared is chosen.
#[derive(Clone, Debug, Default)]
pub struct TransitionTable {
    rules: Vec<Transition>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rule set every agent starts with.
    pub fn default_table() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    /// The default rule set with thresholds and durations taken from `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        use AgentState::*;
        use Condition::*;

        let low_health = || LowHealth {
            factor: config.flee_health_factor,
        };
        let rule = Transition::new;

        Self::from(vec![
            rule(Idle, Seeking, EnemyDetected).with_priority(10),
            rule(Idle, Guarding, HasGuardPost).with_priority(2),
            rule(
                Idle,
                Patrolling,
                Condition::all([HasPatrolPath, TimeInState(config.idle_patrol_delay_ms)]),
            )
            .with_priority(1),
            rule(Patrolling, Seeking, EnemyDetected).with_priority(10),
            rule(Patrolling, Investigating, Disturbance).with_priority(5),
            rule(Patrolling, Idle, Condition::not(HasPatrolPath)).with_priority(1),
            rule(Guarding, Seeking, EnemyDetected).with_priority(10),
            rule(Seeking, Fleeing, low_health())
                .with_priority(20)
                .with_cooldown(config.flee_cooldown_ms),
            rule(Seeking, Attacking, TargetInAttackRange).with_priority(10),
            rule(
                Seeking,
                Supporting,
                AllySupport {
                    min_allies: config.support_min_allies,
                },
            )
            .with_priority(8),
            rule(Seeking, Idle, TargetLost).with_priority(5),
            rule(Attacking, Fleeing, low_health())
                .with_priority(20)
                .with_cooldown(config.flee_cooldown_ms),
            rule(
                Attacking,
                Retreating,
                Outnumbered {
                    margin: config.outnumbered_margin,
                },
            )
            .with_priority(15)
            .with_cooldown(config.retreat_cooldown_ms),
            rule(Attacking, Seeking, TargetOutOfAttackRange).with_priority(5),
            rule(
                Fleeing,
                Seeking,
                Condition::all([HealthAbove(config.recover_health_ratio), EnemyDetected]),
            )
            .with_priority(10),
            rule(Fleeing, Idle, SafeDistance).with_priority(5),
            rule(Retreating, Seeking, TimeInState(config.retreat_duration_ms)).with_priority(5),
            rule(Investigating, Seeking, EnemyDetected).with_priority(10),
            rule(Investigating, Idle, TimeInState(config.investigate_duration_ms)).with_priority(1),
            rule(Supporting, Fleeing, low_health())
                .with_priority(20)
                .with_cooldown(config.flee_cooldown_ms),
            rule(Supporting, Attacking, TargetInAttackRange).with_priority(10),
            rule(Supporting, Idle, TargetLost).with_priority(5),
            rule(Stunned, Idle, TimeInState(config.stun_duration_ms)).with_priority(100),
        ])
    }

    pub fn rules(&self) -> &[Transition] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Appends a rule after every existing one.
    pub fn push(&mut self, rule: Transition) {
        self.rules.push(rule);
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Drops every rule leaving `from`.
    pub fn remove_from(&mut self, from: AgentState) {
        self.rules.retain(|rule| rule.from != from);
    }

    /// True when some rule leads from `from` to `to`.
    pub fn connects(&self, from: AgentState, to: AgentState) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.from == from && rule.to == to)
    }

    /// Rules leaving `from`, in declaration order.
    pub fn outbound(&self, from: AgentState) -> impl Iterator<Item = &Transition> {
        self.rules.iter().filter(move |rule| rule.from == from)
    }

    /// Index of the rule that should fire: the applicable rule with the
    /// highest priority, first declared on ties.
    pub fn select(&self, agent: &AgentRecord, ctx: &DecisionContext) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;
        for (index, rule) in self.rules.iter().enumerate() {
            if !rule.applies(agent, ctx) {
                continue;
            }
            if best.is_none_or(|(_, priority)| rule.priority > priority) {
                best = Some((index, rule.priority));
            }
        }
        best.map(|(index, _)| index)
    }
}

impl From<Vec<Transition>> for TransitionTable {
    fn from(rules: Vec<Transition>) -> Self {
        Self { rules }
    }
}

impl Extend<Transition> for TransitionTable {
    fn extend<I: IntoIterator<Item = Transition>>(&mut self, iter: I) {
        self.rules.extend(iter);
    }
}

/// Data-only form of a [`Transition`], as stored in rule files.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionSpec {
    pub from: AgentState,
    pub to: AgentState,
    pub condition: Condition,
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown_ms: Option<f64>,
}

impl TransitionSpec {
    pub fn into_transition(self) -> Transition {
        let mut rule =
            Transition::new(self.from, self.to, self.condition).with_priority(self.priority);
        rule.cooldown_ms = self.cooldown_ms;
        rule
    }
}

impl From<TransitionSpec> for Transition {
    fn from(spec: TransitionSpec) -> Self {
        spec.into_transition()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_shape() {
        let table = TransitionTable::default_table();
        assert_eq!(table.len(), 23);
        assert!(table.connects(AgentState::Idle, AgentState::Seeking));
        assert!(table.connects(AgentState::Stunned, AgentState::Idle));
        assert!(!table.connects(AgentState::Idle, AgentState::Attacking));
        assert_eq!(table.outbound(AgentState::Dead).count(), 0);
    }

    #[test]
    fn flee_rules_carry_cooldown() {
        let table = TransitionTable::default_table();
        for rule in table.rules().iter().filter(|r| r.to == AgentState::Fleeing) {
            assert_eq!(rule.priority, 20);
            assert_eq!(rule.cooldown_ms, Some(5000.0));
        }
    }

    #[test]
    fn config_overrides_thresholds() {
        let config = EngineConfig {
            stun_duration_ms: 250.0,
            ..EngineConfig::default()
        };
        let table = TransitionTable::from_config(&config);
        let stun = table.outbound(AgentState::Stunned).next().unwrap();
        assert_eq!(stun.condition, Condition::TimeInState(250.0));
    }

    #[test]
    #[cfg(feature = "serde")]
    fn data_rule_round_trips_through_json() {
        let spec = TransitionSpec {
            from: AgentState::Guarding,
            to: AgentState::Investigating,
            condition: Condition::Disturbance,
            priority: 4,
            cooldown_ms: None,
        };
        let json = serde_json::to_string(&spec).unwrap();
        let back: TransitionSpec = serde_json::from_str(&json).unwrap();
        let rule = back.into_transition();
        assert_eq!(rule.priority, 4);
        assert!(rule.on_enter.is_none());
    }
}
