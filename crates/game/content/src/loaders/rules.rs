//! Transition rule loader.
//!
//! Rule files are RON lists of [`TransitionSpec`]:
//!
//! ```ron
//! [
//!     (from: Guarding, to: Investigating, condition: Disturbance, priority: 5),
//!     (from: Attacking, to: Retreating, condition: Outnumbered(margin: 1),
//!      priority: 16, cooldown_ms: Some(2000.0)),
//! ]
//! ```

use std::path::Path;

use game_core::{AgentState, Transition, TransitionSpec};

use crate::loaders::{LoadResult, read_file};

/// Loader for data-only transition rules.
pub struct RuleLoader;

impl RuleLoader {
    /// Load rule specs from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<TransitionSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load rules from {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<TransitionSpec>> {
        let specs: Vec<TransitionSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules RON: {}", e))?;
        for spec in &specs {
            Self::check(spec);
        }
        Ok(specs)
    }

    /// Load a RON file and convert every spec into a [`Transition`], ready to
    /// append to an agent's table.
    pub fn load_transitions(path: &Path) -> LoadResult<Vec<Transition>> {
        Ok(Self::load(path)?
            .into_iter()
            .map(TransitionSpec::into_transition)
            .collect())
    }

    /// The rule set shipped with this crate: guards investigate disturbances
    /// and stuck seekers give up.
    pub fn builtin() -> LoadResult<Vec<TransitionSpec>> {
        Self::parse(include_str!("../../data/rules/guard_investigate.ron"))
    }

    fn check(spec: &TransitionSpec) {
        if spec.from == spec.to {
            tracing::warn!(
                "rule {} -> {} targets its own state and will never fire",
                spec.from,
                spec.to
            );
        }
        if spec.from == AgentState::Dead {
            tracing::warn!("rule {} -> {} leaves Dead", spec.from, spec.to);
        }
        if let Some(cooldown) = spec.cooldown_ms
            && !(cooldown.is_finite() && cooldown >= 0.0)
        {
            tracing::warn!(
                "rule {} -> {} has cooldown {}; it will be ignored",
                spec.from,
                spec.to,
                cooldown
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use game_core::{AgentRecord, Condition, DecisionContext, EntityRef, Personality, Timestamp};

    use super::*;

    #[test]
    fn builtin_rules_parse() {
        let specs = RuleLoader::builtin().expect("builtin rules parse");
        assert!(!specs.is_empty());
        assert!(
            specs
                .iter()
                .any(|s| s.from == AgentState::Guarding && s.to == AgentState::Investigating)
        );
    }

    #[test]
    fn loaded_rules_extend_an_agent() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[(from: Idle, to: Stunned, condition: All([UnderAttack, Stuck]), priority: 50)]"
        )
        .unwrap();

        let rules = RuleLoader::load_transitions(file.path()).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(
            rules[0].condition,
            Condition::all([Condition::UnderAttack, Condition::Stuck])
        );

        let mut agent = AgentRecord::new(EntityRef(1), Personality::Coward, Timestamp::ZERO);
        agent.transitions_mut().extend(rules);
        let mut ctx = DecisionContext::new().with_under_attack(true).with_stuck(true);
        assert!(agent.evaluate_state(&mut ctx, Timestamp::ZERO).unwrap());
        assert_eq!(agent.current_state(), AgentState::Stunned);
    }

    #[test]
    fn defaults_apply_to_omitted_fields() {
        let specs = RuleLoader::parse("[(from: Fleeing, to: Idle, condition: Always)]").unwrap();
        assert_eq!(specs[0].priority, 0);
        assert_eq!(specs[0].cooldown_ms, None);
    }

    #[test]
    fn unknown_condition_is_rejected() {
        assert!(RuleLoader::parse("[(from: Idle, to: Seeking, condition: Teleport)]").is_err());
    }
}
