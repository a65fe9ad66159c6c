/// Coarse behavioral phase of an agent.
///
/// Exactly one phase is active at a time. The state machine moves between
/// phases only along declared transition rules; [`AgentState::Dead`] and
/// [`AgentState::Stunned`] are normally entered through forced transitions.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AgentState {
    #[default]
    Idle,
    #[strum(to_string = "patrolling", serialize = "patrol")]
    Patrolling,
    /// Closing in on a detected target.
    #[strum(to_string = "seeking", serialize = "seek", serialize = "chase")]
    Seeking,
    #[strum(to_string = "attacking", serialize = "attack")]
    Attacking,
    #[strum(to_string = "fleeing", serialize = "flee")]
    Fleeing,
    #[strum(to_string = "investigating", serialize = "investigate")]
    Investigating,
    #[strum(to_string = "retreating", serialize = "retreat")]
    Retreating,
    #[strum(to_string = "supporting", serialize = "support")]
    Supporting,
    #[strum(to_string = "guarding", serialize = "guard")]
    Guarding,
    Stunned,
    Dead,
}

impl AgentState {
    /// All phases in declaration order.
    pub const ALL: [AgentState; 11] = [
        AgentState::Idle,
        AgentState::Patrolling,
        AgentState::Seeking,
        AgentState::Attacking,
        AgentState::Fleeing,
        AgentState::Investigating,
        AgentState::Retreating,
        AgentState::Supporting,
        AgentState::Guarding,
        AgentState::Stunned,
        AgentState::Dead,
    ];

    /// Parses a phase name, falling back to [`AgentState::Idle`] for unknown names.
    pub fn from_name_or_default(name: &str) -> Self {
        name.trim().parse().unwrap_or_default()
    }

    /// Returns true while the agent is engaged with a hostile target.
    pub const fn is_engaged(self) -> bool {
        matches!(
            self,
            AgentState::Seeking | AgentState::Attacking | AgentState::Supporting
        )
    }

    /// Returns true when the agent should not act on its own.
    pub const fn is_incapacitated(self) -> bool {
        matches!(self, AgentState::Stunned | AgentState::Dead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("seeking".parse::<AgentState>().unwrap(), AgentState::Seeking);
        assert_eq!("Chase".parse::<AgentState>().unwrap(), AgentState::Seeking);
        assert_eq!("GUARD".parse::<AgentState>().unwrap(), AgentState::Guarding);
        assert_eq!(AgentState::Attacking.to_string(), "attacking");
    }

    #[test]
    fn unknown_name_falls_back_to_idle() {
        assert_eq!(AgentState::from_name_or_default("dancing"), AgentState::Idle);
        assert_eq!(AgentState::from_name_or_default(" dead "), AgentState::Dead);
    }
}
