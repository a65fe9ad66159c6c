use crate::agent::AgentRecord;
use crate::context::DecisionContext;
use crate::error::{MalformedState, Result};
use crate::state::{AgentState, Timestamp};

impl AgentRecord {
    /// Runs one state-machine step. Returns true iff a transition fired.
    ///
    /// Recomputes `ctx.time_in_state_ms` first, then picks the applicable rule
    /// with the highest priority (first declared on ties). Nothing fires when
    /// that rule targets the current state or its target is on cooldown; no
    /// other candidate is tried in either case.
    ///
    /// Fails with [`MalformedState::ClockRegression`] when `now` precedes the
    /// last state entry.
    pub fn evaluate_state(&mut self, ctx: &mut DecisionContext, now: Timestamp) -> Result<bool> {
        self.check_clock(now)?;
        ctx.time_in_state_ms = now.elapsed_since(self.state_entered_at);

        let Some(index) = self.transitions.select(self, ctx) else {
            return Ok(false);
        };
        let rule = &self.transitions.rules()[index];
        let to = rule.to;

        if to == self.current_state {
            return Ok(false);
        }
        if let Some(until) = self.cooldown_until(to)
            && now < until
        {
            tracing::debug!(
                "agent {} blocked {} -> {}: cooldown until {}",
                self.id,
                self.current_state,
                to,
                until
            );
            return Ok(false);
        }

        let on_exit = rule.on_exit.clone();
        let on_enter = rule.on_enter.clone();
        let cooldown_ms = rule.cooldown_ms;

        if let Some(callback) = on_exit {
            callback(self);
        }
        let from = self.current_state;
        self.enter(to, now);
        if let Some(callback) = on_enter {
            callback(self);
        }
        if let Some(duration) = cooldown_ms {
            self.cooldowns.insert(to, now.after(duration));
        }

        tracing::debug!("agent {} transitioned {} -> {} at {}", self.id, from, to, now);
        Ok(true)
    }

    /// Moves straight to `to`, bypassing the table. No callbacks run and no
    /// cooldown is recorded.
    pub fn force_state(&mut self, to: AgentState, now: Timestamp) -> Result<()> {
        self.check_clock(now)?;
        tracing::debug!(
            "agent {} forced {} -> {} at {}",
            self.id,
            self.current_state,
            to,
            now
        );
        self.enter(to, now);
        Ok(())
    }

    /// Forces the agent into [`AgentState::Dead`].
    pub fn kill(&mut self, now: Timestamp) -> Result<()> {
        self.force_state(AgentState::Dead, now)
    }

    /// Forces the agent into [`AgentState::Stunned`]. The default table
    /// releases it back to idle after the configured stun duration.
    pub fn stun(&mut self, now: Timestamp) -> Result<()> {
        self.force_state(AgentState::Stunned, now)
    }

    /// Milliseconds spent in the current state as of `now`.
    pub fn time_in_state(&self, now: Timestamp) -> f64 {
        now.elapsed_since(self.state_entered_at)
    }

    /// Earliest timestamp at which `state` may be entered again, if limited.
    pub fn cooldown_until(&self, state: AgentState) -> Option<Timestamp> {
        self.cooldowns.get(&state).copied()
    }

    pub fn is_on_cooldown(&self, state: AgentState, now: Timestamp) -> bool {
        self.cooldown_until(state).is_some_and(|until| now < until)
    }

    fn enter(&mut self, to: AgentState, now: Timestamp) {
        self.previous_state = self.current_state;
        self.current_state = to;
        self.state_entered_at = now;
    }

    /// Fails with [`MalformedState::ClockRegression`] when `now` precedes the
    /// last state entry.
    pub fn check_clock(&self, now: Timestamp) -> Result<()> {
        if now < self.state_entered_at {
            return Err(MalformedState::ClockRegression {
                now: now.as_millis(),
                entered_at: self.state_entered_at.as_millis(),
            });
        }
        Ok(())
    }
}
