//! Run one agent against a scripted enemy and print every decision.
//!
//! The enemy walks straight at the agent and hits it whenever it is within
//! reach. Health drains on hits and recovers slowly otherwise, so most
//! personalities cycle through seeking, attacking and fleeing.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use game_content::{AgentTemplate, ContentFactory};
use game_core::{
    AgentState, DecisionContext, EngineConfig, EntityRef, Personality, StaticLookup, Timestamp,
    Vec2,
};
use runtime::{
    AgentDriver, Decision, FileSnapshotRepository, SnapshotRepository, spawn_with_rules,
};

const AGENT: EntityRef = EntityRef(1);
const ENEMY: EntityRef = EntityRef(1000);
const ENEMY_START: Vec2 = Vec2::new(250.0, 0.0);
const ENEMY_SPEED: f32 = 6.0;
const ENEMY_REACH: f32 = 40.0;
const ENEMY_DAMAGE: f32 = 12.0;
const AGENT_SPEED: f32 = 8.0;
const HEALTH_PER_HIT: f32 = 0.08;
const HEALTH_REGEN: f32 = 0.01;

/// Run one agent against a scripted approaching enemy
#[derive(Parser)]
pub struct Simulate {
    /// Personality to simulate (ignored when --template is given)
    #[arg(short, long, default_value = "aggressive")]
    personality: String,

    /// Agent template name from the content directory
    #[arg(short, long)]
    template: Option<String>,

    /// Extra rule set from `rules/{NAME}.ron`
    #[arg(short, long, value_name = "NAME")]
    rules: Option<String>,

    /// Number of ticks to run
    #[arg(short = 'n', long, default_value_t = 40)]
    ticks: u32,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = 100.0)]
    step_ms: f64,

    /// Content directory (defaults to the bundled data)
    #[arg(short, long, value_name = "DIR")]
    content: Option<PathBuf>,

    /// Save the final snapshot into this directory
    #[arg(short, long, value_name = "DIR")]
    save: Option<PathBuf>,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let factory = match &self.content {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        };
        let config = factory.load_config().unwrap_or_else(|e| {
            tracing::warn!("using default engine config: {e:#}");
            EngineConfig::default()
        });

        let template = self.resolve_template(&factory)?;
        let rules = match &self.rules {
            Some(name) => factory
                .load_rules(name)
                .with_context(|| format!("Failed to load rule set '{}'", name))?,
            None => Vec::new(),
        };

        let mut agent = spawn_with_rules(
            &template,
            AGENT,
            &config,
            Timestamp::ZERO,
            rules.into_iter().map(|spec| spec.into_transition()),
        );
        let driver = AgentDriver::new(config);

        println!(
            "{} {} ({}), {} ticks of {}ms",
            style("Simulating").bold().cyan(),
            template.name,
            template.personality,
            self.ticks,
            self.step_ms
        );
        println!();

        let mut lookup = StaticLookup::new();
        let mut position = Vec2::ZERO;
        let mut enemy = ENEMY_START;
        let mut health = 1.0_f32;

        for tick in 1..=self.ticks {
            let now = Timestamp::from_millis(f64::from(tick) * self.step_ms)?;
            lookup.insert(ENEMY, enemy);

            let distance = position.distance(enemy);
            let visible = distance <= agent.stats().sight_range;
            let hit = distance <= ENEMY_REACH && agent.current_state() != AgentState::Dead;

            if hit {
                health = (health - HEALTH_PER_HIT).max(0.0);
                agent.record_damage(ENEMY, ENEMY_DAMAGE);
            } else {
                health = (health + HEALTH_REGEN).min(1.0);
            }
            if visible {
                agent.record_sighting(ENEMY, enemy);
                if agent.target_id().is_none() {
                    agent.set_target(ENEMY, Some(enemy));
                }
            }
            agent.reselect_target(&lookup);

            if health <= 0.0 && agent.current_state() != AgentState::Dead {
                agent.kill(now)?;
                println!("{:>8} {}", now.to_string(), style("agent died").bold().red());
                break;
            }

            let mut ctx = DecisionContext::new()
                .with_health(health)
                .with_under_attack(hit);
            if visible {
                ctx = ctx.with_enemies(1).with_distance(distance);
            }

            let target = agent.target_position().unwrap_or(enemy);
            let due = driver.tick_if_due(&mut agent, &mut ctx, now, position, target)?;
            if let Some(decision) = due {
                print_decision(now, health, distance, &decision);
                position += decision.direction * AGENT_SPEED;
            }

            enemy += (position - enemy).normalize_or_zero() * ENEMY_SPEED;
        }

        println!();
        println!(
            "{} {} after {} ({} threats remembered)",
            style("Final state:").bold().yellow(),
            agent.current_state(),
            agent.previous_state(),
            agent.memory().len()
        );

        if let Some(dir) = &self.save {
            let repo = FileSnapshotRepository::new(dir)?;
            repo.save_agent(&agent)?;
            println!(
                "{} {}",
                style("Saved:").bold().yellow(),
                repo.snapshot_path(agent.id()).display()
            );
        }

        Ok(())
    }

    fn resolve_template(&self, factory: &ContentFactory) -> Result<AgentTemplate> {
        let Some(name) = &self.template else {
            let personality = Personality::from_name_or_default(&self.personality);
            return Ok(AgentTemplate::new(personality.as_ref(), personality));
        };

        let templates = factory
            .load_templates()
            .context("Failed to load agent templates")?;
        templates
            .into_iter()
            .find(|t| &t.name == name)
            .with_context(|| format!("No agent template named '{}'", name))
    }
}

fn print_decision(now: Timestamp, health: f32, distance: f32, decision: &Decision) {
    let state = if decision.transitioned {
        style(decision.state.to_string()).bold().green()
    } else {
        style(decision.state.to_string()).dim()
    };
    println!(
        "{:>8} hp {:>4.0}% dist {:>6.1}  {:<14} {:<9} dir ({:>5.2}, {:>5.2})  {:?}",
        now.to_string(),
        health * 100.0,
        distance,
        state,
        decision.pattern.to_string(),
        decision.direction.x,
        decision.direction.y,
        decision.intent
    );
}
