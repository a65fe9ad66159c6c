//! Read and inspect agent snapshot files.
//!
//! Decodes `agent_{id}.bin` files written by the file repository.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use game_core::{AgentRecord, AgentSnapshot};

/// Read and inspect an agent snapshot file
#[derive(Parser)]
pub struct ReadSnapshot {
    /// Snapshot file to read (e.g. save/agent_7.bin)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Summary view (state, targets, memory)
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl ReadSnapshot {
    pub fn execute(self) -> Result<()> {
        if !self.file.exists() {
            anyhow::bail!("Snapshot file not found: {}", self.file.display());
        }

        let bytes = std::fs::read(&self.file)
            .with_context(|| format!("Failed to read snapshot file: {}", self.file.display()))?;
        let snapshot = AgentSnapshot::from_bytes(&bytes).with_context(|| {
            format!("Failed to decode snapshot file: {}", self.file.display())
        })?;

        println!(
            "{} {}",
            style("Snapshot File:").bold().cyan(),
            self.file.display()
        );
        println!(
            "{} {}",
            style("File Size:").bold().cyan(),
            format_bytes(bytes.len())
        );
        println!("{} {}", style("Agent:").bold().cyan(), snapshot.id);
        println!();

        match self.format {
            OutputFormat::Summary => print_summary(snapshot)?,
            OutputFormat::Json => println!("{}", snapshot.to_json()?),
            OutputFormat::Debug => println!("{:#?}", snapshot),
        }

        Ok(())
    }
}

fn print_summary(snapshot: AgentSnapshot) -> Result<()> {
    println!("{}", style("=== Agent Summary ===").bold().green());
    println!();

    println!("{}", style("State:").bold().yellow());
    println!(
        "  {} (from {}) since {}",
        snapshot.current_state, snapshot.previous_state, snapshot.state_entered_at
    );
    for (state, until) in &snapshot.cooldowns {
        println!("  Cooldown: {} until {}", state, until);
    }
    println!();

    println!("{}", style("Profile:").bold().yellow());
    println!("  Personality: {}", snapshot.personality);
    let traits = snapshot.traits;
    println!(
        "  Traits: aggression {:.2}, fear {:.2}, curiosity {:.2}, loyalty {:.2}",
        traits.aggression, traits.fear, traits.curiosity, traits.loyalty
    );
    println!(
        "  Ranges: sight {}, attack {}, flee {}",
        snapshot.stats.sight_range, snapshot.stats.attack_range, snapshot.stats.flee_distance
    );
    println!();

    println!("{}", style("Navigation:").bold().yellow());
    println!("  Target: {:?} at {:?}", snapshot.target_id, snapshot.target_position);
    println!(
        "  Patrol: {} waypoints, at {}",
        snapshot.patrol_path.len(),
        snapshot.path_index
    );
    println!(
        "  Path: {}/{} nodes, stuck for {} samples",
        snapshot.path_cursor,
        snapshot.current_path.len(),
        snapshot.stuck_counter
    );
    println!();

    // Restoring validates the snapshot and gives us the threat ordering.
    let agent = AgentRecord::restore(snapshot).context("Snapshot failed validation")?;
    println!(
        "{} ({}/{})",
        style("Threat Memory:").bold().yellow(),
        agent.memory().len(),
        agent.memory().capacity()
    );
    for (entity, entry) in agent.memory().iter() {
        println!(
            "  {} threat {:.2}, damage {:.1}, seen at {:?}",
            entity, entry.threat, entry.damage, entry.last_seen
        );
    }
    if let Some(top) = agent.highest_threat() {
        println!("  Highest: {}", top);
    }
    println!();

    Ok(())
}

fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;

    if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
