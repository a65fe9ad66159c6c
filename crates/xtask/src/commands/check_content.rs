//! Load every data file in a content directory and report what it holds.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use game_content::ContentFactory;
use game_core::TransitionTable;

/// Load and validate a content directory
#[derive(Parser)]
pub struct CheckContent {
    /// Content directory (defaults to the bundled data)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,
}

impl CheckContent {
    pub fn execute(self) -> Result<()> {
        let factory = match self.dir {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        };
        println!(
            "{} {}",
            style("Content:").bold().cyan(),
            factory.data_dir().display()
        );
        println!();

        let config = factory.load_config().context("engine.toml")?;
        let table = TransitionTable::from_config(&config);
        println!("{}", style("Engine config:").bold().yellow());
        println!("  Flee below {:.2} x fear", config.flee_health_factor);
        println!("  Memory capacity {}", config.memory_capacity);
        println!("  Update interval {}ms", config.update_interval_ms);
        println!("  Default table {} rules", table.len());
        println!();

        let templates = factory.load_templates().context("agents.ron")?;
        println!("{} {}", style("Templates:").bold().yellow(), templates.len());
        for template in &templates {
            println!(
                "  {:<12} {:<10} {} waypoints{}",
                template.name,
                template.personality.to_string(),
                template.patrol_path.len(),
                if template.guard_post.is_some() {
                    ", guard post"
                } else {
                    ""
                }
            );
        }
        println!();

        let rules_dir = factory.data_dir().join("rules");
        let mut names = Vec::new();
        if rules_dir.exists() {
            for entry in std::fs::read_dir(&rules_dir)
                .with_context(|| format!("Failed to read {}", rules_dir.display()))?
            {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("ron")
                    && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();

        println!("{} {}", style("Rule sets:").bold().yellow(), names.len());
        for name in &names {
            let specs = factory
                .load_rules(name)
                .with_context(|| format!("rules/{}.ron", name))?;
            println!("  {}", style(name).bold());
            for spec in &specs {
                println!(
                    "    {} -> {} (priority {}) on {:?}",
                    spec.from, spec.to, spec.priority, spec.condition
                );
            }
        }
        println!();

        println!("{}", style("All content loaded").bold().green());
        Ok(())
    }
}
