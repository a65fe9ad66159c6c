//! Data-driven content definitions and loaders.
//!
//! This crate houses the data files that tune the decision engine and the
//! loaders that read them:
//! - Engine tuning (TOML, [`game_core::EngineConfig`])
//! - Extra transition rules (RON, [`game_core::TransitionSpec`])
//! - Agent templates (RON, [`AgentTemplate`])
//!
//! Content only seeds agents at construction; it never appears in snapshots.

pub mod templates;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use templates::AgentTemplate;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, RuleLoader, TemplateLoader};
