//! Algebraic behavior tree interpreter for real-time agent simulations.
//!
//! This library provides a minimal, deterministic behavior tree implementation
//! designed to be evaluated for hundreds of agents per frame.
//!
//! - **Tagged union**: A tree is a plain [`Node`] enum, evaluated by one
//!   function per variant. Matching is exhaustive at compile time.
//! - **No Running state**: Every tick runs to completion and either succeeds or fails
//! - **Shared, read-only trees**: Nodes hold no per-agent state, so a single
//!   tree can sit behind an `Arc` and be evaluated for many agents at once
//! - **Zero dependencies**: Pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Node`]: The tree itself, generic over the agent `A` it mutates and the
//!   read-only context `C` it inspects
//! - [`Status`]: Success or Failure (no Running state)
//! - Composite nodes: sequence, selector, parallel ([`composite`])
//! - Decorator nodes: [`DecoratorKind`] ([`decorator`])
//! - Builder helpers: [`builder`]

pub mod builder;
pub mod composite;
pub mod decorator;
pub mod node;
pub mod status;

// Re-export core types for ergonomic API
pub use decorator::DecoratorKind;
pub use node::{ActionFn, Node, Predicate, execute};
pub use status::Status;
