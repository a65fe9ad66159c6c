//! Behavior-tree AI for agents.
//!
//! Trees are layered the same way at every scale:
//!
//! ```text
//! presets::brute()
//!   └─ Selector
//!       ├─ patterns::engage()                   ← pattern
//!       │   ├─ nodes::attack_target()           ← action node
//!       │   └─ patterns::chase_when_visible()
//!       │       ├─ nodes::target_visible()      ← condition node
//!       │       └─ nodes::approach_target()     ← action node
//!       ├─ patterns::follow_path_when_clear()
//!       └─ patterns::hold_fallback()
//! ```
//!
//! - [`nodes`]: single condition and action leaves
//! - [`patterns`]: small if-then subtrees combining nodes
//! - [`presets`]: complete trees for agent archetypes
//!
//! Conditions only read the [`DecisionContext`](game_core::DecisionContext).
//! Actions write an [`Intent`](game_core::Intent) into the agent and never
//! touch the world directly. `attack_target` also checks the agent's own
//! attack range.

pub mod nodes;
pub mod patterns;
pub mod presets;
