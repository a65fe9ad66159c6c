//! Decorator behavior nodes.
//!
//! Decorators wrap a single child behavior and modify its result or execution.
//! This module provides [`DecoratorKind`]: `Invert` (NOT logic), `Succeed` and
//! `Fail` (result override), `Repeat` (fixed repetition) and `Passthrough`.

use crate::{Node, Status};

/// How a decorator rewrites the result of its child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecoratorKind {
    /// Negates the child result.
    Invert,

    /// Always returns `Success`. The child still runs for its side effects.
    Succeed,

    /// Always returns `Failure`. The child still runs for its side effects.
    Fail,

    /// Runs the child `n` times unconditionally, discarding the intermediate
    /// results, and returns `Success`.
    Repeat(u32),

    /// Returns the child result unchanged.
    Passthrough,
}

impl DecoratorKind {
    /// Resolves a decorator from its data name.
    ///
    /// `count` is only read by `"repeat"` (missing count means one run).
    /// Unrecognized names resolve to [`DecoratorKind::Passthrough`].
    pub fn from_name(name: &str, count: Option<u32>) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "invert" | "inverter" | "not" => DecoratorKind::Invert,
            "succeed" | "always_succeed" => DecoratorKind::Succeed,
            "fail" | "always_fail" => DecoratorKind::Fail,
            "repeat" => DecoratorKind::Repeat(count.unwrap_or(1)),
            _ => DecoratorKind::Passthrough,
        }
    }
}

/// Evaluates a decorator around `child`.
///
/// A decorator with no child fails, whatever its kind.
pub fn tick_decorator<A, C>(
    kind: DecoratorKind,
    child: Option<&Node<A, C>>,
    agent: &mut A,
    ctx: &C,
) -> Status {
    let Some(child) = child else {
        return Status::Failure;
    };

    match kind {
        DecoratorKind::Invert => child.tick(agent, ctx).invert(),
        DecoratorKind::Succeed => {
            // Execute child but ignore the result
            let _ = child.tick(agent, ctx);
            Status::Success
        }
        DecoratorKind::Fail => {
            let _ = child.tick(agent, ctx);
            Status::Failure
        }
        DecoratorKind::Repeat(times) => {
            for _ in 0..times {
                let _ = child.tick(agent, ctx);
            }
            Status::Success
        }
        DecoratorKind::Passthrough => child.tick(agent, ctx),
    }
}
