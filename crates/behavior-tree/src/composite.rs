//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! This module provides the evaluation rules for the three composites:
//! [`Node::Sequence`] (AND logic), [`Node::Selector`] (OR logic) and
//! [`Node::Parallel`] (majority vote).
//!
//! Evaluation order is load-bearing: it decides whether later siblings run
//! at all, and therefore whether their side effects on the agent happen.

use crate::{Node, Status};

/// Executes children in order until one fails.
///
/// # Semantics
///
/// - If a child returns `Failure`, the sequence **stops immediately** and returns `Failure`
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - If all children return `Success`, the sequence returns `Success`
/// - A sequence with no children succeeds
///
/// This is analogous to a short-circuited logical AND (&&) operation.
pub fn tick_sequence<A, C>(children: &[Node<A, C>], agent: &mut A, ctx: &C) -> Status {
    for child in children {
        match child.tick(agent, ctx) {
            Status::Success => continue,
            Status::Failure => return Status::Failure,
        }
    }
    Status::Success
}

/// Executes children in order until one succeeds.
///
/// # Semantics
///
/// - If a child returns `Success`, the selector **stops immediately** and returns `Success`
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If all children return `Failure`, the selector returns `Failure`
/// - A selector with no children fails
///
/// This is analogous to a short-circuited logical OR (||) operation.
pub fn tick_selector<A, C>(children: &[Node<A, C>], agent: &mut A, ctx: &C) -> Status {
    for child in children {
        match child.tick(agent, ctx) {
            Status::Success => return Status::Success,
            Status::Failure => continue,
        }
    }
    Status::Failure
}

/// Executes every child, then votes.
///
/// # Semantics
///
/// - Every child runs, regardless of the results of its siblings
/// - Succeeds iff strictly more than half of the children succeeded
/// - A parallel node with no children succeeds
pub fn tick_parallel<A, C>(children: &[Node<A, C>], agent: &mut A, ctx: &C) -> Status {
    if children.is_empty() {
        return Status::Success;
    }

    let succeeded = children
        .iter()
        .map(|child| child.tick(agent, ctx))
        .filter(|status| status.is_success())
        .count();

    Status::from(succeeded * 2 > children.len())
}
