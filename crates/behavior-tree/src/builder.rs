//! Builder utilities for ergonomic behavior tree construction.
//!
//! This module provides helper functions to reduce boilerplate when building
//! behavior trees. Instead of writing verbose
//! `Node::Decorator { kind: DecoratorKind::Invert, child: Some(Box::new(..)) }`,
//! you can use shorter functions like `inverter(..)`.

use std::sync::Arc;

use crate::{DecoratorKind, Node};

/// Creates a sequence node.
#[inline]
pub fn sequence<A, C>(children: Vec<Node<A, C>>) -> Node<A, C> {
    Node::Sequence(children)
}

/// Creates a selector node.
#[inline]
pub fn selector<A, C>(children: Vec<Node<A, C>>) -> Node<A, C> {
    Node::Selector(children)
}

/// Creates a parallel (majority vote) node.
#[inline]
pub fn parallel<A, C>(children: Vec<Node<A, C>>) -> Node<A, C> {
    Node::Parallel(children)
}

/// Wraps `child` in a decorator of the given kind.
#[inline]
pub fn decorate<A, C>(kind: DecoratorKind, child: Node<A, C>) -> Node<A, C> {
    Node::Decorator {
        kind,
        child: Some(Box::new(child)),
    }
}

/// Creates an inverter node.
#[inline]
pub fn inverter<A, C>(child: Node<A, C>) -> Node<A, C> {
    decorate(DecoratorKind::Invert, child)
}

/// Creates an always-succeed node.
#[inline]
pub fn always_succeed<A, C>(child: Node<A, C>) -> Node<A, C> {
    decorate(DecoratorKind::Succeed, child)
}

/// Creates an always-fail node.
#[inline]
pub fn always_fail<A, C>(child: Node<A, C>) -> Node<A, C> {
    decorate(DecoratorKind::Fail, child)
}

/// Creates a node that runs `child` exactly `times` times.
#[inline]
pub fn repeat<A, C>(times: u32, child: Node<A, C>) -> Node<A, C> {
    decorate(DecoratorKind::Repeat(times), child)
}

/// Creates a condition leaf from a context predicate.
#[inline]
pub fn condition<A, C, F>(predicate: F) -> Node<A, C>
where
    F: Fn(&C) -> bool + Send + Sync + 'static,
{
    Node::Condition(Some(Arc::new(predicate)))
}

/// Creates an action leaf from a function that may mutate the agent.
#[inline]
pub fn action<A, C, F>(run: F) -> Node<A, C>
where
    F: Fn(&mut A, &C) -> bool + Send + Sync + 'static,
{
    Node::Action(Some(Arc::new(run)))
}
