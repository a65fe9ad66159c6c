//! The behavior tree node type.
//!
//! This module defines [`Node`], the tagged union every tree is built from.
//! The type is generic over the agent `A` (mutated by action leaves) and the
//! context `C` (read by every node), so the same interpreter serves any
//! simulation that can describe its agents and perception snapshots.

use std::fmt;
use std::sync::Arc;

use crate::{DecoratorKind, Status, composite, decorator};

/// Predicate attached to a condition leaf. Sees the context only.
pub type Predicate<C> = Arc<dyn Fn(&C) -> bool + Send + Sync>;

/// Function attached to an action leaf. May mutate the agent.
pub type ActionFn<A, C> = Arc<dyn Fn(&mut A, &C) -> bool + Send + Sync>;

/// A behavior tree node.
///
/// Trees hold no mutable per-agent state: all mutation flows through the
/// `&mut A` handed to [`Node::tick`]. A tree is therefore `Send + Sync`
/// and can be shared behind an `Arc` by every agent that uses it.
pub enum Node<A, C> {
    /// Runs children left to right, stops at the first failure.
    Sequence(Vec<Node<A, C>>),

    /// Runs children left to right, stops at the first success.
    Selector(Vec<Node<A, C>>),

    /// Runs every child and succeeds on a strict majority.
    Parallel(Vec<Node<A, C>>),

    /// Wraps a single child and rewrites its result.
    Decorator {
        kind: DecoratorKind,
        child: Option<Box<Node<A, C>>>,
    },

    /// Side-effect free check against the context.
    Condition(Option<Predicate<C>>),

    /// Leaf that may mutate the agent.
    Action(Option<ActionFn<A, C>>),
}

impl<A, C> Node<A, C> {
    /// Evaluate this node against the given agent and context.
    ///
    /// Evaluation always runs to completion once entered. Recursion depth is
    /// bounded by the depth of the tree.
    pub fn tick(&self, agent: &mut A, ctx: &C) -> Status {
        match self {
            Node::Sequence(children) => composite::tick_sequence(children, agent, ctx),
            Node::Selector(children) => composite::tick_selector(children, agent, ctx),
            Node::Parallel(children) => composite::tick_parallel(children, agent, ctx),
            Node::Decorator { kind, child } => {
                decorator::tick_decorator(*kind, child.as_deref(), agent, ctx)
            }
            Node::Condition(predicate) => match predicate {
                Some(predicate) => Status::from(predicate(ctx)),
                None => Status::Failure,
            },
            Node::Action(action) => match action {
                Some(action) => Status::from(action(agent, ctx)),
                None => Status::Failure,
            },
        }
    }

    /// Depth of the tree rooted at this node (a single leaf has depth 1).
    pub fn depth(&self) -> usize {
        match self {
            Node::Sequence(children) | Node::Selector(children) | Node::Parallel(children) => {
                1 + children.iter().map(Node::depth).max().unwrap_or(0)
            }
            Node::Decorator { child, .. } => 1 + child.as_deref().map_or(0, Node::depth),
            Node::Condition(_) | Node::Action(_) => 1,
        }
    }

    /// Total number of nodes in the tree rooted at this node.
    pub fn node_count(&self) -> usize {
        match self {
            Node::Sequence(children) | Node::Selector(children) | Node::Parallel(children) => {
                1 + children.iter().map(Node::node_count).sum::<usize>()
            }
            Node::Decorator { child, .. } => 1 + child.as_deref().map_or(0, Node::node_count),
            Node::Condition(_) | Node::Action(_) => 1,
        }
    }

    /// Short name of the variant, used in debug output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Sequence(_) => "sequence",
            Node::Selector(_) => "selector",
            Node::Parallel(_) => "parallel",
            Node::Decorator { .. } => "decorator",
            Node::Condition(_) => "condition",
            Node::Action(_) => "action",
        }
    }
}

/// Evaluates `root` and reports whether it succeeded.
#[inline]
pub fn execute<A, C>(root: &Node<A, C>, agent: &mut A, ctx: &C) -> bool {
    root.tick(agent, ctx).is_success()
}

// Manual impl: derive would require `A: Clone, C: Clone`.
impl<A, C> Clone for Node<A, C> {
    fn clone(&self) -> Self {
        match self {
            Node::Sequence(children) => Node::Sequence(children.clone()),
            Node::Selector(children) => Node::Selector(children.clone()),
            Node::Parallel(children) => Node::Parallel(children.clone()),
            Node::Decorator { kind, child } => Node::Decorator {
                kind: *kind,
                child: child.clone(),
            },
            Node::Condition(predicate) => Node::Condition(predicate.clone()),
            Node::Action(action) => Node::Action(action.clone()),
        }
    }
}

impl<A, C> fmt::Debug for Node<A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Sequence(children) => f.debug_tuple("Sequence").field(children).finish(),
            Node::Selector(children) => f.debug_tuple("Selector").field(children).finish(),
            Node::Parallel(children) => f.debug_tuple("Parallel").field(children).finish(),
            Node::Decorator { kind, child } => f
                .debug_struct("Decorator")
                .field("kind", kind)
                .field("child", child)
                .finish(),
            Node::Condition(predicate) => f
                .debug_tuple("Condition")
                .field(&predicate.as_ref().map(|_| ".."))
                .finish(),
            Node::Action(action) => f
                .debug_tuple("Action")
                .field(&action.as_ref().map(|_| ".."))
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::*;

    struct Agent {
        hits: u32,
    }

    struct Ctx {
        ready: bool,
    }

    #[test]
    fn absent_condition_fails() {
        let node: Node<Agent, Ctx> = Node::Condition(None);
        let mut agent = Agent { hits: 0 };
        assert_eq!(node.tick(&mut agent, &Ctx { ready: true }), Status::Failure);
    }

    #[test]
    fn absent_action_fails() {
        let node: Node<Agent, Ctx> = Node::Action(None);
        let mut agent = Agent { hits: 0 };
        assert!(!execute(&node, &mut agent, &Ctx { ready: true }));
        assert_eq!(agent.hits, 0);
    }

    #[test]
    fn action_mutates_agent() {
        let node: Node<Agent, Ctx> = action(|agent: &mut Agent, ctx: &Ctx| {
            agent.hits += 1;
            ctx.ready
        });
        let mut agent = Agent { hits: 0 };
        assert!(execute(&node, &mut agent, &Ctx { ready: true }));
        assert!(!execute(&node, &mut agent, &Ctx { ready: false }));
        assert_eq!(agent.hits, 2);
    }

    #[test]
    fn depth_and_count() {
        let tree: Node<Agent, Ctx> = selector(vec![
            sequence(vec![condition(|c: &Ctx| c.ready), inverter(condition(|_| false))]),
            action(|_, _| true),
        ]);
        assert_eq!(tree.depth(), 4);
        assert_eq!(tree.node_count(), 6);
        assert_eq!(tree.kind_name(), "selector");
    }

    #[test]
    fn tree_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Node<Agent, Ctx>>();

        let tree: Arc<Node<Agent, Ctx>> = Arc::new(action(|agent: &mut Agent, _| {
            agent.hits += 1;
            true
        }));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tree = Arc::clone(&tree);
                std::thread::spawn(move || {
                    let mut agent = Agent { hits: 0 };
                    execute(&tree, &mut agent, &Ctx { ready: true });
                    agent.hits
                })
            })
            .collect();
        let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 4);
    }
}
