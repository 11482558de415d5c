//! Frontier bookkeeping shared by the pathfinding engines.
//!
//! Frontier entries are indices into an [`Arena`] of nodes that point back
//! at their parent, so paths are rebuilt once at the goal instead of being
//! copied into every queued entry.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::mem::size_of;

use crate::env::Environment;

use super::result::{Meter, SearchResult, Solution};

#[derive(Debug, Clone)]
pub(crate) struct Node<S, A> {
    pub state: S,
    parent: Option<usize>,
    action: Option<A>,
    pub cost: f64,
    pub depth: usize,
}

#[derive(Debug)]
pub(crate) struct Arena<S, A> {
    nodes: Vec<Node<S, A>>,
}

impl<S: Clone, A: Clone> Arena<S, A> {
    pub fn new() -> Self {
        Arena { nodes: Vec::new() }
    }

    pub fn root(&mut self, state: S) -> usize {
        self.nodes.push(Node {
            state,
            parent: None,
            action: None,
            cost: 0.0,
            depth: 0,
        });
        self.nodes.len() - 1
    }

    pub fn child(&mut self, parent: usize, state: S, action: A, step_cost: f64) -> usize {
        let (cost, depth) = {
            let p = &self.nodes[parent];
            (p.cost + step_cost, p.depth + 1)
        };
        self.nodes.push(Node {
            state,
            parent: Some(parent),
            action: Some(action),
            cost,
            depth,
        });
        self.nodes.len() - 1
    }

    pub fn node(&self, idx: usize) -> &Node<S, A> {
        &self.nodes[idx]
    }

    pub fn bytes(&self) -> usize {
        self.nodes.len() * size_of::<Node<S, A>>()
    }

    /// Walk parent links from `idx` back to the root.
    pub fn solution(&self, idx: usize) -> Solution<S, A> {
        let mut path = Vec::new();
        let mut actions = Vec::new();
        let mut cursor = Some(idx);
        while let Some(i) = cursor {
            let node = &self.nodes[i];
            path.push(node.state.clone());
            if let Some(action) = &node.action {
                actions.push(action.clone());
            }
            cursor = node.parent;
        }
        path.reverse();
        actions.reverse();
        Solution {
            path,
            actions,
            cost: self.nodes[idx].cost,
        }
    }
}

/// Min-priority entry; equal priorities pop in insertion order.
#[derive(Debug, Clone, Copy)]
struct Entry {
    priority: f64,
    seq: u64,
    node: usize,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed: BinaryHeap is a max-heap.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Default)]
pub(crate) struct PriorityFrontier {
    heap: BinaryHeap<Entry>,
    counter: u64,
}

impl PriorityFrontier {
    pub fn push(&mut self, priority: f64, node: usize) {
        self.heap.push(Entry {
            priority,
            seq: self.counter,
            node,
        });
        self.counter += 1;
    }

    pub fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|entry| entry.node)
    }

    pub fn bytes(&self) -> usize {
        self.heap.len() * size_of::<Entry>()
    }
}

/// Best-first loop with visited-on-expansion and duplicate pops skipped.
///
/// `priority(g, state)` is called exactly once per generated state.
pub(crate) fn best_first<E, P>(
    env: &E,
    algorithm: &'static str,
    mut priority: P,
) -> SearchResult<E::State, E::Action>
where
    E: Environment,
    P: FnMut(f64, &E::State) -> f64,
{
    let mut meter = Meter::start(algorithm);
    let mut arena = Arena::new();
    let mut frontier = PriorityFrontier::default();
    let mut visited: HashSet<E::State> = HashSet::new();

    let initial = env.initial_state();
    let root_priority = priority(0.0, &initial);
    frontier.push(root_priority, arena.root(initial));
    meter.generated = 1;

    while let Some(idx) = frontier.pop() {
        let node = arena.node(idx);
        if !visited.insert(node.state.clone()) {
            continue;
        }
        meter.expanded += 1;

        if env.is_goal_state(&node.state) {
            let solution = arena.solution(idx);
            return meter.finish(Some(solution), visited);
        }

        let g = node.cost;
        for (next, action, step_cost) in env.successors(&node.state) {
            if visited.contains(&next) {
                continue;
            }
            meter.generated += 1;
            let key = priority(g + step_cost, &next);
            let child = arena.child(idx, next, action, step_cost);
            frontier.push(key, child);
        }
        meter.observe(arena.bytes() + frontier.bytes() + visited.len() * size_of::<E::State>());
    }

    meter.finish(None, visited)
}
