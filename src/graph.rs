//! Exhaustive state graph over the move relation.
//!
//! Construction happens through [`GraphBuilder`]; the finished [`Graph`] is
//! read-only.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info};

use crate::board::{Board, Labels};
use crate::moves::{neighbors, Neighbors};

/// Undirected graph with canonical states as vertices and single moves as
/// edges. Every vertex maps to its set of neighbors.
pub struct Graph {
    labels: Labels,
    root: Board,
    adjacency: FxHashMap<Board, Neighbors>,
}

impl Graph {
    /// Labels of the board the graph was built from.
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// The canonical initial state.
    pub fn root(&self) -> &Board {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn contains(&self, state: &Board) -> bool {
        self.adjacency.contains_key(state)
    }

    pub fn neighbors(&self, state: &Board) -> Option<&[Board]> {
        self.adjacency.get(state).map(|n| n.as_slice())
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Board> + '_ {
        self.adjacency.keys()
    }

    /// Number of undirected edges.
    pub fn edges(&self) -> usize {
        self.adjacency.values().map(|n| n.len()).sum::<usize>() / 2
    }
}

/// Mutable half of the graph, only alive while the search expands states.
pub struct GraphBuilder {
    labels: Labels,
    root: Board,
    adjacency: FxHashMap<Board, Neighbors>,
}

impl GraphBuilder {
    pub fn new(labels: Labels, root: Board) -> GraphBuilder {
        GraphBuilder {
            labels,
            root,
            adjacency: FxHashMap::default(),
        }
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn contains(&self, state: &Board) -> bool {
        self.adjacency.contains_key(state)
    }

    /// Records an expanded state. Each state is expanded exactly once.
    pub fn insert(&mut self, state: Board, neighbors: Neighbors) {
        let previous = self.adjacency.insert(state, neighbors);
        assert!(previous.is_none(), "{:?} expanded twice", state);
    }

    pub fn finish(self) -> Graph {
        Graph {
            labels: self.labels,
            root: self.root,
            adjacency: self.adjacency,
        }
    }
}

/// Explores every state reachable from `initial`.
pub fn build_graph(initial: &Board) -> Graph {
    info!("Generating graph...");

    let labels = Labels::gather(initial);
    let root = initial.normalized(&labels);
    let mut builder = GraphBuilder::new(labels, root);

    // everything ever queued, so expanded and pending states are never re-queued
    let mut discovered: FxHashSet<Board> = FxHashSet::default();
    discovered.insert(root);
    let mut frontier = VecDeque::from([root]);
    let mut widest = 1;

    while let Some(state) = frontier.pop_front() {
        let next = neighbors(&state, builder.labels());
        for &neighbor in &next {
            if !builder.contains(&neighbor) && discovered.insert(neighbor) {
                frontier.push_back(neighbor);
            }
        }
        builder.insert(state, next);
        widest = widest.max(frontier.len());
    }

    let graph = builder.finish();
    debug!(edges = graph.edges(), widest_frontier = widest, "graph complete");
    info!("{} vertices found.", graph.len());
    graph
}
