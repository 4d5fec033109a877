use std::collections::{hash_map::Entry, VecDeque};

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::board::{Board, Labels, SPACE};
use crate::graph::Graph;

/// Cells of the 2x2 exit at the bottom centre of the board.
pub const EXIT: [usize; 4] = [13, 14, 17, 18];

/// A state is solved when a single block covers the whole exit.
pub fn is_solved(state: &Board) -> bool {
    let label = state[EXIT[0]];
    label != SPACE && EXIT.iter().all(|&i| state[i] == label)
}

/// Optimal next move for every reachable state.
///
/// Each unsolved state maps to a neighbor one step closer to the nearest
/// solved state; solved states map to themselves.
pub struct Solution {
    labels: Labels,
    next: FxHashMap<Board, Board>,
    goals: usize,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.next.len()
    }

    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    /// Number of solved states among the reachable ones.
    pub fn goals(&self) -> usize {
        self.goals
    }

    pub fn next(&self, state: &Board) -> Option<&Board> {
        self.next.get(state)
    }

    /// Moves needed from a canonical `state` to reach a solved state.
    pub fn distance(&self, state: &Board) -> Option<usize> {
        self.path_from(*state).map(|path| path.count() - 1)
    }

    fn path_from(&self, state: Board) -> Option<Path<'_>> {
        self.next.contains_key(&state).then(|| Path {
            solution: self,
            current: Some(state),
        })
    }
}

/// Labels every vertex of `graph` with a step towards its nearest goal.
///
/// Breadth-first from all solved states at once, so a state is first reached
/// along one of its shortest paths. Panics if some vertex cannot reach a goal.
pub fn solve(graph: &Graph) -> Solution {
    info!("Finding solutions...");

    let mut next: FxHashMap<Board, Board> = FxHashMap::default();
    // states are queued in non-decreasing distance from a solved state
    let mut frontier = VecDeque::new();
    for &state in graph.vertices().filter(|s| is_solved(s)) {
        next.insert(state, state);
        frontier.push_back(state);
    }
    let goals = frontier.len();
    debug!(goals, "seeded solved states");

    while let Some(state) = frontier.pop_front() {
        let neighbors = graph
            .neighbors(&state)
            .unwrap_or_else(|| panic!("{:?} is not a vertex", state));
        for &neighbor in neighbors {
            if let Entry::Vacant(entry) = next.entry(neighbor) {
                entry.insert(state);
                frontier.push_back(neighbor);
            }
        }
    }

    assert_eq!(
        next.len(),
        graph.len(),
        "some reachable states cannot be solved"
    );
    info!("Done.");

    Solution {
        labels: graph.labels().clone(),
        next,
        goals,
    }
}

/// States from a start to a solved state, inclusive, following a [`Solution`].
#[derive(Clone)]
pub struct Path<'a> {
    solution: &'a Solution,
    current: Option<Board>,
}

impl Iterator for Path<'_> {
    type Item = Board;

    fn next(&mut self) -> Option<Board> {
        let state = self.current?;
        self.current = match self.solution.next(&state) {
            Some(&next) if next != state => Some(next),
            _ => None,
        };
        Some(state)
    }
}

/// Walks `solution` from `initial` to a solved state. `initial` need not be
/// canonical; the path is empty when it was never reached by the search.
pub fn render_path<'a>(initial: &Board, solution: &'a Solution) -> Path<'a> {
    let start = initial.normalized(&solution.labels);
    solution.path_from(start).unwrap_or(Path {
        solution,
        current: None,
    })
}
