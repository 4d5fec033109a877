pub mod board;
pub mod graph;
pub mod moves;
pub mod puzzles;
pub mod solver;

pub use board::{parse_board, Board, BoardError, Labels};
pub use graph::{build_graph, Graph, GraphBuilder};
pub use moves::{neighbors, Direction};
pub use puzzles::Puzzle;
pub use solver::{is_solved, render_path, solve, Path, Solution};
