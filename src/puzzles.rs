//! Built-in puzzles, all from the first level set.
//!
//! Labels are arbitrary; a space is an empty cell. The target is the 2x2
//! block, which has to reach the bottom centre.

use clap::ValueEnum;

use crate::board::Board;

pub const LEVEL_15: Board = Board::from_cells(*b"0112011345674867  99");
pub const LEVEL_18: Board = Board::from_cells(*b"1223122456785679 aa ");
pub const LEVEL_19: Board = Board::from_cells(*b"122312234567899a8  a");

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Puzzle {
    #[value(name = "level-15")]
    Level15,
    #[value(name = "level-18")]
    Level18,
    #[value(name = "level-19")]
    Level19,
}

impl Puzzle {
    pub fn board(self) -> Board {
        match self {
            Puzzle::Level15 => LEVEL_15,
            Puzzle::Level18 => LEVEL_18,
            Puzzle::Level19 => LEVEL_19,
        }
    }
}
