//! Fixed 4x5 board encoding and label canonicalization.
//!
//! A board is 20 cells in row-major order. Every cell holds either a block
//! label or [`SPACE`]; a block is the set of cells sharing one label.

use std::{
    fmt::{Debug, Display, Write},
    ops::{Index, IndexMut},
};

use itertools::Itertools;
use smallvec::SmallVec;
use thiserror::Error;

pub const COLUMNS: usize = 4;
pub const ROWS: usize = 5;
pub const CELLS: usize = COLUMNS * ROWS;

/// The empty cell.
pub const SPACE: u8 = b' ';

/// Cell indices of one block. The largest Klotski piece covers four cells.
pub type Block = SmallVec<[usize; 4]>;

#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Board {
    cells: [u8; CELLS],
}

impl Board {
    pub const fn from_cells(cells: [u8; CELLS]) -> Board {
        Board { cells }
    }

    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    /// Indices of every cell carrying `label`, in ascending order.
    pub fn block(&self, label: u8) -> Block {
        self.cells
            .iter()
            .positions(|&c| c == label)
            .collect()
    }

    /// Relabels blocks so that labels first appear in ascending order when the
    /// board is read left-to-right, top-to-bottom.
    ///
    /// Blocks of equal shape are indistinguishable, so two boards that differ
    /// only in which symbol names which block normalize to the same value.
    /// `labels` must be the label set of the board the search started from.
    pub fn normalize(&mut self, labels: &Labels) {
        let labels = labels.as_slice();
        let mut cursor = 0;
        for i in 0..CELLS {
            // cells before `i` only use labels below labels[cursor]
            let Some(&expected) = labels.get(cursor) else {
                break;
            };
            let c = self.cells[i];
            if c == SPACE || c < expected {
                continue;
            }

            if c > expected {
                // neither label can occur before `i`, so swap them in the rest
                for cell in &mut self.cells[i..] {
                    if *cell == c {
                        *cell = expected;
                    } else if *cell == expected {
                        *cell = c;
                    }
                }
            }

            cursor += 1;
        }
    }

    pub fn normalized(mut self, labels: &Labels) -> Board {
        self.normalize(labels);
        self
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for row in self.cells.chunks(COLUMNS) {
            if !first {
                f.write_char('\n')?;
            } else {
                first = false;
            }

            for &c in row {
                f.write_char(c as char)?;
            }
        }

        Ok(())
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows = self
            .cells
            .chunks(COLUMNS)
            .map(|row| row.iter().map(|&c| c as char).collect::<String>())
            .join("/");
        write!(f, "Board({:?})", rows)
    }
}

impl Index<usize> for Board {
    type Output = u8;
    fn index(&self, index: usize) -> &Self::Output {
        &self.cells[index]
    }
}

impl IndexMut<usize> for Board {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.cells[index]
    }
}

/// The distinct block labels of a board, sorted ascending.
///
/// Gathered once from the initial board and passed to every normalization
/// for the rest of the search.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Labels(SmallVec<[u8; CELLS]>);

impl Labels {
    pub fn gather(board: &Board) -> Labels {
        Labels(
            board
                .cells
                .iter()
                .copied()
                .filter(|&c| c != SPACE)
                .sorted()
                .dedup()
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("expected 5 rows, found {0}")]
    RowCount(usize),
    #[error("row {row} has {width} cells, expected 4")]
    RowWidth { row: usize, width: usize },
    #[error("row {row} contains a non-ASCII cell")]
    NonAscii { row: usize },
}

/// Parses five rows of four cells each, separated either by newlines or by
/// `/`. A space is an empty cell; any other ASCII character is a block label.
/// Block geometry is not checked.
pub fn parse_board(b: &str) -> Result<Board, BoardError> {
    let rows: Vec<&str> = if b.contains('/') {
        b.trim_matches(|c| c == '\n' || c == '\r').split('/').collect()
    } else {
        let lines: Vec<&str> = b.lines().map(|row| row.trim_end_matches('\r')).collect();
        // only blank lines around the board are dropped
        let start = lines.iter().position(|row| !row.is_empty()).unwrap_or(lines.len());
        let end = lines.iter().rposition(|row| !row.is_empty()).map_or(start, |i| i + 1);
        lines[start..end].to_vec()
    };

    if rows.len() != ROWS {
        return Err(BoardError::RowCount(rows.len()));
    }

    let mut cells = [SPACE; CELLS];
    for (row, text) in rows.iter().enumerate() {
        if !text.is_ascii() {
            return Err(BoardError::NonAscii { row });
        }
        if text.len() != COLUMNS {
            return Err(BoardError::RowWidth {
                row,
                width: text.len(),
            });
        }
        cells[row * COLUMNS..(row + 1) * COLUMNS].copy_from_slice(text.as_bytes());
    }

    Ok(Board::from_cells(cells))
}

#[cfg(test)]
mod test {
    use super::*;

    const LEVEL_19: &str = "1223/1223/4567/899a/8  a";

    fn canonical(text: &str) -> Board {
        let board = parse_board(text).unwrap();
        board.normalized(&Labels::gather(&board))
    }

    #[test]
    fn parses_slash_and_newline_rows() {
        let slashed = parse_board(LEVEL_19).unwrap();
        let lined = parse_board(
            "
1223
1223
4567
899a
8  a
",
        )
        .unwrap();

        assert_eq!(slashed, lined);
        assert_eq!(slashed.cells(), b"122312234567899a8  a");
        assert_eq!(slashed.to_string(), "1223\n1223\n4567\n899a\n8  a");
    }

    #[test]
    fn rejects_malformed_boards() {
        assert_eq!(parse_board("1223/1223"), Err(BoardError::RowCount(2)));
        assert_eq!(
            parse_board("1223/1223/4567/899a/8 a"),
            Err(BoardError::RowWidth { row: 4, width: 3 })
        );
        assert_eq!(
            parse_board("1223/12é/4567/899a/8  a"),
            Err(BoardError::NonAscii { row: 1 })
        );
        assert_eq!(
            parse_board("\n1223\n1223\n\n4567\n899a\n8  a\n"),
            Err(BoardError::RowCount(6))
        );
        assert_eq!(parse_board("\n\n"), Err(BoardError::RowCount(0)));
    }

    #[test]
    fn gathers_sorted_distinct_labels() {
        let board = parse_board(LEVEL_19).unwrap();
        let labels = Labels::gather(&board);

        assert_eq!(labels.iter().collect::<Vec<_>>(), b"123456789a".to_vec());
        assert_eq!(labels.len(), 10);
    }

    #[test]
    fn block_lists_cells_of_a_label() {
        let board = parse_board(LEVEL_19).unwrap();

        assert_eq!(board.block(b'2').as_slice(), &[1, 2, 5, 6]);
        assert_eq!(board.block(b'a').as_slice(), &[15, 19]);
        assert!(board.block(b'z').is_empty());
    }

    #[test]
    fn normalize_orders_labels_by_first_appearance() {
        // the 2x2 block comes first in reading order, so it takes label 1
        assert_eq!(canonical("2113/2113/4567/899a/8  a").cells(), b"122312234567899a8  a");
        assert_eq!(canonical("a9 8/a998/7654/3223/3112").cells(), b"12 31223456789988aa9");
    }

    #[test]
    fn normalize_is_idempotent() {
        for text in [LEVEL_19, "a9 8/a998/7654/3223/3112", "0112/0113/4567/4867/  99"] {
            let once = canonical(text);
            let labels = Labels::gather(&once);
            assert_eq!(once.normalized(&labels), once, "{text}");
        }
    }

    #[test]
    fn normalize_ignores_which_symbol_names_which_block() {
        let board = parse_board(LEVEL_19).unwrap();
        let labels = Labels::gather(&board);
        let expected = board.normalized(&labels);

        // rotate the label alphabet: every block gets a different symbol
        let order: Vec<u8> = labels.iter().collect();
        for shift in 1..order.len() {
            let mut relabelled = board;
            for i in 0..CELLS {
                if let Some(pos) = order.iter().position(|&l| l == board[i]) {
                    relabelled[i] = order[(pos + shift) % order.len()];
                }
            }
            assert_eq!(relabelled.normalized(&labels), expected, "shift {shift}");
        }
    }

    #[test]
    fn normalize_ignores_swapped_twin_blocks() {
        // mid-game layout: 5/6 are single cells, 7/9 vertical dominoes
        let board = parse_board("1223/1223/4 56/7889/7889").unwrap();
        let labels = Labels::gather(&board);
        let expected = board.normalized(&labels);

        for (a, b) in [(b'5', b'6'), (b'7', b'9'), (b'1', b'3')] {
            let mut swapped = board;
            for i in 0..CELLS {
                if board[i] == a {
                    swapped[i] = b;
                } else if board[i] == b {
                    swapped[i] = a;
                }
            }
            assert_ne!(swapped, board);
            assert_eq!(swapped.normalized(&labels), expected, "{} <-> {}", a as char, b as char);
        }

        // non-cyclic relabelling of every block at once
        let mapping = b"_472918365";
        let relabelled = Board::from_cells((*board.cells()).map(|c| match c {
            SPACE => SPACE,
            c => mapping[(c - b'0') as usize],
        }));
        assert_eq!(relabelled.normalized(&labels), expected);
    }
}
