use smallvec::SmallVec;

use crate::board::{Board, Labels, COLUMNS, ROWS, SPACE};

/// Canonical states one move away from some state.
pub type Neighbors = SmallVec<[Board; 8]>;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    #[cfg(test)]
    fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Is `index` one of the cells along this side of the board?
    pub fn is_edge(self, index: usize) -> bool {
        match self {
            Direction::Left => index % COLUMNS == 0,
            Direction::Right => index % COLUMNS == COLUMNS - 1,
            Direction::Up => index < COLUMNS,
            Direction::Down => index >= COLUMNS * (ROWS - 1),
        }
    }

    /// The cell adjacent to `index` in this direction. Only meaningful when
    /// `index` is not on this edge.
    pub fn step(self, index: usize) -> usize {
        match self {
            Direction::Left => index - 1,
            Direction::Right => index + 1,
            Direction::Up => index - COLUMNS,
            Direction::Down => index + COLUMNS,
        }
    }
}

/// Slides the block labelled `label`, occupying `block`, one cell towards
/// `direction`. Returns `None` when a cell would leave the board or run into
/// another block. The result is not normalized.
pub fn slide(board: &Board, label: u8, block: &[usize], direction: Direction) -> Option<Board> {
    for &i in block {
        if direction.is_edge(i) {
            return None;
        }
        let target = board[direction.step(i)];
        if target != SPACE && target != label {
            return None;
        }
    }

    let mut result = *board;
    for &i in block {
        result[i] = SPACE;
    }
    for &i in block {
        result[direction.step(i)] = label;
    }

    Some(result)
}

/// Every canonical state reachable from `board` by sliding one block one cell.
pub fn neighbors(board: &Board, labels: &Labels) -> Neighbors {
    let mut out = Neighbors::new();
    for label in labels.iter() {
        let block = board.block(label);
        if block.is_empty() {
            continue;
        }

        for direction in Direction::ALL {
            if let Some(mut next) = slide(board, label, &block, direction) {
                next.normalize(labels);
                if !out.contains(&next) {
                    out.push(next);
                }
            }
        }
    }

    out
}
