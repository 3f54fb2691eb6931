use crate::board::{Board, BoardPosition};
use crate::mark::Mark;

// Minimum run length that ends the game.
pub const WIN_THRESHOLD: usize = 5;

// Axis directions checked for a winning run, in fixed evaluation order:
// horizontal, vertical, diagonal down-right, diagonal down-left.
const AXES: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

// The contiguous run of same-mark cells that ended the game. Coordinates
// are kept in discovery order: the triggering cell first, then the forward
// walk, then the backward walk. A renderer draws the connecting line
// between the first and last entries.
#[derive(Clone, Debug, PartialEq)]
pub struct WinLine {
    coords: Vec<BoardPosition>,
}

impl WinLine {
    pub fn coords(&self) -> &[BoardPosition] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn endpoints(&self) -> (BoardPosition, BoardPosition) {
        (self.coords[0], self.coords[self.coords.len() - 1])
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.coords.iter().any(|pos| pos.x() == x && pos.y() == y)
    }
}

// Searches for a winning run rooted at `pos`, which must already hold
// `mark`. Each axis is evaluated as the origin plus two opposite walks, so
// the check is bounded by the run length rather than the board area. The
// first axis reaching the threshold wins; later axes are not examined.
pub fn winning_line(board: &Board, pos: BoardPosition, mark: Mark) -> Option<WinLine> {
    for (dx, dy) in AXES {
        let forward = pos.run_towards(board, mark, dx, dy);
        let backward = pos.run_towards(board, mark, -dx, -dy);
        if 1 + forward.len() + backward.len() >= WIN_THRESHOLD {
            let mut coords = Vec::with_capacity(1 + forward.len() + backward.len());
            coords.push(pos);
            coords.extend(forward);
            coords.extend(backward);
            return Some(WinLine { coords });
        }
    }
    None
}
