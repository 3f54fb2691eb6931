use crate::mark::Mark;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// Side length of the standard board.
pub const DEFAULT_BOARD_SIZE: usize = 15;
pub const MAX_BOARD_SIZE: usize = 26;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Board with no rows given")]
    NoRows,
    #[error("Board of side {side} exceeds the maximum of {max}")]
    TooLarge { side: usize, max: usize },
    #[error("Board contains empty rows")]
    EmptyRows,
    #[error("Not all board rows have the same length")]
    MismatchedRowLengths,
    #[error("Board of width {width} and height {height} is not square")]
    NotSquare { width: usize, height: usize },
}

#[derive(Debug)]
pub enum Coordinate {
    X,
    Y,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::X => write!(f, "x"),
            Coordinate::Y => write!(f, "y"),
        }
    }
}

#[derive(Error, Debug)]
pub enum BoardPositionError {
    #[error("{0} coordinate {1} exceeds board side {2}")]
    OutOfBounds(Coordinate, usize, usize),
    #[error("{0} coordinate {1} could not be converted from usize to i32")]
    CoordinateToInt(Coordinate, usize),
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum BoardSpace {
    Empty,
    Mark(Mark),
    OutOfBounds,
}

impl BoardSpace {
    pub fn is_mark(&self, mark: Mark) -> bool {
        matches!(self, BoardSpace::Mark(m) if *m == mark)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, BoardSpace::Empty)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoardPosition(usize, usize);

impl BoardPosition {
    // Ensure that the given position meets the following criteria:
    // - x and y coordinates do not exceed the board side
    // - x and y coordinates can be converted into i32s safely
    pub fn new(board: &Board, x: usize, y: usize) -> Result<Self, BoardPositionError> {
        let side = board.side();
        if x >= side {
            return Err(BoardPositionError::OutOfBounds(Coordinate::X, x, side));
        }
        if y >= side {
            return Err(BoardPositionError::OutOfBounds(Coordinate::Y, y, side));
        }
        // Ensure that x and y can be safely converted into i32s later
        let _: i32 = x
            .try_into()
            .map_err(|_| BoardPositionError::CoordinateToInt(Coordinate::X, x))?;
        let _: i32 = y
            .try_into()
            .map_err(|_| BoardPositionError::CoordinateToInt(Coordinate::Y, y))?;
        Ok(BoardPosition(x, y))
    }

    pub fn x(&self) -> usize {
        self.0
    }

    pub fn y(&self) -> usize {
        self.1
    }

    // Walk away from this position one step at a time in direction (dx, dy),
    // collecting the positions that hold `mark`. The walk stops at the first
    // space holding anything else, including the board edge. The origin
    // itself is not part of the result.
    pub fn run_towards(&self, board: &Board, mark: Mark, dx: i32, dy: i32) -> Vec<BoardPosition> {
        let mut run = Vec::new();
        let mut x = self.0 as i32 + dx;
        let mut y = self.1 as i32 + dy;
        while board.get_space(x, y).is_mark(mark) {
            run.push(BoardPosition(x as usize, y as usize));
            x += dx;
            y += dy;
        }
        run
    }
}

impl fmt::Display for BoardPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

// This cannot be an array, because the board side is chosen at runtime
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Board(Vec<Vec<BoardSpace>>);

impl Board {
    // Ensure that the given grid meets the following criteria:
    // - the grid contains at least one row
    // - rows contain at least one space
    // - all rows are the same length
    // - the grid is square
    // - the side length does not exceed the max board side
    pub fn new(spaces: Vec<Vec<BoardSpace>>) -> Result<Self, BoardError> {
        if spaces.is_empty() {
            return Err(BoardError::NoRows);
        }
        if spaces.len() > MAX_BOARD_SIZE {
            return Err(BoardError::TooLarge {
                side: spaces.len(),
                max: MAX_BOARD_SIZE,
            });
        }
        let row = &spaces[0];
        if row.is_empty() {
            return Err(BoardError::EmptyRows);
        }
        let row_len = row.len();
        if row_len > MAX_BOARD_SIZE {
            return Err(BoardError::TooLarge {
                side: row_len,
                max: MAX_BOARD_SIZE,
            });
        }
        if spaces.iter().any(|row| row.len() != row_len) {
            return Err(BoardError::MismatchedRowLengths);
        }
        if row_len != spaces.len() {
            return Err(BoardError::NotSquare {
                width: row_len,
                height: spaces.len(),
            });
        }
        Ok(Board(spaces))
    }

    // An all-empty square board of the given side length.
    pub fn empty(side: usize) -> Result<Self, BoardError> {
        Board::new(vec![vec![BoardSpace::Empty; side]; side])
    }

    pub fn side(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self) -> &Vec<Vec<BoardSpace>> {
        &self.0
    }

    // Need to take signed integers because directional walks may step off
    // the board
    pub fn get_space(&self, x: i32, y: i32) -> BoardSpace {
        self.try_get_space(x, y).unwrap_or(BoardSpace::OutOfBounds)
    }

    fn try_get_space(&self, x: i32, y: i32) -> Option<BoardSpace> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;

        let row = self.0.get(y)?;
        let space = row.get(x)?;
        Some(*space)
    }

    pub fn space(&self, pos: BoardPosition) -> BoardSpace {
        self.0[pos.y()][pos.x()]
    }

    pub(crate) fn set_space(&mut self, pos: BoardPosition, space: BoardSpace) {
        self.0[pos.y()][pos.x()] = space;
    }

    pub(crate) fn clear(&mut self) {
        for row in &mut self.0 {
            for space in row {
                *space = BoardSpace::Empty;
            }
        }
    }

    pub fn is_full(&self) -> bool {
        self.0
            .iter()
            .all(|row| row.iter().all(|space| !space.is_empty()))
    }

    // Every non-empty cell with its mark, in row-major order. This is the
    // full-redraw form of the renderer contract; incremental drawing only
    // needs the position a placement reports.
    pub fn marked_spaces(&self) -> Vec<(BoardPosition, Mark)> {
        self.0
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter().enumerate().filter_map(move |(x, space)| {
                    if let BoardSpace::Mark(mark) = space {
                        Some((BoardPosition(x, y), *mark))
                    } else {
                        None
                    }
                })
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty(DEFAULT_BOARD_SIZE).unwrap()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.0 {
            for space in row {
                let symbol = match space {
                    BoardSpace::Empty => '.',
                    BoardSpace::Mark(Mark::X) => 'X',
                    BoardSpace::Mark(Mark::O) => 'O',
                    BoardSpace::OutOfBounds => '?',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
