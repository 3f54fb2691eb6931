mod board;
mod game_state;
mod mark;
mod win;

pub use board::{
    Board, BoardError, BoardPosition, BoardPositionError, BoardSpace, Coordinate,
    DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE,
};
pub use game_state::{GameState, GameStatus, PlacementOutcome};
pub use mark::Mark;
pub use win::{winning_line, WinLine, WIN_THRESHOLD};
