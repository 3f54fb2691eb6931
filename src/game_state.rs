use crate::board::{Board, BoardError, BoardPosition, BoardSpace};
use crate::mark::Mark;
use crate::win::{winning_line, WinLine};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Mark),
    Draw,
}

// How a call to `GameState::place` was resolved. An ignored placement is
// not an error: the cell was occupied, the coordinates were out of range,
// or the game was already over, and nothing changed.
#[derive(Clone, Debug, PartialEq)]
pub enum PlacementOutcome {
    Ignored,
    Placed,
    Won(WinLine),
    Draw,
}

#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    current_mark: Mark,
    status: GameStatus,
    win_line: Option<WinLine>,
}

impl GameState {
    // A fresh game on the standard board, X to move.
    pub fn new() -> Self {
        GameState::with_board(Board::default())
    }

    pub fn with_side(side: usize) -> Result<Self, BoardError> {
        Ok(GameState::with_board(Board::empty(side)?))
    }

    fn with_board(board: Board) -> Self {
        GameState {
            board,
            current_mark: Mark::X,
            status: GameStatus::InProgress,
            win_line: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    // The run that ended the game, if it ended in a win.
    pub fn win_line(&self) -> Option<&WinLine> {
        self.win_line.as_ref()
    }

    // Places the active mark at (x, y). Invalid placements are ignored
    // without changing any state; the caller can observe the rejection
    // through the returned outcome but cannot distinguish its cause.
    pub fn place(&mut self, x: usize, y: usize) -> PlacementOutcome {
        if self.is_over() {
            debug!("Placement at ({}, {}) ignored: game already over", x, y);
            return PlacementOutcome::Ignored;
        }
        let pos = match BoardPosition::new(&self.board, x, y) {
            Ok(pos) => pos,
            Err(err) => {
                debug!("Placement ignored: {}", err);
                return PlacementOutcome::Ignored;
            }
        };
        if !self.board.space(pos).is_empty() {
            debug!("Placement at {} ignored: cell already taken", pos);
            return PlacementOutcome::Ignored;
        }

        let mark = self.current_mark;
        self.board.set_space(pos, BoardSpace::Mark(mark));
        debug!("{} placed at {}", mark, pos);

        if let Some(line) = winning_line(&self.board, pos, mark) {
            // The game ends on the winner's move; the turn does not pass
            info!("{} won with a run of {} through {}", mark, line.len(), pos);
            self.status = GameStatus::Won(mark);
            self.win_line = Some(line.clone());
            return PlacementOutcome::Won(line);
        }
        if self.board.is_full() {
            info!("Board full with no winner: draw");
            self.status = GameStatus::Draw;
            return PlacementOutcome::Draw;
        }

        self.current_mark = mark.opponent();
        PlacementOutcome::Placed
    }

    // Unconditionally returns the game to its starting state on the same
    // board dimensions.
    pub fn reset(&mut self) {
        debug!("Resetting game");
        self.board.clear();
        self.current_mark = Mark::X;
        self.status = GameStatus::InProgress;
        self.win_line = None;
    }

    // Status line for the rendering collaborator.
    pub fn status_text(&self) -> String {
        match self.status {
            GameStatus::InProgress => format!("{}'s turn", self.current_mark),
            GameStatus::Won(mark) => format!("{} won!", mark),
            GameStatus::Draw => "draw".to_string(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let game = GameState::new();
        assert_eq!(game.current_mark(), Mark::X);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(!game.is_over());
        assert!(game.win_line().is_none());
        assert_eq!(game.board().side(), 15);
        assert_eq!(game.status_text(), "X's turn");
    }

    #[test]
    fn test_turn_alternates_after_accepted_placement() {
        let mut game = GameState::new();
        assert_eq!(game.place(0, 0), PlacementOutcome::Placed);
        assert_eq!(game.current_mark(), Mark::O);
        assert_eq!(game.status_text(), "O's turn");
        assert_eq!(game.place(1, 0), PlacementOutcome::Placed);
        assert_eq!(game.current_mark(), Mark::X);
        assert_eq!(game.status_text(), "X's turn");
    }

    #[test]
    fn test_occupied_cell_is_ignored() {
        let mut game = GameState::new();
        game.place(3, 3);
        let board_before = game.board().clone();
        assert_eq!(game.place(3, 3), PlacementOutcome::Ignored);
        assert_eq!(game.board(), &board_before);
        assert_eq!(game.current_mark(), Mark::O);
    }

    #[test]
    fn test_out_of_range_placement_is_ignored() {
        let mut game = GameState::new();
        let board_before = game.board().clone();
        assert_eq!(game.place(15, 15), PlacementOutcome::Ignored);
        assert_eq!(game.place(15, 3), PlacementOutcome::Ignored);
        assert_eq!(game.place(3, 15), PlacementOutcome::Ignored);
        assert_eq!(game.board(), &board_before);
        assert_eq!(game.current_mark(), Mark::X);
    }

    // X builds a vertical run at column 5 while O fills column 0, so turn
    // order is respected throughout; X's fifth placement wins.
    fn play_vertical_x_win(game: &mut GameState) -> PlacementOutcome {
        for i in 0..4 {
            assert_eq!(game.place(5, 5 + i), PlacementOutcome::Placed);
            assert_eq!(game.place(0, i), PlacementOutcome::Placed);
        }
        game.place(5, 9)
    }

    #[test]
    fn test_five_in_a_row_wins() {
        let mut game = GameState::new();
        let outcome = play_vertical_x_win(&mut game);
        let line = match outcome {
            PlacementOutcome::Won(line) => line,
            other => panic!("Expected a win, got {:?}", other),
        };
        assert!(line.len() >= 5);
        assert!(line.contains(5, 9));
        assert!(line.contains(5, 5));
        assert_eq!(game.status(), GameStatus::Won(Mark::X));
        assert!(game.is_over());
        // The winner keeps the turn; the game ended on their move
        assert_eq!(game.current_mark(), Mark::X);
        assert_eq!(game.status_text(), "X won!");
        assert_eq!(game.win_line(), Some(&line));
    }

    #[test]
    fn test_win_from_inside_the_run() {
        let mut game = GameState::new();
        // X fills (5,5), (6,5), (8,5), (9,5) then closes the gap at (7,5)
        for (i, x) in [5, 6, 8, 9].into_iter().enumerate() {
            assert_eq!(game.place(x, 5), PlacementOutcome::Placed);
            assert_eq!(game.place(0, i), PlacementOutcome::Placed);
        }
        let line = match game.place(7, 5) {
            PlacementOutcome::Won(line) => line,
            other => panic!("Expected a win, got {:?}", other),
        };
        assert_eq!(line.len(), 5);
        assert!(line.contains(7, 5));
        assert!(line.contains(5, 5));
        assert!(line.contains(9, 5));
    }

    #[test]
    fn test_four_in_a_row_with_no_fifth_does_not_win() {
        let mut game = GameState::new();
        // O blocks (0, 4) first, leaving X's run at the top edge with no
        // room to extend in either direction
        assert_eq!(game.place(0, 0), PlacementOutcome::Placed);
        assert_eq!(game.place(0, 4), PlacementOutcome::Placed);
        assert_eq!(game.place(0, 1), PlacementOutcome::Placed);
        assert_eq!(game.place(5, 5), PlacementOutcome::Placed);
        assert_eq!(game.place(0, 2), PlacementOutcome::Placed);
        assert_eq!(game.place(6, 6), PlacementOutcome::Placed);
        assert_eq!(game.place(0, 3), PlacementOutcome::Placed);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.current_mark(), Mark::O);
    }

    #[test]
    fn test_placement_after_win_is_ignored() {
        let mut game = GameState::new();
        play_vertical_x_win(&mut game);
        let board_before = game.board().clone();
        assert_eq!(game.place(10, 10), PlacementOutcome::Ignored);
        assert_eq!(game.board(), &board_before);
        assert_eq!(game.status(), GameStatus::Won(Mark::X));
    }

    #[test]
    fn test_reset_restores_starting_state() {
        let mut game = GameState::new();
        play_vertical_x_win(&mut game);
        game.reset();
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.current_mark(), Mark::X);
        assert!(game.win_line().is_none());
        assert!(game.board().marked_spaces().is_empty());
        assert_eq!(game.board().side(), 15);
        assert_eq!(game.status_text(), "X's turn");
        // The board accepts placements again
        assert_eq!(game.place(5, 5), PlacementOutcome::Placed);
    }

    #[test]
    fn test_full_board_without_winner_is_a_draw() {
        // On a 2x2 board no run can reach the threshold, so the fourth
        // placement fills the board
        let mut game = GameState::with_side(2).unwrap();
        assert_eq!(game.place(0, 0), PlacementOutcome::Placed);
        assert_eq!(game.place(1, 0), PlacementOutcome::Placed);
        assert_eq!(game.place(0, 1), PlacementOutcome::Placed);
        assert_eq!(game.place(1, 1), PlacementOutcome::Draw);
        assert_eq!(game.status(), GameStatus::Draw);
        assert!(game.is_over());
        assert!(game.win_line().is_none());
        assert_eq!(game.status_text(), "draw");
        assert_eq!(game.place(0, 0), PlacementOutcome::Ignored);

        game.reset();
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.current_mark(), Mark::X);
    }

    #[test]
    fn test_single_cell_board_draws() {
        // A run of one is below the threshold, so filling a 1x1 board is
        // a draw rather than a win
        let mut game = GameState::with_side(1).unwrap();
        assert_eq!(game.place(0, 0), PlacementOutcome::Draw);
        assert_eq!(game.status(), GameStatus::Draw);
    }

    #[test]
    fn test_diagonal_wins_through_game_play() {
        let mut game = GameState::new();
        // X on the down-right diagonal, O filling the bottom row
        for i in 0..4 {
            assert_eq!(game.place(4 + i, 4 + i), PlacementOutcome::Placed);
            assert_eq!(game.place(i, 14), PlacementOutcome::Placed);
        }
        let line = match game.place(8, 8) {
            PlacementOutcome::Won(line) => line,
            other => panic!("Expected a win, got {:?}", other),
        };
        assert!(line.contains(4, 4));
        assert!(line.contains(8, 8));
        assert_eq!(game.status(), GameStatus::Won(Mark::X));
    }
}
