//! Connect 4 world model for the UCT search engine
//!
//! Connect 4 is a two-player connection game where players drop colored
//! discs into a 7-column, 6-row vertically suspended grid. The objective is
//! to be the first to form a horizontal, vertical, or diagonal line of four
//! discs.
//!
//! A second domain next to tic-tac-toe: the engine searches both through
//! the same `GameState` contract without knowing either exists.
//!
//! # Board Layout
//!
//! The board is stored in row-major order, with row 0 at the bottom:
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 4: [28][29][30][31][32][33][34]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```

use std::fmt;

use uct_core::game_utils::{neutral_rewards, terminal_rewards};
use uct_core::{AgentId, GameState};

/// Board dimensions
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const BOARD_SIZE: usize = COLS * ROWS; // 42

/// Agent index for Red (moves first).
pub const PLAYER_RED: AgentId = 0;
/// Agent index for Yellow.
pub const PLAYER_YELLOW: AgentId = 1;

/// Connect4 game state
///
/// Represents the complete state of a game including the board, current
/// player, and winner information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// Board representation: 0=empty, 1=Red (player 1), 2=Yellow (player 2)
    /// Stored in row-major order with row 0 at the bottom
    board: [u8; BOARD_SIZE],
    /// Current player: 1=Red, 2=Yellow
    current_player: u8,
    /// Winner: 0=none/ongoing, 1=Red, 2=Yellow, 3=draw
    winner: u8,
    /// Height of each column (number of pieces in column)
    column_heights: [u8; COLS],
}

impl State {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [0; BOARD_SIZE],
            current_player: 1, // Red goes first
            winner: 0,
            column_heights: [0; COLS],
        }
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner != 0
    }

    /// Winner as an agent index, if the game concluded with one.
    pub fn winning_agent(&self) -> Option<AgentId> {
        match self.winner {
            1 => Some(PLAYER_RED),
            2 => Some(PLAYER_YELLOW),
            _ => None,
        }
    }

    /// Get legal moves (columns that are not full)
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..COLS as u8)
            .filter(|&col| self.column_heights[col as usize] < ROWS as u8)
            .collect()
    }

    /// Convert column and row to board index
    #[inline]
    fn pos(col: usize, row: usize) -> usize {
        row * COLS + col
    }

    /// Drop a piece in the given column and return the new state
    pub fn drop_piece(&self, column: u8) -> State {
        let col = column as usize;

        // Check if move is valid
        if self.is_done() || col >= COLS || self.column_heights[col] >= ROWS as u8 {
            return self.clone(); // Invalid move, return unchanged state
        }

        let mut new_state = self.clone();
        let row = self.column_heights[col] as usize;
        let pos = Self::pos(col, row);

        // Place the piece
        new_state.board[pos] = self.current_player;
        new_state.column_heights[col] += 1;

        // Check for winner
        new_state.winner = new_state.check_winner_at(col, row);

        // Switch player if game not over
        if new_state.winner == 0 {
            new_state.current_player = if self.current_player == 1 { 2 } else { 1 };
        }

        new_state
    }

    /// Check if the piece at (col, row) creates a winning line
    fn check_winner_at(&self, col: usize, row: usize) -> u8 {
        let player = self.board[Self::pos(col, row)];
        if player == 0 {
            return 0;
        }

        // Direction vectors: horizontal, vertical, diagonal /, diagonal \
        let directions: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

        for (dc, dr) in directions {
            let mut count = 1; // Count the piece we just placed

            // Count in positive direction
            let (mut c, mut r) = (col as i32 + dc, row as i32 + dr);
            while c >= 0 && c < COLS as i32 && r >= 0 && r < ROWS as i32 {
                if self.board[Self::pos(c as usize, r as usize)] == player {
                    count += 1;
                    c += dc;
                    r += dr;
                } else {
                    break;
                }
            }

            // Count in negative direction
            let (mut c, mut r) = (col as i32 - dc, row as i32 - dr);
            while c >= 0 && c < COLS as i32 && r >= 0 && r < ROWS as i32 {
                if self.board[Self::pos(c as usize, r as usize)] == player {
                    count += 1;
                    c -= dc;
                    r -= dr;
                } else {
                    break;
                }
            }

            if count >= 4 {
                return player;
            }
        }

        // Check for draw (board full but no winner)
        if self.column_heights.iter().all(|&h| h >= ROWS as u8) {
            return 3; // Draw
        }

        0 // Game ongoing
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            for col in 0..COLS {
                let mark = match self.board[Self::pos(col, row)] {
                    1 => 'R',
                    2 => 'Y',
                    _ => '.',
                };
                write!(f, "{mark} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Connect4 action - drop a piece in a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Drop a piece in the given column (0-6)
    Drop(u8),
}

impl Action {
    /// Get the column for this action
    pub fn column(&self) -> u8 {
        match self {
            Action::Drop(col) => *col,
        }
    }
}

impl GameState for State {
    type Action = Action;

    fn is_terminal(&self) -> bool {
        self.is_done()
    }

    fn acting_agent(&self) -> AgentId {
        (self.current_player - 1) as AgentId
    }

    fn apply_action(&mut self, action: &Action) {
        *self = self.drop_piece(action.column());
    }

    fn legal_actions(&self) -> Vec<Action> {
        self.legal_moves().into_iter().map(Action::Drop).collect()
    }

    fn evaluate(&self) -> Vec<f32> {
        if self.is_done() {
            terminal_rewards(self.winning_agent())
        } else {
            neutral_rewards(2)
        }
    }
}
