//! Tic-tac-toe world model for the UCT search engine
//!
//! This crate provides a complete reference implementation of the
//! `uct-core` GameState contract, demonstrating how to plug a domain into
//! the search engine.
//!
//! # Usage
//!
//! ```rust
//! use games_tictactoe::{Action, State};
//! use uct_core::GameState;
//!
//! let state = State::new();
//! assert!(!state.is_terminal());
//! assert_eq!(state.legal_actions().len(), 9);
//! ```

use std::fmt;

use uct_core::game_utils::{neutral_rewards, terminal_rewards};
use uct_core::{AgentId, GameState};

/// Agent index for X (moves first).
pub const PLAYER_X: AgentId = 0;
/// Agent index for O.
pub const PLAYER_O: AgentId = 1;

/// Tic-tac-toe game state
///
/// Represents the complete state of a game including the board, current
/// player, and winner information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    /// Board representation: 0=empty, 1=X, 2=O
    board: [u8; 9],
    /// Current player: 1=X, 2=O
    current_player: u8,
    /// Winner: 0=none/ongoing, 1=X, 2=O, 3=draw
    winner: u8,
}

impl State {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [0; 9],
            current_player: 1, // X goes first
            winner: 0,
        }
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner != 0
    }

    /// Winner as an agent index, if the game concluded with one.
    pub fn winning_agent(&self) -> Option<AgentId> {
        match self.winner {
            1 => Some(PLAYER_X),
            2 => Some(PLAYER_O),
            _ => None,
        }
    }

    /// Get legal moves (empty positions)
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..9u8)
            .filter(|&pos| self.board[pos as usize] == 0)
            .collect()
    }

    /// Make a move and return the new state
    pub fn make_move(&self, position: u8) -> State {
        if self.is_done() || position >= 9 || self.board[position as usize] != 0 {
            return *self; // Invalid move, return unchanged state
        }

        let mut new_state = *self;
        new_state.board[position as usize] = self.current_player;

        // Check for winner
        new_state.winner = Self::check_winner(&new_state.board);

        // Switch player if game not over
        if new_state.winner == 0 {
            new_state.current_player = if self.current_player == 1 { 2 } else { 1 };
        }

        new_state
    }

    /// Check for winner on the board
    fn check_winner(board: &[u8; 9]) -> u8 {
        // Winning positions (rows, columns, diagonals)
        const LINES: [[usize; 3]; 8] = [
            [0, 1, 2],
            [3, 4, 5],
            [6, 7, 8], // rows
            [0, 3, 6],
            [1, 4, 7],
            [2, 5, 8], // columns
            [0, 4, 8],
            [2, 4, 6], // diagonals
        ];

        for line in &LINES {
            let [a, b, c] = *line;
            if board[a] != 0 && board[a] == board[b] && board[b] == board[c] {
                return board[a]; // Return the winning player
            }
        }

        // Check for draw (board full but no winner)
        if board.iter().all(|&cell| cell != 0) {
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
        for row in 0..3 {
            for col in 0..3 {
                let mark = match self.board[row * 3 + col] {
                    1 => 'X',
                    2 => 'O',
                    _ => '.',
                };
                write!(f, "{mark} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Tic-tac-toe action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Place a mark at the given position (0-8, row-major from top-left)
    Place(u8),
}

impl Action {
    /// Get the position for this action
    pub fn position(&self) -> u8 {
        match self {
            Action::Place(pos) => *pos,
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
        *self = self.make_move(action.position());
    }

    fn legal_actions(&self) -> Vec<Action> {
        self.legal_moves().into_iter().map(Action::Place).collect()
    }

    fn evaluate(&self) -> Vec<f32> {
        if self.is_done() {
            terminal_rewards(self.winning_agent())
        } else {
            neutral_rewards(2)
        }
    }
}

#[cfg(test)]
mod tests;
