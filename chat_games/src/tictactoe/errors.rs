//! Tic-tac-toe error types.
//!
//! Every variant is a user-facing outcome: its `Display` text is sent back to
//! the chat as-is, and the game state is left exactly as it was.

use super::player::PlayerId;
use thiserror::Error;

/// Reasons a new game could not be started.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum StartError {
    /// Symbol choice was neither `X` nor `O`
    #[error("Invalid choice \"{0}\". Choose \"X\" or \"O\"")]
    InvalidSymbol(String),

    /// Initiator named themselves as the opponent
    #[error("You cannot play against yourself. Name another player or leave the opponent out")]
    SelfOpponent,
}

/// Reasons a move was rejected.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum MoveError {
    /// No game is running in this chat
    #[error("No game found. Type /tictactoe to start a new game.")]
    NoActiveGame,

    /// Someone other than the expected player moved
    #[error("It is {0}'s turn.")]
    NotYourTurn(PlayerId),

    /// Player is not seated at this game
    #[error("You are not a participant in this game.")]
    NotAParticipant,

    /// Row or column outside 1..=3
    #[error("Invalid coordinates {row} {col}. Enter numbers from 1 to 3.")]
    OutOfRange { row: i64, col: i64 },

    /// Target cell already holds a symbol
    #[error("Invalid move: that cell is taken.")]
    CellOccupied,
}

/// Result type for starting games
pub type StartResult<T> = Result<T, StartError>;

/// Result type for submitting moves
pub type MoveResult<T> = Result<T, MoveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_your_turn_names_computer() {
        let msg = MoveError::NotYourTurn(PlayerId::Computer).to_string();
        assert!(msg.contains("Newman"));
        assert!(!msg.contains("Computer"));
    }

    #[test]
    fn test_out_of_range_echoes_input() {
        let msg = MoveError::OutOfRange { row: 0, col: 4 }.to_string();
        assert!(msg.contains("0 4"));
        assert!(msg.contains("1 to 3"));
    }

    #[test]
    fn test_invalid_symbol_echoes_choice() {
        let msg = StartError::InvalidSymbol("Z".to_string()).to_string();
        assert!(msg.contains("\"Z\""));
    }
}
