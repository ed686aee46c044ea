//! Successful results of starting a game and submitting a move.
//!
//! `Display` renders the chat reply, always ending with the board.

use super::{
    board::{Board, Coord, Symbol},
    player::{COMPUTER_DISPLAY_NAME, PlayerId},
};
use std::fmt;

/// A freshly started game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StartOutcome {
    pub initiator: PlayerId,
    pub symbol: Symbol,
    pub opponent: PlayerId,
    pub board: Board,
}

impl fmt::Display for StartOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A new game has started.\n\n{}", self.board)
    }
}

/// What happened after an accepted move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MoveOutcome {
    /// Move applied, the other human is up next
    Accepted { next: PlayerId, board: Board },

    /// Move applied and the computer answered at `at`
    ComputerMoved { at: Coord, board: Board },

    /// The mover completed a line
    Won { winner: PlayerId, board: Board },

    /// The computer completed a line with its answer
    ComputerWon { board: Board },

    /// Board filled up without a line
    Draw { board: Board },
}

impl MoveOutcome {
    /// Win or draw. The registry drops the game on terminal outcomes.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Won { .. } | Self::ComputerWon { .. } | Self::Draw { .. }
        )
    }

    /// Board as it stands after the move (and any computer answer).
    pub fn board(&self) -> &Board {
        match self {
            Self::Accepted { board, .. }
            | Self::ComputerMoved { board, .. }
            | Self::Won { board, .. }
            | Self::ComputerWon { board }
            | Self::Draw { board } => board,
        }
    }
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted { board, .. } => write!(f, "Move accepted\n\n{board}"),
            Self::ComputerMoved { board, .. } => {
                write!(f, "{COMPUTER_DISPLAY_NAME} made a move:\n\n{board}")
            }
            Self::Won { winner, board } => write!(f, "Player {winner} won!\n\n{board}"),
            Self::ComputerWon { board } => write!(f, "{COMPUTER_DISPLAY_NAME} won!\n\n{board}"),
            Self::Draw { board } => write!(f, "Draw!\n\n{board}"),
        }
    }
}
