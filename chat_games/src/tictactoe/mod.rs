//! Tic-tac-toe with a per-chat registry and an unbeatable computer opponent.
//!
//! This module implements:
//! - Board: 3x3 grid with line and draw detection, rendered for chat
//! - Game: seats, turn pointer and the move validation protocol
//! - Minimax: exhaustive search used for the computer's answers
//! - GameRegistry: at most one live game per chat
//!
//! ## Example
//!
//! ```
//! use chat_games::tictactoe::{GameRegistry, MoveOutcome, PlayerId};
//!
//! let mut registry = GameRegistry::new();
//! let alice = PlayerId::human("@alice");
//!
//! registry.create_game(1, alice.clone(), "X", None).unwrap();
//! let outcome = registry.submit_move(1, &alice, 2, 2).unwrap();
//!
//! // The computer answers inside the same call
//! assert!(matches!(outcome, MoveOutcome::ComputerMoved { .. }));
//! println!("{outcome}");
//! ```

pub mod board;
pub mod errors;
pub mod game;
pub mod minimax;
pub mod outcome;
pub mod player;
pub mod registry;

pub use board::{Board, Cell, Coord, Symbol};
pub use errors::{MoveError, MoveResult, StartError, StartResult};
pub use game::Game;
pub use outcome::{MoveOutcome, StartOutcome};
pub use player::{COMPUTER_DISPLAY_NAME, PlayerId};
pub use registry::GameRegistry;
