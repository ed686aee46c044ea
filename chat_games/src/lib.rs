//! # Chat Games
//!
//! Games played through chat commands: tic-tac-toe against another member or
//! an unbeatable computer opponent, plus a few chance games with cooldowns and
//! an external score keeper.
//!
//! ## Architecture
//!
//! Every chat is isolated. A message is parsed into a [`commands::Command`],
//! which the [`commands::Dispatcher`] routes to exactly one handler:
//!
//! - **Tic-tac-toe**: a [`tictactoe::GameRegistry`] holds at most one game per
//!   chat; the engine validates moves, detects wins and draws and answers with
//!   a minimax move when the computer is to play
//! - **Casino**: slot machine, wheel of fortune and blackjack, each reporting a
//!   score delta
//! - **Records**: per-(chat, user) timestamps that gate the chance games
//! - **Scoring**: client for the service that keeps users' scores
//!
//! Transports (HTTP webhook, console) live in the server crate.
//!
//! ## Core Modules
//!
//! - [`tictactoe`]: board, engine, minimax and registry
//! - [`commands`]: parser and dispatcher
//! - [`casino`]: chance games
//! - [`records`]: user records, stores and cooldowns
//! - [`scoring`]: score service client
//!
//! ## Example
//!
//! ```
//! use chat_games::tictactoe::{GameRegistry, PlayerId};
//!
//! let mut registry = GameRegistry::new();
//! let outcome = registry
//!     .create_game(7, PlayerId::human("@alice"), "O", None)
//!     .unwrap();
//! assert!(outcome.board.is_empty());
//! ```

/// Chance games and their scoring.
pub mod casino;

/// Command parsing and dispatch.
pub mod commands;
pub use commands::{Command, Dispatcher, DispatcherConfig, MessageContext, Reply};

/// Per-user records and cooldowns.
pub mod records;

/// External score service client.
pub mod scoring;
pub use scoring::{HttpScoreService, NoopScoreService, ScoreService};

/// Tic-tac-toe engine and per-chat registry.
pub mod tictactoe;
pub use tictactoe::{GameRegistry, PlayerId};
