//! Chat command handling.
//!
//! This module implements:
//! - Parser: message text to a typed [`Command`], with the bot-name suffix
//!   check and argument validation
//! - Dispatcher: one explicit `match` from command to handler, plus
//!   registration, cooldowns and score reporting for chance games
//!
//! ## Example
//!
//! ```
//! use chat_games::commands::{Dispatcher, DispatcherConfig, MessageContext, Reply};
//! use chat_games::records::MemoryUserStore;
//! use chat_games::scoring::NoopScoreService;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let dispatcher = Dispatcher::new(
//!         DispatcherConfig::default(),
//!         Arc::new(MemoryUserStore::new()),
//!         Arc::new(NoopScoreService),
//!     );
//!     let ctx = MessageContext::new(-100, 42, Some("alice"));
//!
//!     let reply = dispatcher.handle(&ctx, "/tictactoe X").await;
//!     assert!(reply.as_text().unwrap().starts_with("A new game has started."));
//!
//!     assert_eq!(dispatcher.handle(&ctx, "just chatting").await, Reply::Silent);
//! }
//! ```

pub mod dispatcher;
pub mod parser;

pub use dispatcher::{Dispatcher, DispatcherConfig, MessageContext, Reply};
pub use parser::{Command, ParseError, parse_command};
