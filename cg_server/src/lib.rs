//! Chat game bot server.
//!
//! Loads configuration, wires the [`chat_games`] dispatcher to its record
//! store and score service, and exposes it over HTTP or a console loop.

pub mod api;
pub mod config;
pub mod console;
pub mod logging;
