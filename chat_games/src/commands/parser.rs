//! Chat text to [`Command`] parsing.

use crate::casino::BlackjackAction;
use thiserror::Error;

/// A recognised bot command.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Start,
    Help,
    /// Start tic-tac-toe. `symbol` is upper-cased but not validated here.
    TicTacToe {
        symbol: String,
        opponent: Option<String>,
    },
    /// 1-based move coordinates, range-checked by the engine
    Play { row: i64, col: i64 },
    SlotMachine,
    Blackjack(BlackjackAction),
    Spin,
    Delete,
}

impl Command {
    /// Command word without the slash, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Help => "help",
            Self::TicTacToe { .. } => "tictactoe",
            Self::Play { .. } => "play",
            Self::SlotMachine => "slotmachine",
            Self::Blackjack(_) => "blackjack",
            Self::Spin => "spin",
            Self::Delete => "delete",
        }
    }
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Plain chat text, not addressed to any bot
    #[error("Not a command")]
    NotACommand,

    /// Command suffixed with another bot's name
    #[error("Command addressed to @{0}")]
    OtherBot(String),

    #[error("Please enter valid numeric coordinates for your move, e.g. /play 2 3")]
    InvalidCoordinates,

    #[error("Invalid action. Allowed actions: hit, stand, double")]
    InvalidBlackjackAction,

    #[error("Unrecognized command '{0}'. Type /help to see available commands")]
    UnrecognizedCommand(String),
}

impl ParseError {
    /// Whether the bot should stay quiet instead of answering with the error.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::NotACommand | Self::OtherBot(_))
    }
}

/// Parse one chat message into a [`Command`].
///
/// # Arguments
///
/// * `input` - Raw message text
/// * `bot_username` - This bot's username without `@`; `/cmd@<bot_username>`
///   is accepted, any other suffix yields [`ParseError::OtherBot`]
///
/// # Examples
///
/// ```
/// use chat_games::commands::{Command, parse_command};
///
/// assert_eq!(parse_command("/play 2 3", "newman_bot"), Ok(Command::Play { row: 2, col: 3 }));
/// assert_eq!(parse_command("/spin@newman_bot", "newman_bot"), Ok(Command::Spin));
/// assert!(parse_command("/spin@other_bot", "newman_bot").unwrap_err().is_silent());
/// ```
pub fn parse_command(input: &str, bot_username: &str) -> Result<Command, ParseError> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let head = parts
        .first()
        .and_then(|word| word.strip_prefix('/'))
        .ok_or(ParseError::NotACommand)?;

    let word = match head.split_once('@') {
        Some((word, target)) if target.eq_ignore_ascii_case(bot_username) => word,
        Some((_, target)) => return Err(ParseError::OtherBot(target.to_string())),
        None => head,
    };
    let args = &parts[1..];

    match word.to_ascii_lowercase().as_str() {
        "start" => Ok(Command::Start),
        "help" => Ok(Command::Help),
        "tictactoe" => Ok(parse_tictactoe(args)),
        "play" => parse_play(args),
        "slotmachine" => Ok(Command::SlotMachine),
        "blackjack" => parse_blackjack(args),
        "spin" => Ok(Command::Spin),
        "delete" => Ok(Command::Delete),
        "" => Err(ParseError::NotACommand),
        _ => Err(ParseError::UnrecognizedCommand(word.to_string())),
    }
}

/// Parse "/tictactoe [symbol] [@opponent]"
fn parse_tictactoe(args: &[&str]) -> Command {
    let symbol = args
        .first()
        .map(|s| s.to_uppercase())
        .unwrap_or_else(|| "X".to_string());
    let opponent = args
        .get(1)
        .filter(|handle| handle.starts_with('@') && handle.len() > 1)
        .map(|handle| handle.to_ascii_lowercase());
    Command::TicTacToe { symbol, opponent }
}

/// Parse "/play row col"
fn parse_play(args: &[&str]) -> Result<Command, ParseError> {
    match (args.first(), args.get(1)) {
        (Some(row), Some(col)) => {
            let row = row.parse().map_err(|_| ParseError::InvalidCoordinates)?;
            let col = col.parse().map_err(|_| ParseError::InvalidCoordinates)?;
            Ok(Command::Play { row, col })
        }
        _ => Err(ParseError::InvalidCoordinates),
    }
}

/// Parse "/blackjack action"
fn parse_blackjack(args: &[&str]) -> Result<Command, ParseError> {
    args.first()
        .and_then(|action| action.parse().ok())
        .map(Command::Blackjack)
        .ok_or(ParseError::InvalidBlackjackAction)
}
