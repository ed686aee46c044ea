//! Per-chat game registry.

use super::{
    board::Symbol,
    errors::{MoveError, MoveResult, StartError, StartResult},
    game::Game,
    outcome::{MoveOutcome, StartOutcome},
    player::PlayerId,
};
use crate::records::ChatId;
use std::collections::HashMap;

/// Mapping from chat to its single live game.
///
/// The registry is a plain value: whoever owns it decides how commands are
/// serialised (the dispatcher keeps it behind a mutex). Games are created by
/// [`GameRegistry::create_game`] and removed as soon as a move ends them.
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: HashMap<ChatId, Game>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a game in `chat_id`, replacing whatever game was there.
    ///
    /// # Arguments
    ///
    /// * `chat_id` - Chat the game belongs to
    /// * `initiator` - Player starting the game; moves first
    /// * `symbol_choice` - `"X"` or `"O"` for the initiator
    /// * `opponent` - Declared opponent; the computer when `None`
    ///
    /// # Errors
    ///
    /// * `StartError::InvalidSymbol` - choice is not `X`/`O`; nothing changes
    /// * `StartError::SelfOpponent` - initiator named themselves; nothing changes
    pub fn create_game(
        &mut self,
        chat_id: ChatId,
        initiator: PlayerId,
        symbol_choice: &str,
        opponent: Option<PlayerId>,
    ) -> StartResult<StartOutcome> {
        let symbol = Symbol::parse(symbol_choice)
            .ok_or_else(|| StartError::InvalidSymbol(symbol_choice.to_string()))?;
        let opponent = opponent.unwrap_or(PlayerId::Computer);

        let game = Game::new(initiator.clone(), symbol, opponent.clone())?;
        let board = *game.board();

        if self.games.insert(chat_id, game).is_some() {
            log::info!("Chat {} restarted tic-tac-toe, previous game dropped", chat_id);
        } else {
            log::info!("Chat {} started tic-tac-toe", chat_id);
        }

        Ok(StartOutcome {
            initiator,
            symbol,
            opponent,
            board,
        })
    }

    /// Submit a 1-based move for `player` in `chat_id`.
    ///
    /// # Errors
    ///
    /// * `MoveError::NoActiveGame` - no game in this chat
    /// * any rejection from [`Game::submit_move`]
    pub fn submit_move(
        &mut self,
        chat_id: ChatId,
        player: &PlayerId,
        row: i64,
        col: i64,
    ) -> MoveResult<MoveOutcome> {
        let game = self
            .games
            .get_mut(&chat_id)
            .ok_or(MoveError::NoActiveGame)?;

        let outcome = game.submit_move(player, row, col)?;

        if outcome.is_terminal() {
            self.games.remove(&chat_id);
            log::info!("Chat {} finished tic-tac-toe: {}", chat_id, outcome_kind(&outcome));
        }

        Ok(outcome)
    }

    /// Live game in `chat_id`, if any.
    pub fn game(&self, chat_id: ChatId) -> Option<&Game> {
        self.games.get(&chat_id)
    }

    /// Drop the game in `chat_id`, returning it.
    pub fn remove(&mut self, chat_id: ChatId) -> Option<Game> {
        self.games.remove(&chat_id)
    }

    /// Number of live games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

fn outcome_kind(outcome: &MoveOutcome) -> &'static str {
    match outcome {
        MoveOutcome::Accepted { .. } => "accepted",
        MoveOutcome::ComputerMoved { .. } => "computer_moved",
        MoveOutcome::Won { .. } => "won",
        MoveOutcome::ComputerWon { .. } => "computer_won",
        MoveOutcome::Draw { .. } => "draw",
    }
}
