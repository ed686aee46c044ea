//! A single game: board, seats and turn pointer, plus the move protocol.

use super::{
    board::{BOARD_SIZE, Board, Coord, Symbol},
    errors::{MoveError, MoveResult, StartError, StartResult},
    minimax,
    outcome::MoveOutcome,
    player::PlayerId,
};

/// One live tic-tac-toe game.
///
/// Always has exactly two seats holding complementary symbols, and `turn`
/// always names one of them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game {
    board: Board,
    players: [(PlayerId, Symbol); 2],
    turn: PlayerId,
}

impl Game {
    /// Seat `initiator` with `symbol` and `opponent` with the other symbol.
    /// The initiator moves first.
    ///
    /// # Errors
    ///
    /// * `StartError::SelfOpponent` - both seats would belong to the same player
    pub fn new(initiator: PlayerId, symbol: Symbol, opponent: PlayerId) -> StartResult<Self> {
        if initiator == opponent {
            return Err(StartError::SelfOpponent);
        }

        Ok(Self {
            board: Board::new(),
            players: [(initiator.clone(), symbol), (opponent, symbol.other())],
            turn: initiator,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[(PlayerId, Symbol); 2] {
        &self.players
    }

    /// Player whose move is expected next.
    pub fn turn(&self) -> &PlayerId {
        &self.turn
    }

    pub fn symbol_of(&self, player: &PlayerId) -> Option<Symbol> {
        self.players
            .iter()
            .find(|(id, _)| id == player)
            .map(|(_, symbol)| *symbol)
    }

    pub fn has_computer(&self) -> bool {
        self.players.iter().any(|(id, _)| id.is_computer())
    }

    /// The seat that is not `player`'s.
    fn opponent_of(&self, player: &PlayerId) -> &PlayerId {
        if self.players[0].0 == *player {
            &self.players[1].0
        } else {
            &self.players[0].0
        }
    }

    /// Validate and apply a move given in 1-based `row`/`col`.
    ///
    /// Checks run in order (turn, membership, range, occupancy) and the first
    /// failure is returned without touching the board. When the turn passes
    /// to the computer, its answer is searched and applied before returning.
    pub fn submit_move(&mut self, player: &PlayerId, row: i64, col: i64) -> MoveResult<MoveOutcome> {
        if *player != self.turn {
            return Err(MoveError::NotYourTurn(self.turn.clone()));
        }

        let symbol = self.symbol_of(player).ok_or(MoveError::NotAParticipant)?;
        let coord = to_coord(row, col).ok_or(MoveError::OutOfRange { row, col })?;

        if !self.board.place(coord, symbol) {
            return Err(MoveError::CellOccupied);
        }
        self.turn = self.opponent_of(player).clone();

        if self.board.has_line(symbol) {
            // Turn goes back to the mover so the winner is attributed correctly
            self.turn = player.clone();
            return Ok(MoveOutcome::Won {
                winner: player.clone(),
                board: self.board,
            });
        }

        if self.board.is_full() {
            return Ok(MoveOutcome::Draw { board: self.board });
        }

        if self.turn.is_computer() {
            return Ok(self.computer_reply(player, symbol.other()));
        }

        Ok(MoveOutcome::Accepted {
            next: self.turn.clone(),
            board: self.board,
        })
    }

    fn computer_reply(&mut self, human: &PlayerId, computer: Symbol) -> MoveOutcome {
        // The human always makes the odd-numbered moves, so a board that is
        // not full has at least one empty cell left for the computer.
        let Some(at) = minimax::best_move(&self.board, computer) else {
            return MoveOutcome::Draw { board: self.board };
        };

        self.board.place(at, computer);
        log::debug!("Computer answered at {:?}", at);

        if self.board.has_line(computer) {
            return MoveOutcome::ComputerWon { board: self.board };
        }

        self.turn = human.clone();
        MoveOutcome::ComputerMoved {
            at,
            board: self.board,
        }
    }
}

/// Convert 1-based user coordinates to a board coordinate.
fn to_coord(row: i64, col: i64) -> Option<Coord> {
    let size = BOARD_SIZE as i64;
    let in_range = |v: i64| (1..=size).contains(&v);
    (in_range(row) && in_range(col)).then(|| ((row - 1) as usize, (col - 1) as usize))
}
