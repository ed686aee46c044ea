//! Exhaustive minimax search for the computer opponent.
//!
//! The search runs to terminal positions without depth limit or pruning. A
//! 3x3 board has at most 9! move orders, so it always finishes synchronously.

use super::board::{BOARD_SIZE, Board, Cell, Coord, Symbol};

/// Score of a position the computer has won.
pub const WIN: i8 = 1;

/// Score of a drawn position.
pub const DRAW: i8 = 0;

/// Score of a position the opponent has won.
pub const LOSS: i8 = -1;

/// Pick the computer's move.
///
/// Every empty cell is tried in row-major order; the first cell with the
/// highest backed-up score wins ties. Returns `None` on a full board.
pub fn best_move(board: &Board, computer: Symbol) -> Option<Coord> {
    let mut scratch = *board;
    let mut best: Option<(Coord, i8)> = None;

    for coord in cells() {
        if !scratch.place(coord, computer) {
            continue;
        }
        let score = search(&mut scratch, computer, false);
        scratch.clear(coord);

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((coord, score));
        }
    }

    best.map(|(coord, _)| coord)
}

/// Backed-up value of `board` from the computer's point of view.
///
/// `computer_to_move` says whose turn it is in the position being scored.
pub fn evaluate(board: &Board, computer: Symbol, computer_to_move: bool) -> i8 {
    let mut scratch = *board;
    search(&mut scratch, computer, computer_to_move)
}

fn search(board: &mut Board, computer: Symbol, maximizing: bool) -> i8 {
    if board.has_line(computer) {
        return WIN;
    }
    if board.has_line(computer.other()) {
        return LOSS;
    }
    if board.is_full() {
        return DRAW;
    }

    let mover = if maximizing { computer } else { computer.other() };
    let mut best = if maximizing { i8::MIN } else { i8::MAX };

    for coord in cells() {
        if board.get(coord) != Some(Cell::Empty) {
            continue;
        }
        board.place(coord, mover);
        let score = search(board, computer, !maximizing);
        board.clear(coord);

        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    best
}

fn cells() -> impl Iterator<Item = Coord> {
    (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
}
