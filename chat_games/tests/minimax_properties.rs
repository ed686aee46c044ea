/// Property-based and exhaustive tests for the computer opponent
///
/// The computer must never lose, whatever the human plays, and two perfect
/// players must always draw.
use chat_games::tictactoe::{Coord, Game, MoveOutcome, PlayerId, Symbol, minimax};
use proptest::prelude::*;

fn human() -> PlayerId {
    PlayerId::human("@alice")
}

fn new_game(symbol: Symbol) -> Game {
    Game::new(human(), symbol, PlayerId::Computer).unwrap()
}

fn play(game: &mut Game, (row, col): Coord) -> MoveOutcome {
    game.submit_move(&human(), row as i64 + 1, col as i64 + 1)
        .unwrap()
}

/// Explore every human line against the computer, returning the number of
/// finished games.
fn explore(game: &Game) -> usize {
    let mut finished = 0;
    for cell in game.board().empty_cells() {
        let mut next = game.clone();
        let outcome = play(&mut next, cell);
        assert!(
            !matches!(outcome, MoveOutcome::Won { .. }),
            "computer lost:\n{}",
            outcome.board()
        );
        if outcome.is_terminal() {
            finished += 1;
        } else {
            finished += explore(&next);
        }
    }
    finished
}

#[test]
fn test_computer_never_loses_exhaustive() {
    for symbol in [Symbol::X, Symbol::O] {
        let finished = explore(&new_game(symbol));
        assert!(finished > 0);
    }
}

#[test]
fn test_optimal_play_draws() {
    for symbol in [Symbol::X, Symbol::O] {
        let mut game = new_game(symbol);
        let outcome = loop {
            let best = minimax::best_move(game.board(), symbol).unwrap();
            let outcome = play(&mut game, best);
            if outcome.is_terminal() {
                break outcome;
            }
        };
        assert!(matches!(outcome, MoveOutcome::Draw { .. }));
    }
}

// Human picks the n-th empty cell (mod the number left) at each turn
fn human_choices() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..9, 5)
}

proptest! {
    #[test]
    fn test_random_human_never_beats_computer(choices in human_choices(), plays_x in any::<bool>()) {
        let symbol = if plays_x { Symbol::X } else { Symbol::O };
        let mut game = new_game(symbol);

        for choice in choices {
            let empty: Vec<Coord> = game.board().empty_cells().collect();
            let outcome = play(&mut game, empty[choice % empty.len()]);

            let human_won = matches!(outcome, MoveOutcome::Won { .. });
            prop_assert!(!human_won);
            let board = outcome.board();
            prop_assert!(board.count(symbol) >= board.count(symbol.other()));
            if outcome.is_terminal() {
                break;
            }
        }
    }

    #[test]
    fn test_best_move_targets_empty_cell(choices in prop::collection::vec(0usize..9, 0..4)) {
        let mut game = new_game(Symbol::X);
        for choice in choices {
            let empty: Vec<Coord> = game.board().empty_cells().collect();
            if play(&mut game, empty[choice % empty.len()]).is_terminal() {
                return Ok(());
            }
        }

        let board = *game.board();
        let best = minimax::best_move(&board, Symbol::O).unwrap();
        prop_assert!(board.get(best).is_some_and(|cell| cell.is_empty()));
        prop_assert_eq!(*game.board(), board);
    }
}
