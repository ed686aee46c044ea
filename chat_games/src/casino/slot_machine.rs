//! 3x3 slot machine.

use rand::{Rng, seq::IndexedRandom};
use std::fmt;

/// Reel symbols, all equally likely.
pub const SYMBOLS: [&str; 4] = ["🍒", "🍋", "💎", "💩"];

/// The losing symbol: a diagonal of it costs instead of paying.
pub const BAD_SYMBOL: &str = "💩";

/// Penalty applied when the grid holds no combination at all.
pub const NO_COMBO_PENALTY: i64 = 2;

/// Result grid, row-major.
pub type SlotGrid = [[&'static str; 3]; 3];

/// A scoring pattern found on the grid.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SlotCombo {
    Row,
    Column,
    Diagonal,
    BadDiagonal,
    Square,
}

impl SlotCombo {
    pub fn value(self) -> i64 {
        match self {
            SlotCombo::Row | SlotCombo::Column | SlotCombo::Diagonal => 5,
            SlotCombo::Square => 10,
            SlotCombo::BadDiagonal => -15,
        }
    }

    pub fn is_loss(self) -> bool {
        self.value() < 0
    }

    fn message(self) -> &'static str {
        match self {
            SlotCombo::Row => "Three of a kind in a row. Congratulations!",
            SlotCombo::Column => "Three of a kind in a column. Congratulations!",
            SlotCombo::Diagonal => "Diagonal combination. Congratulations!",
            SlotCombo::BadDiagonal => "Diagonal of 💩💩💩. Our condolences!",
            SlotCombo::Square => "A square of matching symbols. Congratulations!",
        }
    }
}

/// One finished spin.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlotOutcome {
    pub grid: SlotGrid,
    pub combos: Vec<SlotCombo>,
    pub delta: i64,
}

impl SlotOutcome {
    pub fn wins(&self) -> impl Iterator<Item = SlotCombo> + '_ {
        self.combos.iter().copied().filter(|c| !c.is_loss())
    }

    pub fn losses(&self) -> impl Iterator<Item = SlotCombo> + '_ {
        self.combos.iter().copied().filter(|c| c.is_loss())
    }
}

/// Spin the reels.
pub fn spin<R: Rng + ?Sized>(rng: &mut R) -> SlotOutcome {
    let mut grid: SlotGrid = [[SYMBOLS[0]; 3]; 3];
    for row in grid.iter_mut() {
        for cell in row.iter_mut() {
            *cell = SYMBOLS.choose(rng).copied().unwrap_or(SYMBOLS[0]);
        }
    }
    evaluate(grid)
}

/// Score a grid.
///
/// Rows, columns and 2x2 squares of one symbol pay; a diagonal pays unless it
/// is made of [`BAD_SYMBOL`], in which case it costs. With no combination at
/// all the spin costs [`NO_COMBO_PENALTY`].
pub fn evaluate(grid: SlotGrid) -> SlotOutcome {
    let mut combos = Vec::new();
    let same = |a: &str, b: &str, c: &str| a == b && b == c;

    for row in &grid {
        if same(row[0], row[1], row[2]) {
            combos.push(SlotCombo::Row);
        }
    }

    for col in 0..3 {
        if same(grid[0][col], grid[1][col], grid[2][col]) {
            combos.push(SlotCombo::Column);
        }
    }

    for (a, b, c) in [
        (grid[0][0], grid[1][1], grid[2][2]),
        (grid[0][2], grid[1][1], grid[2][0]),
    ] {
        if same(a, b, c) {
            combos.push(if a == BAD_SYMBOL {
                SlotCombo::BadDiagonal
            } else {
                SlotCombo::Diagonal
            });
        }
    }

    for i in 0..2 {
        for j in 0..2 {
            let corner = grid[i][j];
            if corner == grid[i + 1][j] && corner == grid[i][j + 1] && corner == grid[i + 1][j + 1] {
                combos.push(SlotCombo::Square);
            }
        }
    }

    let delta = if combos.is_empty() {
        -NO_COMBO_PENALTY
    } else {
        combos.iter().map(|c| c.value()).sum()
    };

    SlotOutcome {
        grid,
        combos,
        delta,
    }
}

impl fmt::Display for SlotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Result:\n")?;
        for row in &self.grid {
            writeln!(f, "| {} |", row.join(" | "))?;
        }
        writeln!(f)?;

        for combo in self.wins().chain(self.losses()) {
            writeln!(f, "{}", combo.message())?;
        }

        if self.wins().next().is_none() {
            write!(f, "Unlucky, you lost. Try again!\n\n")?;
        }

        if self.delta >= 0 {
            write!(f, "Your score went up by {}.", self.delta)
        } else {
            write!(f, "Your score went down by {}.", -self.delta)
        }
    }
}
