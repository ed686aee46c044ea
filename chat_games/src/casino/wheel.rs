//! Wheel of fortune.

use rand::{Rng, seq::IndexedRandom};
use std::fmt;

/// Number of teaser frames shown before the result.
pub const TEASER_FRAMES: usize = 4;

/// Rolls are drawn from `0..ROLL_RANGE`. The weights sum to more than this,
/// so the last sector only covers what is left of the range.
pub const ROLL_RANGE: u32 = 100;

/// One wheel sector.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Prize {
    pub label: &'static str,
    /// Width of the sector on the roll range
    pub weight: u32,
    pub value: i64,
}

pub const PRIZES: [Prize; 6] = [
    Prize { label: "+5", weight: 10, value: 5 },
    Prize { label: "+10", weight: 20, value: 10 },
    Prize { label: "+15", weight: 5, value: 15 },
    Prize { label: "-10", weight: 10, value: -10 },
    Prize { label: "-5", weight: 20, value: -5 },
    Prize { label: "+0", weight: 40, value: 0 },
];

impl fmt::Display for Prize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// A finished spin: the animation frames and the prize they land on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WheelOutcome {
    pub frames: Vec<String>,
    pub prize: Prize,
}

impl WheelOutcome {
    pub fn delta(&self) -> i64 {
        self.prize.value
    }
}

/// Spin the wheel.
///
/// Produces [`TEASER_FRAMES`] frames naming uniformly chosen sectors, then a
/// final frame announcing the weighted pick.
pub fn spin<R: Rng + ?Sized>(rng: &mut R) -> WheelOutcome {
    let mut frames: Vec<String> = (0..TEASER_FRAMES)
        .map(|_| {
            let teaser = PRIZES.choose(rng).unwrap_or(&PRIZES[0]);
            format!("The wheel of fortune is spinning... {teaser}.")
        })
        .collect();

    let prize = pick(rng.random_range(0..ROLL_RANGE));
    frames.push(if prize.value == 0 {
        "Better luck next time!".to_string()
    } else {
        format!("Congratulations! You won {prize}!")
    });

    WheelOutcome { frames, prize }
}

/// Sector covering `roll`, where `roll < ROLL_RANGE`.
fn pick(roll: u32) -> Prize {
    let mut upper = 0;
    for prize in PRIZES {
        upper += prize.weight;
        if roll < upper {
            return prize;
        }
    }
    PRIZES[PRIZES.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_last_sector_is_clipped_by_roll_range() {
        let zero_rolls = (0..ROLL_RANGE).filter(|&roll| pick(roll).value == 0).count();
        assert_eq!(zero_rolls, 35);

        let per_value = |value: i64| (0..ROLL_RANGE).filter(|&roll| pick(roll).value == value).count();
        assert_eq!(per_value(10), 20);
        assert_eq!(per_value(-5), 20);
    }

    #[test]
    fn test_pick_boundaries() {
        assert_eq!(pick(0).value, 5);
        assert_eq!(pick(9).value, 5);
        assert_eq!(pick(10).value, 10);
        assert_eq!(pick(30).value, 15);
        assert_eq!(pick(35).value, -10);
        assert_eq!(pick(45).value, -5);
        assert_eq!(pick(65).value, 0);
        assert_eq!(pick(ROLL_RANGE - 1).value, 0);
    }

    #[test]
    fn test_spin_frames() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let outcome = spin(&mut rng);
            assert_eq!(outcome.frames.len(), TEASER_FRAMES + 1);
            assert!(outcome.frames[0].starts_with("The wheel of fortune is spinning"));

            let last = outcome.frames.last().unwrap();
            if outcome.delta() == 0 {
                assert_eq!(last, "Better luck next time!");
            } else {
                assert!(last.contains(outcome.prize.label));
            }
        }
    }
}
