//! Chance games: slot machine, wheel of fortune and blackjack.
//!
//! Each game is a pure function of a random number generator (plus the
//! blackjack table's running hands). Score deltas are reported back to the
//! caller; applying them and enforcing cooldowns is the dispatcher's job.
//!
//! ## Example
//!
//! ```
//! use chat_games::casino::slot_machine;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let outcome = slot_machine::spin(&mut rng);
//! println!("{outcome}");
//! assert!(outcome.to_string().starts_with("Result:"));
//! ```

pub mod blackjack;
pub mod slot_machine;
pub mod wheel;

pub use blackjack::{BlackjackAction, BlackjackOutcome, BlackjackTable, Card, Hand, Suit};
pub use slot_machine::{SlotCombo, SlotGrid, SlotOutcome};
pub use wheel::{Prize, WheelOutcome};
