//! Simplified blackjack against a random dealer.
//!
//! All players in all chats draw from one shared deck, refilled once it runs
//! out. Each player keeps a running hand between commands until the round
//! ends by bust, twenty-one or standing.

use crate::records::{ChatId, UserId};
use rand::Rng;
use std::{collections::HashMap, fmt, str::FromStr};
use thiserror::Error;

pub const TARGET: u32 = 21;

/// Dealer scores are drawn uniformly from this range on stand.
pub const DEALER_RANGE: std::ops::RangeInclusive<u32> = 17..=20;

pub const WIN_DELTA: i64 = 5;
pub const LOSS_DELTA: i64 = -2;

/// Player action.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BlackjackAction {
    Hit,
    Stand,
    /// Draw one card counted twice
    Double,
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("Unknown blackjack action \"{0}\". Use hit, stand or double.")]
pub struct UnknownAction(pub String);

impl FromStr for BlackjackAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hit" => Ok(Self::Hit),
            "stand" => Ok(Self::Stand),
            "double" => Ok(Self::Double),
            _ => Err(UnknownAction(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Suit::Hearts => "♥️",
            Suit::Diamonds => "♦️",
            Suit::Clubs => "♣️",
            Suit::Spades => "♠️",
        };
        f.write_str(repr)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Card {
    /// `2`..`10`, `J`, `Q`, `K` or `A`
    pub rank: &'static str,
    pub suit: Suit,
    pub value: u32,
}

impl Card {
    pub fn is_ace(&self) -> bool {
        self.rank == "A"
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.rank, self.suit)
    }
}

const RANKS: [(&str, u32); 13] = [
    ("2", 2),
    ("3", 3),
    ("4", 4),
    ("5", 5),
    ("6", 6),
    ("7", 7),
    ("8", 8),
    ("9", 9),
    ("10", 10),
    ("J", 10),
    ("Q", 10),
    ("K", 10),
    ("A", 11),
];

/// A fresh 52-card deck, suit by suit.
pub fn full_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| {
            RANKS
                .iter()
                .map(move |&(rank, value)| Card { rank, suit, value })
        })
        .collect()
}

/// A player's running hand.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Hand {
    pub score: u32,
    /// Aces still counted as 11
    pub aces: u32,
}

impl Hand {
    fn add(&mut self, card: Card, action: BlackjackAction) {
        let times = if action == BlackjackAction::Double { 2 } else { 1 };
        self.score += card.value * times;
        if card.is_ace() {
            self.aces += times;
        }

        // Only the card just drawn can soften the hand.
        if self.score > TARGET && card.is_ace() && self.aces > 0 {
            self.score -= 10;
            self.aces -= 1;
        }
    }
}

/// Result of one action.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BlackjackOutcome {
    /// Round continues
    Drew { card: Card, score: u32 },
    /// Hit exactly twenty-one
    Blackjack { card: Card },
    Bust { card: Card },
    DealerWins { dealer: u32 },
    PlayerWins { dealer: u32 },
}

impl BlackjackOutcome {
    /// Score change for the round, zero while it continues.
    pub fn delta(&self) -> i64 {
        match self {
            Self::Drew { .. } => 0,
            Self::Blackjack { .. } | Self::PlayerWins { .. } => WIN_DELTA,
            Self::Bust { .. } | Self::DealerWins { .. } => LOSS_DELTA,
        }
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::Drew { .. })
    }
}

impl fmt::Display for BlackjackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drew { card, score } => write!(
                f,
                "You drew {card} ({}). Your current score is {score}.",
                card.value
            ),
            Self::Blackjack { card } => write!(
                f,
                "Congratulations! Twenty-one! Your score went up by {WIN_DELTA}. The card drawn was {card} ({}).",
                card.value
            ),
            Self::Bust { card } => write!(
                f,
                "You lost! You went over 21, your score went down by {}. The card drawn was {card} ({}).",
                -LOSS_DELTA,
                card.value
            ),
            Self::DealerWins { dealer } => write!(
                f,
                "The dealer wins with {dealer}. Your score went down by {}.",
                -LOSS_DELTA
            ),
            Self::PlayerWins { dealer } => write!(
                f,
                "You win against the dealer's {dealer}! Your score went up by {WIN_DELTA}."
            ),
        }
    }
}

/// Shared deck plus every player's running hand.
#[derive(Debug)]
pub struct BlackjackTable {
    hands: HashMap<(ChatId, UserId), Hand>,
    deck: Vec<Card>,
}

impl Default for BlackjackTable {
    fn default() -> Self {
        Self::new()
    }
}

impl BlackjackTable {
    pub fn new() -> Self {
        Self {
            hands: HashMap::new(),
            deck: full_deck(),
        }
    }

    /// Apply `action` to the player's hand.
    ///
    /// A player without a hand starts from zero, so standing straight away
    /// loses to any dealer. Finished rounds clear the hand.
    pub fn play<R: Rng + ?Sized>(
        &mut self,
        chat_id: ChatId,
        user_id: UserId,
        action: BlackjackAction,
        rng: &mut R,
    ) -> BlackjackOutcome {
        let key = (chat_id, user_id);
        let mut hand = self.hands.get(&key).copied().unwrap_or_default();

        let outcome = match action {
            BlackjackAction::Hit | BlackjackAction::Double => {
                let card = self.draw(rng);
                hand.add(card, action);
                if hand.score > TARGET {
                    BlackjackOutcome::Bust { card }
                } else if hand.score == TARGET {
                    BlackjackOutcome::Blackjack { card }
                } else {
                    BlackjackOutcome::Drew {
                        card,
                        score: hand.score,
                    }
                }
            }
            BlackjackAction::Stand => {
                let dealer = rng.random_range(DEALER_RANGE);
                if dealer >= hand.score {
                    BlackjackOutcome::DealerWins { dealer }
                } else {
                    BlackjackOutcome::PlayerWins { dealer }
                }
            }
        };

        if outcome.is_finished() {
            self.hands.remove(&key);
        } else {
            self.hands.insert(key, hand);
        }
        outcome
    }

    pub fn hand(&self, chat_id: ChatId, user_id: UserId) -> Option<Hand> {
        self.hands.get(&(chat_id, user_id)).copied()
    }

    pub fn cards_left(&self) -> usize {
        self.deck.len()
    }

    fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Card {
        if self.deck.is_empty() {
            log::debug!("Blackjack deck exhausted, reshuffling");
            self.deck = full_deck();
        }
        let index = rng.random_range(0..self.deck.len());
        self.deck.swap_remove(index)
    }
}
