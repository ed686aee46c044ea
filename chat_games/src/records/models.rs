//! User record models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

/// Chat identifier. Group chats are negative on most platforms.
pub type ChatId = i64;

/// Platform user identifier.
pub type UserId = i64;

/// Chance games that are subject to cooldowns.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    SlotMachine,
    Blackjack,
    Wheel,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameKind::SlotMachine => write!(f, "slotmachine"),
            GameKind::Blackjack => write!(f, "blackjack"),
            GameKind::Wheel => write!(f, "wheel"),
        }
    }
}

/// What the bot remembers about one user in one chat.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct UserRecord {
    pub user_id: UserId,

    /// Platform username without the leading `@`
    pub username: Option<String>,

    /// Last finished round per game
    #[serde(default)]
    pub last_played: HashMap<GameKind, DateTime<Utc>>,
}

impl UserRecord {
    pub fn new(user_id: UserId, username: Option<String>) -> Self {
        Self {
            user_id,
            username,
            last_played: HashMap::new(),
        }
    }

    pub fn last_played(&self, kind: GameKind) -> Option<DateTime<Utc>> {
        self.last_played.get(&kind).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_roundtrip_keeps_timestamps() {
        let mut record = UserRecord::new(42, Some("alice".to_string()));
        let at = Utc::now();
        record.last_played.insert(GameKind::Wheel, at);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"wheel\""));

        let back: UserRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.last_played(GameKind::Wheel), Some(at));
        assert_eq!(back.last_played(GameKind::Blackjack), None);
    }

    #[test]
    fn test_missing_last_played_defaults_empty() {
        let record: UserRecord =
            serde_json::from_str(r#"{"user_id": 7, "username": null}"#).unwrap();
        assert!(record.last_played.is_empty());
    }
}
