//! Cooldowns between rounds of chance games.

use super::models::{GameKind, UserRecord};
use chrono::{DateTime, Duration, Utc};

/// Minimum time between two finished rounds of the same game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CooldownPolicy {
    pub slot_machine: Duration,
    pub blackjack: Duration,
    pub wheel: Duration,
}

impl CooldownPolicy {
    /// Build a policy from whole minutes.
    pub fn from_minutes(slot_machine: u32, blackjack: u32, wheel: u32) -> Self {
        Self {
            slot_machine: Duration::minutes(i64::from(slot_machine)),
            blackjack: Duration::minutes(i64::from(blackjack)),
            wheel: Duration::minutes(i64::from(wheel)),
        }
    }

    pub fn cooldown(&self, kind: GameKind) -> Duration {
        match kind {
            GameKind::SlotMachine => self.slot_machine,
            GameKind::Blackjack => self.blackjack,
            GameKind::Wheel => self.wheel,
        }
    }

    /// When the user may play `kind` again, or `None` if they may play now.
    ///
    /// Users without a record, or without a timestamp for `kind`, are never
    /// blocked.
    pub fn check(
        &self,
        record: Option<&UserRecord>,
        kind: GameKind,
        now: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        let last = record?.last_played(kind)?;
        let available_at = last + self.cooldown(kind);
        (now < available_at).then_some(available_at)
    }
}

impl Default for CooldownPolicy {
    fn default() -> Self {
        Self::from_minutes(30, 15, 15)
    }
}
