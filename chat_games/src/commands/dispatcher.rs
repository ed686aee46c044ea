//! Command dispatcher: routes parsed commands to the games.

use super::parser::{Command, parse_command};
use crate::{
    casino::{BlackjackAction, BlackjackTable, slot_machine, wheel},
    records::{ChatId, CooldownPolicy, GameKind, UserId, UserStore},
    scoring::ScoreService,
    tictactoe::{GameRegistry, PlayerId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;

pub const DEFAULT_BOT_USERNAME: &str = "realnewman_bot";
pub const DEFAULT_PURGE_COUNT: u32 = 50;
pub const DEFAULT_WHEEL_FRAME_DELAY: Duration = Duration::from_secs(1);

const GREETING: &str = "Type / to see the list of commands.";

const HELP: &str = "Available commands:\n\
/tictactoe [X|O] [@opponent] - start tic-tac-toe (against Newman if no opponent)\n\
/play <row> <col> - make a move, rows and columns 1 to 3\n\
/slotmachine - spin the slot machine\n\
/blackjack <hit|stand|double> - play blackjack against the dealer\n\
/spin - spin the wheel of fortune\n\
/help - show this message";

/// Dispatcher settings.
#[derive(Clone, Debug)]
pub struct DispatcherConfig {
    /// Username commands may be suffixed with (`/spin@<bot_username>`)
    pub bot_username: String,

    /// Username allowed to purge messages; nobody when `None`
    pub admin_username: Option<String>,

    pub cooldowns: CooldownPolicy,

    /// Messages removed by `/delete`
    pub purge_count: u32,

    /// Pause between wheel animation frames
    pub wheel_frame_delay: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            bot_username: DEFAULT_BOT_USERNAME.to_string(),
            admin_username: None,
            cooldowns: CooldownPolicy::default(),
            purge_count: DEFAULT_PURGE_COUNT,
            wheel_frame_delay: DEFAULT_WHEEL_FRAME_DELAY,
        }
    }
}

/// Who sent a message, and where.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MessageContext {
    pub chat_id: ChatId,
    pub user_id: UserId,
    /// Platform username without `@`
    pub username: Option<String>,
}

impl MessageContext {
    pub fn new(chat_id: ChatId, user_id: UserId, username: Option<&str>) -> Self {
        Self {
            chat_id,
            user_id,
            username: username.map(|name| name.trim_start_matches('@').to_string()),
        }
    }

    /// Tic-tac-toe handle: `@username`, or `@<user_id>` for users without one.
    ///
    /// Usernames are case-insensitive, so the handle is lower-cased to match
    /// opponents named in `/tictactoe`.
    pub fn handle(&self) -> String {
        match &self.username {
            Some(name) => format!("@{}", name.to_ascii_lowercase()),
            None => format!("@{}", self.user_id),
        }
    }
}

/// What the transport should do in response to a message.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    /// Send one text message
    Text { text: String },

    /// Send the first frame, then edit it into each following frame
    Animation {
        frames: Vec<String>,
        frame_delay_ms: u64,
    },

    /// Delete the triggering message and the `count` messages before it
    PurgeRecent { count: u32 },

    /// Do nothing
    Silent,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Message text, if this is a plain text reply.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Routes chat commands to tic-tac-toe, the casino games and admin actions.
///
/// Every command is applied to shared state behind async mutexes, so two
/// commands for the same chat never interleave. Storage and scoring failures
/// are logged and never turn into user-visible errors.
pub struct Dispatcher {
    config: DispatcherConfig,
    registry: Mutex<GameRegistry>,
    blackjack: Mutex<BlackjackTable>,
    store: Arc<dyn UserStore>,
    scores: Arc<dyn ScoreService>,
}

impl Dispatcher {
    pub fn new(
        config: DispatcherConfig,
        store: Arc<dyn UserStore>,
        scores: Arc<dyn ScoreService>,
    ) -> Self {
        Self {
            config,
            registry: Mutex::new(GameRegistry::new()),
            blackjack: Mutex::new(BlackjackTable::new()),
            store,
            scores,
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Number of chats with a tic-tac-toe game in progress.
    pub async fn active_games(&self) -> usize {
        self.registry.lock().await.len()
    }

    /// Handle one chat message.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Sender and chat
    /// * `text` - Raw message text
    ///
    /// # Returns
    ///
    /// The reply to send. Plain text and commands for other bots yield
    /// [`Reply::Silent`].
    pub async fn handle(&self, ctx: &MessageContext, text: &str) -> Reply {
        let command = match parse_command(text, &self.config.bot_username) {
            Ok(command) => command,
            Err(e) if e.is_silent() => return Reply::Silent,
            Err(e) => return Reply::text(e.to_string()),
        };

        log::info!(
            "Chat {} user {}: /{}",
            ctx.chat_id,
            ctx.user_id,
            command.name()
        );

        if let Err(e) = self
            .store
            .register(ctx.chat_id, ctx.user_id, ctx.username.as_deref())
            .await
        {
            log::warn!("Failed to register user {}: {}", ctx.user_id, e);
        }

        match command {
            Command::Start => Reply::text(GREETING),
            Command::Help => Reply::text(HELP),
            Command::TicTacToe { symbol, opponent } => {
                self.start_tictactoe(ctx, &symbol, opponent).await
            }
            Command::Play { row, col } => self.play_tictactoe(ctx, row, col).await,
            Command::SlotMachine => self.slot_machine(ctx).await,
            Command::Blackjack(action) => self.blackjack(ctx, action).await,
            Command::Spin => self.spin_wheel(ctx).await,
            Command::Delete => self.delete(ctx),
        }
    }

    async fn start_tictactoe(
        &self,
        ctx: &MessageContext,
        symbol: &str,
        opponent: Option<String>,
    ) -> Reply {
        let initiator = PlayerId::human(ctx.handle());
        let opponent = opponent.map(PlayerId::human);

        let mut registry = self.registry.lock().await;
        match registry.create_game(ctx.chat_id, initiator, symbol, opponent) {
            Ok(outcome) => Reply::text(outcome.to_string()),
            Err(e) => Reply::text(e.to_string()),
        }
    }

    async fn play_tictactoe(&self, ctx: &MessageContext, row: i64, col: i64) -> Reply {
        let player = PlayerId::human(ctx.handle());

        let mut registry = self.registry.lock().await;
        match registry.submit_move(ctx.chat_id, &player, row, col) {
            Ok(outcome) => Reply::text(outcome.to_string()),
            Err(e) => Reply::text(e.to_string()),
        }
    }

    async fn slot_machine(&self, ctx: &MessageContext) -> Reply {
        if let Some(reply) = self.cooldown_reply(ctx, GameKind::SlotMachine).await {
            return reply;
        }

        let outcome = {
            let mut rng = rand::rng();
            slot_machine::spin(&mut rng)
        };

        self.finish_round(ctx, GameKind::SlotMachine, outcome.delta)
            .await;
        Reply::text(outcome.to_string())
    }

    async fn blackjack(&self, ctx: &MessageContext, action: BlackjackAction) -> Reply {
        if let Some(reply) = self.cooldown_reply(ctx, GameKind::Blackjack).await {
            return reply;
        }

        let outcome = {
            let mut table = self.blackjack.lock().await;
            let mut rng = rand::rng();
            table.play(ctx.chat_id, ctx.user_id, action, &mut rng)
        };

        if outcome.is_finished() {
            self.finish_round(ctx, GameKind::Blackjack, outcome.delta())
                .await;
        }
        Reply::text(outcome.to_string())
    }

    async fn spin_wheel(&self, ctx: &MessageContext) -> Reply {
        if let Some(reply) = self.cooldown_reply(ctx, GameKind::Wheel).await {
            return reply;
        }

        let outcome = {
            let mut rng = rand::rng();
            wheel::spin(&mut rng)
        };

        self.finish_round(ctx, GameKind::Wheel, outcome.delta()).await;
        Reply::Animation {
            frames: outcome.frames,
            frame_delay_ms: u64::try_from(self.config.wheel_frame_delay.as_millis())
                .unwrap_or(u64::MAX),
        }
    }

    fn delete(&self, ctx: &MessageContext) -> Reply {
        let is_admin = match (&self.config.admin_username, &ctx.username) {
            (Some(admin), Some(name)) => admin.trim_start_matches('@').eq_ignore_ascii_case(name),
            _ => false,
        };

        if is_admin {
            log::info!(
                "Admin {} purging {} messages in chat {}",
                ctx.handle(),
                self.config.purge_count,
                ctx.chat_id
            );
            Reply::PurgeRecent {
                count: self.config.purge_count,
            }
        } else {
            Reply::text("Only the bot owner can do that.")
        }
    }

    /// Refusal text while the user is cooling down for `kind`.
    ///
    /// An unreadable record lets the user play.
    async fn cooldown_reply(&self, ctx: &MessageContext, kind: GameKind) -> Option<Reply> {
        let record = match self.store.get(ctx.chat_id, ctx.user_id).await {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Failed to read record for user {}: {}", ctx.user_id, e);
                None
            }
        };

        let until = self
            .config
            .cooldowns
            .check(record.as_ref(), kind, Utc::now())?;
        log::debug!(
            "User {} in chat {} cooling down for {} until {}",
            ctx.user_id,
            ctx.chat_id,
            kind,
            until
        );
        Some(Reply::text(cooldown_message(until)))
    }

    /// Report the round's delta and stamp the user's last play.
    async fn finish_round(&self, ctx: &MessageContext, kind: GameKind, delta: i64) {
        if delta != 0 {
            if let Err(e) = self
                .scores
                .adjust(ctx.chat_id, ctx.user_id, ctx.username.as_deref(), delta)
                .await
            {
                log::warn!(
                    "Failed to apply score delta {} for user {}: {}",
                    delta,
                    ctx.user_id,
                    e
                );
            }
        }

        if let Err(e) = self
            .store
            .touch(ctx.chat_id, ctx.user_id, kind, Utc::now())
            .await
        {
            log::warn!("Failed to record {} round for user {}: {}", kind, ctx.user_id, e);
        }
    }
}

fn cooldown_message(until: DateTime<Utc>) -> String {
    format!(
        "No attempts left. Come back at {} UTC!",
        until.format("%H:%M:%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{records::MemoryUserStore, scoring::NoopScoreService};
    use chrono::TimeZone;

    fn dispatcher(config: DispatcherConfig) -> Dispatcher {
        Dispatcher::new(
            config,
            Arc::new(MemoryUserStore::new()),
            Arc::new(NoopScoreService),
        )
    }

    fn alice() -> MessageContext {
        MessageContext::new(-100, 1, Some("alice"))
    }

    #[test]
    fn test_handle_falls_back_to_user_id() {
        assert_eq!(alice().handle(), "@alice");
        assert_eq!(MessageContext::new(1, 77, None).handle(), "@77");
        assert_eq!(MessageContext::new(1, 77, Some("@bob")).handle(), "@bob");
        assert_eq!(MessageContext::new(1, 77, Some("Bob")).handle(), "@bob");
    }

    #[test]
    fn test_cooldown_message() {
        let until = Utc.with_ymd_and_hms(2024, 5, 1, 13, 4, 5).unwrap();
        assert_eq!(
            cooldown_message(until),
            "No attempts left. Come back at 13:04:05 UTC!"
        );
    }

    #[test]
    fn test_reply_serialization() {
        let json = serde_json::to_value(Reply::text("hi")).unwrap();
        assert_eq!(json["kind"], "text");
        assert_eq!(json["text"], "hi");

        let json = serde_json::to_value(Reply::PurgeRecent { count: 50 }).unwrap();
        assert_eq!(json["kind"], "purge_recent");
        assert_eq!(json["count"], 50);

        let json = serde_json::to_value(Reply::Silent).unwrap();
        assert_eq!(json["kind"], "silent");
    }

    #[tokio::test]
    async fn test_plain_text_is_silent() {
        let d = dispatcher(DispatcherConfig::default());
        assert_eq!(d.handle(&alice(), "good morning").await, Reply::Silent);
        assert_eq!(d.handle(&alice(), "/spin@someone_else").await, Reply::Silent);
    }

    #[tokio::test]
    async fn test_parse_error_is_answered() {
        let d = dispatcher(DispatcherConfig::default());
        let reply = d.handle(&alice(), "/play x y").await;
        assert!(reply.as_text().unwrap().contains("numeric coordinates"));
    }

    #[tokio::test]
    async fn test_delete_requires_admin() {
        let d = dispatcher(DispatcherConfig {
            admin_username: Some("@boss".to_string()),
            ..DispatcherConfig::default()
        });

        let reply = d.handle(&alice(), "/delete").await;
        assert_eq!(reply, Reply::text("Only the bot owner can do that."));

        let boss = MessageContext::new(-100, 2, Some("Boss"));
        assert_eq!(
            d.handle(&boss, "/delete").await,
            Reply::PurgeRecent { count: DEFAULT_PURGE_COUNT }
        );
    }

    #[tokio::test]
    async fn test_delete_without_admin_configured() {
        let d = dispatcher(DispatcherConfig::default());
        assert!(d.handle(&alice(), "/delete").await.as_text().is_some());
    }

    #[tokio::test]
    async fn test_spin_returns_animation() {
        let d = dispatcher(DispatcherConfig {
            wheel_frame_delay: Duration::from_millis(250),
            ..DispatcherConfig::default()
        });

        match d.handle(&alice(), "/spin").await {
            Reply::Animation {
                frames,
                frame_delay_ms,
            } => {
                assert_eq!(frames.len(), wheel::TEASER_FRAMES + 1);
                assert_eq!(frame_delay_ms, 250);
            }
            other => panic!("expected animation, got {other:?}"),
        }

        let again = d.handle(&alice(), "/spin").await;
        assert!(again.as_text().unwrap().starts_with("No attempts left"));
    }
}
