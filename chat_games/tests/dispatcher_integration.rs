/// Integration tests for the command dispatcher
///
/// These tests run chat messages end to end through the dispatcher with an
/// in-memory store and a recording score service.
use async_trait::async_trait;
use chat_games::{
    commands::{Dispatcher, DispatcherConfig, MessageContext, Reply},
    records::{
        ChatId, CooldownPolicy, GameKind, MemoryUserStore, StoreError, StoreResult, UserId,
        UserRecord, UserStore,
    },
    scoring::{ScoreResult, ScoreService},
};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

const CHAT: ChatId = -100;

#[derive(Debug, Default)]
struct RecordingScores {
    calls: Mutex<Vec<(ChatId, UserId, Option<String>, i64)>>,
}

impl RecordingScores {
    fn deltas(&self) -> Vec<i64> {
        self.calls.lock().unwrap().iter().map(|c| c.3).collect()
    }
}

#[async_trait]
impl ScoreService for RecordingScores {
    async fn adjust(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        username: Option<&str>,
        delta: i64,
    ) -> ScoreResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((chat_id, user_id, username.map(str::to_string), delta));
        Ok(())
    }
}

/// Store whose disk is always gone.
struct BrokenStore;

fn broken() -> StoreError {
    StoreError::Io(std::io::Error::other("disk unavailable"))
}

#[async_trait]
impl UserStore for BrokenStore {
    async fn register(&self, _: ChatId, _: UserId, _: Option<&str>) -> StoreResult<()> {
        Err(broken())
    }

    async fn get(&self, _: ChatId, _: UserId) -> StoreResult<Option<UserRecord>> {
        Err(broken())
    }

    async fn touch(&self, _: ChatId, _: UserId, _: GameKind, _: DateTime<Utc>) -> StoreResult<()> {
        Err(broken())
    }
}

struct Harness {
    dispatcher: Dispatcher,
    store: Arc<MemoryUserStore>,
    scores: Arc<RecordingScores>,
}

fn harness(config: DispatcherConfig) -> Harness {
    let store = Arc::new(MemoryUserStore::new());
    let scores = Arc::new(RecordingScores::default());
    let dispatcher = Dispatcher::new(config, store.clone(), scores.clone());
    Harness {
        dispatcher,
        store,
        scores,
    }
}

fn alice() -> MessageContext {
    MessageContext::new(CHAT, 1, Some("alice"))
}

fn bob() -> MessageContext {
    MessageContext::new(CHAT, 2, Some("bob"))
}

async fn text(h: &Harness, ctx: &MessageContext, message: &str) -> String {
    match h.dispatcher.handle(ctx, message).await {
        Reply::Text { text } => text,
        other => panic!("expected text reply to {message:?}, got {other:?}"),
    }
}

#[tokio::test]
async fn test_tictactoe_against_computer() {
    let h = harness(DispatcherConfig::default());

    let reply = text(&h, &alice(), "/tictactoe").await;
    assert!(reply.starts_with("A new game has started."));
    assert_eq!(h.dispatcher.active_games().await, 1);

    let reply = text(&h, &alice(), "/play 2 2").await;
    assert!(reply.starts_with("Newman made a move:"));
    assert!(reply.contains('x'));
    assert!(reply.contains('o'));

    let reply = text(&h, &alice(), "/play 2 2").await;
    assert_eq!(reply, "Invalid move: that cell is taken.");
}

#[tokio::test]
async fn test_tictactoe_between_members() {
    let h = harness(DispatcherConfig::default());

    text(&h, &alice(), "/tictactoe o @bob").await;

    let reply = text(&h, &bob(), "/play 1 1").await;
    assert_eq!(reply, "It is @alice's turn.");

    let reply = text(&h, &alice(), "/play 1 1").await;
    assert!(reply.starts_with("Move accepted"));

    let reply = text(&h, &bob(), "/play 1 1").await;
    assert_eq!(reply, "Invalid move: that cell is taken.");
}

#[tokio::test]
async fn test_tictactoe_opponent_handle_ignores_case() {
    let h = harness(DispatcherConfig::default());

    text(&h, &alice(), "/tictactoe X @Bob").await;
    text(&h, &alice(), "/play 1 1").await;

    let reply = text(&h, &bob(), "/play 2 2").await;
    assert!(reply.starts_with("Move accepted"), "{reply}");

    let capitalised_bob = MessageContext::new(CHAT, 2, Some("BOB"));
    let reply = text(&h, &capitalised_bob, "/play 3 3").await;
    assert_eq!(reply, "It is @alice's turn.");
}

#[tokio::test]
async fn test_tictactoe_self_opponent_ignores_case() {
    let h = harness(DispatcherConfig::default());

    let reply = text(&h, &alice(), "/tictactoe X @Alice").await;
    assert!(reply.contains("cannot play against yourself"), "{reply}");
    assert_eq!(h.dispatcher.active_games().await, 0);
}

#[tokio::test]
async fn test_tictactoe_errors_are_replies() {
    let h = harness(DispatcherConfig::default());

    let reply = text(&h, &alice(), "/play 1 1").await;
    assert_eq!(reply, "No game found. Type /tictactoe to start a new game.");

    let reply = text(&h, &alice(), "/tictactoe Q").await;
    assert!(reply.starts_with("Invalid choice \"Q\""));

    text(&h, &alice(), "/tictactoe").await;
    let reply = text(&h, &alice(), "/play 0 5").await;
    assert_eq!(reply, "Invalid coordinates 0 5. Enter numbers from 1 to 3.");
}

#[tokio::test]
async fn test_user_without_username_plays_by_id() {
    let h = harness(DispatcherConfig::default());
    let anon = MessageContext::new(CHAT, 99, None);

    text(&h, &anon, "/tictactoe X @alice").await;
    let reply = text(&h, &alice(), "/play 1 1").await;
    assert_eq!(reply, "It is @99's turn.");
}

#[tokio::test]
async fn test_commands_register_users() {
    let h = harness(DispatcherConfig::default());

    text(&h, &alice(), "/help").await;
    let record = h.store.get(CHAT, 1).await.unwrap().unwrap();
    assert_eq!(record.username.as_deref(), Some("alice"));

    assert_eq!(h.dispatcher.handle(&bob(), "hello").await, Reply::Silent);
    assert!(h.store.get(CHAT, 2).await.unwrap().is_none());
}

#[tokio::test]
async fn test_slot_machine_reports_and_cools_down() {
    let h = harness(DispatcherConfig::default());

    let reply = text(&h, &alice(), "/slotmachine").await;
    assert!(reply.starts_with("Result:"));

    let record = h.store.get(CHAT, 1).await.unwrap().unwrap();
    assert!(record.last_played(GameKind::SlotMachine).is_some());
    assert!(h.scores.deltas().len() <= 1);
    assert!(h.scores.deltas().iter().all(|d| *d != 0));

    let reply = text(&h, &alice(), "/slotmachine").await;
    assert!(reply.starts_with("No attempts left. Come back at"));

    // Other games and other users are unaffected
    let reply = text(&h, &bob(), "/slotmachine").await;
    assert!(reply.starts_with("Result:"));
}

#[tokio::test]
async fn test_blackjack_stand_finishes_round() {
    let h = harness(DispatcherConfig::default());

    let reply = text(&h, &alice(), "/blackjack stand").await;
    assert!(reply.starts_with("The dealer wins with"));

    let calls = h.scores.calls.lock().unwrap().clone();
    assert_eq!(calls, vec![(CHAT, 1, Some("alice".to_string()), -2)]);

    let reply = text(&h, &alice(), "/blackjack hit").await;
    assert!(reply.starts_with("No attempts left"));
}

#[tokio::test]
async fn test_blackjack_hits_until_round_ends() {
    let h = harness(DispatcherConfig::default());

    let mut finished = false;
    for _ in 0..30 {
        let reply = text(&h, &alice(), "/blackjack hit").await;
        if reply.starts_with("You drew") {
            assert!(h.scores.deltas().is_empty());
            continue;
        }
        assert!(reply.starts_with("You lost!") || reply.starts_with("Congratulations!"));
        finished = true;
        break;
    }

    assert!(finished);
    assert_eq!(h.scores.deltas().len(), 1);
    let record = h.store.get(CHAT, 1).await.unwrap().unwrap();
    assert!(record.last_played(GameKind::Blackjack).is_some());
}

#[tokio::test]
async fn test_blackjack_rejects_unknown_action() {
    let h = harness(DispatcherConfig::default());
    let reply = text(&h, &alice(), "/blackjack fold").await;
    assert_eq!(reply, "Invalid action. Allowed actions: hit, stand, double");
}

#[tokio::test]
async fn test_zero_cooldown_allows_replays() {
    let h = harness(DispatcherConfig {
        cooldowns: CooldownPolicy::from_minutes(0, 0, 0),
        ..DispatcherConfig::default()
    });

    for _ in 0..3 {
        assert!(matches!(
            h.dispatcher.handle(&alice(), "/spin").await,
            Reply::Animation { .. }
        ));
    }
}

#[tokio::test]
async fn test_commands_for_this_bot_by_name() {
    let h = harness(DispatcherConfig {
        bot_username: "newman_bot".to_string(),
        ..DispatcherConfig::default()
    });

    let reply = text(&h, &alice(), "/tictactoe@newman_bot").await;
    assert!(reply.starts_with("A new game has started."));
    assert_eq!(
        h.dispatcher.handle(&alice(), "/play@other_bot 1 1").await,
        Reply::Silent
    );
}

#[tokio::test]
async fn test_broken_store_still_replies() {
    let scores = Arc::new(RecordingScores::default());
    let dispatcher = Dispatcher::new(
        DispatcherConfig::default(),
        Arc::new(BrokenStore),
        scores.clone(),
    );

    let reply = dispatcher.handle(&alice(), "/blackjack stand").await;
    assert!(reply.as_text().unwrap().starts_with("The dealer wins with"));
    assert_eq!(scores.deltas(), vec![-2]);

    let reply = dispatcher.handle(&alice(), "/tictactoe").await;
    assert!(reply.as_text().is_some());
}
