//! Per-(chat, user) records used for cooldowns between chance games.
//!
//! This module implements:
//! - UserRecord: who the user is and when they last played each game
//! - UserStore: async storage trait with in-memory and JSON-file backends
//! - CooldownPolicy: minimum spacing between rounds of the same game
//!
//! ## Example
//!
//! ```
//! use chat_games::records::{CooldownPolicy, GameKind, MemoryUserStore, UserStore};
//! use chrono::Utc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryUserStore::new();
//!     let policy = CooldownPolicy::default();
//!
//!     store.register(1, 42, Some("alice")).await?;
//!     store.touch(1, 42, GameKind::SlotMachine, Utc::now()).await?;
//!
//!     let record = store.get(1, 42).await?;
//!     let blocked_until = policy.check(record.as_ref(), GameKind::SlotMachine, Utc::now());
//!     assert!(blocked_until.is_some());
//!     Ok(())
//! }
//! ```

pub mod cooldown;
pub mod errors;
pub mod models;
pub mod store;

pub use cooldown::CooldownPolicy;
pub use errors::{StoreError, StoreResult};
pub use models::{ChatId, GameKind, UserId, UserRecord};
pub use store::{JsonFileUserStore, MemoryUserStore, UserStore};
