//! User record storage backends.

use super::{
    errors::StoreResult,
    models::{ChatId, GameKind, UserId, UserRecord},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
};
use tokio::sync::{Mutex, RwLock};

/// Storage for per-(chat, user) records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Make sure a record exists for the user, refreshing a changed username.
    async fn register(&self, chat_id: ChatId, user_id: UserId, username: Option<&str>) -> StoreResult<()>;

    /// Record for the user, if they were ever registered in this chat.
    async fn get(&self, chat_id: ChatId, user_id: UserId) -> StoreResult<Option<UserRecord>>;

    /// Stamp the time the user finished a round of `kind`.
    async fn touch(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        kind: GameKind,
        at: DateTime<Utc>,
    ) -> StoreResult<()>;
}

/// Apply a registration to an optional existing record.
fn upsert(existing: Option<&mut UserRecord>, user_id: UserId, username: Option<&str>) -> Option<UserRecord> {
    match existing {
        Some(record) => {
            if username.is_some() && record.username.as_deref() != username {
                record.username = username.map(str::to_string);
            }
            None
        }
        None => Some(UserRecord::new(user_id, username.map(str::to_string))),
    }
}

/// Records kept in process memory. Lost on restart.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    records: RwLock<HashMap<(ChatId, UserId), UserRecord>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn register(&self, chat_id: ChatId, user_id: UserId, username: Option<&str>) -> StoreResult<()> {
        let mut records = self.records.write().await;
        if let Some(record) = upsert(records.get_mut(&(chat_id, user_id)), user_id, username) {
            records.insert((chat_id, user_id), record);
        }
        Ok(())
    }

    async fn get(&self, chat_id: ChatId, user_id: UserId) -> StoreResult<Option<UserRecord>> {
        Ok(self.records.read().await.get(&(chat_id, user_id)).cloned())
    }

    async fn touch(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        kind: GameKind,
        at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut records = self.records.write().await;
        records
            .entry((chat_id, user_id))
            .or_insert_with(|| UserRecord::new(user_id, None))
            .last_played
            .insert(kind, at);
        Ok(())
    }
}

/// On-disk schema of one chat's file.
#[derive(Debug, Default, Deserialize, Serialize)]
struct ChatFile {
    users: BTreeMap<UserId, UserRecord>,
}

/// Records stored as one JSON file per chat: `<dir>/<chat_id>.json`.
///
/// A missing file reads as a chat with no users. Writes go to a temporary
/// file that is then renamed over the original.
#[derive(Debug)]
pub struct JsonFileUserStore {
    dir: PathBuf,
    /// Serialises read-modify-write cycles
    write_lock: Mutex<()>,
}

impl JsonFileUserStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        log::info!("User records stored in {}", dir.display());
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn chat_path(&self, chat_id: ChatId) -> PathBuf {
        self.dir.join(format!("{chat_id}.json"))
    }

    async fn load(&self, chat_id: ChatId) -> StoreResult<ChatFile> {
        match tokio::fs::read(self.chat_path(chat_id)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ChatFile::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, chat_id: ChatId, file: &ChatFile) -> StoreResult<()> {
        let path = self.chat_path(chat_id);
        let tmp = path.with_extension("json.tmp");
        let data = serde_json::to_vec_pretty(file)?;
        tokio::fs::write(&tmp, data).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for JsonFileUserStore {
    async fn register(&self, chat_id: ChatId, user_id: UserId, username: Option<&str>) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.load(chat_id).await?;
        let before = file.users.get(&user_id).cloned();

        if let Some(record) = upsert(file.users.get_mut(&user_id), user_id, username) {
            file.users.insert(user_id, record);
        }

        if file.users.get(&user_id) != before.as_ref() {
            self.save(chat_id, &file).await?;
            log::debug!("Registered user {} in chat {}", user_id, chat_id);
        }
        Ok(())
    }

    async fn get(&self, chat_id: ChatId, user_id: UserId) -> StoreResult<Option<UserRecord>> {
        let file = self.load(chat_id).await?;
        Ok(file.users.get(&user_id).cloned())
    }

    async fn touch(
        &self,
        chat_id: ChatId,
        user_id: UserId,
        kind: GameKind,
        at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.load(chat_id).await?;
        file.users
            .entry(user_id)
            .or_insert_with(|| UserRecord::new(user_id, None))
            .last_played
            .insert(kind, at);
        self.save(chat_id, &file).await
    }
}
