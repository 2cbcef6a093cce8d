//! JSON-blob file stores.
//!
//! One pretty-printed JSON file per collection under a data directory.
//! The serialized shapes are the de facto save-file schema (camelCase
//! field names from the domain types) and round-trip losslessly.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use repforge_domain::{Player, Quest, WorkoutSession};

use crate::infrastructure::persistence::memory::DEFAULT_SCREEN_TIME_GOAL_HOURS;
use crate::infrastructure::ports::{
    PlayerStore, QuestStore, ScreenTimeStore, SessionStore, StoreError,
};

const PLAYER_FILE: &str = "player.json";
const DAILY_QUESTS_FILE: &str = "daily_quests.json";
const URGENT_QUESTS_FILE: &str = "urgent_quests.json";
const LAST_RESET_FILE: &str = "last_reset_day.json";
const SESSIONS_FILE: &str = "sessions.json";
const SCREEN_TIME_FILE: &str = "screen_time.json";

/// File-backed implementation of every store port.
pub struct JsonFileStores {
    dir: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScreenTimeRecord {
    #[serde(default)]
    daily_goal_hours: Option<u32>,
    #[serde(default)]
    hours_by_day: HashMap<NaiveDate, u32>,
}

impl JsonFileStores {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Read a JSON blob, `None` when the file does not exist yet.
    async fn read<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>, StoreError> {
        let path = self.path(file);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn write<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let bytes = serde_json::to_vec_pretty(value)?;
        tokio::fs::write(self.path(file), bytes).await?;
        Ok(())
    }

    async fn read_screen_time(&self) -> Result<ScreenTimeRecord, StoreError> {
        Ok(self
            .read::<ScreenTimeRecord>(SCREEN_TIME_FILE)
            .await?
            .unwrap_or_default())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl PlayerStore for JsonFileStores {
    async fn load(&self) -> Result<Player, StoreError> {
        Ok(self.read(PLAYER_FILE).await?.unwrap_or_default())
    }

    async fn save(&self, player: &Player) -> Result<(), StoreError> {
        self.write(PLAYER_FILE, player).await
    }
}

#[async_trait]
impl QuestStore for JsonFileStores {
    async fn load_daily(&self) -> Result<Vec<Quest>, StoreError> {
        Ok(self.read(DAILY_QUESTS_FILE).await?.unwrap_or_default())
    }

    async fn save_daily(&self, quests: &[Quest]) -> Result<(), StoreError> {
        self.write(DAILY_QUESTS_FILE, &quests).await
    }

    async fn load_urgent(&self) -> Result<Vec<Quest>, StoreError> {
        Ok(self.read(URGENT_QUESTS_FILE).await?.unwrap_or_default())
    }

    async fn save_urgent(&self, quests: &[Quest]) -> Result<(), StoreError> {
        self.write(URGENT_QUESTS_FILE, &quests).await
    }

    async fn load_last_reset_day(&self) -> Result<Option<NaiveDate>, StoreError> {
        self.read(LAST_RESET_FILE).await
    }

    async fn save_last_reset_day(&self, day: NaiveDate) -> Result<(), StoreError> {
        self.write(LAST_RESET_FILE, &day).await
    }
}

#[async_trait]
impl SessionStore for JsonFileStores {
    async fn append(&self, session: &WorkoutSession) -> Result<(), StoreError> {
        let mut sessions: Vec<WorkoutSession> =
            self.read(SESSIONS_FILE).await?.unwrap_or_default();
        sessions.push(session.clone());
        self.write(SESSIONS_FILE, &sessions).await
    }

    async fn list(&self) -> Result<Vec<WorkoutSession>, StoreError> {
        Ok(self.read(SESSIONS_FILE).await?.unwrap_or_default())
    }
}

#[async_trait]
impl ScreenTimeStore for JsonFileStores {
    async fn hours_for(&self, day: NaiveDate) -> Result<Option<u32>, StoreError> {
        Ok(self.read_screen_time().await?.hours_by_day.get(&day).copied())
    }

    async fn record_hours(&self, day: NaiveDate, hours: u32) -> Result<(), StoreError> {
        let mut record = self.read_screen_time().await?;
        record.hours_by_day.insert(day, hours);
        self.write(SCREEN_TIME_FILE, &record).await
    }

    async fn daily_goal(&self) -> Result<u32, StoreError> {
        Ok(self
            .read_screen_time()
            .await?
            .daily_goal_hours
            .unwrap_or(DEFAULT_SCREEN_TIME_GOAL_HOURS))
    }

    async fn set_daily_goal(&self, hours: u32) -> Result<(), StoreError> {
        let mut record = self.read_screen_time().await?;
        record.daily_goal_hours = Some(hours);
        self.write(SCREEN_TIME_FILE, &record).await
    }
}
