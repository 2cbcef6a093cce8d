//! In-memory store adapters, used throughout the engine's tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use repforge_domain::{Player, Quest, WorkoutSession};

use crate::infrastructure::ports::{
    PlayerStore, QuestStore, ScreenTimeStore, SessionStore, StoreError,
};

/// Default daily screen-time goal in hours, used until one is stored.
pub const DEFAULT_SCREEN_TIME_GOAL_HOURS: u32 = 4;

/// Every collection in one struct; an `Arc<MemoryStores>` coerces into each
/// store port individually.
#[derive(Default)]
pub struct MemoryStores {
    player: RwLock<Option<Player>>,
    daily: RwLock<Vec<Quest>>,
    urgent: RwLock<Vec<Quest>>,
    last_reset_day: RwLock<Option<NaiveDate>>,
    sessions: RwLock<Vec<WorkoutSession>>,
    screen_time: RwLock<HashMap<NaiveDate, u32>>,
    screen_time_goal: RwLock<Option<u32>>,
}

impl MemoryStores {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerStore for MemoryStores {
    async fn load(&self) -> Result<Player, StoreError> {
        Ok(self.player.read().await.clone().unwrap_or_default())
    }

    async fn save(&self, player: &Player) -> Result<(), StoreError> {
        *self.player.write().await = Some(player.clone());
        Ok(())
    }
}

#[async_trait]
impl QuestStore for MemoryStores {
    async fn load_daily(&self) -> Result<Vec<Quest>, StoreError> {
        Ok(self.daily.read().await.clone())
    }

    async fn save_daily(&self, quests: &[Quest]) -> Result<(), StoreError> {
        *self.daily.write().await = quests.to_vec();
        Ok(())
    }

    async fn load_urgent(&self) -> Result<Vec<Quest>, StoreError> {
        Ok(self.urgent.read().await.clone())
    }

    async fn save_urgent(&self, quests: &[Quest]) -> Result<(), StoreError> {
        *self.urgent.write().await = quests.to_vec();
        Ok(())
    }

    async fn load_last_reset_day(&self) -> Result<Option<NaiveDate>, StoreError> {
        Ok(*self.last_reset_day.read().await)
    }

    async fn save_last_reset_day(&self, day: NaiveDate) -> Result<(), StoreError> {
        *self.last_reset_day.write().await = Some(day);
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MemoryStores {
    async fn append(&self, session: &WorkoutSession) -> Result<(), StoreError> {
        self.sessions.write().await.push(session.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<WorkoutSession>, StoreError> {
        Ok(self.sessions.read().await.clone())
    }
}

#[async_trait]
impl ScreenTimeStore for MemoryStores {
    async fn hours_for(&self, day: NaiveDate) -> Result<Option<u32>, StoreError> {
        Ok(self.screen_time.read().await.get(&day).copied())
    }

    async fn record_hours(&self, day: NaiveDate, hours: u32) -> Result<(), StoreError> {
        self.screen_time.write().await.insert(day, hours);
        Ok(())
    }

    async fn daily_goal(&self) -> Result<u32, StoreError> {
        Ok(self
            .screen_time_goal
            .read()
            .await
            .unwrap_or(DEFAULT_SCREEN_TIME_GOAL_HOURS))
    }

    async fn set_daily_goal(&self, hours: u32) -> Result<(), StoreError> {
        *self.screen_time_goal.write().await = Some(hours);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repforge_domain::STARTER_TITLE;

    #[tokio::test]
    async fn load_without_save_yields_fresh_player() {
        let stores = MemoryStores::new();
        let player = stores.load().await.expect("load");
        assert_eq!(player.level, 1);
        assert_eq!(player.current_title, STARTER_TITLE);
    }

    #[tokio::test]
    async fn player_save_then_load_round_trips() {
        let stores = MemoryStores::new();
        let mut player = Player::new();
        player.level = 7;
        stores.save(&player).await.expect("save");
        let loaded = stores.load().await.expect("load");
        assert_eq!(loaded, player);
    }

    #[tokio::test]
    async fn screen_time_goal_defaults_until_set() {
        let stores = MemoryStores::new();
        assert_eq!(
            stores.daily_goal().await.expect("goal"),
            DEFAULT_SCREEN_TIME_GOAL_HOURS
        );
        stores.set_daily_goal(2).await.expect("set goal");
        assert_eq!(stores.daily_goal().await.expect("goal"), 2);
    }
}
