//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is
//! concrete types. Ports exist for:
//! - Persistence (key-value blob stores behind JSON today)
//! - Clock/Random (for deterministic testing)

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use repforge_domain::{Player, Quest, WorkoutSession};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

// =============================================================================
// Clock and Random Ports
// =============================================================================

/// Supplies the current instant. All engine operations are functions of
/// `(state, now, inputs)`; nothing reads the system clock ambiently.
#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day for daily-cadence comparisons.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Injectable randomness. Seedable implementations make quest generation
/// and debuff targeting reproducible in tests.
#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// One uniform sample in `[0, 1)`.
    fn uniform(&self) -> f64;

    /// Uniform integer in `[min, max]` (inclusive).
    fn gen_range(&self, min: i32, max: i32) -> i32;
}

/// Pick one element of a non-empty slice uniformly.
pub fn pick<'a, T>(random: &dyn RandomPort, items: &'a [T]) -> &'a T {
    let index = random.gen_range(0, items.len() as i32 - 1) as usize;
    &items[index.min(items.len() - 1)]
}

// =============================================================================
// Persistence Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Load the player record, or a fresh default player (level 1, all
    /// stats 10, empty debuffs, title "Novice") when none exists.
    async fn load(&self) -> Result<Player, StoreError>;
    async fn save(&self, player: &Player) -> Result<(), StoreError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestStore: Send + Sync {
    async fn load_daily(&self) -> Result<Vec<Quest>, StoreError>;
    async fn save_daily(&self, quests: &[Quest]) -> Result<(), StoreError>;
    async fn load_urgent(&self) -> Result<Vec<Quest>, StoreError>;
    async fn save_urgent(&self, quests: &[Quest]) -> Result<(), StoreError>;
    async fn load_last_reset_day(&self) -> Result<Option<NaiveDate>, StoreError>;
    async fn save_last_reset_day(&self, day: NaiveDate) -> Result<(), StoreError>;
}

/// Append-only workout/mobility session log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn append(&self, session: &WorkoutSession) -> Result<(), StoreError>;
    async fn list(&self) -> Result<Vec<WorkoutSession>, StoreError>;
}

/// Date-keyed screen-time reports plus the stored daily goal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScreenTimeStore: Send + Sync {
    async fn hours_for(&self, day: NaiveDate) -> Result<Option<u32>, StoreError>;
    async fn record_hours(&self, day: NaiveDate, hours: u32) -> Result<(), StoreError>;
    async fn daily_goal(&self) -> Result<u32, StoreError>;
    async fn set_daily_goal(&self, hours: u32) -> Result<(), StoreError>;
}
