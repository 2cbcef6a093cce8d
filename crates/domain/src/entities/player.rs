//! Player aggregate - the single record every rules engine reads and writes.
//!
//! The aggregate is exclusively owned by the caller; engines receive it as
//! `&mut Player` together with an explicit `now`, so every mutation is a
//! plain state transition that can be replayed deterministically.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Debuff;
use crate::ids::DebuffId;
use crate::value_objects::{BaseStats, Stat};

/// Title every player holds from the start.
pub const STARTER_TITLE: &str = "Novice";

/// XP drained per level crossing. The advertised next-level requirement
/// scales with level (see [`Player::experience_to_next_level`]) but each
/// crossing always consumes a flat step, which is what keeps the lifetime
/// identity `(level - 1) * 100 + experience` exact.
pub const XP_PER_LEVEL: u32 = 100;

/// Stat points awarded per level crossing.
pub const STAT_POINTS_PER_LEVEL: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub level: u32,
    pub experience: u32,
    pub stat_points: u32,
    pub stats: BaseStats,
    /// Active and not-yet-swept penalties, keyed by opaque id.
    #[serde(default)]
    pub debuffs: HashMap<DebuffId, Debuff>,
    pub daily_quest_streak: u32,
    pub total_reps_completed: u64,
    /// Never shrinks; always contains [`STARTER_TITLE`].
    pub unlocked_titles: BTreeSet<String>,
    /// Must be an element of `unlocked_titles`.
    pub current_title: String,
    #[serde(default)]
    pub last_screen_time_check_day: Option<NaiveDate>,
}

impl Default for Player {
    /// A fresh player: level 1, all stats 10, no debuffs, title "Novice".
    fn default() -> Self {
        let mut unlocked_titles = BTreeSet::new();
        unlocked_titles.insert(STARTER_TITLE.to_string());
        Self {
            level: 1,
            experience: 0,
            stat_points: 0,
            stats: BaseStats::default(),
            debuffs: HashMap::new(),
            daily_quest_streak: 0,
            total_reps_completed: 0,
            unlocked_titles,
            current_title: STARTER_TITLE.to_string(),
            last_screen_time_check_day: None,
        }
    }
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// The advertised XP requirement for the next level.
    pub fn experience_to_next_level(&self) -> u32 {
        self.level * 100
    }

    /// Cumulative XP earned over the player's lifetime.
    pub fn lifetime_experience(&self) -> u64 {
        (self.level as u64 - 1) * XP_PER_LEVEL as u64 + self.experience as u64
    }

    /// Debuff resistance in `[0, 0.5]`, grown by vitality and intelligence.
    pub fn resistance(&self) -> f64 {
        let raw = (self.stats.vitality + self.stats.intelligence - 20) as f64 * 0.01;
        raw.clamp(0.0, 0.5)
    }

    /// Count of active debuffs targeting `stat`.
    pub fn active_debuffs_on(&self, stat: Stat, now: DateTime<Utc>) -> usize {
        self.debuffs
            .values()
            .filter(|d| d.target_stat == stat && d.is_active(now))
            .count()
    }

    /// Whether any debuff is still active at `now`.
    pub fn has_active_debuffs(&self, now: DateTime<Utc>) -> bool {
        self.debuffs.values().any(|d| d.is_active(now))
    }

    pub fn has_title(&self, title: &str) -> bool {
        self.unlocked_titles.contains(title)
    }

    /// Record a title unlock. Returns false if it was already held.
    pub fn unlock_title(&mut self, title: impl Into<String>) -> bool {
        self.unlocked_titles.insert(title.into())
    }
}
