//! Quest entity and reward/penalty value objects.
//!
//! A quest is a small state machine: active until either its progress
//! reaches the single nonzero target dimension (terminal: completed) or it
//! is failed by an urgent deadline / daily reset boundary (terminal:
//! expired). No transition ever leaves a terminal state.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::QuestId;
use crate::value_objects::Stat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestKind {
    /// Part of the daily batch; replaced wholesale at the day boundary.
    Daily,
    /// Time-limited bonus objective with enhanced reward and harsher
    /// failure penalty.
    Urgent,
}

impl QuestKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            QuestKind::Daily => "Daily",
            QuestKind::Urgent => "Urgent",
        }
    }
}

impl std::fmt::Display for QuestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: QuestId,
    pub name: String,
    pub description: String,
    pub kind: QuestKind,
    /// Exactly one of `target_reps` / `target_duration_seconds` is nonzero.
    pub target_reps: u32,
    pub target_duration_seconds: u32,
    pub xp_reward: u32,
    #[serde(default)]
    pub stat_rewards: HashMap<Stat, i32>,
    pub current_progress: u32,
    /// Sticky: set once progress reaches the target, never cleared.
    pub completed: bool,
    /// Whether the reward has been handed out. Additive to the save
    /// schema; old records hydrate as unclaimed.
    #[serde(default)]
    pub reward_claimed: bool,
    pub created_at: DateTime<Utc>,
    /// Present only on urgent quests.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Quest {
    /// The single nonzero target dimension.
    pub fn target(&self) -> u32 {
        if self.target_reps > 0 {
            self.target_reps
        } else {
            self.target_duration_seconds
        }
    }

    /// Whether progress satisfies the target dimension.
    pub fn target_reached(&self) -> bool {
        self.current_progress >= self.target()
    }

    /// Whether an urgent deadline has passed. Daily quests never expire on
    /// their own; the daily reset boundary fails them instead.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(deadline) if deadline <= now)
    }

    /// Fraction of the target reached, capped at 1.0.
    pub fn progress_ratio(&self) -> f64 {
        let target = self.target();
        if target == 0 {
            return 1.0;
        }
        (self.current_progress as f64 / target as f64).min(1.0)
    }
}

/// Reward payload handed back when a quest is completed.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestReward {
    pub quest_id: QuestId,
    pub kind: QuestKind,
    pub xp: u32,
    pub stat_rewards: HashMap<Stat, i32>,
}

/// A penalty request emitted by the failure sweep. The director never
/// applies penalties itself; the caller feeds these to the debuff ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestPenalty {
    pub quest_id: QuestId,
    pub quest_name: String,
    pub kind: QuestKind,
    pub duration: Duration,
}
