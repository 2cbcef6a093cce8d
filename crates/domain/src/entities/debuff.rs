//! Debuff records - time-bound stat penalties.
//!
//! A debuff is an explicit tagged record: the category, target stat, and
//! timestamps live as fields, and severity derives from the category alone.
//! The [`DebuffId`] key is opaque; nothing semantic is ever encoded in or
//! recovered from an identifier string.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::DebuffId;
use crate::value_objects::Stat;

/// Why a debuff was applied. Closed set; severity and stat targeting both
/// follow from the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebuffCategory {
    /// An incomplete daily quest at the day boundary.
    QuestFailure,
    /// An urgent quest that hit its deadline unfinished.
    UrgentQuestFailure,
    /// Screen time over the daily goal.
    ScreenTime,
    /// No logged activity for too long.
    Inactivity,
}

impl DebuffCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            DebuffCategory::QuestFailure => "Quest Failure",
            DebuffCategory::UrgentQuestFailure => "Urgent Quest Failure",
            DebuffCategory::ScreenTime => "Screen Time",
            DebuffCategory::Inactivity => "Inactivity",
        }
    }

    /// How many effective-stat points one debuff of this category costs.
    pub fn severity(&self) -> i32 {
        match self {
            DebuffCategory::Inactivity => 3,
            DebuffCategory::UrgentQuestFailure => 2,
            DebuffCategory::ScreenTime => 1,
            DebuffCategory::QuestFailure => 1,
        }
    }

    /// The pool a target stat is drawn from, uniformly. Duplicate entries
    /// implement weighting (urgent failures lean 2:2:2:1:1 toward the
    /// physical stats).
    pub fn target_pool(&self) -> &'static [Stat] {
        match self {
            DebuffCategory::QuestFailure => &[
                Stat::Strength,
                Stat::Agility,
                Stat::Vitality,
                Stat::Intelligence,
                Stat::Luck,
            ],
            DebuffCategory::UrgentQuestFailure => &[
                Stat::Strength,
                Stat::Strength,
                Stat::Agility,
                Stat::Agility,
                Stat::Vitality,
                Stat::Vitality,
                Stat::Intelligence,
                Stat::Luck,
            ],
            DebuffCategory::ScreenTime => &[Stat::Intelligence, Stat::Luck],
            DebuffCategory::Inactivity => &[Stat::Strength, Stat::Agility, Stat::Vitality],
        }
    }
}

impl std::fmt::Display for DebuffCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// An applied penalty on one stat, active until `expires_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debuff {
    pub id: DebuffId,
    pub category: DebuffCategory,
    pub target_stat: Stat,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Debuff {
    pub fn new(
        category: DebuffCategory,
        target_stat: Stat,
        created_at: DateTime<Utc>,
        duration: Duration,
    ) -> Self {
        Self {
            id: DebuffId::new(),
            category,
            target_stat,
            created_at,
            expires_at: created_at + duration,
        }
    }

    /// Whether this debuff still counts at `now`. Defined purely as
    /// `expires_at > now`; sweeping expired entries is storage hygiene,
    /// not a correctness requirement.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    /// Time left before expiry. Zero once expired, never negative.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }

    pub fn severity(&self) -> i32 {
        self.category.severity()
    }
}

/// Snapshot of a still-active debuff, as returned by the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDebuff {
    pub id: DebuffId,
    pub category: DebuffCategory,
    pub target_stat: Stat,
    pub severity: i32,
    pub remaining: Duration,
}

/// A debuff removed by an expiry sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct ClearedDebuff {
    pub id: DebuffId,
    pub category: DebuffCategory,
    pub target_stat: Stat,
}
