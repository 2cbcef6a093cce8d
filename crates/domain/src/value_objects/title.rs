//! Title catalog - unlockable achievement names and their predicates.
//!
//! The catalog is static and shared by all players; per-player state is
//! only the set of unlocked names on the aggregate. Titles are never
//! removed once unlocked.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Player;
use crate::value_objects::Stat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleRarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl TitleRarity {
    pub fn display_name(&self) -> &'static str {
        match self {
            TitleRarity::Common => "Common",
            TitleRarity::Uncommon => "Uncommon",
            TitleRarity::Rare => "Rare",
            TitleRarity::Legendary => "Legendary",
        }
    }
}

/// Unlock predicate over accumulated player state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TitleRequirement {
    LevelAtLeast(u32),
    TotalReps(u64),
    QuestStreak(u32),
    StatTotal(i32),
    HighestStat(i32),
    LifetimeXp(u64),
    /// All five base stats within `max_spread` of each other.
    Balanced { max_spread: i32 },
    /// No active debuffs at evaluation time.
    DebuffFree,
    /// One base stat at least `ratio` times the mean of the other four.
    Specialist { ratio: f64 },
}

impl TitleRequirement {
    /// Whether the predicate holds for `player` at `now`. `now` only
    /// matters for [`TitleRequirement::DebuffFree`], which reads active
    /// debuffs.
    pub fn satisfied_by(&self, player: &Player, now: DateTime<Utc>) -> bool {
        match *self {
            TitleRequirement::LevelAtLeast(level) => player.level >= level,
            TitleRequirement::TotalReps(reps) => player.total_reps_completed >= reps,
            TitleRequirement::QuestStreak(days) => player.daily_quest_streak >= days,
            TitleRequirement::StatTotal(total) => player.stats.total() >= total,
            TitleRequirement::HighestStat(value) => player.stats.highest() >= value,
            TitleRequirement::LifetimeXp(xp) => player.lifetime_experience() >= xp,
            TitleRequirement::Balanced { max_spread } => player.stats.spread() <= max_spread,
            TitleRequirement::DebuffFree => !player.has_active_debuffs(now),
            TitleRequirement::Specialist { ratio } => {
                Self::specialist_ratio(player) >= ratio
            }
        }
    }

    /// How close the player is to satisfying the predicate, in [0, 1].
    /// Pure; used for UI display only.
    pub fn progress(&self, player: &Player, now: DateTime<Utc>) -> f64 {
        let ratio = match *self {
            TitleRequirement::LevelAtLeast(level) => player.level as f64 / level as f64,
            TitleRequirement::TotalReps(reps) => {
                player.total_reps_completed as f64 / reps as f64
            }
            TitleRequirement::QuestStreak(days) => {
                player.daily_quest_streak as f64 / days as f64
            }
            TitleRequirement::StatTotal(total) => player.stats.total() as f64 / total as f64,
            TitleRequirement::HighestStat(value) => {
                player.stats.highest() as f64 / value as f64
            }
            TitleRequirement::LifetimeXp(xp) => player.lifetime_experience() as f64 / xp as f64,
            TitleRequirement::Balanced { max_spread } => {
                let spread = player.stats.spread();
                if spread <= max_spread {
                    1.0
                } else {
                    max_spread as f64 / spread as f64
                }
            }
            TitleRequirement::DebuffFree => {
                if player.has_active_debuffs(now) {
                    0.0
                } else {
                    1.0
                }
            }
            TitleRequirement::Specialist { ratio } => Self::specialist_ratio(player) / ratio,
        };
        ratio.clamp(0.0, 1.0)
    }

    /// Highest stat divided by the mean of the remaining four.
    fn specialist_ratio(player: &Player) -> f64 {
        let values: Vec<i32> = Stat::all().iter().map(|&s| player.stats.get(s)).collect();
        let highest = values.iter().copied().max().unwrap_or(1);
        let rest_sum: i32 = values.iter().sum::<i32>() - highest;
        let rest_mean = rest_sum as f64 / 4.0;
        // Base stats are floored at 1, so the mean is always positive.
        highest as f64 / rest_mean
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub rarity: TitleRarity,
    pub requirement: TitleRequirement,
    /// Human-readable requirement text shown in the titles screen.
    pub requirement_text: &'static str,
}

/// The full static catalog, in display order. Unlock evaluation must not
/// depend on this ordering.
pub const TITLE_CATALOG: &[TitleDefinition] = &[
    TitleDefinition {
        name: "Novice",
        description: "Everyone starts somewhere",
        rarity: TitleRarity::Common,
        requirement: TitleRequirement::LevelAtLeast(1),
        requirement_text: "Begin your journey",
    },
    TitleDefinition {
        name: "Apprentice",
        description: "The grind is becoming a habit",
        rarity: TitleRarity::Common,
        requirement: TitleRequirement::LevelAtLeast(5),
        requirement_text: "Reach level 5",
    },
    TitleDefinition {
        name: "Hunter",
        description: "Quests fear you now",
        rarity: TitleRarity::Uncommon,
        requirement: TitleRequirement::LevelAtLeast(10),
        requirement_text: "Reach level 10",
    },
    TitleDefinition {
        name: "Elite Hunter",
        description: "Few make it this far",
        rarity: TitleRarity::Rare,
        requirement: TitleRequirement::LevelAtLeast(25),
        requirement_text: "Reach level 25",
    },
    TitleDefinition {
        name: "Shadow Sovereign",
        description: "The pinnacle of progression",
        rarity: TitleRarity::Legendary,
        requirement: TitleRequirement::LevelAtLeast(50),
        requirement_text: "Reach level 50",
    },
    TitleDefinition {
        name: "Century Club",
        description: "One hundred reps in the bank",
        rarity: TitleRarity::Common,
        requirement: TitleRequirement::TotalReps(100),
        requirement_text: "Complete 100 total reps",
    },
    TitleDefinition {
        name: "Iron Grinder",
        description: "Reps on reps on reps",
        rarity: TitleRarity::Uncommon,
        requirement: TitleRequirement::TotalReps(1_000),
        requirement_text: "Complete 1,000 total reps",
    },
    TitleDefinition {
        name: "Rep Machine",
        description: "A body running on muscle memory",
        rarity: TitleRarity::Rare,
        requirement: TitleRequirement::TotalReps(10_000),
        requirement_text: "Complete 10,000 total reps",
    },
    TitleDefinition {
        name: "Week Warrior",
        description: "Seven straight days of finished quests",
        rarity: TitleRarity::Uncommon,
        requirement: TitleRequirement::QuestStreak(7),
        requirement_text: "Hold a 7-day quest streak",
    },
    TitleDefinition {
        name: "Unbreakable",
        description: "A month without missing",
        rarity: TitleRarity::Rare,
        requirement: TitleRequirement::QuestStreak(30),
        requirement_text: "Hold a 30-day quest streak",
    },
    TitleDefinition {
        name: "Well-Rounded",
        description: "Strong across the board",
        rarity: TitleRarity::Uncommon,
        requirement: TitleRequirement::StatTotal(100),
        requirement_text: "Reach 100 combined stat points",
    },
    TitleDefinition {
        name: "Powerhouse",
        description: "One attribute pushed to its limit",
        rarity: TitleRarity::Rare,
        requirement: TitleRequirement::HighestStat(50),
        requirement_text: "Raise any stat to 50",
    },
    TitleDefinition {
        name: "Seasoned Veteran",
        description: "The experience shows",
        rarity: TitleRarity::Rare,
        requirement: TitleRequirement::LifetimeXp(10_000),
        requirement_text: "Earn 10,000 lifetime XP",
    },
    TitleDefinition {
        name: "Perfectly Balanced",
        description: "As all things should be",
        rarity: TitleRarity::Rare,
        requirement: TitleRequirement::Balanced { max_spread: 5 },
        requirement_text: "Keep all five stats within 5 of each other",
    },
    TitleDefinition {
        name: "Untouchable",
        description: "Not a single penalty weighing you down",
        rarity: TitleRarity::Uncommon,
        requirement: TitleRequirement::DebuffFree,
        requirement_text: "Have zero active debuffs",
    },
    TitleDefinition {
        name: "Specialist",
        description: "All-in on one discipline",
        rarity: TitleRarity::Uncommon,
        requirement: TitleRequirement::Specialist { ratio: 1.5 },
        requirement_text: "Raise one stat to 1.5x the average of the rest",
    },
];

/// Look up a catalog entry by name.
pub fn title_definition(name: &str) -> Option<&'static TitleDefinition> {
    TITLE_CATALOG.iter().find(|t| t.name == name)
}
