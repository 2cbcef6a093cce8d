//! Static daily-quest templates and level scaling.
//!
//! Templates carry base targets for a level-1 player. Scaling multiplies in
//! `f64` (level multiplier composed with any extra multiplier for urgent
//! quests) and rounds half-up exactly once before clamping the result.

use super::Stat;

/// Rep targets stay within [1, 200] after scaling.
pub const MIN_REPS: u32 = 1;
pub const MAX_REPS: u32 = 200;

/// Duration targets stay within [30, 3600] seconds after scaling.
pub const MIN_DURATION_SECONDS: u32 = 30;
pub const MAX_DURATION_SECONDS: u32 = 3600;

/// Blueprint for one generated quest. Exactly one of `base_reps` /
/// `base_duration_seconds` is nonzero, mirroring the quest invariant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuestTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub base_reps: u32,
    pub base_duration_seconds: u32,
    pub base_xp: u32,
    pub stat_rewards: &'static [(Stat, i32)],
}

/// The daily pool. Batch generation picks 3-5 of these uniformly, with
/// replacement, so duplicates are expected.
pub const DAILY_TEMPLATES: &[QuestTemplate] = &[
    QuestTemplate {
        name: "Push-up Protocol",
        description: "Complete a set of push-ups",
        base_reps: 20,
        base_duration_seconds: 0,
        base_xp: 50,
        stat_rewards: &[(Stat::Strength, 1)],
    },
    QuestTemplate {
        name: "Squat Circuit",
        description: "Complete a set of bodyweight squats",
        base_reps: 30,
        base_duration_seconds: 0,
        base_xp: 50,
        stat_rewards: &[(Stat::Strength, 1), (Stat::Vitality, 1)],
    },
    QuestTemplate {
        name: "Sit-up Set",
        description: "Complete a set of sit-ups",
        base_reps: 25,
        base_duration_seconds: 0,
        base_xp: 45,
        stat_rewards: &[(Stat::Vitality, 1)],
    },
    QuestTemplate {
        name: "Burpee Blitz",
        description: "Burn through a round of burpees",
        base_reps: 15,
        base_duration_seconds: 0,
        base_xp: 70,
        stat_rewards: &[(Stat::Strength, 1), (Stat::Agility, 1)],
    },
    QuestTemplate {
        name: "Plank Hold",
        description: "Hold a plank without dropping",
        base_reps: 0,
        base_duration_seconds: 60,
        base_xp: 40,
        stat_rewards: &[(Stat::Vitality, 1)],
    },
    QuestTemplate {
        name: "Morning Run",
        description: "Run at a steady pace",
        base_reps: 0,
        base_duration_seconds: 600,
        base_xp: 80,
        stat_rewards: &[(Stat::Agility, 1)],
    },
    QuestTemplate {
        name: "Mobility Flow",
        description: "Work through a mobility routine",
        base_reps: 0,
        base_duration_seconds: 300,
        base_xp: 60,
        stat_rewards: &[(Stat::Agility, 1), (Stat::Intelligence, 1)],
    },
    QuestTemplate {
        name: "Mindful Stretch",
        description: "Stretch and unwind with full focus",
        base_reps: 0,
        base_duration_seconds: 180,
        base_xp: 35,
        stat_rewards: &[(Stat::Intelligence, 1)],
    },
];

fn level_multiplier(level: u32, per_level: f64) -> f64 {
    1.0 + (level.saturating_sub(1)) as f64 * per_level
}

/// Scale a rep target for `level`, with an extra multiplier (1.0 for daily
/// quests, 1.5 for urgent ones). Rounded once, then clamped to [1, 200].
pub fn scale_reps(base: u32, level: u32, extra: f64) -> u32 {
    let scaled = (base as f64 * level_multiplier(level, 0.1) * extra).round() as u32;
    scaled.clamp(MIN_REPS, MAX_REPS)
}

/// Scale a duration target, clamped to [30, 3600] seconds.
pub fn scale_duration(base: u32, level: u32, extra: f64) -> u32 {
    let scaled = (base as f64 * level_multiplier(level, 0.05) * extra).round() as u32;
    scaled.clamp(MIN_DURATION_SECONDS, MAX_DURATION_SECONDS)
}

/// Scale an XP reward. Unclamped.
pub fn scale_xp(base: u32, level: u32, extra: f64) -> u32 {
    (base as f64 * level_multiplier(level, 0.15) * extra).round() as u32
}

/// Scale a stat reward (urgent quests multiply every stat reward by 1.5).
pub fn scale_stat_reward(base: i32, extra: f64) -> i32 {
    (base as f64 * extra).round() as i32
}
