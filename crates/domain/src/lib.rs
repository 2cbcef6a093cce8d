//! RepForge domain - core progression types, value objects, and invariants.
//!
//! This crate is deliberately free of I/O, clocks, and randomness: every
//! operation is a pure function of the data it is handed. Time-dependent
//! queries take an explicit `now`, and anything random lives behind ports
//! in the engine crate.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{
    ActiveDebuff, ClearedDebuff, Debuff, DebuffCategory, Player, Quest, QuestKind, QuestPenalty,
    QuestReward, WorkoutSession, MAX_RPE, MIN_RPE, STARTER_TITLE, STAT_POINTS_PER_LEVEL,
    XP_PER_LEVEL,
};

pub use error::DomainError;

pub use ids::{DebuffId, QuestId, SessionId};

pub use value_objects::{
    scale_duration, scale_reps, scale_stat_reward, scale_xp, title_definition, BaseStats,
    QuestTemplate, Stat, TitleDefinition, TitleRarity, TitleRequirement, DAILY_TEMPLATES,
    MAX_DURATION_SECONDS, MAX_REPS, MIN_DURATION_SECONDS, MIN_REPS, TITLE_CATALOG,
};
