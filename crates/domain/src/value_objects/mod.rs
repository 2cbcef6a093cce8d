//! Value objects - immutable data with no identity of its own.

pub mod quest_template;
pub mod stat;
pub mod title;

pub use quest_template::{
    scale_duration, scale_reps, scale_stat_reward, scale_xp, QuestTemplate, DAILY_TEMPLATES,
    MAX_DURATION_SECONDS, MAX_REPS, MIN_DURATION_SECONDS, MIN_REPS,
};
pub use stat::{BaseStats, Stat};
pub use title::{
    title_definition, TitleDefinition, TitleRarity, TitleRequirement, TITLE_CATALOG,
};
