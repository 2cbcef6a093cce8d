//! Domain entities - records with identity and lifecycle.

pub mod debuff;
pub mod player;
pub mod quest;
pub mod session;

pub use debuff::{ActiveDebuff, ClearedDebuff, Debuff, DebuffCategory};
pub use player::{Player, STARTER_TITLE, STAT_POINTS_PER_LEVEL, XP_PER_LEVEL};
pub use quest::{Quest, QuestKind, QuestPenalty, QuestReward};
pub use session::{WorkoutSession, MAX_RPE, MIN_RPE};
