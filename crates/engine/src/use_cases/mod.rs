//! Use cases - one module per engine, plus the daily tick orchestrator.
//!
//! Engines are pure over `(state, now, inputs)`; the application layer
//! owns load/save framing and hands results between engines.

pub mod activity;
pub mod debuff_ledger;
pub mod quest_director;
pub mod stat_engine;
pub mod tick;
pub mod title_evaluator;

pub use activity::{Activity, ScreenTimeOutcome, WorkoutOutcome};
pub use debuff_ledger::DebuffLedger;
pub use quest_director::QuestDirector;
pub use stat_engine::{LevelUpOutcome, StatEngine};
pub use tick::{DailyTick, TickReport};
pub use title_evaluator::{TitleEvaluator, UnlockedTitle};
