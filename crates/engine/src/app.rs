//! Application composition.
//!
//! `App` wires the port implementations into the engines and exposes the
//! operations callers actually invoke. Every operation follows the same
//! frame: load the records it touches, run the engines against one `now`,
//! save what changed.

use std::sync::Arc;

use repforge_domain::{
    ActiveDebuff, Debuff, DebuffCategory, DomainError, Player, Quest, QuestId, Stat,
    WorkoutSession,
};

use crate::infrastructure::ports::{
    ClockPort, PlayerStore, QuestStore, RandomPort, ScreenTimeStore, SessionStore, StoreError,
};
use crate::use_cases::activity::{self, Activity, ScreenTimeOutcome, WorkoutOutcome};
use crate::use_cases::debuff_ledger::DebuffLedger;
use crate::use_cases::quest_director::QuestDirector;
use crate::use_cases::stat_engine::{LevelUpOutcome, StatEngine};
use crate::use_cases::tick::{DailyTick, TickReport};
use crate::use_cases::title_evaluator::{TitleEvaluator, UnlockedTitle};

/// Operation errors: rejected input or a failed store.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What logging one workout produced.
#[derive(Debug)]
pub struct WorkoutReport {
    pub outcome: WorkoutOutcome,
    pub unlocked_titles: Vec<UnlockedTitle>,
}

/// What claiming one quest reward produced.
#[derive(Debug)]
pub struct CompletionReport {
    pub xp_awarded: u32,
    pub level_up: LevelUpOutcome,
    pub stat_rewards: Vec<(Stat, i32)>,
    pub unlocked_titles: Vec<UnlockedTitle>,
}

/// What one day's screen-time check produced.
#[derive(Debug)]
pub struct ScreenTimeReport {
    pub outcome: ScreenTimeOutcome,
    pub applied_debuff: Option<Debuff>,
    pub unlocked_titles: Vec<UnlockedTitle>,
}

/// Aggregates over the session log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingStats {
    pub current_streak: u32,
    pub total_reps: u64,
    pub total_minutes: u64,
    pub favorite_exercise: Option<String>,
}

/// Snapshot for status displays.
#[derive(Debug)]
pub struct StatusReport {
    pub player: Player,
    pub active_debuffs: Vec<ActiveDebuff>,
    pub daily_quests: Vec<Quest>,
    pub urgent_quests: Vec<Quest>,
}

pub struct App {
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
    player_store: Arc<dyn PlayerStore>,
    quest_store: Arc<dyn QuestStore>,
    session_store: Arc<dyn SessionStore>,
    screen_time_store: Arc<dyn ScreenTimeStore>,
    stat_engine: StatEngine,
    ledger: DebuffLedger,
    evaluator: TitleEvaluator,
    activity: Activity,
    tick: DailyTick,
}

impl App {
    pub fn new(
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        player_store: Arc<dyn PlayerStore>,
        quest_store: Arc<dyn QuestStore>,
        session_store: Arc<dyn SessionStore>,
        screen_time_store: Arc<dyn ScreenTimeStore>,
    ) -> Self {
        let tick = DailyTick::new(
            clock.clone(),
            random.clone(),
            player_store.clone(),
            quest_store.clone(),
        );
        Self {
            ledger: DebuffLedger::new(random.clone()),
            evaluator: TitleEvaluator::new(),
            stat_engine: StatEngine::new(),
            activity: Activity::new(StatEngine::new()),
            clock,
            random,
            player_store,
            quest_store,
            session_store,
            screen_time_store,
            tick,
        }
    }

    /// Run the daily maintenance pass.
    pub async fn daily_tick(&self) -> Result<TickReport, AppError> {
        Ok(self.tick.run().await?)
    }

    /// Log a workout session: append it to the session log, convert it to
    /// XP and rep credit, and re-scan titles.
    pub async fn log_workout(
        &self,
        exercise: &str,
        reps: u32,
        duration_seconds: u32,
        rpe: u8,
    ) -> Result<WorkoutReport, AppError> {
        let now = self.clock.now();
        let session =
            WorkoutSession::new(now.date_naive(), exercise, reps, duration_seconds, rpe)?;
        self.session_store.append(&session).await?;

        let mut player = self.player_store.load().await?;
        let outcome = self.activity.log_workout(&mut player, &session);
        let unlocked_titles = self.evaluator.evaluate(&mut player, now);
        self.player_store.save(&player).await?;

        Ok(WorkoutReport {
            outcome,
            unlocked_titles,
        })
    }

    /// Add progress toward a quest. Returns false for unknown ids.
    pub async fn report_quest_progress(
        &self,
        id: QuestId,
        delta: u32,
    ) -> Result<bool, AppError> {
        let mut director = self.load_director().await?;
        let known = director.report_progress(id, delta);
        if known {
            self.save_director(&director).await?;
        }
        Ok(known)
    }

    /// Claim a completed quest's reward: XP through the level pipeline,
    /// stat rewards straight onto base stats, then a title re-scan.
    pub async fn complete_quest(
        &self,
        id: QuestId,
    ) -> Result<Option<CompletionReport>, AppError> {
        let now = self.clock.now();
        let mut player = self.player_store.load().await?;
        let mut director = self.load_director().await?;

        let Some(reward) = director.complete(id, &mut player) else {
            return Ok(None);
        };

        let level_up = self.stat_engine.grant_experience(&mut player, reward.xp);
        let mut stat_rewards: Vec<(Stat, i32)> = reward.stat_rewards.into_iter().collect();
        stat_rewards.sort_by_key(|&(stat, _)| stat);
        for &(stat, value) in &stat_rewards {
            player.stats.add(stat, value);
        }
        let unlocked_titles = self.evaluator.evaluate(&mut player, now);

        self.save_director(&director).await?;
        self.player_store.save(&player).await?;

        Ok(Some(CompletionReport {
            xp_awarded: reward.xp,
            level_up,
            stat_rewards,
            unlocked_titles,
        }))
    }

    /// Spend banked stat points on one stat.
    pub async fn allocate_stat_points(
        &self,
        stat: Stat,
        points: u32,
    ) -> Result<bool, AppError> {
        let mut player = self.player_store.load().await?;
        let spent = self.stat_engine.allocate_stat_point(&mut player, stat, points);
        if spent {
            let now = self.clock.now();
            let _ = self.evaluator.evaluate(&mut player, now);
            self.player_store.save(&player).await?;
        }
        Ok(spent)
    }

    /// Record today's screen-time hours and settle the outcome: XP when
    /// under the goal, a resistance-gated intelligence/luck debuff when
    /// over it.
    pub async fn check_screen_time(&self, hours: u32) -> Result<ScreenTimeReport, AppError> {
        let now = self.clock.now();
        let day = now.date_naive();
        self.screen_time_store.record_hours(day, hours).await?;
        let goal = self.screen_time_store.daily_goal().await?;

        let mut player = self.player_store.load().await?;
        let outcome = self.activity.check_screen_time(&mut player, day, hours, goal);

        let applied_debuff = match outcome {
            ScreenTimeOutcome::OverGoal { penalty } if self.ledger.should_apply(&player) => {
                Some(
                    self.ledger
                        .apply(&mut player, DebuffCategory::ScreenTime, now, penalty),
                )
            }
            _ => None,
        };
        let unlocked_titles = match outcome {
            ScreenTimeOutcome::AlreadyChecked => Vec::new(),
            _ => self.evaluator.evaluate(&mut player, now),
        };
        self.player_store.save(&player).await?;

        Ok(ScreenTimeReport {
            outcome,
            applied_debuff,
            unlocked_titles,
        })
    }

    /// Switch the displayed title. Only unlocked titles are accepted.
    pub async fn set_active_title(&self, title: &str) -> Result<bool, AppError> {
        let mut player = self.player_store.load().await?;
        let changed = self.evaluator.set_active_title(&mut player, title);
        if changed {
            self.player_store.save(&player).await?;
        }
        Ok(changed)
    }

    /// Progress toward a title, in `[0, 1]`. `None` for unknown titles.
    pub async fn title_progress(&self, title: &str) -> Result<Option<f64>, AppError> {
        let player = self.player_store.load().await?;
        Ok(self.evaluator.progress(&player, title, self.clock.now()))
    }

    /// Aggregates over the whole session log.
    pub async fn training_stats(&self) -> Result<TrainingStats, AppError> {
        let sessions = self.session_store.list().await?;
        Ok(TrainingStats {
            current_streak: activity::current_streak(&sessions, self.clock.today()),
            total_reps: activity::total_reps(&sessions),
            total_minutes: activity::total_minutes(&sessions),
            favorite_exercise: activity::favorite_exercise(&sessions),
        })
    }

    /// Current player, debuffs, and quest pools in one snapshot.
    pub async fn status(&self) -> Result<StatusReport, AppError> {
        let now = self.clock.now();
        let player = self.player_store.load().await?;
        let active_debuffs = self.ledger.list_active(&player, now);
        Ok(StatusReport {
            active_debuffs,
            daily_quests: self.quest_store.load_daily().await?,
            urgent_quests: self.quest_store.load_urgent().await?,
            player,
        })
    }

    async fn load_director(&self) -> Result<QuestDirector, StoreError> {
        Ok(QuestDirector::hydrate(
            self.random.clone(),
            self.quest_store.load_daily().await?,
            self.quest_store.load_urgent().await?,
            self.quest_store.load_last_reset_day().await?,
        ))
    }

    async fn save_director(&self, director: &QuestDirector) -> Result<(), StoreError> {
        self.quest_store.save_daily(director.daily_quests()).await?;
        self.quest_store
            .save_urgent(director.urgent_quests())
            .await?;
        if let Some(day) = director.last_reset_day() {
            self.quest_store.save_last_reset_day(day).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedClock, SeededRandom};
    use crate::infrastructure::persistence::MemoryStores;
    use chrono::{DateTime, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).single().expect("valid time")
    }

    fn app_with(stores: Arc<MemoryStores>, now: DateTime<Utc>) -> App {
        App::new(
            Arc::new(FixedClock(now)),
            Arc::new(SeededRandom::new(7)),
            stores.clone(),
            stores.clone(),
            stores.clone(),
            stores,
        )
    }

    #[tokio::test]
    async fn log_workout_appends_a_session_and_grants_experience() {
        let stores = Arc::new(MemoryStores::new());
        let app = app_with(stores.clone(), t0());

        // 30 reps x2 + 10 min x5 = 110, neutral RPE.
        let report = app.log_workout("Push-ups", 30, 600, 5).await.expect("log");
        assert_eq!(report.outcome.xp_awarded, 110);
        assert_eq!(report.outcome.level_up.levels_gained, 1);

        let player = stores.load().await.expect("player");
        assert_eq!(player.level, 2);
        assert_eq!(player.experience, 10);
        assert_eq!(player.total_reps_completed, 30);
        assert_eq!(stores.list().await.expect("sessions").len(), 1);
    }

    #[tokio::test]
    async fn invalid_workout_input_is_rejected_before_any_write() {
        let stores = Arc::new(MemoryStores::new());
        let app = app_with(stores.clone(), t0());

        let err = app.log_workout("Push-ups", 20, 300, 0).await.expect_err("must fail");
        assert!(matches!(err, AppError::Domain(DomainError::Validation(_))));
        assert!(stores.list().await.expect("sessions").is_empty());
    }

    #[tokio::test]
    async fn completing_a_quest_pays_xp_and_base_stats() {
        let stores = Arc::new(MemoryStores::new());
        let app = app_with(stores.clone(), t0());
        app.daily_tick().await.expect("tick");

        let quest = stores.load_daily().await.expect("daily")[0].clone();
        let before = stores.load().await.expect("player");

        assert!(app
            .report_quest_progress(quest.id, quest.target())
            .await
            .expect("progress"));
        let report = app
            .complete_quest(quest.id)
            .await
            .expect("complete")
            .expect("reward");
        assert_eq!(report.xp_awarded, quest.xp_reward);
        assert!(!report.stat_rewards.is_empty());

        let after = stores.load().await.expect("player");
        assert_eq!(after.daily_quest_streak, before.daily_quest_streak + 1);
        let expected_gain: i32 = report.stat_rewards.iter().map(|&(_, v)| v).sum();
        assert_eq!(after.stats.total(), before.stats.total() + expected_gain);

        // Reward is claimed exactly once.
        assert!(app.complete_quest(quest.id).await.expect("complete").is_none());
    }

    #[tokio::test]
    async fn screen_time_over_goal_lands_a_debuff_on_a_fresh_player() {
        let stores = Arc::new(MemoryStores::new());
        let app = app_with(stores.clone(), t0());

        // Fresh player resistance is 0, so the penalty always lands.
        let report = app.check_screen_time(9).await.expect("check");
        assert!(matches!(report.outcome, ScreenTimeOutcome::OverGoal { .. }));
        let debuff = report.applied_debuff.expect("debuff");
        assert_eq!(debuff.category, DebuffCategory::ScreenTime);
        assert!(matches!(debuff.target_stat, Stat::Intelligence | Stat::Luck));

        // Same day again is a no-op.
        let again = app.check_screen_time(2).await.expect("check");
        assert!(matches!(again.outcome, ScreenTimeOutcome::AlreadyChecked));
        assert!(again.applied_debuff.is_none());
    }

    #[tokio::test]
    async fn screen_time_under_goal_awards_experience() {
        let stores = Arc::new(MemoryStores::new());
        let app = app_with(stores.clone(), t0());

        // Goal defaults to 4h; 2h spare pays 50 + 10*2 = 70 XP.
        let report = app.check_screen_time(2).await.expect("check");
        match report.outcome {
            ScreenTimeOutcome::UnderGoal { xp_awarded, .. } => assert_eq!(xp_awarded, 70),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn allocation_spends_banked_points() {
        let stores = Arc::new(MemoryStores::new());
        let app = app_with(stores.clone(), t0());
        app.log_workout("Push-ups", 30, 600, 5).await.expect("log");

        assert!(app.allocate_stat_points(Stat::Strength, 2).await.expect("allocate"));
        // Nothing left in the bank.
        assert!(!app.allocate_stat_points(Stat::Luck, 1).await.expect("allocate"));

        let player = stores.load().await.expect("player");
        assert_eq!(player.stats.strength, 12);
        assert_eq!(player.stat_points, 0);
    }

    #[tokio::test]
    async fn training_stats_aggregate_the_session_log() {
        let stores = Arc::new(MemoryStores::new());
        let app = app_with(stores.clone(), t0());
        app.log_workout("Push-ups", 30, 0, 5).await.expect("log");
        app.log_workout("Push-ups", 20, 0, 5).await.expect("log");
        app.log_workout("Squats", 40, 0, 5).await.expect("log");

        let stats = app.training_stats().await.expect("stats");
        assert_eq!(stats.total_reps, 90);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.favorite_exercise.as_deref(), Some("Push-ups"));
    }
}
