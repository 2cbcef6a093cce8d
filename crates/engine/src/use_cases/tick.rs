//! DailyTick - the per-foreground maintenance pass.
//!
//! One tick runs the engines in their agreed order against a single
//! load -> mutate -> save sequence: sweep expired debuffs, fail and reset
//! quests, roll for an urgent quest, then re-scan titles. Quest penalties
//! cross from the director to the ledger here, gated per-request by the
//! resistance check, so neither engine ever calls the other.

use std::sync::Arc;

use repforge_domain::{ClearedDebuff, Debuff, DebuffCategory, Quest, QuestKind, QuestPenalty};

use crate::infrastructure::ports::{ClockPort, PlayerStore, QuestStore, RandomPort, StoreError};
use crate::use_cases::debuff_ledger::DebuffLedger;
use crate::use_cases::quest_director::QuestDirector;
use crate::use_cases::title_evaluator::{TitleEvaluator, UnlockedTitle};

/// Everything one tick did, for the caller to surface.
#[derive(Debug, Default)]
pub struct TickReport {
    pub cleared_debuffs: Vec<ClearedDebuff>,
    pub failed_quests: Vec<QuestPenalty>,
    pub applied_debuffs: Vec<Debuff>,
    pub resisted_penalties: u32,
    pub reset_daily: bool,
    pub urgent_quest: Option<Quest>,
    pub unlocked_titles: Vec<UnlockedTitle>,
}

pub struct DailyTick {
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
    player_store: Arc<dyn PlayerStore>,
    quest_store: Arc<dyn QuestStore>,
    ledger: DebuffLedger,
    evaluator: TitleEvaluator,
}

impl DailyTick {
    pub fn new(
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        player_store: Arc<dyn PlayerStore>,
        quest_store: Arc<dyn QuestStore>,
    ) -> Self {
        let ledger = DebuffLedger::new(random.clone());
        Self {
            clock,
            random,
            player_store,
            quest_store,
            ledger,
            evaluator: TitleEvaluator::new(),
        }
    }

    pub async fn run(&self) -> Result<TickReport, StoreError> {
        let now = self.clock.now();
        let mut player = self.player_store.load().await?;
        let mut director = QuestDirector::hydrate(
            self.random.clone(),
            self.quest_store.load_daily().await?,
            self.quest_store.load_urgent().await?,
            self.quest_store.load_last_reset_day().await?,
        );

        let mut report = TickReport {
            cleared_debuffs: self.ledger.sweep_expired(&mut player, now),
            ..TickReport::default()
        };

        report.failed_quests = director.sweep_failures(&mut player, now);
        for penalty in &report.failed_quests {
            if !self.ledger.should_apply(&player) {
                report.resisted_penalties += 1;
                tracing::debug!(quest = %penalty.quest_name, kind = %penalty.kind, "penalty resisted");
                continue;
            }
            let category = match penalty.kind {
                QuestKind::Daily => DebuffCategory::QuestFailure,
                QuestKind::Urgent => DebuffCategory::UrgentQuestFailure,
            };
            let applied = self
                .ledger
                .apply(&mut player, category, now, penalty.duration);
            report.applied_debuffs.push(applied);
        }

        report.reset_daily = director.reset_daily_if_needed(&player, now);
        report.urgent_quest = director.maybe_generate_urgent(&player, now).cloned();
        report.unlocked_titles = self.evaluator.evaluate(&mut player, now);

        self.quest_store.save_daily(director.daily_quests()).await?;
        self.quest_store
            .save_urgent(director.urgent_quests())
            .await?;
        if let Some(day) = director.last_reset_day() {
            self.quest_store.save_last_reset_day(day).await?;
        }
        self.player_store.save(&player).await?;

        tracing::info!(
            cleared = report.cleared_debuffs.len(),
            failed = report.failed_quests.len(),
            applied = report.applied_debuffs.len(),
            reset = report.reset_daily,
            unlocked = report.unlocked_titles.len(),
            "daily tick finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedClock, SeededRandom};
    use crate::infrastructure::persistence::MemoryStores;
    use crate::infrastructure::ports::MockPlayerStore;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use repforge_domain::{Player, Stat};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).single().expect("valid time")
    }

    fn tick_at(now: DateTime<Utc>, stores: Arc<MemoryStores>, seed: u64) -> DailyTick {
        DailyTick::new(
            Arc::new(FixedClock(now)),
            Arc::new(SeededRandom::new(seed)),
            stores.clone(),
            stores,
        )
    }

    #[tokio::test]
    async fn first_tick_bootstraps_a_daily_batch() {
        let stores = Arc::new(MemoryStores::new());
        let report = tick_at(t0(), stores.clone(), 1).run().await.expect("tick");

        assert!(report.reset_daily);
        assert!(report.failed_quests.is_empty());
        let daily = stores.load_daily().await.expect("daily");
        assert!((3..=5).contains(&daily.len()));
        assert_eq!(
            stores.load_last_reset_day().await.expect("day"),
            Some(t0().date_naive())
        );
    }

    #[tokio::test]
    async fn second_tick_same_day_changes_nothing_structural() {
        let stores = Arc::new(MemoryStores::new());
        tick_at(t0(), stores.clone(), 1).run().await.expect("tick");
        let daily_before = stores.load_daily().await.expect("daily");

        // One hour later: same calendar day, and no urgent deadline (2h
        // minimum) can have passed yet.
        let report = tick_at(t0() + Duration::hours(1), stores.clone(), 2)
            .run()
            .await
            .expect("tick");

        assert!(!report.reset_daily);
        assert!(report.failed_quests.is_empty());
        let daily_after = stores.load_daily().await.expect("daily");
        assert_eq!(
            daily_before.iter().map(|q| q.id).collect::<Vec<_>>(),
            daily_after.iter().map(|q| q.id).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn day_boundary_applies_penalties_and_regenerates() {
        let stores = Arc::new(MemoryStores::new());
        // Zero resistance so every penalty lands.
        let mut player = Player::new();
        player.stats.vitality = 5;
        player.stats.intelligence = 5;
        player.daily_quest_streak = 3;
        stores.save(&player).await.expect("save");

        tick_at(t0(), stores.clone(), 1).run().await.expect("tick");
        let batch_size = stores.load_daily().await.expect("daily").len();

        let report = tick_at(t0() + Duration::days(1), stores.clone(), 2)
            .run()
            .await
            .expect("tick");

        assert!(report.reset_daily);
        // An urgent quest issued on day one may have expired too, so count
        // the daily failures specifically.
        let daily_failures = report
            .failed_quests
            .iter()
            .filter(|p| p.kind == QuestKind::Daily)
            .count();
        assert_eq!(daily_failures, batch_size);
        // Zero resistance: every penalty request lands.
        assert_eq!(report.applied_debuffs.len(), report.failed_quests.len());
        assert_eq!(
            report
                .applied_debuffs
                .iter()
                .filter(|d| d.category == DebuffCategory::QuestFailure)
                .count(),
            batch_size
        );

        let player = stores.load().await.expect("player");
        assert_eq!(player.daily_quest_streak, 0);
        assert_eq!(player.debuffs.len(), report.applied_debuffs.len());
    }

    #[tokio::test]
    async fn expired_debuffs_are_swept_and_persisted() {
        let stores = Arc::new(MemoryStores::new());
        let mut player = Player::new();
        let stale = repforge_domain::Debuff::new(
            DebuffCategory::ScreenTime,
            Stat::Luck,
            t0() - Duration::hours(20),
            Duration::hours(12),
        );
        player.debuffs.insert(stale.id, stale.clone());
        stores.save(&player).await.expect("save");

        let report = tick_at(t0(), stores.clone(), 1).run().await.expect("tick");

        assert_eq!(report.cleared_debuffs.len(), 1);
        assert_eq!(report.cleared_debuffs[0].id, stale.id);
        let player = stores.load().await.expect("player");
        assert!(player.debuffs.is_empty());
    }

    #[tokio::test]
    async fn store_failures_surface_as_errors() {
        let stores = Arc::new(MemoryStores::new());
        let mut player_store = MockPlayerStore::new();
        player_store
            .expect_load()
            .returning(|| Err(StoreError::Io("disk gone".into())));

        let tick = DailyTick::new(
            Arc::new(FixedClock(t0())),
            Arc::new(SeededRandom::new(1)),
            Arc::new(player_store),
            stores,
        );

        assert!(tick.run().await.is_err());
    }
}
