//! QuestDirector - quest generation, progress, completion, and failure.
//!
//! The director owns the daily batch, the urgent pool, and the last-reset
//! day; the application layer hydrates it from the quest store and persists
//! it back after mutations. Penalties for failed quests are only *emitted*
//! here; the caller hands them to the debuff ledger, keeping failure
//! detection and penalty application independently testable.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use repforge_domain::{
    scale_duration, scale_reps, scale_stat_reward, scale_xp, Player, Quest, QuestId, QuestKind,
    QuestPenalty, QuestReward, QuestTemplate, DAILY_TEMPLATES,
};

use crate::infrastructure::ports::{pick, RandomPort};

/// Daily batches hold between 3 and 5 quests.
const MIN_DAILY_QUESTS: i32 = 3;
const MAX_DAILY_QUESTS: i32 = 5;

/// Chance of an urgent quest per eligible invocation.
const URGENT_QUEST_CHANCE: f64 = 0.2;

/// At most this many non-expired urgent quests at once.
const MAX_ACTIVE_URGENT: usize = 2;

/// Urgent quests scale on top of daily scaling.
const URGENT_REPS_MULTIPLIER: f64 = 1.5;
const URGENT_DURATION_MULTIPLIER: f64 = 1.2;
const URGENT_XP_MULTIPLIER: f64 = 2.0;
const URGENT_STAT_REWARD_MULTIPLIER: f64 = 1.5;

/// Urgent deadlines land uniformly 2-6 hours out.
const URGENT_MIN_DEADLINE_MINUTES: i32 = 120;
const URGENT_MAX_DEADLINE_MINUTES: i32 = 360;

/// Failure penalty durations handed to the debuff ledger.
const DAILY_FAILURE_PENALTY_HOURS: i64 = 24;
const URGENT_FAILURE_PENALTY_HOURS: i64 = 48;

pub struct QuestDirector {
    random: Arc<dyn RandomPort>,
    daily: Vec<Quest>,
    urgent: Vec<Quest>,
    last_reset_day: Option<NaiveDate>,
}

impl QuestDirector {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self {
            random,
            daily: Vec::new(),
            urgent: Vec::new(),
            last_reset_day: None,
        }
    }

    /// Rebuild a director from persisted state.
    pub fn hydrate(
        random: Arc<dyn RandomPort>,
        daily: Vec<Quest>,
        urgent: Vec<Quest>,
        last_reset_day: Option<NaiveDate>,
    ) -> Self {
        Self {
            random,
            daily,
            urgent,
            last_reset_day,
        }
    }

    pub fn daily_quests(&self) -> &[Quest] {
        &self.daily
    }

    pub fn urgent_quests(&self) -> &[Quest] {
        &self.urgent
    }

    pub fn last_reset_day(&self) -> Option<NaiveDate> {
        self.last_reset_day
    }

    /// Replace the entire daily batch with 3-5 level-scaled quests picked
    /// uniformly from the template pool, with replacement.
    pub fn generate_daily_batch(&mut self, player: &Player, now: DateTime<Utc>) -> &[Quest] {
        let count = self
            .random
            .gen_range(MIN_DAILY_QUESTS, MAX_DAILY_QUESTS) as usize;
        self.daily = (0..count)
            .map(|_| {
                let template = pick(self.random.as_ref(), DAILY_TEMPLATES);
                self.build_quest(template, QuestKind::Daily, player.level, now, None)
            })
            .collect();
        tracing::info!(count = self.daily.len(), level = player.level, "daily batch generated");
        &self.daily
    }

    /// Roll for an urgent quest: refused while two non-expired urgents
    /// exist, otherwise a 20% chance per invocation.
    pub fn maybe_generate_urgent(
        &mut self,
        player: &Player,
        now: DateTime<Utc>,
    ) -> Option<&Quest> {
        let active_urgent = self.urgent.iter().filter(|q| !q.is_expired(now)).count();
        if active_urgent >= MAX_ACTIVE_URGENT {
            return None;
        }
        if self.random.uniform() >= URGENT_QUEST_CHANCE {
            return None;
        }

        let deadline_minutes = self
            .random
            .gen_range(URGENT_MIN_DEADLINE_MINUTES, URGENT_MAX_DEADLINE_MINUTES);
        let expires_at = now + Duration::minutes(deadline_minutes as i64);
        let template = pick(self.random.as_ref(), DAILY_TEMPLATES);
        let quest = self.build_quest(
            template,
            QuestKind::Urgent,
            player.level,
            now,
            Some(expires_at),
        );
        tracing::info!(name = %quest.name, expires_at = %expires_at, "urgent quest issued");
        self.urgent.push(quest);
        self.urgent.last()
    }

    fn build_quest(
        &self,
        template: &QuestTemplate,
        kind: QuestKind,
        level: u32,
        now: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Quest {
        let (reps_extra, duration_extra, xp_extra, stat_extra) = match kind {
            QuestKind::Daily => (1.0, 1.0, 1.0, 1.0),
            QuestKind::Urgent => (
                URGENT_REPS_MULTIPLIER,
                URGENT_DURATION_MULTIPLIER,
                URGENT_XP_MULTIPLIER,
                URGENT_STAT_REWARD_MULTIPLIER,
            ),
        };

        let target_reps = if template.base_reps > 0 {
            scale_reps(template.base_reps, level, reps_extra)
        } else {
            0
        };
        let target_duration_seconds = if template.base_duration_seconds > 0 {
            scale_duration(template.base_duration_seconds, level, duration_extra)
        } else {
            0
        };
        let stat_rewards: HashMap<_, _> = template
            .stat_rewards
            .iter()
            .map(|&(stat, value)| (stat, scale_stat_reward(value, stat_extra)))
            .collect();

        Quest {
            id: QuestId::new(),
            name: template.name.to_string(),
            description: template.description.to_string(),
            kind,
            target_reps,
            target_duration_seconds,
            xp_reward: scale_xp(template.base_xp, level, xp_extra),
            stat_rewards,
            current_progress: 0,
            completed: false,
            reward_claimed: false,
            created_at: now,
            expires_at,
        }
    }

    /// Add `delta` to a quest's progress, across both pools. Progress is
    /// never clamped to the target, and `completed` is sticky once set.
    pub fn report_progress(&mut self, id: QuestId, delta: u32) -> bool {
        let Some(quest) = self.quest_mut(id) else {
            return false;
        };
        quest.current_progress += delta;
        if quest.target_reached() {
            quest.completed = true;
        }
        true
    }

    /// Claim a quest's reward. `None` unless the quest exists, its
    /// completion condition holds, and the reward is still unclaimed.
    /// Completing a daily quest extends the streak.
    pub fn complete(&mut self, id: QuestId, player: &mut Player) -> Option<QuestReward> {
        let quest = self.quest_mut(id)?;
        if quest.reward_claimed || !quest.target_reached() {
            return None;
        }
        quest.completed = true;
        quest.reward_claimed = true;

        let reward = QuestReward {
            quest_id: quest.id,
            kind: quest.kind,
            xp: quest.xp_reward,
            stat_rewards: quest.stat_rewards.clone(),
        };
        if quest.kind == QuestKind::Daily {
            player.daily_quest_streak += 1;
        }
        tracing::info!(quest_id = %reward.quest_id, xp = reward.xp, "quest reward claimed");
        Some(reward)
    }

    /// Detect failed quests and emit penalty requests.
    ///
    /// Crossing a calendar-day boundary since the last reset fails every
    /// incomplete daily quest (24 h penalty each) and zeroes the streak;
    /// expired incomplete urgent quests yield a 48 h penalty each and
    /// leave the pool.
    pub fn sweep_failures(&mut self, player: &mut Player, now: DateTime<Utc>) -> Vec<QuestPenalty> {
        let mut penalties = Vec::new();

        if let Some(last) = self.last_reset_day {
            if last != now.date_naive() {
                let failed: Vec<QuestPenalty> = self
                    .daily
                    .iter()
                    .filter(|q| !q.completed)
                    .map(|q| QuestPenalty {
                        quest_id: q.id,
                        quest_name: q.name.clone(),
                        kind: QuestKind::Daily,
                        duration: Duration::hours(DAILY_FAILURE_PENALTY_HOURS),
                    })
                    .collect();
                if !failed.is_empty() {
                    tracing::info!(count = failed.len(), "daily quests failed at day boundary");
                    player.daily_quest_streak = 0;
                    penalties.extend(failed);
                }
            }
        }

        let mut kept = Vec::with_capacity(self.urgent.len());
        for quest in self.urgent.drain(..) {
            if quest.is_expired(now) && !quest.completed {
                tracing::info!(name = %quest.name, "urgent quest expired unfinished");
                penalties.push(QuestPenalty {
                    quest_id: quest.id,
                    quest_name: quest.name,
                    kind: QuestKind::Urgent,
                    duration: Duration::hours(URGENT_FAILURE_PENALTY_HOURS),
                });
            } else {
                kept.push(quest);
            }
        }
        self.urgent = kept;

        penalties
    }

    /// Regenerate the daily batch when the calendar day (not 24 h elapsed)
    /// differs from the recorded reset day.
    pub fn reset_daily_if_needed(&mut self, player: &Player, now: DateTime<Utc>) -> bool {
        let today = now.date_naive();
        if self.last_reset_day == Some(today) {
            return false;
        }
        self.generate_daily_batch(player, now);
        self.last_reset_day = Some(today);
        true
    }

    fn quest_mut(&mut self, id: QuestId) -> Option<&mut Quest> {
        self.daily
            .iter_mut()
            .chain(self.urgent.iter_mut())
            .find(|q| q.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedRandom, SeededRandom};
    use chrono::TimeZone;
    use repforge_domain::{MAX_DURATION_SECONDS, MAX_REPS};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).single().expect("valid time")
    }

    fn seeded(seed: u64) -> QuestDirector {
        QuestDirector::new(Arc::new(SeededRandom::new(seed)))
    }

    fn eager() -> QuestDirector {
        // uniform 0.0 always passes the 20% gate; gen_range returns min.
        QuestDirector::new(Arc::new(FixedRandom { float: 0.0, int: 0 }))
    }

    #[test]
    fn daily_batch_holds_three_to_five_scaled_quests() {
        let player = Player::new();
        for seed in 0..20 {
            let mut director = seeded(seed);
            let batch = director.generate_daily_batch(&player, t0());
            assert!((3..=5).contains(&batch.len()));
            for quest in batch {
                assert_eq!(quest.kind, QuestKind::Daily);
                assert!(quest.expires_at.is_none());
                assert!((quest.target_reps > 0) ^ (quest.target_duration_seconds > 0));
                assert!(quest.target_reps <= MAX_REPS);
                assert!(quest.target_duration_seconds <= MAX_DURATION_SECONDS);
            }
        }
    }

    #[test]
    fn regeneration_replaces_the_whole_batch() {
        let player = Player::new();
        let mut director = seeded(42);
        let first: Vec<QuestId> = director
            .generate_daily_batch(&player, t0())
            .iter()
            .map(|q| q.id)
            .collect();
        let second: Vec<QuestId> = director
            .generate_daily_batch(&player, t0())
            .iter()
            .map(|q| q.id)
            .collect();
        assert!(first.iter().all(|id| !second.contains(id)));
    }

    #[test]
    fn daily_targets_scale_with_level() {
        let mut player = Player::new();
        player.level = 11; // reps x2.0, duration x1.5, xp x2.5
        let mut director = eager();
        let batch = director.generate_daily_batch(&player, t0());
        // FixedRandom picks the first template: Push-up Protocol, 20 reps, 50 XP.
        let quest = &batch[0];
        assert_eq!(quest.target_reps, 40);
        assert_eq!(quest.xp_reward, 125);
    }

    #[test]
    fn urgent_generation_respects_the_pool_cap() {
        let player = Player::new();
        let mut director = eager();
        assert!(director.maybe_generate_urgent(&player, t0()).is_some());
        assert!(director.maybe_generate_urgent(&player, t0()).is_some());
        // Two live urgents: refused regardless of the roll.
        assert!(director.maybe_generate_urgent(&player, t0()).is_none());
        assert_eq!(director.urgent_quests().len(), 2);
    }

    #[test]
    fn urgent_generation_fails_the_probability_gate() {
        let player = Player::new();
        let mut director = QuestDirector::new(Arc::new(FixedRandom {
            float: 0.5,
            int: 0,
        }));
        assert!(director.maybe_generate_urgent(&player, t0()).is_none());
    }

    #[test]
    fn urgent_quests_scale_and_carry_a_deadline() {
        let player = Player::new();
        let mut director = eager();
        let quest = director
            .maybe_generate_urgent(&player, t0())
            .expect("urgent quest")
            .clone();

        assert_eq!(quest.kind, QuestKind::Urgent);
        // Push-up Protocol at level 1: 20 reps x1.5 = 30, 50 XP x2 = 100,
        // stat reward 1 x1.5 rounds to 2.
        assert_eq!(quest.target_reps, 30);
        assert_eq!(quest.xp_reward, 100);
        assert!(quest.stat_rewards.values().all(|&v| v == 2));
        // FixedRandom returns the minimum deadline: exactly two hours out.
        assert_eq!(quest.expires_at, Some(t0() + Duration::hours(2)));
    }

    #[test]
    fn urgent_deadlines_stay_within_two_to_six_hours() {
        let player = Player::new();
        for seed in 0..20 {
            let mut director = seeded(seed);
            // Try until the 20% gate passes for this seed.
            for _ in 0..100 {
                if let Some(quest) = director.maybe_generate_urgent(&player, t0()) {
                    let deadline = quest.expires_at.expect("deadline");
                    assert!(deadline >= t0() + Duration::hours(2));
                    assert!(deadline <= t0() + Duration::hours(6));
                    return;
                }
            }
        }
        panic!("no urgent quest generated across seeds");
    }

    #[test]
    fn progress_accumulates_and_completion_is_sticky() {
        let player = Player::new();
        let mut director = eager();
        director.generate_daily_batch(&player, t0());
        let id = director.daily_quests()[0].id;
        let target = director.daily_quests()[0].target();
        assert_eq!(target, 20);

        assert!(director.report_progress(id, 15));
        assert!(!director.daily_quests()[0].completed);

        assert!(director.report_progress(id, 5));
        let quest = &director.daily_quests()[0];
        assert!(quest.completed);
        assert_eq!(quest.current_progress, 20);

        // A third report keeps completed set and does not clamp progress.
        assert!(director.report_progress(id, 5));
        let quest = &director.daily_quests()[0];
        assert!(quest.completed);
        assert_eq!(quest.current_progress, 25);
    }

    #[test]
    fn report_progress_on_unknown_quest_is_a_clean_failure() {
        let mut director = eager();
        assert!(!director.report_progress(QuestId::new(), 5));
    }

    #[test]
    fn complete_claims_once_and_extends_the_daily_streak() {
        let mut player = Player::new();
        let mut director = eager();
        director.generate_daily_batch(&player, t0());
        let id = director.daily_quests()[0].id;

        // Condition not met yet.
        assert!(director.complete(id, &mut player).is_none());

        director.report_progress(id, 20);
        let reward = director.complete(id, &mut player).expect("reward");
        assert_eq!(reward.xp, 50);
        assert_eq!(player.daily_quest_streak, 1);

        // Second claim refused; streak untouched.
        assert!(director.complete(id, &mut player).is_none());
        assert_eq!(player.daily_quest_streak, 1);
    }

    #[test]
    fn completing_urgent_quests_leaves_the_streak_alone() {
        let mut player = Player::new();
        let mut director = eager();
        let id = director
            .maybe_generate_urgent(&player, t0())
            .expect("urgent quest")
            .id;
        director.report_progress(id, 30);
        let reward = director.complete(id, &mut player).expect("reward");
        assert_eq!(reward.kind, QuestKind::Urgent);
        assert_eq!(player.daily_quest_streak, 0);
    }

    #[test]
    fn day_boundary_fails_incomplete_dailies_and_zeroes_the_streak() {
        let mut player = Player::new();
        player.daily_quest_streak = 4;
        let mut director = eager();
        director.reset_daily_if_needed(&player, t0());
        let batch_size = director.daily_quests().len();
        let done = director.daily_quests()[0].id;
        director.report_progress(done, 20);

        // Same day: nothing fails.
        assert!(director
            .sweep_failures(&mut player, t0() + Duration::hours(4))
            .is_empty());
        assert_eq!(player.daily_quest_streak, 4);

        // Next day: each incomplete daily emits a 24h penalty request.
        let penalties = director.sweep_failures(&mut player, t0() + Duration::days(1));
        assert_eq!(penalties.len(), batch_size - 1);
        assert!(penalties
            .iter()
            .all(|p| p.kind == QuestKind::Daily && p.duration == Duration::hours(24)));
        assert_eq!(player.daily_quest_streak, 0);
    }

    #[test]
    fn expired_urgents_emit_penalties_and_leave_the_pool() {
        let mut player = Player::new();
        let mut director = eager();
        let id = director
            .maybe_generate_urgent(&player, t0())
            .expect("urgent quest")
            .id;

        // Before the deadline nothing happens.
        assert!(director
            .sweep_failures(&mut player, t0() + Duration::hours(1))
            .is_empty());
        assert_eq!(director.urgent_quests().len(), 1);

        let penalties = director.sweep_failures(&mut player, t0() + Duration::hours(3));
        assert_eq!(penalties.len(), 1);
        assert_eq!(penalties[0].quest_id, id);
        assert_eq!(penalties[0].duration, Duration::hours(48));
        assert!(director.urgent_quests().is_empty());
    }

    #[test]
    fn expired_but_finished_urgents_are_not_failures() {
        let mut player = Player::new();
        let mut director = eager();
        let id = director
            .maybe_generate_urgent(&player, t0())
            .expect("urgent quest")
            .id;
        director.report_progress(id, 30);

        let penalties = director.sweep_failures(&mut player, t0() + Duration::hours(3));
        assert!(penalties.is_empty());
        assert_eq!(director.urgent_quests().len(), 1);
    }

    #[test]
    fn reset_daily_compares_calendar_days_not_elapsed_time() {
        let player = Player::new();
        let mut director = eager();

        assert!(director.reset_daily_if_needed(&player, t0()));
        assert_eq!(director.last_reset_day(), Some(t0().date_naive()));

        // Sixteen hours later, same calendar day: no reset.
        assert!(!director.reset_daily_if_needed(&player, t0() + Duration::hours(14)));

        // One minute past midnight: reset, even though < 24h elapsed.
        let past_midnight = t0() + Duration::hours(16) + Duration::minutes(1);
        assert_eq!(past_midnight.date_naive(), t0().date_naive() + Duration::days(1));
        assert!(director.reset_daily_if_needed(&player, past_midnight));
    }
}
