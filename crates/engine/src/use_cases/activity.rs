//! Activity helpers - workout logging, screen-time checks, statistics.
//!
//! These sit outside the four rules engines: they turn reported activity
//! into XP-granting events and compute read-only aggregates over the
//! session log. Sessions are validated at construction; everything here
//! trusts the records it is handed.

use chrono::{Duration, NaiveDate};

use repforge_domain::{Player, WorkoutSession};

use crate::use_cases::stat_engine::{LevelUpOutcome, StatEngine};

/// Base XP per completed rep.
const XP_PER_REP: f64 = 2.0;
/// Base XP per minute of duration work (planks, runs, mobility).
const XP_PER_MINUTE: f64 = 5.0;
/// RPE 5 is the neutral effort; harder sessions scale XP up, easier down.
const NEUTRAL_RPE: f64 = 5.0;

/// Base XP for beating the screen-time goal, plus a bonus per hour under.
const SCREEN_TIME_BASE_XP: f64 = 50.0;
const SCREEN_TIME_XP_PER_SPARE_HOUR: f64 = 10.0;

/// Penalty duration requested when screen time exceeds the goal.
pub fn screen_time_penalty() -> Duration {
    Duration::hours(12)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkoutOutcome {
    pub xp_awarded: u32,
    pub level_up: LevelUpOutcome,
}

/// Result of a daily screen-time check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTimeOutcome {
    /// This calendar day was already processed.
    AlreadyChecked,
    /// Under or at the goal: XP awarded.
    UnderGoal {
        xp_awarded: u32,
        level_up: LevelUpOutcome,
    },
    /// Over the goal: the caller should gate this request through the
    /// debuff ledger's resistance check and apply it if it lands.
    OverGoal { penalty: Duration },
}

pub struct Activity {
    stat_engine: StatEngine,
}

impl Activity {
    pub fn new(stat_engine: StatEngine) -> Self {
        Self { stat_engine }
    }

    /// Convert a logged session into XP and rep credit.
    ///
    /// Multipliers compose in floating point and round half-up exactly
    /// once at the final award.
    pub fn log_workout(&self, player: &mut Player, session: &WorkoutSession) -> WorkoutOutcome {
        let minutes = session.duration_seconds as f64 / 60.0;
        let effort = session.rpe as f64 / NEUTRAL_RPE;
        let xp = ((session.reps as f64 * XP_PER_REP + minutes * XP_PER_MINUTE) * effort).round()
            as u32;

        player.total_reps_completed += session.reps as u64;
        let level_up = self.stat_engine.grant_experience(player, xp);
        tracing::debug!(exercise = %session.exercise, xp, "workout logged");

        WorkoutOutcome {
            xp_awarded: xp,
            level_up,
        }
    }

    /// Process one day's screen-time report against the stored goal.
    /// Re-checking the same calendar day is a no-op.
    pub fn check_screen_time(
        &self,
        player: &mut Player,
        day: NaiveDate,
        hours: u32,
        goal: u32,
    ) -> ScreenTimeOutcome {
        if player.last_screen_time_check_day == Some(day) {
            return ScreenTimeOutcome::AlreadyChecked;
        }
        player.last_screen_time_check_day = Some(day);

        if hours <= goal {
            let spare = (goal - hours) as f64;
            let xp = (SCREEN_TIME_BASE_XP + SCREEN_TIME_XP_PER_SPARE_HOUR * spare).round() as u32;
            let level_up = self.stat_engine.grant_experience(player, xp);
            tracing::debug!(hours, goal, xp, "screen time under goal");
            ScreenTimeOutcome::UnderGoal {
                xp_awarded: xp,
                level_up,
            }
        } else {
            tracing::debug!(hours, goal, "screen time over goal");
            ScreenTimeOutcome::OverGoal {
                penalty: screen_time_penalty(),
            }
        }
    }
}

// =============================================================================
// Session statistics (pure aggregates; empty input yields zero/None)
// =============================================================================

/// Consecutive days with at least one session, counted back from `today`
/// (a streak survives until a full day is missed).
pub fn current_streak(sessions: &[WorkoutSession], today: NaiveDate) -> u32 {
    let days: std::collections::HashSet<NaiveDate> = sessions.iter().map(|s| s.date).collect();
    let mut cursor = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        cursor -= Duration::days(1);
    }
    streak
}

pub fn total_reps(sessions: &[WorkoutSession]) -> u64 {
    sessions.iter().map(|s| s.reps as u64).sum()
}

pub fn total_minutes(sessions: &[WorkoutSession]) -> u64 {
    sessions.iter().map(|s| s.duration_seconds as u64).sum::<u64>() / 60
}

/// Most logged exercise; ties break lexicographically for determinism.
pub fn favorite_exercise(sessions: &[WorkoutSession]) -> Option<String> {
    let mut counts: std::collections::BTreeMap<&str, u32> = std::collections::BTreeMap::new();
    for session in sessions {
        *counts.entry(session.exercise.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(a.0)))
        .map(|(name, _)| name.to_string())
}
