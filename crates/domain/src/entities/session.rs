//! Workout session log records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::SessionId;

pub const MIN_RPE: u8 = 1;
pub const MAX_RPE: u8 = 10;

/// One logged workout or mobility session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub id: SessionId,
    pub date: NaiveDate,
    pub exercise: String,
    pub reps: u32,
    pub duration_seconds: u32,
    /// Rate of Perceived Exertion, 1-10 self-reported intensity.
    pub rpe: u8,
}

impl WorkoutSession {
    /// Build a validated session record. A session must report some work
    /// (reps or duration) and an RPE within the 1-10 scale.
    pub fn new(
        date: NaiveDate,
        exercise: impl Into<String>,
        reps: u32,
        duration_seconds: u32,
        rpe: u8,
    ) -> Result<Self, DomainError> {
        if !(MIN_RPE..=MAX_RPE).contains(&rpe) {
            return Err(DomainError::validation(format!(
                "RPE must be between {MIN_RPE} and {MAX_RPE}, got {rpe}"
            )));
        }
        if reps == 0 && duration_seconds == 0 {
            return Err(DomainError::constraint(
                "a session must report reps or duration",
            ));
        }
        Ok(Self {
            id: SessionId::new(),
            date,
            exercise: exercise.into(),
            reps,
            duration_seconds,
            rpe,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).expect("valid date")
    }

    #[test]
    fn valid_sessions_pass_validation() {
        assert!(WorkoutSession::new(day(), "push-ups", 20, 0, 6).is_ok());
        assert!(WorkoutSession::new(day(), "plank", 0, 90, 10).is_ok());
    }

    #[test]
    fn rpe_outside_the_scale_is_rejected() {
        assert!(WorkoutSession::new(day(), "push-ups", 20, 0, 0).is_err());
        assert!(WorkoutSession::new(day(), "push-ups", 20, 0, 11).is_err());
    }

    #[test]
    fn empty_sessions_are_rejected() {
        let err = WorkoutSession::new(day(), "push-ups", 0, 0, 5).expect_err("must fail");
        assert!(matches!(err, DomainError::Constraint(_)));
    }
}
