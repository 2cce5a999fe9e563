use chrono::NaiveDate;
use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AppError;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// A score known to lie in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Into)]
pub struct Score(f64);

impl Score {
    pub fn new(value: f64) -> Result<Self, AppError> {
        if !value.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            return Err(AppError::Validation(format!(
                "score must be between {MIN_SCORE} and {MAX_SCORE}, got {value}"
            )));
        }
        Ok(Score(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// A grade ready to be appended to `calificaciones`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGrade {
    pub student_id: u64,
    pub course_id: u64,
    pub score: Score,
    pub date: NaiveDate,
}

/// One grade entry joined with student and course names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct GradeHistoryRow {
    #[schema(example = "Ana Pérez")]
    pub student: String,
    #[schema(example = "Matemáticas")]
    pub course: String,
    #[schema(example = 87.5)]
    pub score: f64,
    #[schema(example = "2026-03-02", value_type = String, format = "date")]
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(Score::new(0.0).unwrap().value(), 0.0);
        assert_eq!(Score::new(100.0).unwrap().value(), 100.0);
        assert_eq!(Score::new(87.5).unwrap().value(), 87.5);
    }

    #[test]
    fn out_of_range_is_rejected() {
        for bad in [-0.1, 100.1, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(Score::new(bad), Err(AppError::Validation(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn converts_back_into_f64() {
        let raw: f64 = Score::new(42.0).unwrap().into();
        assert_eq!(raw, 42.0);
    }
}
