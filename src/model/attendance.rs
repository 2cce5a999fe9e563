use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One attendance entry joined with student and course names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceHistoryRow {
    #[schema(example = "Ana Pérez")]
    pub student: String,
    #[schema(example = "Matemáticas")]
    pub course: String,
    #[schema(example = "present")]
    pub status: String,
    #[schema(example = "2026-03-02", value_type = String, format = "date")]
    pub date: NaiveDate,
}
