use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::AppError;
use crate::model::{
    attendance::AttendanceHistoryRow, course::Course, grade::GradeHistoryRow, student::Student,
};
use crate::report::aggregate::{self, CourseStatusCount, GradeSummary};

pub const NO_GRADES_MESSAGE: &str = "No grades recorded yet.";
pub const NO_ATTENDANCE_MESSAGE: &str = "No attendance recorded.";

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RecordGradeReq {
    #[schema(example = 7)]
    pub student_id: u64,
    #[schema(example = 1)]
    pub course_id: u64,
    #[schema(example = 87.5)]
    pub score: f64,
    /// Defaults to today when omitted.
    #[schema(example = "2026-03-02", value_type = Option<String>, format = "date")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GradeReceipt {
    #[schema(example = 42)]
    pub id: u64,
    pub student_id: u64,
    pub course_id: u64,
    pub score: f64,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "Grade saved")]
    pub message: String,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct DashboardQuery {
    /// Course whose roster is shown; the first course when omitted.
    #[schema(example = 1)]
    pub course_id: Option<u64>,
}

/// Grade history as the dashboard shows it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GradeHistoryView {
    Empty {
        message: String,
    },
    Loaded {
        rows: Vec<GradeHistoryRow>,
        summary: GradeSummary,
    },
}

impl GradeHistoryView {
    pub fn from_rows(rows: Vec<GradeHistoryRow>) -> Self {
        match aggregate::summarize(&rows) {
            Some(summary) => GradeHistoryView::Loaded { rows, summary },
            None => GradeHistoryView::Empty {
                message: NO_GRADES_MESSAGE.to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AttendanceHistoryView {
    Empty {
        message: String,
    },
    Loaded {
        rows: Vec<AttendanceHistoryRow>,
        by_course_status: Vec<CourseStatusCount>,
    },
    /// The attendance fetch failed; the rest of the view is still served.
    Unavailable {
        message: String,
    },
}

impl AttendanceHistoryView {
    pub fn from_rows(rows: Vec<AttendanceHistoryRow>) -> Self {
        if rows.is_empty() {
            return AttendanceHistoryView::Empty {
                message: NO_ATTENDANCE_MESSAGE.to_string(),
            };
        }
        let by_course_status = aggregate::group_by_course_and_status(&rows);
        AttendanceHistoryView::Loaded {
            rows,
            by_course_status,
        }
    }

    pub fn from_result(result: Result<Vec<AttendanceHistoryRow>, AppError>) -> Self {
        match result {
            Ok(rows) => Self::from_rows(rows),
            Err(e) => {
                tracing::warn!(error = %e, "Attendance history unavailable");
                AttendanceHistoryView::Unavailable {
                    message: "Attendance history is temporarily unavailable.".to_string(),
                }
            }
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GradesDashboard {
    pub courses: Vec<Course>,
    #[schema(nullable = true)]
    pub selected_course: Option<Course>,
    pub roster: Vec<Student>,
    pub grades: GradeHistoryView,
    pub attendance: AttendanceHistoryView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_history_serializes_as_informational_state() {
        let view = GradeHistoryView::from_rows(vec![]);
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({ "state": "empty", "message": NO_GRADES_MESSAGE })
        );
    }

    #[test]
    fn loaded_history_carries_rows_and_summary() {
        let rows = vec![GradeHistoryRow {
            student: "Ana".into(),
            course: "Math".into(),
            score: 80.0,
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        }];

        let value = serde_json::to_value(GradeHistoryView::from_rows(rows)).unwrap();
        assert_eq!(value["state"], "loaded");
        assert_eq!(value["rows"][0]["date"], "2026-03-02");
        assert_eq!(value["summary"]["mean"], 80.0);
        assert_eq!(value["summary"]["by_course"][0]["count"], 1);
    }

    #[test]
    fn failed_attendance_fetch_degrades_to_unavailable() {
        let view = AttendanceHistoryView::from_result(Err(AppError::Query("boom".into())));
        let value = serde_json::to_value(view).unwrap();
        assert_eq!(value["state"], "unavailable");
        assert!(!value["message"].as_str().unwrap().contains("boom"));
    }
}
