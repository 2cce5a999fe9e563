use async_trait::async_trait;

use crate::errors::Result;
use crate::model::{
    attendance::AttendanceHistoryRow,
    course::Course,
    grade::{GradeHistoryRow, NewGrade},
    student::Student,
};

pub mod mysql;

pub use mysql::MySqlStore;

/// Reads and appends academic records.
///
/// Handlers only see this trait, so each operation acquires whatever
/// connection it needs and releases it before returning.
#[async_trait]
pub trait AcademicStore: Send + Sync {
    /// All courses, ordered by id.
    async fn list_courses(&self) -> Result<Vec<Course>>;

    /// Students enrolled in the course, ordered by id. Empty when nobody is enrolled.
    async fn list_enrolled_students(&self, course_id: u64) -> Result<Vec<Student>>;

    /// Appends one grade row and returns its id. Never updates an existing row.
    async fn record_grade(&self, grade: &NewGrade) -> Result<u64>;

    /// Every grade joined with student and course names, newest date first.
    async fn fetch_grade_history(&self) -> Result<Vec<GradeHistoryRow>>;

    /// Every attendance entry joined with student and course names, newest date first.
    async fn fetch_attendance_history(&self) -> Result<Vec<AttendanceHistoryRow>>;
}
