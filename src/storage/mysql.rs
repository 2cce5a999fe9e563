use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::{debug, error};

use super::AcademicStore;
use crate::errors::{AppError, Result};
use crate::model::{
    attendance::AttendanceHistoryRow,
    course::Course,
    grade::{GradeHistoryRow, NewGrade},
    student::Student,
};

/// `AcademicStore` over the legacy MySQL schema (`cursos`, `estudiantes`,
/// `estudiante_curso`, `calificaciones`, `asistencia`).
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn log_failure(operation: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        error!(error = %e, operation, "Database operation failed");
        AppError::from(e)
    }
}

#[async_trait]
impl AcademicStore for MySqlStore {
    async fn list_courses(&self) -> Result<Vec<Course>> {
        sqlx::query_as::<_, Course>(
            r#"
            SELECT id, nombre AS name
            FROM cursos
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(log_failure("list_courses"))
    }

    async fn list_enrolled_students(&self, course_id: u64) -> Result<Vec<Student>> {
        debug!(course_id, "Fetching course roster");

        sqlx::query_as::<_, Student>(
            r#"
            SELECT e.id, e.nombre AS name
            FROM estudiantes e
            JOIN estudiante_curso ec ON ec.estudiante_id = e.id
            WHERE ec.curso_id = ?
            ORDER BY e.id
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(log_failure("list_enrolled_students"))
    }

    async fn record_grade(&self, grade: &NewGrade) -> Result<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO calificaciones (estudiante_id, curso_id, nota, fecha)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(grade.student_id)
        .bind(grade.course_id)
        .bind(grade.score.value())
        .bind(grade.date)
        .execute(&self.pool)
        .await
        .map_err(log_failure("record_grade"))?;

        Ok(result.last_insert_id())
    }

    async fn fetch_grade_history(&self) -> Result<Vec<GradeHistoryRow>> {
        sqlx::query_as::<_, GradeHistoryRow>(
            r#"
            SELECT e.nombre AS student, c.nombre AS course, ca.nota AS score, ca.fecha AS date
            FROM calificaciones ca
            JOIN estudiantes e ON ca.estudiante_id = e.id
            JOIN cursos c ON ca.curso_id = c.id
            ORDER BY ca.fecha DESC, ca.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(log_failure("fetch_grade_history"))
    }

    async fn fetch_attendance_history(&self) -> Result<Vec<AttendanceHistoryRow>> {
        sqlx::query_as::<_, AttendanceHistoryRow>(
            r#"
            SELECT e.nombre AS student, c.nombre AS course, a.estado AS status, a.fecha AS date
            FROM asistencia a
            JOIN estudiantes e ON a.estudiante_id = e.id
            JOIN cursos c ON a.curso_id = c.id
            ORDER BY a.fecha DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(log_failure("fetch_attendance_history"))
    }
}
