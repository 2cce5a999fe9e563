use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use tracing::{debug, info};

use crate::errors::{AppError, Result};
use crate::model::{
    course::Course,
    grade::{NewGrade, Score},
    student::Student,
};
use crate::models::{
    AttendanceHistoryView, DashboardQuery, GradeHistoryView, GradeReceipt, GradesDashboard,
    RecordGradeReq,
};
use crate::session::SessionContext;
use crate::storage::AcademicStore;

/// List courses
#[utoipa::path(
    get,
    path = "/api/grades/courses",
    responses(
        (status = 200, description = "All courses", body = [Course]),
        (status = 503, description = "Database unavailable")
    ),
    tag = "Grades"
)]
pub async fn list_courses(
    session: SessionContext,
    store: web::Data<dyn AcademicStore>,
) -> Result<impl Responder> {
    debug!(session = %session.session_id, "Listing courses");
    let courses = store.list_courses().await?;
    Ok(HttpResponse::Ok().json(courses))
}

/// List students enrolled in a course
#[utoipa::path(
    get,
    path = "/api/grades/courses/{course_id}/students",
    params(
        ("course_id", Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Enrolled students, possibly none", body = [Student]),
        (status = 503, description = "Database unavailable")
    ),
    tag = "Grades"
)]
pub async fn list_enrolled_students(
    session: SessionContext,
    store: web::Data<dyn AcademicStore>,
    path: web::Path<u64>,
) -> Result<impl Responder> {
    let course_id = path.into_inner();
    debug!(session = %session.session_id, course_id, "Listing roster");

    let students = store.list_enrolled_students(course_id).await?;
    Ok(HttpResponse::Ok().json(students))
}

/// Record a grade
///
/// Always appends a new row; earlier grades of the same student and course are kept.
#[utoipa::path(
    post,
    path = "/api/grades",
    request_body = RecordGradeReq,
    responses(
        (status = 201, description = "Grade saved", body = GradeReceipt),
        (status = 400, description = "Score outside 0-100", body = Object, example = json!({
            "message": "score must be between 0 and 100, got 120"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Grades"
)]
pub async fn record_grade(
    session: SessionContext,
    store: web::Data<dyn AcademicStore>,
    payload: web::Json<RecordGradeReq>,
) -> Result<impl Responder> {
    let payload = payload.into_inner();

    let grade = NewGrade {
        student_id: payload.student_id,
        course_id: payload.course_id,
        score: Score::new(payload.score)?,
        date: payload.date.unwrap_or_else(|| Local::now().date_naive()),
    };

    let id = store.record_grade(&grade).await?;

    info!(
        session = %session.session_id,
        role = ?session.role,
        grade_id = id,
        student_id = grade.student_id,
        course_id = grade.course_id,
        "Grade recorded"
    );

    Ok(HttpResponse::Created().json(GradeReceipt {
        id,
        student_id: grade.student_id,
        course_id: grade.course_id,
        score: grade.score.value(),
        date: grade.date,
        message: "Grade saved".to_string(),
    }))
}

/// Grade history with summary statistics
#[utoipa::path(
    get,
    path = "/api/grades/history",
    responses(
        (status = 200, description = "Grade history, or an empty state when nothing is recorded", body = GradeHistoryView),
        (status = 503, description = "Database unavailable")
    ),
    tag = "Grades"
)]
pub async fn grade_history(
    session: SessionContext,
    store: web::Data<dyn AcademicStore>,
) -> Result<impl Responder> {
    debug!(session = %session.session_id, "Fetching grade history");
    let rows = store.fetch_grade_history().await?;
    Ok(HttpResponse::Ok().json(GradeHistoryView::from_rows(rows)))
}

/// Grades and attendance dashboard
#[utoipa::path(
    get,
    path = "/api/grades/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Everything the grades module shows", body = GradesDashboard),
        (status = 404, description = "Unknown course"),
        (status = 503, description = "Database unavailable")
    ),
    tag = "Grades"
)]
pub async fn grades_dashboard(
    session: SessionContext,
    store: web::Data<dyn AcademicStore>,
    query: web::Query<DashboardQuery>,
) -> Result<impl Responder> {
    let dashboard = build_dashboard(&session, store.get_ref(), query.course_id).await?;
    Ok(HttpResponse::Ok().json(dashboard))
}

/// Collects the grades module: course picker, roster, grade history, attendance.
///
/// Attendance failures degrade to an unavailable section; anything else aborts.
pub async fn build_dashboard(
    session: &SessionContext,
    store: &dyn AcademicStore,
    course_id: Option<u64>,
) -> Result<GradesDashboard> {
    let courses = store.list_courses().await?;

    let selected_course = match course_id {
        Some(id) => Some(
            courses
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("Course {id} not found")))?,
        ),
        None => courses.first().cloned(),
    };

    let roster = match &selected_course {
        Some(course) => store.list_enrolled_students(course.id).await?,
        None => Vec::new(),
    };

    let grades = GradeHistoryView::from_rows(store.fetch_grade_history().await?);
    let attendance = AttendanceHistoryView::from_result(store.fetch_attendance_history().await);

    debug!(
        session = %session.session_id,
        course_id = selected_course.as_ref().map(|c| c.id),
        roster = roster.len(),
        "Dashboard assembled"
    );

    Ok(GradesDashboard {
        courses,
        selected_course,
        roster,
        grades,
        attendance,
    })
}
