use crate::model::{
    attendance::AttendanceHistoryRow, course::Course, grade::GradeHistoryRow, module::MenuEntry,
    student::Student,
};
use crate::models::{
    AttendanceHistoryView, DashboardQuery, GradeHistoryView, GradeReceipt, GradesDashboard,
    RecordGradeReq,
};
use crate::report::aggregate::{CourseCount, CourseStatusCount, DateMean, GradeSummary, ScoreBucket};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Academic Management API",
        version = "0.1.0",
        description = r#"
## Academic Management Dashboard

Backend of a small academic-management dashboard: staff record grades, review
grade and attendance history, and download charts and spreadsheets.

### 🔹 Key Features
- **Grades**
  - List courses and enrolled students, record dated grades (append-only)
- **History**
  - Grade history with overall mean, mean per date, counts per course and a 10-bucket score histogram
  - Attendance history with counts per course and status
- **Reports**
  - PNG charts and XLSX exports of the raw history
- **Menu**
  - Seven navigation modules; only grades & attendance is implemented

### 📦 Response Format
- JSON responses; empty histories come back as `{"state": "empty", ...}`
- Errors come back as `{"message": ...}`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::modules::list_modules,
        crate::api::modules::open_module,

        crate::api::grades::list_courses,
        crate::api::grades::list_enrolled_students,
        crate::api::grades::record_grade,
        crate::api::grades::grade_history,
        crate::api::grades::grades_dashboard,

        crate::api::attendance::attendance_history,

        crate::api::reports::chart_png,
        crate::api::reports::export_grades,
        crate::api::reports::export_attendance
    ),
    components(
        schemas(
            Course,
            Student,
            GradeHistoryRow,
            AttendanceHistoryRow,
            MenuEntry,
            RecordGradeReq,
            GradeReceipt,
            DashboardQuery,
            GradeHistoryView,
            AttendanceHistoryView,
            GradesDashboard,
            GradeSummary,
            DateMean,
            CourseCount,
            CourseStatusCount,
            ScoreBucket
        )
    ),
    tags(
        (name = "Modules", description = "Navigation menu"),
        (name = "Grades", description = "Grade recording and history"),
        (name = "Attendance", description = "Attendance history"),
        (name = "Reports", description = "Chart and spreadsheet downloads"),
    )
)]
pub struct ApiDoc;
