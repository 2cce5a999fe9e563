use actix_web::{HttpResponse, Responder, web};
use tracing::debug;

use crate::errors::Result;
use crate::models::AttendanceHistoryView;
use crate::session::SessionContext;
use crate::storage::AcademicStore;

/// Attendance history endpoint
///
/// Read-only: attendance is entered elsewhere.
#[utoipa::path(
    get,
    path = "/api/attendance/history",
    responses(
        (status = 200, description = "Attendance history with per course/status counts, or an empty state", body = AttendanceHistoryView),
        (status = 503, description = "Database unavailable")
    ),
    tag = "Attendance"
)]
pub async fn attendance_history(
    session: SessionContext,
    store: web::Data<dyn AcademicStore>,
) -> Result<impl Responder> {
    debug!(session = %session.session_id, "Fetching attendance history");

    // a standalone request surfaces the failure instead of degrading
    let rows = store.fetch_attendance_history().await?;
    Ok(HttpResponse::Ok().json(AttendanceHistoryView::from_rows(rows)))
}
