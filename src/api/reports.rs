use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use std::str::FromStr;
use tracing::{debug, error};

use crate::errors::{AppError, Result};
use crate::report::{
    aggregate,
    charts::{self, ChartKind, ChartSpec},
    render,
    spreadsheet::{self, Table, XLSX_CONTENT_TYPE},
};
use crate::session::SessionContext;
use crate::storage::AcademicStore;

fn attachment(content_type: &str, file_name: &str, body: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(content_type)
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{file_name}\""),
        ))
        .body(body)
}

/// Builds the chart from fresh history; `None` when there is nothing to plot.
pub async fn chart_for(store: &dyn AcademicStore, kind: ChartKind) -> Result<Option<ChartSpec>> {
    let spec = match kind {
        ChartKind::ScoreTrend | ChartKind::ScoreDistribution | ChartKind::GradesByCourse => {
            let rows = store.fetch_grade_history().await?;
            if rows.is_empty() {
                return Ok(None);
            }
            match kind {
                ChartKind::ScoreTrend => charts::score_trend(&aggregate::group_by_date_mean(&rows)),
                ChartKind::ScoreDistribution => {
                    charts::score_distribution(&aggregate::score_histogram(&rows))
                }
                _ => charts::grades_by_course(&aggregate::group_by_course_count(&rows)),
            }
        }
        ChartKind::AttendanceByCourse => {
            let rows = store.fetch_attendance_history().await?;
            if rows.is_empty() {
                return Ok(None);
            }
            charts::attendance_by_course(&aggregate::group_by_course_and_status(&rows))
        }
    };
    Ok(Some(spec))
}

/// Download a chart as PNG
#[utoipa::path(
    get,
    path = "/api/reports/charts/{chart}",
    params(
        ("chart", Path, description = "score-trend, score-distribution, grades-by-course or attendance-by-course")
    ),
    responses(
        (status = 200, description = "PNG image"),
        (status = 204, description = "No records to plot"),
        (status = 404, description = "Unknown chart"),
        (status = 500, description = "Rendering failed")
    ),
    tag = "Reports"
)]
pub async fn chart_png(
    session: SessionContext,
    store: web::Data<dyn AcademicStore>,
    path: web::Path<String>,
) -> Result<impl Responder> {
    let name = path.into_inner();
    let kind = ChartKind::from_str(&name)
        .map_err(|_| AppError::NotFound(format!("Unknown chart `{name}`")))?;

    let Some(spec) = chart_for(store.get_ref(), kind).await? else {
        debug!(session = %session.session_id, chart = %kind, "Nothing to plot");
        return Ok(HttpResponse::NoContent().finish());
    };

    // plotting is CPU bound, keep it off the worker thread
    let png = web::block(move || render::render_png(&spec))
        .await
        .map_err(|e| {
            error!(error = %e, chart = %kind, "Render task failed");
            AppError::Render(e.to_string())
        })??;

    Ok(attachment("image/png", &kind.file_name(), png))
}

fn workbook_response(table: Table, sheet: &str, stem: &str) -> Result<HttpResponse> {
    let bytes = spreadsheet::export_spreadsheet(&table, sheet)?;
    let file_name = format!("{stem}_{}.xlsx", Local::now().format("%Y%m%d_%H%M%S"));
    Ok(attachment(XLSX_CONTENT_TYPE, &file_name, bytes))
}

/// Download grade history as XLSX
#[utoipa::path(
    get,
    path = "/api/reports/grades.xlsx",
    responses(
        (status = 200, description = "Workbook with one row per grade"),
        (status = 204, description = "No grades recorded"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reports"
)]
pub async fn export_grades(
    session: SessionContext,
    store: web::Data<dyn AcademicStore>,
) -> Result<impl Responder> {
    let rows = store.fetch_grade_history().await?;
    if rows.is_empty() {
        return Ok(HttpResponse::NoContent().finish());
    }

    debug!(session = %session.session_id, rows = rows.len(), "Exporting grades");
    workbook_response(Table::from_rows(&rows), "grades", "grades")
}

/// Download attendance history as XLSX
#[utoipa::path(
    get,
    path = "/api/reports/attendance.xlsx",
    responses(
        (status = 200, description = "Workbook with one row per attendance entry"),
        (status = 204, description = "No attendance recorded"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reports"
)]
pub async fn export_attendance(
    session: SessionContext,
    store: web::Data<dyn AcademicStore>,
) -> Result<impl Responder> {
    let rows = store.fetch_attendance_history().await?;
    if rows.is_empty() {
        return Ok(HttpResponse::NoContent().finish());
    }

    debug!(session = %session.session_id, rows = rows.len(), "Exporting attendance");
    workbook_response(Table::from_rows(&rows), "attendance", "attendance")
}
