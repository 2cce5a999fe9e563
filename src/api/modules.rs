use actix_web::{HttpResponse, Responder, web};
use std::str::FromStr;
use tracing::info;

use crate::api::grades::build_dashboard;
use crate::errors::{AppError, Result};
use crate::model::module::{Capability, MenuEntry, Module};
use crate::models::GradesDashboard;
use crate::session::SessionContext;
use crate::storage::AcademicStore;

/// Navigation menu
#[utoipa::path(
    get,
    path = "/api/modules",
    responses(
        (status = 200, description = "Menu entries in display order", body = [MenuEntry])
    ),
    tag = "Modules"
)]
pub async fn list_modules() -> impl Responder {
    HttpResponse::Ok().json(Module::menu())
}

/// Open a menu module
#[utoipa::path(
    get,
    path = "/api/modules/{module}",
    params(
        ("module", Path, description = "Menu key, e.g. grades")
    ),
    responses(
        (status = 200, description = "Grades dashboard", body = GradesDashboard),
        (status = 404, description = "Unknown module"),
        (status = 501, description = "Module not implemented yet", body = Object, example = json!({
            "message": "module `payments` is not implemented yet"
        }))
    ),
    tag = "Modules"
)]
pub async fn open_module(
    session: SessionContext,
    store: web::Data<dyn AcademicStore>,
    path: web::Path<String>,
) -> Result<impl Responder> {
    let key = path.into_inner();
    let module = Module::from_str(&key)
        .map_err(|_| AppError::NotFound(format!("Unknown module `{key}`")))?;

    info!(session = %session.session_id, module = %module, "Module selected");

    match (module, module.capability()) {
        (Module::Grades, Capability::Available { .. }) => {
            let dashboard = build_dashboard(&session, store.get_ref(), None).await?;
            Ok(HttpResponse::Ok().json(dashboard))
        }
        _ => Err(AppError::NotImplemented(module.to_string())),
    }
}
