// src/handlers/dashboard.rs

use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::CompanyScope, i18n::Locale},
    models::dashboard::CompanyStats,
};

// GET /api/stats
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Indicadores da empresa", body = CompanyStats),
        (status = 401, description = "Não autorizado")
    )
)]
pub async fn get_stats(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: CompanyScope,
) -> Result<impl IntoResponse, ApiError> {
    let stats = app_state
        .dashboard_service
        .get_company_stats(scope.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(stats))
}
