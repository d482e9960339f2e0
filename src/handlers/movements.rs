// src/handlers/movements.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::{AuthenticatedUser, CompanyScope},
        i18n::Locale,
    },
    models::inventory::{MovementType, StockMovement},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMovementsQuery {
    pub product_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovementPayload {
    pub product_id: Uuid,

    #[serde(rename = "type")]
    pub kind: MovementType,

    // A quantidade é sempre positiva; o tipo decide o sinal do ajuste
    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantity: i32,

    pub reason: Option<String>,
    pub supplier: Option<String>,
    pub notes: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/movements",
    tag = "Movements",
    params(("productId" = Option<Uuid>, Query, description = "Filtra por produto")),
    responses((status = 200, description = "Movimentações da empresa, mais recentes primeiro", body = Vec<StockMovement>))
)]
pub async fn list_movements(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: CompanyScope,
    Query(query): Query<ListMovementsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let movements = app_state
        .inventory_service
        .list_movements(scope.0, query.product_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(movements))
}

// Registra a movimentação e ajusta o saldo do produto na mesma transação.
#[utoipa::path(
    post,
    path = "/api/movements",
    tag = "Movements",
    request_body = CreateMovementPayload,
    responses(
        (status = 201, description = "Movimentação registrada e saldo ajustado", body = StockMovement),
        (status = 404, description = "Produto não encontrado"),
        (status = 409, description = "Saída maior que o saldo atual")
    )
)]
pub async fn create_movement(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    scope: CompanyScope,
    Json(payload): Json<CreateMovementPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let movement = app_state
        .inventory_service
        .record_movement(
            scope.0,
            user.id,
            payload.product_id,
            payload.kind,
            payload.quantity,
            payload.reason.as_deref(),
            payload.supplier.as_deref(),
            payload.notes.as_deref(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(movement)))
}
