// src/handlers/companies.rs

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::{
        error::{ApiError, AppError, single_field_error},
        uploads::store_image,
    },
    config::AppState,
    middleware::{
        auth::{RequireRole, SuperAdminOnly},
        i18n::Locale,
    },
    models::company::{Company, CompanyData},
};

// As rotas de empresa recebem multipart porque o logo chega como arquivo,
// junto com os campos de texto do formulário.
async fn parse_company_form(
    app_state: &AppState,
    multipart: &mut Multipart,
) -> Result<CompanyData, AppError> {
    let mut data = CompanyData::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::InvalidMultipart)?
    {
        let Some(name) = field.name().map(|n| n.to_string()) else {
            continue;
        };

        if name == "logo" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|_| AppError::InvalidMultipart)?;
            if bytes.is_empty() {
                continue; // input de arquivo enviado vazio
            }
            data.logo = Some(store_image(&app_state.uploads_dir, &file_name, &bytes).await?);
            continue;
        }

        let value = field.text().await.map_err(|_| AppError::InvalidMultipart)?;
        match name.as_str() {
            "name" => data.name = Some(value),
            "email" => data.email = Some(value),
            "phone" => data.phone = Some(value),
            "address" => data.address = Some(value),
            "isActive" => {
                data.is_active = Some(
                    value
                        .parse::<bool>()
                        .map_err(|_| single_field_error("isActive", "invalid", "Valor booleano inválido."))?,
                )
            }
            _ => {}
        }
    }

    Ok(data)
}

#[utoipa::path(
    get,
    path = "/api/companies",
    tag = "Companies",
    responses(
        (status = 200, description = "Todas as empresas, mais recentes primeiro", body = Vec<Company>),
        (status = 403, description = "Apenas super admin")
    )
)]
pub async fn list_companies(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<SuperAdminOnly>,
) -> Result<impl IntoResponse, ApiError> {
    let companies = app_state
        .company_service
        .list_companies()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(companies))
}

#[utoipa::path(
    post,
    path = "/api/companies",
    tag = "Companies",
    responses(
        (status = 201, description = "Empresa criada", body = Company),
        (status = 403, description = "Apenas super admin"),
        (status = 409, description = "E-mail já em uso")
    )
)]
pub async fn create_company(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<SuperAdminOnly>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let data = parse_company_form(&app_state, &mut multipart)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    // name e email são obrigatórios na criação
    if data.name.as_deref().unwrap_or("").trim().is_empty() {
        return Err(single_field_error("name", "required", "O nome é obrigatório.")
            .to_api_error(&locale, &app_state.i18n_store));
    }
    if data.email.as_deref().unwrap_or("").trim().is_empty() {
        return Err(single_field_error("email", "required", "O e-mail é obrigatório.")
            .to_api_error(&locale, &app_state.i18n_store));
    }

    let company = app_state
        .company_service
        .create_company(&data)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(company)))
}

#[utoipa::path(
    patch,
    path = "/api/companies/{id}",
    tag = "Companies",
    params(("id" = Uuid, Path, description = "ID da empresa")),
    responses(
        (status = 200, description = "Empresa atualizada", body = Company),
        (status = 404, description = "Empresa não encontrada")
    )
)]
pub async fn update_company(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<SuperAdminOnly>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let data = parse_company_form(&app_state, &mut multipart)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let company = app_state
        .company_service
        .update_company(id, &data)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(company))
}

#[utoipa::path(
    delete,
    path = "/api/companies/{id}",
    tag = "Companies",
    params(("id" = Uuid, Path, description = "ID da empresa")),
    responses(
        (status = 200, description = "Empresa e dados filhos removidos"),
        (status = 404, description = "Empresa não encontrada")
    )
)]
pub async fn delete_company(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<SuperAdminOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .company_service
        .delete_company(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(json!({ "success": true })))
}
