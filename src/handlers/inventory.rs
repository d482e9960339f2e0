// src/handlers/inventory.rs

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError, single_field_error},
        uploads::store_image,
    },
    config::AppState,
    middleware::{auth::CompanyScope, i18n::Locale},
    models::inventory::{Category, Product, ProductData},
};

// ---
// Categorias (JSON simples)
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,
    pub description: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Inventory",
    responses((status = 200, description = "Categorias da empresa", body = Vec<Category>))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: CompanyScope,
) -> Result<impl IntoResponse, ApiError> {
    let categories = app_state
        .inventory_service
        .list_categories(scope.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(categories))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Inventory",
    request_body = CreateCategoryPayload,
    responses((status = 201, description = "Categoria criada", body = Category))
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: CompanyScope,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let category = app_state
        .inventory_service
        .create_category(scope.0, &payload.name, payload.description.as_deref())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    patch,
    path = "/api/categories/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID da categoria")),
    request_body = UpdateCategoryPayload,
    responses(
        (status = 200, description = "Categoria atualizada", body = Category),
        (status = 404, description = "Categoria não encontrada")
    )
)]
pub async fn update_category(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: CompanyScope,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let category = app_state
        .inventory_service
        .update_category(
            scope.0,
            id,
            payload.name.as_deref(),
            payload.description.as_deref(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID da categoria")),
    responses(
        (status = 200, description = "Categoria removida; produtos ficam sem categoria"),
        (status = 404, description = "Categoria não encontrada")
    )
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: CompanyScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .inventory_service
        .delete_category(scope.0, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(json!({ "success": true })))
}

// ---
// Produtos (multipart: campos de texto + imagem opcional)
// ---

// Monta um ProductData a partir do formulário. Números chegam como texto
// e são convertidos aqui; erro de conversão vira 400 apontando o campo.
async fn parse_product_form(
    app_state: &AppState,
    multipart: &mut Multipart,
) -> Result<ProductData, AppError> {
    let mut data = ProductData::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::InvalidMultipart)?
    {
        let Some(name) = field.name().map(|n| n.to_string()) else {
            continue;
        };

        if name == "image" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|_| AppError::InvalidMultipart)?;
            if bytes.is_empty() {
                continue;
            }
            data.image = Some(store_image(&app_state.uploads_dir, &file_name, &bytes).await?);
            continue;
        }

        let value = field.text().await.map_err(|_| AppError::InvalidMultipart)?;
        match name.as_str() {
            "name" => data.name = Some(value),
            "description" => data.description = Some(value),
            "sku" => data.sku = Some(value),
            "barcode" => data.barcode = Some(value),
            "unit" => data.unit = Some(value),
            "categoryId" => {
                // Campo vazio no formulário significa "sem categoria"
                if !value.trim().is_empty() {
                    data.category_id = Some(value.parse::<Uuid>().map_err(|_| {
                        single_field_error("categoryId", "invalid", "ID de categoria inválido.")
                    })?);
                }
            }
            "price" => {
                data.price = Some(value.parse::<Decimal>().map_err(|_| {
                    single_field_error("price", "invalid", "Preço inválido.")
                })?)
            }
            "cost" => {
                data.cost = Some(value.parse::<Decimal>().map_err(|_| {
                    single_field_error("cost", "invalid", "Custo inválido.")
                })?)
            }
            "quantity" => {
                data.quantity = Some(value.parse::<i32>().map_err(|_| {
                    single_field_error("quantity", "invalid", "Quantidade inválida.")
                })?)
            }
            "minQuantity" => {
                data.min_quantity = Some(value.parse::<i32>().map_err(|_| {
                    single_field_error("minQuantity", "invalid", "Quantidade mínima inválida.")
                })?)
            }
            _ => {}
        }
    }

    Ok(data)
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Inventory",
    responses((status = 200, description = "Produtos da empresa, mais recentes primeiro", body = Vec<Product>))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: CompanyScope,
) -> Result<impl IntoResponse, ApiError> {
    let products = app_state
        .inventory_service
        .list_products(scope.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/products/low-stock",
    tag = "Inventory",
    responses((status = 200, description = "Produtos com saldo no limiar de alerta ou abaixo", body = Vec<Product>))
)]
pub async fn list_low_stock_products(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: CompanyScope,
) -> Result<impl IntoResponse, ApiError> {
    let products = app_state
        .inventory_service
        .list_low_stock_products(scope.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(products))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Inventory",
    responses(
        (status = 201, description = "Produto criado", body = Product),
        (status = 400, description = "Campo inválido no formulário")
    )
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: CompanyScope,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let data = parse_product_form(&app_state, &mut multipart)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    if data.name.as_deref().unwrap_or("").trim().is_empty() {
        return Err(single_field_error("name", "required", "O nome é obrigatório.")
            .to_api_error(&locale, &app_state.i18n_store));
    }

    let product = app_state
        .inventory_service
        .create_product(scope.0, &data)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: CompanyScope,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let data = parse_product_form(&app_state, &mut multipart)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let product = app_state
        .inventory_service
        .update_product(scope.0, id, &data)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto removido"),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    locale: Locale,
    scope: CompanyScope,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .inventory_service
        .delete_product(scope.0, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(json!({ "success": true })))
}
