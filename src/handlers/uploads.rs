// src/handlers/uploads.rs

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::{
    common::{
        error::{ApiError, AppError},
        uploads::{content_type_for, is_safe_file_name},
    },
    config::AppState,
    middleware::i18n::Locale,
};

// GET /uploads/{filename}
// Serve os arquivos enviados (logos e fotos de produto). O nome é validado
// antes de tocar no sistema de arquivos: nada fora do diretório de uploads.
#[utoipa::path(
    get,
    path = "/uploads/{filename}",
    tag = "Uploads",
    params(("filename" = String, Path, description = "Nome do arquivo armazenado")),
    responses(
        (status = 200, description = "Conteúdo do arquivo"),
        (status = 404, description = "Arquivo não encontrado")
    )
)]
pub async fn serve_upload(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    if !is_safe_file_name(&filename) {
        return Err(AppError::Forbidden.to_api_error(&locale, &app_state.i18n_store));
    }

    let path = app_state.uploads_dir.join(&filename);
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok((
            [(header::CONTENT_TYPE, content_type_for(&filename))],
            bytes,
        )
            .into_response()),
        Err(_) => Err(AppError::FileNotFound.to_api_error(&locale, &app_state.i18n_store)),
    }
}
