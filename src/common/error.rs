// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Nosso tipo de erro de domínio, com `thiserror` para melhor ergonomia.
// As mensagens aqui são internas (logs); o que vai para o cliente passa
// pelo catálogo i18n em `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Sessão inválida ou ausente")]
    InvalidSession,

    #[error("Conta desativada")]
    AccountDisabled,

    #[error("Empresa desativada")]
    CompanyDisabled,

    #[error("Acesso negado")]
    Forbidden,

    // A rota de bootstrap fecha depois que o primeiro super admin existe
    #[error("Registro de bootstrap indisponível")]
    BootstrapClosed,

    #[error("Contexto de empresa ausente na sessão")]
    MissingCompanyContext,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Empresa não encontrada")]
    CompanyNotFound,

    #[error("Categoria não encontrada")]
    CategoryNotFound,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Fornecedor não encontrado")]
    SupplierNotFound,

    #[error("Arquivo não encontrado")]
    FileNotFound,

    // Uma saída maior que o saldo atual do produto é rejeitada
    #[error("Estoque insuficiente")]
    InsufficientStock,

    #[error("Tipo de arquivo não permitido")]
    InvalidUploadType,

    #[error("Requisição multipart inválida")]
    InvalidMultipart,

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::MissingCompanyContext
            | AppError::InvalidUploadType
            | AppError::InvalidMultipart => StatusCode::BAD_REQUEST,

            AppError::InvalidCredentials | AppError::InvalidSession => StatusCode::UNAUTHORIZED,

            AppError::AccountDisabled
            | AppError::CompanyDisabled
            | AppError::Forbidden
            | AppError::BootstrapClosed => StatusCode::FORBIDDEN,

            AppError::UserNotFound
            | AppError::CompanyNotFound
            | AppError::CategoryNotFound
            | AppError::ProductNotFound
            | AppError::SupplierNotFound
            | AppError::FileNotFound => StatusCode::NOT_FOUND,

            AppError::EmailAlreadyExists | AppError::InsufficientStock => StatusCode::CONFLICT,

            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // A chave usada no catálogo de mensagens
    pub fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation",
            AppError::EmailAlreadyExists => "email_exists",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidSession => "invalid_session",
            AppError::AccountDisabled => "account_disabled",
            AppError::CompanyDisabled => "company_disabled",
            AppError::Forbidden => "forbidden",
            AppError::BootstrapClosed => "bootstrap_closed",
            AppError::MissingCompanyContext => "missing_company",
            AppError::UserNotFound => "user_not_found",
            AppError::CompanyNotFound => "company_not_found",
            AppError::CategoryNotFound => "category_not_found",
            AppError::ProductNotFound => "product_not_found",
            AppError::SupplierNotFound => "supplier_not_found",
            AppError::FileNotFound => "file_not_found",
            AppError::InsufficientStock => "insufficient_stock",
            AppError::InvalidUploadType => "invalid_upload",
            AppError::InvalidMultipart => "invalid_multipart",
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => "internal",
        }
    }

    // Projeta o erro de domínio na resposta HTTP, resolvendo a mensagem
    // pelo idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            // A mensagem detalhada fica só no log
            tracing::error!("Erro interno do servidor: {self}");
        }

        let details = match self {
            AppError::ValidationError(errors) => {
                let mut fields = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    fields.insert(field.to_string(), json!(messages));
                }
                Some(serde_json::Value::Object(fields))
            }
            _ => None,
        };

        ApiError {
            status,
            error: store.translate(&locale.0, self.message_key()),
            details,
        }
    }
}

// Constrói um erro de validação de um único campo, no mesmo formato dos
// erros do derive do validator. Usado pelos formulários multipart, onde os
// campos chegam como texto e são conferidos à mão.
pub(crate) fn single_field_error(field: &'static str, code: &'static str, message: &str) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    let mut error = validator::ValidationError::new(code);
    error.message = Some(std::borrow::Cow::Owned(message.to_string()));
    errors.add(field.into(), error);
    AppError::ValidationError(errors)
}

// A forma final de um erro na borda HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Probe {
        #[validate(length(min = 3, message = "curto demais"))]
        name: String,
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            AppError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::ProductNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::EmailAlreadyExists.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::InsufficientStock.status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::MissingCompanyContext.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn validation_errors_carry_details() {
        let probe = Probe { name: "ab".into() };
        let app_err: AppError = probe.validate().unwrap_err().into();
        let api_err = app_err.to_api_error(&Locale("en".into()), &I18nStore::new());

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        let details = api_err.details.expect("detalhes de validação");
        assert_eq!(details["name"][0], "curto demais");
    }
}
