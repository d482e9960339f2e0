// src/middleware/auth.rs

use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::auth::{User, UserRole},
};

// Nome do cookie que carrega o token de sessão
pub const SESSION_COOKIE: &str = "stock_session";

// Cookie de sessão primeiro; header Bearer como fallback para clientes
// que não falam cookies (scripts, integrações).
fn extract_token(parts_headers: &axum::http::HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(parts_headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    parts_headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

// O middleware em si: valida o token e injeta o usuário (relido do banco,
// para que desativações tenham efeito imediato) nos extensions da requisição.
pub async fn session_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let locale = Locale::from_headers(request.headers());

    let token = extract_token(request.headers()).ok_or_else(|| {
        crate::common::error::AppError::InvalidSession
            .to_api_error(&locale, &app_state.i18n_store)
    })?;

    let user = app_state
        .auth_service
        .validate_token(&token)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(ApiError {
                status: StatusCode::UNAUTHORIZED,
                error: "Invalid or missing session.".into(),
                details: None,
            })
    }
}

// ---
// Escopo de tenant: a empresa da sessão, nunca a do corpo da requisição.
// ---
#[derive(Debug, Clone, Copy)]
pub struct CompanyScope(pub Uuid);

impl<S> FromRequestParts<S> for CompanyScope
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<User>().ok_or(ApiError {
            status: StatusCode::UNAUTHORIZED,
            error: "Invalid or missing session.".into(),
            details: None,
        })?;

        user.company_id.map(CompanyScope).ok_or(ApiError {
            status: StatusCode::BAD_REQUEST,
            error: "No company is bound to this session.".into(),
            details: None,
        })
    }
}

// ---
// Guardião de papel: um extrator tipado por marcador, no estilo
// RequireRole<SuperAdminOnly>. Falha com 403 antes do handler rodar.
// ---

pub trait RoleGate: Send + Sync + 'static {
    fn allows(role: UserRole) -> bool;
}

pub struct SuperAdminOnly;
impl RoleGate for SuperAdminOnly {
    fn allows(role: UserRole) -> bool {
        role == UserRole::SuperAdmin
    }
}

pub struct CompanyAdmin;
impl RoleGate for CompanyAdmin {
    fn allows(role: UserRole) -> bool {
        role.is_admin()
    }
}

pub struct RequireRole<T: RoleGate>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleGate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<User>().ok_or(ApiError {
            status: StatusCode::UNAUTHORIZED,
            error: "Invalid or missing session.".into(),
            details: None,
        })?;

        if !T::allows(user.role) {
            return Err(ApiError {
                status: StatusCode::FORBIDDEN,
                error: "Access denied.".into(),
                details: None,
            });
        }

        Ok(RequireRole(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn super_admin_gate() {
        assert!(SuperAdminOnly::allows(UserRole::SuperAdmin));
        assert!(!SuperAdminOnly::allows(UserRole::AdminEntreprise));
        assert!(!SuperAdminOnly::allows(UserRole::Employe));
    }

    #[test]
    fn company_admin_gate_admits_both_admin_roles() {
        assert!(CompanyAdmin::allows(UserRole::SuperAdmin));
        assert!(CompanyAdmin::allows(UserRole::AdminEntreprise));
        assert!(!CompanyAdmin::allows(UserRole::Employe));
    }

    #[test]
    fn bearer_fallback_is_recognized() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(extract_token(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn cookie_wins_over_bearer() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(
            header::COOKIE,
            format!("{SESSION_COOKIE}=tok-do-cookie").parse().unwrap(),
        );
        headers.insert(header::AUTHORIZATION, "Bearer tok-do-header".parse().unwrap());
        assert_eq!(extract_token(&headers).as_deref(), Some("tok-do-cookie"));
    }

    #[test]
    fn no_credentials_no_token() {
        assert!(extract_token(&axum::http::HeaderMap::new()).is_none());
    }
}
