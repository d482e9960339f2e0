// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::{AuthenticatedUser, SESSION_COOKIE},
        i18n::Locale,
    },
    models::auth::{
        LoginPayload, RegisterCompanyPayload, RegisterCompanyResponse, RegisterSuperAdminPayload,
        SessionResponse,
    },
};

// O cookie que carrega a sessão: HttpOnly, o JS do cliente nunca o lê.
fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(7))
        .build()
}

fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Sessão aberta; o token vai no cookie", body = SessionResponse),
        (status = 401, description = "Credenciais inválidas"),
        (status = 403, description = "Conta ou empresa desativada")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    jar: CookieJar,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let (user, token) = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((jar.add(session_cookie(token)), Json(SessionResponse { user })))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses((status = 200, description = "Cookie de sessão removido"))
)]
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (
        jar.remove(clear_session_cookie()),
        Json(json!({ "success": true })),
    )
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Usuário da sessão atual", body = SessionResponse),
        (status = 401, description = "Sessão inválida ou ausente")
    )
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<SessionResponse> {
    Json(SessionResponse { user })
}

// Bootstrap da instalação: cria o primeiro super admin. Depois disso a
// rota responde 403; a semeadura contínua é via variáveis de ambiente.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterSuperAdminPayload,
    responses(
        (status = 201, description = "Primeiro super admin criado", body = SessionResponse),
        (status = 403, description = "Já existe um super admin"),
        (status = 409, description = "E-mail já em uso")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<RegisterSuperAdminPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let user = app_state
        .auth_service
        .register_super_admin(&payload.name, &payload.email, &payload.password)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(SessionResponse { user })))
}

#[utoipa::path(
    post,
    path = "/api/auth/register-company",
    tag = "Auth",
    request_body = RegisterCompanyPayload,
    responses(
        (status = 201, description = "Empresa e admin criados; admin já logado", body = RegisterCompanyResponse),
        (status = 409, description = "E-mail já em uso")
    )
)]
pub async fn register_company(
    State(app_state): State<AppState>,
    locale: Locale,
    jar: CookieJar,
    Json(payload): Json<RegisterCompanyPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let (company, user, token) = app_state
        .auth_service
        .register_company(
            &payload.company_name,
            &payload.company_email,
            payload.company_phone.as_deref(),
            payload.company_address.as_deref(),
            &payload.admin_name,
            &payload.admin_email,
            &payload.admin_password,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        jar.add(session_cookie(token)),
        (
            StatusCode::CREATED,
            Json(RegisterCompanyResponse { company, user }),
        ),
    ))
}
