//src/main.rs

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::session_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Garante o diretório de uploads
    tokio::fs::create_dir_all(&app_state.uploads_dir)
        .await
        .expect("Falha ao criar o diretório de uploads.");

    // Seed opcional do super admin a partir do ambiente (idempotente)
    if let (Ok(email), Ok(password)) = (
        std::env::var("SUPER_ADMIN_EMAIL"),
        std::env::var("SUPER_ADMIN_PASSWORD"),
    ) {
        app_state
            .auth_service
            .ensure_super_admin(&email, &password)
            .await
            .expect("Falha ao semear o super admin.");
    }

    // Rotas de autenticação: públicas, mais o /me protegido pelo guardião
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/register", post(handlers::auth::register))
        .route("/register-company", post(handlers::auth::register_company))
        .merge(
            Router::new()
                .route("/me", get(handlers::auth::get_me))
                .layer(axum_middleware::from_fn_with_state(
                    app_state.clone(),
                    session_guard,
                )),
        );

    // Tudo aqui dentro exige sessão válida; o guardião injeta o usuário.
    // Caminhos completos + merge, para não sobrepor prefixos aninhados.
    let session_routes = Router::new()
        .route(
            "/api/companies",
            get(handlers::companies::list_companies).post(handlers::companies::create_company),
        )
        .route(
            "/api/companies/{id}",
            patch(handlers::companies::update_company)
                .delete(handlers::companies::delete_company),
        )
        .route(
            "/api/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/api/users/{id}",
            patch(handlers::users::update_user).delete(handlers::users::delete_user),
        )
        .route(
            "/api/categories",
            get(handlers::inventory::list_categories).post(handlers::inventory::create_category),
        )
        .route(
            "/api/categories/{id}",
            patch(handlers::inventory::update_category)
                .delete(handlers::inventory::delete_category),
        )
        .route(
            "/api/products",
            get(handlers::inventory::list_products).post(handlers::inventory::create_product),
        )
        .route(
            "/api/products/low-stock",
            get(handlers::inventory::list_low_stock_products),
        )
        .route(
            "/api/products/{id}",
            patch(handlers::inventory::update_product)
                .delete(handlers::inventory::delete_product),
        )
        .route(
            "/api/movements",
            get(handlers::movements::list_movements).post(handlers::movements::create_movement),
        )
        .route(
            "/api/suppliers",
            get(handlers::suppliers::list_suppliers).post(handlers::suppliers::create_supplier),
        )
        .route(
            "/api/suppliers/{id}",
            patch(handlers::suppliers::update_supplier)
                .delete(handlers::suppliers::delete_supplier),
        )
        .route("/api/stats", get(handlers::dashboard::get_stats))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            session_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .merge(session_routes)
        .route("/uploads/{filename}", get(handlers::uploads::serve_upload))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(DefaultBodyLimit::max(common::uploads::MAX_UPLOAD_BYTES))
        .with_state(app_state);

    // Inicia o servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(docs::ApiDoc::openapi())
}
