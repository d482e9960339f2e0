// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::middleware::auth::SESSION_COOKIE;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::get_me,
        handlers::auth::register,
        handlers::auth::register_company,

        // --- Companies ---
        handlers::companies::list_companies,
        handlers::companies::create_company,
        handlers::companies::update_company,
        handlers::companies::delete_company,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::delete_user,

        // --- Inventory ---
        handlers::inventory::list_categories,
        handlers::inventory::create_category,
        handlers::inventory::update_category,
        handlers::inventory::delete_category,
        handlers::inventory::list_products,
        handlers::inventory::list_low_stock_products,
        handlers::inventory::create_product,
        handlers::inventory::update_product,
        handlers::inventory::delete_product,

        // --- Movements ---
        handlers::movements::list_movements,
        handlers::movements::create_movement,

        // --- Suppliers ---
        handlers::suppliers::list_suppliers,
        handlers::suppliers::create_supplier,
        handlers::suppliers::update_supplier,
        handlers::suppliers::delete_supplier,

        // --- Dashboard ---
        handlers::dashboard::get_stats,

        // --- Uploads ---
        handlers::uploads::serve_upload,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::LoginPayload,
            models::auth::RegisterSuperAdminPayload,
            models::auth::RegisterCompanyPayload,
            models::auth::SessionResponse,
            models::auth::RegisterCompanyResponse,

            // --- Companies ---
            models::company::Company,

            // --- Inventory ---
            models::inventory::Category,
            models::inventory::Product,
            models::inventory::MovementType,
            models::inventory::StockMovement,

            // --- Suppliers ---
            models::supplier::Supplier,

            // --- Dashboard ---
            models::dashboard::CompanyStats,

            // --- Payloads ---
            handlers::users::CreateUserPayload,
            handlers::users::UpdateUserPayload,
            handlers::inventory::CreateCategoryPayload,
            handlers::inventory::UpdateCategoryPayload,
            handlers::movements::CreateMovementPayload,
            handlers::suppliers::CreateSupplierPayload,
            handlers::suppliers::UpdateSupplierPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e registro"),
        (name = "Companies", description = "Gestão global de empresas (super admin)"),
        (name = "Users", description = "Usuários da empresa"),
        (name = "Inventory", description = "Categorias e produtos"),
        (name = "Movements", description = "Movimentações de estoque"),
        (name = "Suppliers", description = "Fornecedores"),
        (name = "Dashboard", description = "Indicadores da empresa"),
        (name = "Uploads", description = "Arquivos enviados")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        // A sessão normal vive em um cookie; o Bearer fica como alternativa
        // para clientes sem cookies.
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
        components.add_security_scheme(
            "api_bearer",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
