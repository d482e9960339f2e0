// src/config.rs

use std::{env, path::PathBuf, time::Duration};

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    common::i18n::I18nStore,
    db::{
        CompanyRepository, DashboardRepository, InventoryRepository, SupplierRepository,
        UserRepository,
    },
    services::{
        auth::AuthService, companies::CompanyService, dashboard::DashboardService,
        inventory::InventoryService, users::UserService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub uploads_dir: PathBuf,
    pub i18n_store: I18nStore,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub company_service: CompanyService,
    pub inventory_service: InventoryService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let uploads_dir =
            PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()));

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let company_repo = CompanyRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let supplier_repo = SupplierRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            company_repo.clone(),
            jwt_secret,
            db_pool.clone(),
        );
        let user_service = UserService::new(user_repo, db_pool.clone());
        let company_service = CompanyService::new(company_repo, db_pool.clone());
        let inventory_service =
            InventoryService::new(inventory_repo, supplier_repo, db_pool.clone());
        let dashboard_service = DashboardService::new(dashboard_repo);

        Ok(Self {
            db_pool,
            uploads_dir,
            i18n_store: I18nStore::new(),
            auth_service,
            user_service,
            company_service,
            inventory_service,
            dashboard_service,
        })
    }
}
