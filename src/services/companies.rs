// src/services/companies.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CompanyRepository,
    models::company::{Company, CompanyData},
};

#[derive(Clone)]
pub struct CompanyService {
    company_repo: CompanyRepository,
    pool: PgPool,
}

impl CompanyService {
    pub fn new(company_repo: CompanyRepository, pool: PgPool) -> Self {
        Self { company_repo, pool }
    }

    pub async fn list_companies(&self) -> Result<Vec<Company>, AppError> {
        self.company_repo.list_all().await
    }

    // O handler já garantiu name/email; aqui só persiste.
    pub async fn create_company(&self, data: &CompanyData) -> Result<Company, AppError> {
        let name = data.name.as_deref().unwrap_or_default();
        let email = data.email.as_deref().unwrap_or_default();

        self.company_repo
            .create_company(
                &self.pool,
                name,
                email,
                data.phone.as_deref(),
                data.address.as_deref(),
                data.logo.as_deref(),
                data.is_active.unwrap_or(true),
            )
            .await
    }

    pub async fn update_company(&self, id: Uuid, data: &CompanyData) -> Result<Company, AppError> {
        self.company_repo
            .update_company(id, data)
            .await?
            .ok_or(AppError::CompanyNotFound)
    }

    pub async fn delete_company(&self, id: Uuid) -> Result<(), AppError> {
        if !self.company_repo.delete_company(id).await? {
            return Err(AppError::CompanyNotFound);
        }
        Ok(())
    }
}
