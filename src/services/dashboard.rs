// src/services/dashboard.rs

use uuid::Uuid;

use crate::{common::error::AppError, db::DashboardRepository, models::dashboard::CompanyStats};

#[derive(Clone)]
pub struct DashboardService {
    dashboard_repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(dashboard_repo: DashboardRepository) -> Self {
        Self { dashboard_repo }
    }

    pub async fn get_company_stats(&self, company_id: Uuid) -> Result<CompanyStats, AppError> {
        self.dashboard_repo.get_company_stats(company_id).await
    }
}
