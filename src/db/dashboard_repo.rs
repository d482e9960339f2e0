// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::{common::error::AppError, models::dashboard::CompanyStats};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Os indicadores são lidos dentro de uma transação para formar um
    // snapshot consistente entre as três consultas.
    pub async fn get_company_stats(&self, company_id: Uuid) -> Result<CompanyStats, AppError> {
        let mut tx = self.pool.begin().await?;

        // A. Total de produtos e valor do estoque (preço x saldo)
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total_products,
                   COALESCE(SUM(price * quantity), 0) AS total_value
            FROM products
            WHERE company_id = $1
            "#,
        )
        .bind(company_id)
        .fetch_one(&mut *tx)
        .await?;

        let total_products: i64 = row.try_get("total_products")?;
        let total_value: Decimal = row.try_get("total_value")?;

        // B. Alertas de estoque baixo
        let low_stock_alerts = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM products WHERE company_id = $1 AND quantity <= min_quantity",
        )
        .bind(company_id)
        .fetch_one(&mut *tx)
        .await?;

        // C. Movimentações do mês corrente
        let movements_this_month = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM stock_movements
            WHERE company_id = $1 AND created_at >= date_trunc('month', now())
            "#,
        )
        .bind(company_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(CompanyStats {
            total_products,
            total_value,
            low_stock_alerts,
            movements_this_month,
        })
    }
}
