// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// Indicadores exibidos no painel da empresa.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyStats {
    pub total_products: i64,
    // Soma de price * quantity sobre todos os produtos da empresa
    pub total_value: Decimal,
    pub low_stock_alerts: i64,
    pub movements_this_month: i64,
}
