// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- 1. Categorias ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

// --- 2. Produtos ---
// quantity é o saldo físico atual; min_quantity é o limiar de alerta.
// "Estoque baixo" = quantity <= min_quantity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub company_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub image: Option<String>,
    pub price: Decimal,
    pub cost: Decimal,
    pub quantity: i32,
    pub min_quantity: i32,
    pub unit: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Campos de produto vindos do formulário multipart (criação e edição).
#[derive(Debug, Default)]
pub struct ProductData {
    pub category_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub image: Option<String>,
    pub price: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub quantity: Option<i32>,
    pub min_quantity: Option<i32>,
    pub unit: Option<String>,
}

// --- 3. Movimentações de Estoque ---

// O tipo decide o sinal do ajuste: "entree" soma, "sortie" subtrai.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "movement_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    Entree,
    Sortie,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    pub company_id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: MovementType,
    pub quantity: i32,
    pub reason: Option<String>,
    pub supplier: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&MovementType::Entree).unwrap(),
            "\"entree\""
        );
        assert_eq!(
            serde_json::from_str::<MovementType>("\"sortie\"").unwrap(),
            MovementType::Sortie
        );
    }

    #[test]
    fn movement_serializes_kind_as_type() {
        let movement = StockMovement {
            id: Uuid::nil(),
            company_id: Uuid::nil(),
            product_id: Uuid::nil(),
            user_id: Uuid::nil(),
            kind: MovementType::Sortie,
            quantity: 3,
            reason: Some("vente".into()),
            supplier: None,
            notes: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&movement).unwrap();
        assert_eq!(json["type"], "sortie");
        assert!(json.get("kind").is_none());
    }
}
