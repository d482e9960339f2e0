// src/models/company.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Uma empresa é o "tenant": a unidade de isolamento de dados.
// Todos os registros filhos (usuários, produtos, categorias, movimentações,
// fornecedores) são removidos em cascata junto com ela.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    // Caminho público do logo (ex: /uploads/<arquivo>)
    pub logo: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// Campos aceitos na criação/edição de uma empresa.
// As rotas recebem multipart (o logo chega como arquivo), então os campos
// são montados manualmente no handler e validados aqui.
#[derive(Debug, Default)]
pub struct CompanyData {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub logo: Option<String>,
    pub is_active: Option<bool>,
}
