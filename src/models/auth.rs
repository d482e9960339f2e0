// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// O papel do usuário dentro do sistema.
// Os valores persistidos (e expostos no JSON) seguem o vocabulário histórico
// da aplicação: super_admin, admin_entreprise, employe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    AdminEntreprise,
    Employe,
}

impl UserRole {
    /// Papéis com poder de gestão de usuários dentro de uma empresa.
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::SuperAdmin | UserRole::AdminEntreprise)
    }
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    // Nulo para super admins, que não pertencem a nenhuma empresa
    pub company_id: Option<Uuid>,
    pub name: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub role: UserRole,
    pub avatar: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub password: String,
}

// Bootstrap: criação do primeiro super admin da instalação
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterSuperAdminPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Registro público de uma empresa junto com o seu primeiro administrador
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCompanyPayload {
    #[validate(length(min = 2, message = "O nome da empresa deve ter no mínimo 2 caracteres."))]
    pub company_name: String,
    #[validate(email(message = "O e-mail da empresa é inválido."))]
    pub company_email: String,
    pub company_phone: Option<String>,
    pub company_address: Option<String>,

    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub admin_name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub admin_email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub admin_password: String,
}

// Resposta padrão das rotas de sessão (/login, /me)
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub user: User,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterCompanyResponse {
    pub company: crate::models::company::Company,
    pub user: User,
}

// Alterações parciais sobre um usuário (PATCH). A senha já chega aqui
// na forma de hash; o serviço é quem faz o bcrypt.
#[derive(Debug, Default)]
pub struct UserChanges {
    pub company_id: Option<Uuid>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
    pub avatar: Option<String>,
    pub is_active: Option<bool>,
}

// Estrutura de dados ("claims") dentro do token de sessão
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,                // ID do usuário
    pub company_id: Option<Uuid>, // Empresa à qual a sessão pertence
    pub role: UserRole,
    pub exp: usize,
    pub iat: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_format_matches_legacy_values() {
        assert_eq!(
            serde_json::to_string(&UserRole::AdminEntreprise).unwrap(),
            "\"admin_entreprise\""
        );
        assert_eq!(
            serde_json::from_str::<UserRole>("\"employe\"").unwrap(),
            UserRole::Employe
        );
    }

    #[test]
    fn admin_roles() {
        assert!(UserRole::SuperAdmin.is_admin());
        assert!(UserRole::AdminEntreprise.is_admin());
        assert!(!UserRole::Employe.is_admin());
    }

    #[test]
    fn login_payload_requires_valid_email() {
        let payload = LoginPayload {
            email: "nao-e-email".into(),
            password: "segredo".into(),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn register_company_payload_validates_both_sides() {
        let payload = RegisterCompanyPayload {
            company_name: "A".into(), // curto demais
            company_email: "empresa@example.com".into(),
            company_phone: None,
            company_address: None,
            admin_name: "Admin".into(),
            admin_email: "admin@example.com".into(),
            admin_password: "123".into(), // curta demais
        };
        let errors = payload.validate().unwrap_err();
        let fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        assert!(fields.iter().any(|f| f == "company_name"));
        assert!(fields.iter().any(|f| f == "admin_password"));
    }
}
