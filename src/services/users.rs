// src/services/users.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{User, UserChanges, UserRole},
    services::auth::AuthService,
};

// Regras de gestão de usuários. O guardião de papel nas rotas já barrou
// quem não pode chegar aqui; este serviço cuida do escopo por empresa.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    pool: PgPool,
}

pub struct NewUser {
    pub company_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub avatar: Option<String>,
}

pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub avatar: Option<String>,
    pub is_active: Option<bool>,
}

impl UserService {
    pub fn new(user_repo: UserRepository, pool: PgPool) -> Self {
        Self { user_repo, pool }
    }

    // Super admin escolhe a empresa via query; os demais veem só a sua.
    pub async fn list_users(
        &self,
        actor: &User,
        requested_company: Option<Uuid>,
    ) -> Result<Vec<User>, AppError> {
        let company_id = match actor.role {
            UserRole::SuperAdmin => requested_company.ok_or(AppError::MissingCompanyContext)?,
            _ => actor.company_id.ok_or(AppError::MissingCompanyContext)?,
        };
        self.user_repo.list_by_company(company_id).await
    }

    pub async fn create_user(&self, actor: &User, new_user: NewUser) -> Result<User, AppError> {
        // admin_entreprise cria usuários apenas na própria empresa e
        // nunca com papel de super admin.
        let company_id = match actor.role {
            UserRole::SuperAdmin => new_user.company_id,
            _ => actor.company_id,
        };
        if actor.role != UserRole::SuperAdmin && new_user.role == UserRole::SuperAdmin {
            return Err(AppError::Forbidden);
        }

        let password_hash = AuthService::hash_password(&new_user.password).await?;

        self.user_repo
            .create_user(
                &self.pool,
                company_id,
                &new_user.name,
                &new_user.email,
                &password_hash,
                new_user.role,
                new_user.avatar.as_deref(),
                true,
            )
            .await
    }

    pub async fn update_user(
        &self,
        actor: &User,
        target_id: Uuid,
        update: UserUpdate,
    ) -> Result<User, AppError> {
        let target = self
            .user_repo
            .find_by_id(target_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        match actor.role {
            UserRole::SuperAdmin => {}
            UserRole::AdminEntreprise => {
                // Dentro da própria empresa, e sem promover ninguém a super admin
                if target.company_id != actor.company_id {
                    return Err(AppError::Forbidden);
                }
                if update.role == Some(UserRole::SuperAdmin) {
                    return Err(AppError::Forbidden);
                }
            }
            UserRole::Employe => {
                // Um funcionário só edita o próprio perfil, e não os
                // campos administrativos.
                if target.id != actor.id
                    || update.role.is_some()
                    || update.is_active.is_some()
                {
                    return Err(AppError::Forbidden);
                }
            }
        }

        // Senha nova é re-hasheada; as demais alterações passam direto
        let password_hash = match update.password.as_deref() {
            Some(password) => Some(AuthService::hash_password(password).await?),
            None => None,
        };

        let changes = UserChanges {
            company_id: None,
            name: update.name,
            email: update.email,
            password_hash,
            role: update.role,
            avatar: update.avatar,
            is_active: update.is_active,
        };

        self.user_repo
            .update_user(target_id, &changes)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn delete_user(&self, actor: &User, target_id: Uuid) -> Result<(), AppError> {
        let target = self
            .user_repo
            .find_by_id(target_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if actor.role != UserRole::SuperAdmin {
            if target.company_id != actor.company_id || target.role == UserRole::SuperAdmin {
                return Err(AppError::Forbidden);
            }
        }

        if !self.user_repo.delete_user(target_id).await? {
            return Err(AppError::UserNotFound);
        }
        Ok(())
    }
}
