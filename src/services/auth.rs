// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{CompanyRepository, UserRepository},
    models::{
        auth::{Claims, User, UserRole},
        company::Company,
    },
};

// Sessões duram uma semana; o exp do token é a única fonte de expiração.
const SESSION_TTL_DAYS: i64 = 7;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    company_repo: CompanyRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        company_repo: CompanyRepository,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            company_repo,
            jwt_secret,
            pool,
        }
    }

    // O hashing é caro de propósito; roda fora do executor async.
    pub async fn hash_password(password: &str) -> Result<String, AppError> {
        let password = password.to_owned();
        let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {e}"))??;
        Ok(hashed)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password = password.to_owned();
        let password_hash = user.password_hash.clone();
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password, &password_hash))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {e}"))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AppError::AccountDisabled);
        }

        // Uma empresa desativada bloqueia todos os seus usuários,
        // exceto super admins, que não pertencem a empresa alguma.
        if user.role != UserRole::SuperAdmin {
            if let Some(company_id) = user.company_id {
                let company = self
                    .company_repo
                    .find_by_id(company_id)
                    .await?
                    .ok_or(AppError::CompanyNotFound)?;
                if !company.is_active {
                    return Err(AppError::CompanyDisabled);
                }
            }
        }

        let token = issue_token(&user, &self.jwt_secret)?;
        Ok((user, token))
    }

    // Bootstrap: cria o primeiro super admin; fecha assim que um existir.
    pub async fn register_super_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        if self.user_repo.any_super_admin().await? {
            return Err(AppError::BootstrapClosed);
        }

        let password_hash = Self::hash_password(password).await?;
        self.user_repo
            .create_user(
                &self.pool,
                None,
                name,
                email,
                &password_hash,
                UserRole::SuperAdmin,
                None,
                true,
            )
            .await
    }

    // Registro público: empresa + primeiro admin, na mesma transação.
    // Se a criação do admin falhar, a empresa é desfeita no rollback.
    pub async fn register_company(
        &self,
        company_name: &str,
        company_email: &str,
        company_phone: Option<&str>,
        company_address: Option<&str>,
        admin_name: &str,
        admin_email: &str,
        admin_password: &str,
    ) -> Result<(Company, User, String), AppError> {
        // O hashing fica fora da transação (não toca no banco)
        let password_hash = Self::hash_password(admin_password).await?;

        let mut tx = self.pool.begin().await?;

        let company = self
            .company_repo
            .create_company(
                &mut *tx,
                company_name,
                company_email,
                company_phone,
                company_address,
                None,
                true,
            )
            .await?;

        let admin = self
            .user_repo
            .create_user(
                &mut *tx,
                Some(company.id),
                admin_name,
                admin_email,
                &password_hash,
                UserRole::AdminEntreprise,
                None,
                true,
            )
            .await?;

        tx.commit().await?;

        // O admin já sai logado
        let token = issue_token(&admin, &self.jwt_secret)?;
        Ok((company, admin, token))
    }

    // Valida o token e relê o usuário do banco: uma conta desativada
    // perde a sessão imediatamente, mesmo com token ainda válido.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = decode_claims(token, &self.jwt_secret)?;

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !user.is_active {
            return Err(AppError::AccountDisabled);
        }

        Ok(user)
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AppError> {
        issue_token(user, &self.jwt_secret)
    }

    // Semeia um super admin a partir do ambiente (idempotente).
    pub async fn ensure_super_admin(&self, email: &str, password: &str) -> Result<(), AppError> {
        if self.user_repo.any_super_admin().await? {
            tracing::info!("Super admin já existe; seed ignorado.");
            return Ok(());
        }

        let password_hash = Self::hash_password(password).await?;
        self.user_repo
            .create_user(
                &self.pool,
                None,
                "Super Admin",
                email,
                &password_hash,
                UserRole::SuperAdmin,
                None,
                true,
            )
            .await?;

        tracing::info!("✅ Super admin semeado: {email}");
        Ok(())
    }
}

fn issue_token(user: &User, jwt_secret: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::days(SESSION_TTL_DAYS);

    let claims = Claims {
        sub: user.id,
        company_id: user.company_id,
        role: user.role,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )?)
}

// Qualquer falha de decodificação (assinatura, expiração, formato) vira
// o mesmo 401, sem vazar o motivo.
fn decode_claims(token: &str, jwt_secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::InvalidSession)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            company_id: Some(Uuid::new_v4()),
            name: "Maria".into(),
            email: "maria@example.com".into(),
            password_hash: "irrelevante".into(),
            role: UserRole::AdminEntreprise,
            avatar: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn token_round_trip_preserves_claims() {
        let user = sample_user();
        let token = issue_token(&user, "segredo-de-teste").unwrap();
        let claims = decode_claims(&token, "segredo-de-teste").unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.company_id, user.company_id);
        assert_eq!(claims.role, UserRole::AdminEntreprise);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let user = sample_user();
        let token = issue_token(&user, "segredo-a").unwrap();
        assert!(matches!(
            decode_claims(&token, "segredo-b"),
            Err(AppError::InvalidSession)
        ));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(
            decode_claims("nao.e.jwt", "segredo"),
            Err(AppError::InvalidSession)
        ));
    }

    #[tokio::test]
    async fn password_hash_verifies() {
        let hashed = AuthService::hash_password("s3nh4-f0rte").await.unwrap();
        assert!(bcrypt::verify("s3nh4-f0rte", &hashed).unwrap());
        assert!(!bcrypt::verify("outra-senha", &hashed).unwrap());
    }
}
