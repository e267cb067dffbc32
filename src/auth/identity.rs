use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    auth::{JwtService, Principal},
    errors::{AppError, AppResult},
    models::domain::{Credential, UserRole},
    repositories::CredentialRepository,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub uid: String,
    pub token: String,
}

/// Issues and verifies caller identities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the new account's uid. Duplicate emails are `AlreadyExists`.
    async fn create_account(&self, email: &str, password: &str, role: UserRole)
        -> AppResult<String>;
    async fn delete_account(&self, uid: &str) -> AppResult<()>;
    async fn set_role(&self, uid: &str, role: UserRole) -> AppResult<()>;
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session>;
    fn verify(&self, token: &str) -> AppResult<Principal>;
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::InternalError(format!("Stored password hash is invalid: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Credentials stored in the document database, sessions issued as JWTs.
pub struct JwtIdentityProvider {
    credentials: Arc<dyn CredentialRepository>,
    jwt: JwtService,
}

impl JwtIdentityProvider {
    pub fn new(credentials: Arc<dyn CredentialRepository>, jwt: JwtService) -> Self {
        Self { credentials, jwt }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> AppResult<String> {
        let email = email.trim().to_lowercase();
        if self.credentials.find_by_email(&email).await?.is_some() {
            return Err(AppError::AlreadyExists(
                "An account with this email already exists".to_string(),
            ));
        }

        let credential = Credential {
            uid: Uuid::new_v4().to_string(),
            email,
            password_hash: hash_password(password)?,
            role,
            disabled: false,
            created_at: Utc::now(),
        };

        let created = self.credentials.create(credential).await.map_err(|e| match e {
            AppError::AlreadyExists(_) => {
                AppError::AlreadyExists("An account with this email already exists".to_string())
            }
            other => other,
        })?;

        log::info!("Created identity account {}", created.uid);
        Ok(created.uid)
    }

    async fn delete_account(&self, uid: &str) -> AppResult<()> {
        self.credentials.delete(uid).await
    }

    async fn set_role(&self, uid: &str, role: UserRole) -> AppResult<()> {
        self.credentials.set_role(uid, role).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

        let credential = self
            .credentials
            .find_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or_else(invalid)?;

        if credential.disabled || !verify_password(password, &credential.password_hash)? {
            return Err(invalid());
        }

        let token = self
            .jwt
            .create_token(&credential.uid, &credential.email, credential.role)?;

        Ok(Session {
            uid: credential.uid,
            token,
        })
    }

    fn verify(&self, token: &str) -> AppResult<Principal> {
        self.jwt.validate_token(token).map(Principal::from)
    }
}
