use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::auth::{hash_password, verify_password, AuthService};
use crate::entities::{user, User, UserModel};
use crate::errors::ServiceError;

/// Result of a successful login or registration.
#[derive(Debug)]
pub struct AuthenticatedSession {
    pub user: UserModel,
    pub token: String,
}

/// Account management and credential checks.
#[derive(Clone)]
pub struct UserService {
    db: Arc<DatabaseConnection>,
    auth: AuthService,
}

impl UserService {
    pub fn new(db: Arc<DatabaseConnection>, auth: AuthService) -> Self {
        Self { db, auth }
    }

    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        email: String,
        password: String,
        name: String,
        is_admin: bool,
    ) -> Result<UserModel, ServiceError> {
        let email = email.trim().to_ascii_lowercase();
        if User::find()
            .filter(user::Column::Email.eq(&email))
            .one(&*self.db)
            .await?
            .is_some()
        {
            return Err(ServiceError::AlreadyExists(format!(
                "User {} already exists",
                email
            )));
        }

        let password_hash = hash_password(&password)?;
        let model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password_hash: Set(password_hash),
            name: Set(name),
            is_admin: Set(is_admin),
            active: Set(true),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };

        let created = model.insert(&*self.db).await?;
        info!("Registered user: {}", created.id);
        Ok(created)
    }

    /// Verifies credentials and issues an access token. The same error is
    /// returned for unknown emails and bad passwords.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, ServiceError> {
        let email = email.trim().to_ascii_lowercase();
        let user = User::find()
            .filter(user::Column::Email.eq(&email))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("Invalid credentials".to_string()))?;

        if !user.active {
            return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
        }
        if !verify_password(password, &user.password_hash)? {
            return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = self.auth.generate_token(&user)?;
        info!("User logged in: {}", user.id);
        Ok(AuthenticatedSession { user, token })
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<UserModel, ServiceError> {
        User::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", id)))
    }

    /// Seeds the first admin account when the users table is empty.
    #[instrument(skip(self, password))]
    pub async fn bootstrap_admin(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<(), ServiceError> {
        let count = User::find().count(&*self.db).await?;
        if count > 0 {
            return Ok(());
        }

        let (Some(email), Some(password)) = (email, password) else {
            warn!("No users exist and no bootstrap admin credentials are configured");
            return Ok(());
        };

        self.register(email.to_string(), password.to_string(), "Admin".to_string(), true)
            .await?;
        info!("Bootstrap admin account created");
        Ok(())
    }
}
