use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::error::ApiError;
use crate::users::dto::{CreateUserRequest, UpdateUserRequest};
use crate::users::repo::UserStore;
use crate::users::repo_types::{NewUser, User, UserChanges};
use crate::users::validate;

/// Orchestrates validation, uniqueness checks, hashing and storage access.
/// The only entry point handlers use to touch user records.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn create_user(&self, req: CreateUserRequest) -> Result<User, ApiError> {
        let payload = validate::validate_create(req)?;

        // Defense in depth: the unique index still decides under races.
        if self.store.find_by_email(&payload.email).await?.is_some() {
            return Err(ApiError::EmailExists);
        }

        let password_hash = hash_password(&payload.password)?;
        let user = self
            .store
            .insert(NewUser {
                name: payload.name,
                email: payload.email,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, email = %user.email, "user created");
        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> Result<User, ApiError> {
        if id <= 0 {
            return Err(ApiError::UserNotFound(id));
        }
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ApiError::UserNotFound(id))
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.store.list_all().await?)
    }

    pub async fn update_user(&self, id: i64, req: UpdateUserRequest) -> Result<User, ApiError> {
        let user = self.get_user(id).await?;
        validate::validate_update(&req)?;

        if let Some(email) = &req.email {
            if let Some(existing) = self.store.find_by_email(email).await? {
                if existing.id != user.id {
                    return Err(ApiError::EmailExists);
                }
            }
        }

        let password_hash = match &req.password {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };
        let changes = UserChanges {
            name: req.name,
            email: req.email,
            password_hash,
        };
        if changes.is_empty() {
            return Ok(user);
        }

        let updated = self
            .store
            .update(id, changes)
            .await?
            .ok_or(ApiError::UserNotFound(id))?;

        info!(user_id = updated.id, email = %updated.email, "user updated");
        Ok(updated)
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        let user = self.get_user(id).await?;
        // The row can vanish between the lookup and the delete.
        if !self.store.delete(id).await? {
            return Err(ApiError::UserNotFound(id));
        }
        info!(user_id = user.id, email = %user.email, "user deleted");
        Ok(())
    }

    pub async fn search_users(&self, name: &str) -> Result<Vec<User>, ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.store.search_by_name(name).await?)
    }

    /// Identical error whether the email is unknown or the password wrong,
    /// so callers cannot probe which accounts exist.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, ApiError> {
        match self.store.find_by_email(email).await? {
            Some(user) if verify_password(password, &user.password_hash) => {
                info!(user_id = user.id, email = %user.email, "user authenticated");
                Ok(user)
            }
            _ => {
                warn!(email = %email, "authentication failed");
                Err(ApiError::AuthenticationFailed)
            }
        }
    }
}
