//! User management service

use validator::Validate;

use super::resource::ResourceService;
use crate::{
    error::{AppError, AppResult},
    models::{CreateUser, UpdateUser, User},
};

pub type UsersService = ResourceService<User>;

impl ResourceService<User> {
    /// Create a user after checking required fields and email uniqueness
    pub async fn create(&self, data: CreateUser) -> AppResult<User> {
        let (_, email) = data
            .required()
            .ok_or_else(|| AppError::Validation("Name and email are required".to_string()))?;
        data.validate()?;

        self.ensure_key_available(email, None, "Email is already registered")
            .await?;

        let user = self.store().create(data.to_fields()).await?;
        tracing::info!(user_id = user.id, "user created");
        Ok(user)
    }

    /// Apply a partial update to an existing user
    pub async fn update(&self, id: i32, data: UpdateUser) -> AppResult<User> {
        let existing = self.get(id).await?;

        if data.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(AppError::Validation("Name cannot be empty".to_string()));
        }
        data.validate()?;

        if let Some(email) = data.email.as_deref() {
            if email != existing.email {
                self.ensure_key_available(email, Some(id), "Email is already used by another user")
                    .await?;
            }
        }

        self.store()
            .update(id, data.to_fields())
            .await?
            .ok_or_else(Self::not_found)
    }
}
