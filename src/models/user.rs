//! User model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::repository::Fields;

/// Stored user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: String,
    /// Unique across all users
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create user request
///
/// Both fields are required; they are optional here so that a missing field
/// yields the same validation message as a blank one.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

impl CreateUser {
    /// Name and email, if both are present and non-blank
    pub fn required(&self) -> Option<(&str, &str)> {
        let name = self.name.as_deref().filter(|s| !s.trim().is_empty())?;
        let email = self.email.as_deref().filter(|s| !s.trim().is_empty())?;
        Some((name, email))
    }

    pub fn to_fields(&self) -> Fields {
        Fields::new()
            .with("name", self.name.clone())
            .with("email", self.email.clone())
    }
}

/// Update user request; absent fields are left untouched
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

impl UpdateUser {
    pub fn to_fields(&self) -> Fields {
        Fields::new()
            .with_opt("name", self.name.clone())
            .with_opt("email", self.email.clone())
    }
}
