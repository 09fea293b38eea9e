//! Book model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::repository::Fields;

/// Stored book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    /// Unique when present
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub publish_date: Option<NaiveDate>,
    pub stock_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create book request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub description: Option<String>,
    /// Accepts a JSON number or a numeric string
    pub price: Option<Decimal>,
    #[validate(url(message = "Invalid image URL format"))]
    pub image_url: Option<String>,
    pub category: Option<String>,
    /// `YYYY-MM-DD`
    pub publish_date: Option<NaiveDate>,
    #[validate(range(min = 0, message = "Stock quantity must be a non-negative integer"))]
    pub stock_quantity: Option<i32>,
}

impl CreateBook {
    /// Blank optional strings are stored as NULL.
    pub fn normalized(mut self) -> Self {
        self.isbn = non_blank(self.isbn);
        self.description = non_blank(self.description);
        self.image_url = non_blank(self.image_url);
        self.category = non_blank(self.category);
        self
    }

    /// Title, author and price, if all are present
    pub fn required(&self) -> Option<(&str, &str, Decimal)> {
        let title = self.title.as_deref().filter(|s| !s.trim().is_empty())?;
        let author = self.author.as_deref().filter(|s| !s.trim().is_empty())?;
        Some((title, author, self.price?))
    }

    pub fn to_fields(&self) -> Fields {
        Fields::new()
            .with("title", self.title.clone())
            .with("author", self.author.clone())
            .with("isbn", self.isbn.clone())
            .with("description", self.description.clone())
            .with("price", self.price)
            .with("image_url", self.image_url.clone())
            .with("category", self.category.clone())
            .with("publish_date", self.publish_date)
            .with("stock_quantity", self.stock_quantity.unwrap_or(0))
    }
}

/// Update book request.
///
/// Absent keys are left untouched. For the nullable columns an explicit
/// `null` clears the stored value.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub isbn: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    #[validate(url(message = "Invalid image URL format"))]
    pub image_url: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub category: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub publish_date: Option<Option<NaiveDate>>,
    #[validate(range(min = 0, message = "Stock quantity must be a non-negative integer"))]
    pub stock_quantity: Option<i32>,
}

impl UpdateBook {
    /// A blank optional string clears the column.
    pub fn normalized(mut self) -> Self {
        self.isbn = self.isbn.map(non_blank);
        self.description = self.description.map(non_blank);
        self.image_url = self.image_url.map(non_blank);
        self.category = self.category.map(non_blank);
        self
    }

    /// The new ISBN, when the request sets one
    pub fn new_isbn(&self) -> Option<&str> {
        self.isbn.as_ref().and_then(|isbn| isbn.as_deref())
    }

    pub fn to_fields(&self) -> Fields {
        Fields::new()
            .with_opt("title", self.title.clone())
            .with_opt("author", self.author.clone())
            .with_opt("isbn", self.isbn.clone())
            .with_opt("description", self.description.clone())
            .with_opt("price", self.price)
            .with_opt("image_url", self.image_url.clone())
            .with_opt("category", self.category.clone())
            .with_opt("publish_date", self.publish_date)
            .with_opt("stock_quantity", self.stock_quantity)
    }
}

/// Stock update request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StockUpdate {
    pub stock_quantity: Option<i32>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
