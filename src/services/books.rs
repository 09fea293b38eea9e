//! Book catalog service

use rust_decimal::Decimal;
use validator::Validate;

use super::resource::ResourceService;
use crate::{
    error::{AppError, AppResult},
    models::{Book, CreateBook, StockUpdate, UpdateBook},
    repository::BookStore,
};

pub type BooksService = ResourceService<Book, dyn BookStore>;

fn check_price(price: Decimal) -> AppResult<()> {
    if price < Decimal::ZERO {
        return Err(AppError::Validation(
            "Price must be a valid non-negative number".to_string(),
        ));
    }
    Ok(())
}

fn check_not_blank(value: Option<&str>, message: &str) -> AppResult<()> {
    if value.is_some_and(|v| v.trim().is_empty()) {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(())
}

impl ResourceService<Book, dyn BookStore> {
    /// Create a book. All validation happens before anything is written.
    pub async fn create(&self, data: CreateBook) -> AppResult<Book> {
        let data = data.normalized();
        let (_, _, price) = data.required().ok_or_else(|| {
            AppError::Validation("Title, author and price are required".to_string())
        })?;
        check_price(price)?;
        data.validate()?;

        if let Some(isbn) = data.isbn.as_deref() {
            self.ensure_key_available(isbn, None, "ISBN already exists")
                .await?;
        }

        let book = self.store().create(data.to_fields()).await?;
        tracing::info!(book_id = book.id, "book created");
        Ok(book)
    }

    /// Apply a partial update to an existing book
    pub async fn update(&self, id: i32, data: UpdateBook) -> AppResult<Book> {
        let existing = self.get(id).await?;
        let data = data.normalized();

        if let Some(price) = data.price {
            check_price(price)?;
        }
        check_not_blank(data.title.as_deref(), "Title cannot be empty")?;
        check_not_blank(data.author.as_deref(), "Author cannot be empty")?;
        data.validate()?;

        if let Some(isbn) = data.new_isbn() {
            if existing.isbn.as_deref() != Some(isbn) {
                self.ensure_key_available(isbn, Some(id), "ISBN is already used by another book")
                    .await?;
            }
        }

        self.store()
            .update(id, data.to_fields())
            .await?
            .ok_or_else(Self::not_found)
    }

    pub async fn categories(&self) -> AppResult<Vec<String>> {
        self.store().categories().await
    }

    /// Set the stock quantity of an existing book
    pub async fn update_stock(&self, id: i32, data: StockUpdate) -> AppResult<Book> {
        let quantity = data.stock_quantity.filter(|q| *q >= 0).ok_or_else(|| {
            AppError::Validation("Stock quantity must be a non-negative integer".to_string())
        })?;

        self.get(id).await?;

        self.store()
            .update_stock(id, quantity)
            .await?
            .ok_or_else(Self::not_found)
    }
}
