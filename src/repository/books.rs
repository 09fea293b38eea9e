//! Books table mapping and book-only queries

use async_trait::async_trait;

use super::{BookStore, Fields, PgStore, Record, Store};
use crate::{error::AppResult, models::Book};

impl Record for Book {
    const TABLE: &'static str = "books";
    const LABEL: &'static str = "Book";
    const COLLECTION: &'static str = "books";
    const KEY_COLUMN: &'static str = "isbn";
    const SEARCH_COLUMNS: &'static [&'static str] = &["title", "author", "description"];

    fn id(&self) -> i32 {
        self.id
    }

    fn key(&self) -> Option<&str> {
        self.isbn.as_deref()
    }
}

#[async_trait]
impl BookStore for PgStore<Book> {
    async fn categories(&self) -> AppResult<Vec<String>> {
        let categories = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT category FROM books WHERE category IS NOT NULL ORDER BY category",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(categories)
    }

    async fn update_stock(&self, id: i32, quantity: i32) -> AppResult<Option<Book>> {
        self.update(id, Fields::new().with("stock_quantity", quantity))
            .await
    }
}
