//! Repository layer for database operations

pub mod books;
pub mod postgres;
pub mod query;
pub mod users;

use async_trait::async_trait;
use sqlx::{postgres::PgRow, FromRow, Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, PageRequest, User},
};

pub use postgres::PgStore;
pub use query::{Fields, SqlValue};

/// How an entity maps onto its table
pub trait Record: for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static {
    /// Table name
    const TABLE: &'static str;
    /// Human readable name used in messages ("User")
    const LABEL: &'static str;
    /// Key under which pages of this record are serialized ("users")
    const COLLECTION: &'static str;
    /// Column carrying the alternate unique key
    const KEY_COLUMN: &'static str;
    /// Columns matched by keyword search
    const SEARCH_COLUMNS: &'static [&'static str];

    fn id(&self) -> i32;

    /// Current value of the unique key column
    fn key(&self) -> Option<&str>;
}

/// Data access over one entity's table
#[async_trait]
pub trait Store<E: Record>: Send + Sync {
    /// A page of records, newest first, and the total matching `filter`
    async fn list(&self, page: PageRequest, filter: Fields) -> AppResult<(Vec<E>, i64)>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<E>>;

    async fn find_by_key(&self, key: &str) -> AppResult<Option<E>>;

    /// Case-insensitive substring match over [`Record::SEARCH_COLUMNS`]
    async fn search(&self, keyword: &str, page: PageRequest) -> AppResult<(Vec<E>, i64)>;

    /// Insert and read the stored row back
    async fn create(&self, fields: Fields) -> AppResult<E>;

    /// Apply only the given fields; with no fields this is a plain lookup
    async fn update(&self, id: i32, fields: Fields) -> AppResult<Option<E>>;

    /// Whether a row was actually removed
    async fn delete(&self, id: i32) -> AppResult<bool>;

    async fn ping(&self) -> AppResult<()>;
}

/// Book-only operations
#[async_trait]
pub trait BookStore: Store<Book> {
    /// Distinct non-null categories, sorted
    async fn categories(&self) -> AppResult<Vec<String>>;

    async fn update_stock(&self, id: i32, quantity: i32) -> AppResult<Option<Book>>;
}

/// Postgres-backed stores sharing one connection pool
#[derive(Clone)]
pub struct Repository {
    pub users: PgStore<User>,
    pub books: PgStore<Book>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: PgStore::new(pool.clone()),
            books: PgStore::new(pool),
        }
    }
}
