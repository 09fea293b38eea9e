//! Data models

pub mod book;
pub mod pagination;
pub mod user;

// Re-export commonly used types
pub use book::{Book, CreateBook, StockUpdate, UpdateBook};
pub use pagination::{ListQuery, PageRequest, Paginated, Pagination, SearchQuery};
pub use user::{CreateUser, UpdateUser, User};
