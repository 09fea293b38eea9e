//! Business logic services

pub mod books;
pub mod resource;
pub mod users;

use std::sync::Arc;

use crate::{
    models::User,
    repository::{BookStore, Repository, Store},
};

pub use books::BooksService;
pub use resource::ResourceService;
pub use users::UsersService;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: UsersService,
    pub books: BooksService,
}

impl Services {
    /// Create services over arbitrary stores
    pub fn new(users: Arc<dyn Store<User>>, books: Arc<dyn BookStore>) -> Self {
        Self {
            users: ResourceService::new(users),
            books: ResourceService::new(books),
        }
    }

    /// Create services backed by the PostgreSQL repository
    pub fn from_repository(repository: Repository) -> Self {
        Self::new(Arc::new(repository.users), Arc::new(repository.books))
    }
}
