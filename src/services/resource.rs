//! Behavior shared by every resource service

use std::{marker::PhantomData, sync::Arc};

use crate::{
    error::{AppError, AppResult},
    models::{PageRequest, Paginated},
    repository::{Fields, Record, Store},
};

/// Request-side logic over a [`Store`], specialized per resource in
/// `services::users` and `services::books`.
pub struct ResourceService<E: Record, S: ?Sized = dyn Store<E>> {
    store: Arc<S>,
    _record: PhantomData<fn() -> E>,
}

impl<E: Record, S: ?Sized> Clone for ResourceService<E, S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _record: PhantomData,
        }
    }
}

impl<E: Record, S: ?Sized + Store<E>> ResourceService<E, S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn not_found() -> AppError {
        AppError::NotFound(format!("{} not found", E::LABEL))
    }

    pub async fn list(&self, page: PageRequest, filter: Fields) -> AppResult<Paginated<E>> {
        let (items, total) = self.store.list(page, filter).await?;
        Ok(Paginated::new(items, page, total))
    }

    pub async fn search(&self, keyword: Option<&str>, page: PageRequest) -> AppResult<Paginated<E>> {
        let keyword = keyword
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AppError::Validation("Search keyword cannot be empty".to_string()))?;

        let (items, total) = self.store.search(keyword, page).await?;
        Ok(Paginated::new(items, page, total).with_keyword(keyword))
    }

    pub async fn get(&self, id: i32) -> AppResult<E> {
        self.store.find_by_id(id).await?.ok_or_else(Self::not_found)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.get(id).await?;

        // a concurrent delete between the lookup and here still reads as not found
        if !self.store.delete(id).await? {
            return Err(Self::not_found());
        }

        tracing::info!(table = E::TABLE, id, "record deleted");
        Ok(())
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }

    /// Fails with a conflict when `key` belongs to a record other than `owner`.
    pub(crate) async fn ensure_key_available(
        &self,
        key: &str,
        owner: Option<i32>,
        message: &str,
    ) -> AppResult<()> {
        match self.store.find_by_key(key).await? {
            Some(existing) if Some(existing.id()) != owner => {
                Err(AppError::Conflict(message.to_string()))
            }
            _ => Ok(()),
        }
    }
}
