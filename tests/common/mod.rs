//! In-memory stores and request helpers for router tests
#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicI32, AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use bookstore_api::{
    api,
    error::AppResult,
    models::{Book, PageRequest, User},
    repository::{BookStore, Fields, Record, SqlValue, Store},
    services::Services,
    AppConfig, AppState,
};

fn text(value: &SqlValue) -> Option<String> {
    match value {
        SqlValue::Text(v) => v.clone(),
        SqlValue::Int(v) => v.map(|v| v.to_string()),
        SqlValue::Decimal(v) => v.map(|v| v.to_string()),
        SqlValue::Date(v) => v.map(|v| v.to_string()),
    }
}

fn decimal(value: &SqlValue) -> Option<Decimal> {
    match value {
        SqlValue::Decimal(v) => *v,
        _ => None,
    }
}

fn int(value: &SqlValue) -> Option<i32> {
    match value {
        SqlValue::Int(v) => *v,
        _ => None,
    }
}

fn date(value: &SqlValue) -> Option<NaiveDate> {
    match value {
        SqlValue::Date(v) => *v,
        _ => None,
    }
}

/// What the in-memory store needs to know about a record
pub trait MemoryRecord: Record + Clone {
    fn build(id: i32, fields: &Fields, now: DateTime<Utc>) -> Self;

    fn apply(&mut self, column: &str, value: &SqlValue);

    fn touch(&mut self, now: DateTime<Utc>);

    fn column(&self, name: &str) -> Option<String>;
}

impl MemoryRecord for User {
    fn build(id: i32, fields: &Fields, now: DateTime<Utc>) -> Self {
        let mut user = User {
            id,
            name: String::new(),
            email: String::new(),
            created_at: now,
            updated_at: now,
        };
        for (column, value) in fields.iter() {
            user.apply(column, value);
        }
        user
    }

    fn apply(&mut self, column: &str, value: &SqlValue) {
        match column {
            "name" => self.name = text(value).unwrap_or_default(),
            "email" => self.email = text(value).unwrap_or_default(),
            other => panic!("unknown users column {}", other),
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn column(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            "email" => Some(self.email.clone()),
            _ => None,
        }
    }
}

impl MemoryRecord for Book {
    fn build(id: i32, fields: &Fields, now: DateTime<Utc>) -> Self {
        let mut book = Book {
            id,
            title: String::new(),
            author: String::new(),
            isbn: None,
            description: None,
            price: Decimal::ZERO,
            image_url: None,
            category: None,
            publish_date: None,
            stock_quantity: 0,
            created_at: now,
            updated_at: now,
        };
        for (column, value) in fields.iter() {
            book.apply(column, value);
        }
        book
    }

    fn apply(&mut self, column: &str, value: &SqlValue) {
        match column {
            "title" => self.title = text(value).unwrap_or_default(),
            "author" => self.author = text(value).unwrap_or_default(),
            "isbn" => self.isbn = text(value),
            "description" => self.description = text(value),
            "price" => self.price = decimal(value).unwrap_or_default(),
            "image_url" => self.image_url = text(value),
            "category" => self.category = text(value),
            "publish_date" => self.publish_date = date(value),
            "stock_quantity" => self.stock_quantity = int(value).unwrap_or_default(),
            other => panic!("unknown books column {}", other),
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn column(&self, name: &str) -> Option<String> {
        match name {
            "title" => Some(self.title.clone()),
            "author" => Some(self.author.clone()),
            "isbn" => self.isbn.clone(),
            "description" => self.description.clone(),
            "category" => self.category.clone(),
            _ => None,
        }
    }
}

/// A [`Store`] over a vector, in insertion order
pub struct MemoryStore<E> {
    rows: Mutex<Vec<E>>,
    next_id: AtomicI32,
    writes: AtomicUsize,
}

impl<E: MemoryRecord> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of insert/update/delete statements that reached the store
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn page(&self, matches: impl Fn(&E) -> bool, page: PageRequest) -> (Vec<E>, i64) {
        let rows = self.rows.lock().unwrap();
        let matching: Vec<E> = rows.iter().rev().filter(|row| matches(row)).cloned().collect();
        let total = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        (items, total)
    }
}

#[async_trait]
impl<E: MemoryRecord> Store<E> for MemoryStore<E> {
    async fn list(&self, page: PageRequest, filter: Fields) -> AppResult<(Vec<E>, i64)> {
        Ok(self.page(
            |row| {
                filter
                    .iter()
                    .all(|(column, value)| row.column(column) == text(value))
            },
            page,
        ))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<E>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|row| row.id() == id).cloned())
    }

    async fn find_by_key(&self, key: &str) -> AppResult<Option<E>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|row| row.key() == Some(key)).cloned())
    }

    async fn search(&self, keyword: &str, page: PageRequest) -> AppResult<(Vec<E>, i64)> {
        let needle = keyword.to_lowercase();
        Ok(self.page(
            |row| {
                E::SEARCH_COLUMNS.iter().any(|column| {
                    row.column(column)
                        .is_some_and(|value| value.to_lowercase().contains(&needle))
                })
            },
            page,
        ))
    }

    async fn create(&self, fields: Fields) -> AppResult<E> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = E::build(id, &fields, Utc::now());
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, fields: Fields) -> AppResult<Option<E>> {
        if fields.is_empty() {
            return self.find_by_id(id).await;
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|row| row.id() == id).map(|row| {
            for (column, value) in fields.iter() {
                row.apply(column, value);
            }
            row.touch(Utc::now());
            row.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        Ok(rows.len() < before)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl BookStore for MemoryStore<Book> {
    async fn categories(&self) -> AppResult<Vec<String>> {
        let rows = self.rows.lock().unwrap();
        let mut categories: Vec<String> = rows.iter().filter_map(|b| b.category.clone()).collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn update_stock(&self, id: i32, quantity: i32) -> AppResult<Option<Book>> {
        self.update(id, Fields::new().with("stock_quantity", quantity))
            .await
    }
}

pub struct TestApp {
    pub router: Router,
    pub users: Arc<MemoryStore<User>>,
    pub books: Arc<MemoryStore<Book>>,
}

impl TestApp {
    pub fn new() -> Self {
        let users = Arc::new(MemoryStore::<User>::new());
        let books = Arc::new(MemoryStore::<Book>::new());

        let state = AppState {
            config: Arc::new(AppConfig::default()),
            services: Arc::new(Services::new(users.clone(), books.clone())),
        };

        Self {
            router: api::create_router(state),
            users,
            books,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = body.map(|json| json.to_string());
        self.request_raw(method, uri, body.as_deref()).await
    }

    pub async fn request_raw(&self, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(text) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(text.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}
