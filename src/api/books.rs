//! Book catalog endpoints

use axum::extract::{Path, State};

use crate::{
    error::AppResult,
    models::{Book, CreateBook, ListQuery, Paginated, SearchQuery, StockUpdate, UpdateBook},
    repository::Fields,
};

use super::{parse_id, response::ApiResponse, ApiJson, ApiQuery};

/// List books with pagination and an optional category filter
#[utoipa::path(
    get,
    path = "/api/books",
    tag = "books",
    params(
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<i64>, Query, description = "Books per page (default: 10, max: 100)"),
        ("category" = Option<String>, Query, description = "Exact category to filter on")
    ),
    responses(
        (status = 200, description = "Page of books", body = [Book])
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> AppResult<ApiResponse<Paginated<Book>>> {
    let filter = Fields::new().with_opt(
        "category",
        query
            .category
            .clone()
            .filter(|category| !category.trim().is_empty()),
    );
    let page = state
        .services
        .books
        .list(query.page_request(), filter)
        .await?;
    Ok(ApiResponse::ok(page, "Books retrieved successfully"))
}

/// Search books by title, author or description
#[utoipa::path(
    get,
    path = "/api/books/search",
    tag = "books",
    params(
        ("keyword" = String, Query, description = "Case-insensitive substring of title, author or description"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<i64>, Query, description = "Books per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Matching books", body = [Book]),
        (status = 400, description = "Missing keyword")
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> AppResult<ApiResponse<Paginated<Book>>> {
    let page = state
        .services
        .books
        .search(query.keyword.as_deref(), query.page_request())
        .await?;
    Ok(ApiResponse::ok(page, "Books searched successfully"))
}

/// List the categories currently in use
#[utoipa::path(
    get,
    path = "/api/books/categories",
    tag = "books",
    responses(
        (status = 200, description = "Sorted distinct categories", body = [String])
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
) -> AppResult<ApiResponse<Vec<String>>> {
    let categories = state.services.books.categories().await?;
    Ok(ApiResponse::ok(categories, "Categories retrieved successfully"))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 400, description = "Invalid book ID"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Book>> {
    let id = parse_id::<Book>(&id)?;
    let book = state.services.books.get(id).await?;
    Ok(ApiResponse::ok(book, "Book retrieved successfully"))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/api/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input or ISBN already exists")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    ApiJson(data): ApiJson<CreateBook>,
) -> AppResult<ApiResponse<Book>> {
    let book = state.services.books.create(data).await?;
    Ok(ApiResponse::created(book, "Book created successfully"))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/api/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid input or ISBN already in use"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    ApiJson(data): ApiJson<UpdateBook>,
) -> AppResult<ApiResponse<Book>> {
    let id = parse_id::<Book>(&id)?;
    let book = state.services.books.update(id, data).await?;
    Ok(ApiResponse::ok(book, "Book updated successfully"))
}

/// Set a book's stock quantity
#[utoipa::path(
    patch,
    path = "/api/books/{id}/stock",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = StockUpdate,
    responses(
        (status = 200, description = "Stock updated", body = Book),
        (status = 400, description = "Invalid stock quantity"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_stock(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    ApiJson(data): ApiJson<StockUpdate>,
) -> AppResult<ApiResponse<Book>> {
    let id = parse_id::<Book>(&id)?;
    let book = state.services.books.update_stock(id, data).await?;
    Ok(ApiResponse::ok(book, "Stock updated successfully"))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    let id = parse_id::<Book>(&id)?;
    state.services.books.delete(id).await?;
    Ok(ApiResponse::message("Book deleted successfully"))
}
