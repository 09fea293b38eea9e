//! User management endpoints

use axum::extract::{Path, State};

use crate::{
    error::AppResult,
    models::{CreateUser, ListQuery, Paginated, SearchQuery, UpdateUser, User},
    repository::Fields,
};

use super::{parse_id, response::ApiResponse, ApiJson, ApiQuery};

/// List users with pagination
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<i64>, Query, description = "Users per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Page of users", body = [User])
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> AppResult<ApiResponse<Paginated<User>>> {
    let page = state
        .services
        .users
        .list(query.page_request(), Fields::new())
        .await?;
    Ok(ApiResponse::ok(page, "Users retrieved successfully"))
}

/// Search users by name or email
#[utoipa::path(
    get,
    path = "/api/users/search",
    tag = "users",
    params(
        ("keyword" = String, Query, description = "Case-insensitive substring of name or email"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<i64>, Query, description = "Users per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Matching users", body = [User]),
        (status = 400, description = "Missing keyword")
    )
)]
pub async fn search_users(
    State(state): State<crate::AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> AppResult<ApiResponse<Paginated<User>>> {
    let page = state
        .services
        .users
        .search(query.keyword.as_deref(), query.page_request())
        .await?;
    Ok(ApiResponse::ok(page, "Users searched successfully"))
}

/// Get user details by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 400, description = "Invalid user ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<User>> {
    let id = parse_id::<User>(&id)?;
    let user = state.services.users.get(id).await?;
    Ok(ApiResponse::ok(user, "User retrieved successfully"))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid input or email already registered")
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    ApiJson(data): ApiJson<CreateUser>,
) -> AppResult<ApiResponse<User>> {
    let user = state.services.users.create(data).await?;
    Ok(ApiResponse::created(user, "User created successfully"))
}

/// Update an existing user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid input or email already in use"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    ApiJson(data): ApiJson<UpdateUser>,
) -> AppResult<ApiResponse<User>> {
    let id = parse_id::<User>(&id)?;
    let user = state.services.users.update(id, data).await?;
    Ok(ApiResponse::ok(user, "User updated successfully"))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    let id = parse_id::<User>(&id)?;
    state.services.users.delete(id).await?;
    Ok(ApiResponse::message("User deleted successfully"))
}
