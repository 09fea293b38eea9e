//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookstore API",
        version = "0.1.0",
        description = "Users and books REST API. Every response is wrapped in \
                       {\"success\": bool, \"data\"?: any, \"message\": string}."
    ),
    paths(
        // Health
        health::welcome,
        health::health_check,
        health::readiness_check,
        // Users
        users::list_users,
        users::search_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Books
        books::list_books,
        books::search_books,
        books::list_categories,
        books::get_book,
        books::create_book,
        books::update_book,
        books::update_stock,
        books::delete_book,
    ),
    components(
        schemas(
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::book::StockUpdate,
            // Pagination
            crate::models::pagination::Pagination,
            // Health
            health::HealthResponse,
            health::WelcomeResponse,
        )
    ),
    tags(
        (name = "health", description = "Welcome and health check endpoints"),
        (name = "users", description = "User management"),
        (name = "books", description = "Book catalog management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
