//! API handlers for the bookstore REST endpoints

pub mod books;
pub mod health;
pub mod openapi;
pub mod response;
pub mod users;

use axum::{
    extract::{rejection::QueryRejection, FromRequest, FromRequestParts},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, StatusCode, Uri,
    },
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use serde_json::json;
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::CorsConfig,
    error::{AppError, AppResult},
    repository::Record,
    AppState,
};

use self::response::Envelope;

/// JSON body extractor whose rejections render as an envelope
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor whose rejections render as an envelope
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(format!("Invalid query string: {}", rejection.body_text()))
    }
}

/// Parse a path identifier; non-numeric ids never reach the store.
pub fn parse_id<E: Record>(raw: &str) -> AppResult<i32> {
    raw.parse::<i32>()
        .map_err(|_| AppError::Validation(format!("Invalid {} ID", E::LABEL.to_lowercase())))
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/search", get(users::search_users))
        .route(
            "/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    let book_routes = Router::new()
        .route("/", get(books::list_books).post(books::create_book))
        .route("/search", get(books::search_books))
        .route("/categories", get(books::list_categories))
        .route(
            "/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route("/:id/stock", patch(books::update_stock));

    let api = Router::new()
        .route("/", get(health::welcome))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // nesting only registers the bare prefix for "/"
        .route("/api/users/", get(users::list_users).post(users::create_user))
        .route("/api/books/", get(books::list_books).post(books::create_book))
        .nest("/api/users", user_routes)
        .nest("/api/books", book_routes)
        .with_state(state);

    // method_not_allowed_fallback only reaches routes already added
    Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router())
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Serve `app` on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Fallback for unmatched routes and unsupported methods
pub async fn route_not_found(uri: Uri) -> impl IntoResponse {
    let body = Envelope {
        success: false,
        data: Some(json!({ "path": uri.to_string() })),
        message: "Route not found".to_string(),
    };
    (StatusCode::NOT_FOUND, Json(body))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}
