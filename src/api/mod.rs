//! API handlers for the book inventory REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::CorsConfig, AppState};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    let routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/:id", put(books::update_book).delete(books::delete_book))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(openapi::create_openapi_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE]);

    // Credentials cannot be combined with a wildcard origin
    if config.allowed_origin == "*" {
        return layer.allow_origin(Any);
    }

    match config.allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin).allow_credentials(true),
        Err(_) => {
            tracing::warn!(
                "Ignoring invalid CORS origin {:?}, cross-origin requests will be refused",
                config.allowed_origin
            );
            layer
        }
    }
}
