use axum::{http::Method, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod bookings;
pub mod error;
pub mod events;
pub mod notices;
pub mod sessions;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT]);

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(events::routes())
        .merge(sessions::routes())
        .merge(notices::routes())
        .merge(bookings::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
