//! HTTP service for managing to-do items.
//!
//! Requests flow handler → [`TodoService`] → [`TodoItemRepository`] → SQLite
//! and back. `app` builds the router around any repository implementation,
//! which is how the tests swap in a mock.

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod repository;
pub mod service;

pub use config::Config;
pub use error::{AppError, ValidationError};
pub use repository::{SqliteTodoRepository, StoreError, TodoItemRepository};
pub use service::TodoService;

pub fn app(service: TodoService) -> Router {
    Router::new()
        .route(
            "/api/todo",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route("/api/todo/done", get(handlers::list_done_items))
        .route("/api/todo/undone", get(handlers::list_undone_items))
        .route(
            "/api/todo/{id}",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

pub async fn run(listener: TcpListener, service: TodoService) -> Result<(), std::io::Error> {
    axum::serve(listener, app(service)).await
}
