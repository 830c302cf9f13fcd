//! Data access for to-do items.
//!
//! `TodoItemRepository` is the seam between the service and storage; the
//! only production implementation is [`SqliteTodoRepository`].

use async_trait::async_trait;
use thiserror::Error;
use todo_core::{ItemPage, NewTodoItem, TodoItem, UpdateItemInput};

pub mod sqlite;

pub use sqlite::SqliteTodoRepository;

/// Storage errors. Driver messages are kept verbatim so they can be
/// reported to the client unchanged.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("todo item {0} not found")]
    NotFound(i64),
    #[error("update requires at least one field")]
    EmptyUpdate,
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoItemRepository: Send + Sync {
    /// Insert an item and return the id the store assigned.
    async fn create(&self, item: NewTodoItem) -> StoreResult<i64>;

    /// Every item, in insertion order.
    async fn get_all(&self) -> StoreResult<Vec<TodoItem>>;

    async fn get_by_id(&self, id: i64) -> StoreResult<TodoItem>;

    /// Hard delete. A missing id affects zero rows and is not an error.
    async fn delete(&self, id: i64) -> StoreResult<()>;

    /// Write only the fields present in `input`.
    async fn update(&self, id: i64, input: UpdateItemInput) -> StoreResult<()>;

    async fn get_done_items(&self, page: ItemPage) -> StoreResult<Vec<TodoItem>>;

    async fn get_undone_items(&self, page: ItemPage) -> StoreResult<Vec<TodoItem>>;
}
