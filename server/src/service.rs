//! Application layer between the HTTP handlers and the repository.
//!
//! `TodoService` adds no rules of its own: every call is forwarded to the
//! repository and its errors are returned unchanged. Handlers only ever see
//! this type, never the storage implementation behind it.

use std::sync::Arc;

use todo_core::{ItemPage, NewTodoItem, TodoItem, UpdateItemInput};

use crate::repository::{StoreResult, TodoItemRepository};

#[derive(Clone)]
pub struct TodoService {
    repo: Arc<dyn TodoItemRepository>,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoItemRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, item: NewTodoItem) -> StoreResult<i64> {
        self.repo.create(item).await
    }

    pub async fn get_all(&self) -> StoreResult<Vec<TodoItem>> {
        self.repo.get_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> StoreResult<TodoItem> {
        self.repo.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        self.repo.delete(id).await
    }

    pub async fn update(&self, id: i64, input: UpdateItemInput) -> StoreResult<()> {
        self.repo.update(id, input).await
    }

    pub async fn get_done_items(&self, page: ItemPage) -> StoreResult<Vec<TodoItem>> {
        self.repo.get_done_items(page).await
    }

    pub async fn get_undone_items(&self, page: ItemPage) -> StoreResult<Vec<TodoItem>> {
        self.repo.get_undone_items(page).await
    }
}
