use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::debug;

use todo_core::{ItemPage, NewTodoItem, TodoItem, UpdateItemInput};

use super::{StoreError, StoreResult, TodoItemRepository};

const SELECT_ITEMS: &str = "SELECT id, title, description, date, is_done FROM todo_items";

pub struct SqliteTodoRepository {
    pool: SqlitePool,
}

impl SqliteTodoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_item(row: &SqliteRow) -> StoreResult<TodoItem> {
        Ok(TodoItem {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            date: row.try_get("date")?,
            is_done: row.try_get("is_done")?,
        })
    }

    async fn list_by_status(&self, is_done: bool, page: ItemPage) -> StoreResult<Vec<TodoItem>> {
        debug!(
            "Listing items (is_done: {}, date: {:?}, limit: {}, offset: {})",
            is_done, page.date, page.limit, page.offset
        );

        let mut query = QueryBuilder::<Sqlite>::new(SELECT_ITEMS);
        query.push(" WHERE is_done = ");
        query.push_bind(is_done);
        if let Some(date) = page.date {
            query.push(" AND date(date) = ");
            query.push_bind(date);
        }
        query.push(" ORDER BY julianday(date), id LIMIT ");
        query.push_bind(page.limit);
        query.push(" OFFSET ");
        query.push_bind(page.offset);

        let rows = query.build().fetch_all(&self.pool).await?;
        rows.iter().map(Self::row_to_item).collect()
    }
}

/// Build `UPDATE todo_items SET ... WHERE id = ?` with one bound assignment
/// per present field, in the order title, description, is_done, date.
/// Column names are literals; every value goes through `push_bind`.
pub(crate) fn update_query(
    id: i64,
    input: &UpdateItemInput,
) -> StoreResult<QueryBuilder<'static, Sqlite>> {
    if input.is_empty() {
        return Err(StoreError::EmptyUpdate);
    }

    let mut query = QueryBuilder::new("UPDATE todo_items SET ");
    {
        let mut assignments = query.separated(", ");
        if let Some(title) = &input.title {
            assignments.push("title = ");
            assignments.push_bind_unseparated(title.clone());
        }
        if let Some(description) = &input.description {
            assignments.push("description = ");
            assignments.push_bind_unseparated(description.clone());
        }
        if let Some(is_done) = input.is_done {
            assignments.push("is_done = ");
            assignments.push_bind_unseparated(is_done);
        }
        if let Some(date) = input.date {
            assignments.push("date = ");
            assignments.push_bind_unseparated(date);
        }
    }
    query.push(" WHERE id = ");
    query.push_bind(id);

    Ok(query)
}

#[async_trait]
impl TodoItemRepository for SqliteTodoRepository {
    async fn create(&self, item: NewTodoItem) -> StoreResult<i64> {
        debug!("Creating item: {}", item.title);

        let result = sqlx::query(
            r#"
            INSERT INTO todo_items (title, description, date, is_done)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.date)
        .bind(item.is_done)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get_all(&self) -> StoreResult<Vec<TodoItem>> {
        let rows = sqlx::query(&format!("{SELECT_ITEMS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_item).collect()
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<TodoItem> {
        debug!("Fetching item: {}", id);

        let row = sqlx::query(&format!("{SELECT_ITEMS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Self::row_to_item(&row),
            None => Err(StoreError::NotFound(id)),
        }
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM todo_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!("Deleted item {} ({} rows)", id, result.rows_affected());
        Ok(())
    }

    async fn update(&self, id: i64, input: UpdateItemInput) -> StoreResult<()> {
        let mut query = update_query(id, &input)?;
        debug!(sql = query.sql(), ?input, "Updating item {}", id);

        let result = query.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn get_done_items(&self, page: ItemPage) -> StoreResult<Vec<TodoItem>> {
        self.list_by_status(true, page).await
    }

    async fn get_undone_items(&self, page: ItemPage) -> StoreResult<Vec<TodoItem>> {
        self.list_by_status(false, page).await
    }
}
