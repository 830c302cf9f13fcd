//! HTTP handlers for `/api/todo`.
//!
//! Each handler validates the transport-level input (path id, JSON body,
//! query string), calls the matching `TodoService` operation and wraps the
//! result in the response envelope. Validation always happens before the
//! service is touched.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use todo_core::{
    CreatedId, DataEnvelope, ItemPage, NewTodoItem, StatusBody, TodoItem, UpdateItemInput,
};

use crate::error::{AppError, ValidationError};
use crate::service::TodoService;

type ApiResult<T> = Result<Json<T>, AppError>;

/// Raw query string of the done/undone listings. Kept as strings so each
/// parameter can be rejected with its own message.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub date: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl PageParams {
    /// Checked in the order limit, offset, date: a bad limit is reported no
    /// matter what else is wrong.
    pub fn into_page(self) -> Result<ItemPage, ValidationError> {
        let limit = self
            .limit
            .as_deref()
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|limit| *limit > 0)
            .ok_or(ValidationError::InvalidLimit)?;

        let offset = self
            .offset
            .as_deref()
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|offset| *offset >= 0)
            .ok_or(ValidationError::InvalidOffset)?;

        let date = match self.date.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| ValidationError::InvalidDate)?,
            ),
        };

        Ok(ItemPage {
            date,
            limit,
            offset,
        })
    }
}

/// A path that fails to extract (e.g. invalid UTF-8) is as unusable as one
/// that fails to parse.
fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<i64, ValidationError> {
    let Path(raw) = path.map_err(|_| ValidationError::InvalidId)?;
    raw.parse().map_err(|_| ValidationError::InvalidId)
}

/// A query string that cannot be deserialized at all (bad encoding,
/// repeated keys) is reported against its first-checked parameter.
fn parse_page(
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<ItemPage, ValidationError> {
    let Query(params) = query.map_err(|_| ValidationError::InvalidLimit)?;
    params.into_page()
}

pub async fn create_item(
    State(service): State<TodoService>,
    payload: Result<Json<NewTodoItem>, JsonRejection>,
) -> ApiResult<CreatedId> {
    let Json(item) = payload.map_err(|_| ValidationError::InvalidBody)?;
    if !item.has_title() {
        return Err(ValidationError::InvalidBody.into());
    }

    let id = service.create(item).await?;
    info!("Created todo item {}", id);
    Ok(Json(CreatedId { id }))
}

pub async fn list_items(
    State(service): State<TodoService>,
) -> ApiResult<DataEnvelope<Vec<TodoItem>>> {
    let items = service.get_all().await?;
    Ok(Json(DataEnvelope::new(items)))
}

pub async fn get_item(
    State(service): State<TodoService>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<DataEnvelope<TodoItem>> {
    let id = parse_id(path)?;
    let item = service.get_by_id(id).await?;
    Ok(Json(DataEnvelope::new(item)))
}

pub async fn update_item(
    State(service): State<TodoService>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateItemInput>, JsonRejection>,
) -> ApiResult<StatusBody> {
    let id = parse_id(path)?;
    let Json(input) =
        payload.map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()))?;
    if input.is_empty() {
        return Err(ValidationError::EmptyUpdate.into());
    }
    if input.has_blank_title() {
        return Err(ValidationError::BlankTitle.into());
    }

    service.update(id, input).await?;
    info!("Updated todo item {}", id);
    Ok(Json(StatusBody::ok()))
}

pub async fn delete_item(
    State(service): State<TodoService>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<StatusBody> {
    let Path(raw_id) =
        path.map_err(|rejection| ValidationError::UnparsableId(rejection.body_text()))?;
    let id = raw_id
        .parse::<i64>()
        .map_err(|e| ValidationError::UnparsableId(e.to_string()))?;

    service.delete(id).await?;
    info!("Deleted todo item {}", id);
    Ok(Json(StatusBody::ok()))
}

pub async fn list_done_items(
    State(service): State<TodoService>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<DataEnvelope<Vec<TodoItem>>> {
    let page = parse_page(query)?;
    let items = service.get_done_items(page).await?;
    Ok(Json(DataEnvelope::new(items)))
}

pub async fn list_undone_items(
    State(service): State<TodoService>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<DataEnvelope<Vec<TodoItem>>> {
    let page = parse_page(query)?;
    let items = service.get_undone_items(page).await?;
    Ok(Json(DataEnvelope::new(items)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{self, Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use http_body_util::BodyExt;
    use mockall::predicate::eq;
    use tower::ServiceExt;

    use super::*;
    use crate::app;
    use crate::repository::{MockTodoItemRepository, StoreError};

    fn router(repo: MockTodoItemRepository) -> axum::Router {
        app(TodoService::new(Arc::new(repo)))
    }

    async fn send(
        repo: MockTodoItemRepository,
        method: &str,
        uri: &str,
        body: &str,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router(repo).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn store_failure() -> StoreError {
        StoreError::Sqlx(sqlx::Error::Protocol("Something went wrong".to_string()))
    }

    #[test]
    fn page_params_reject_limit_first() {
        let params = PageParams {
            date: Some("not-a-date".to_string()),
            limit: Some("-1".to_string()),
            offset: Some("-5".to_string()),
        };
        assert_eq!(params.into_page(), Err(ValidationError::InvalidLimit));
    }

    #[test]
    fn page_params_require_limit_and_offset() {
        assert_eq!(
            PageParams::default().into_page(),
            Err(ValidationError::InvalidLimit)
        );
        let params = PageParams {
            limit: Some("3".to_string()),
            ..Default::default()
        };
        assert_eq!(params.into_page(), Err(ValidationError::InvalidOffset));
    }

    #[test]
    fn page_params_treat_empty_date_as_absent() {
        let params = PageParams {
            date: Some(String::new()),
            limit: Some("3".to_string()),
            offset: Some("0".to_string()),
        };
        assert_eq!(params.into_page(), Ok(ItemPage::new(3, 0)));
    }

    #[test]
    fn page_params_reject_bad_date() {
        let params = PageParams {
            date: Some("2024/01/01".to_string()),
            limit: Some("3".to_string()),
            offset: Some("0".to_string()),
        };
        assert_eq!(params.into_page(), Err(ValidationError::InvalidDate));
    }

    #[tokio::test]
    async fn create_passes_parsed_item_to_store() {
        let expected = NewTodoItem {
            title: "Test Task".to_string(),
            description: "Test Description".to_string(),
            date: Utc.with_ymd_and_hms(2024, 6, 5, 20, 0, 0).unwrap(),
            is_done: true,
        };
        let mut repo = MockTodoItemRepository::new();
        repo.expect_create()
            .with(eq(expected))
            .times(1)
            .returning(|_| Ok(1));

        let (status, body) = send(
            repo,
            "POST",
            "/api/todo",
            r#"{"title": "Test Task", "description": "Test Description", "date": "2024-06-05T20:00:00Z", "is_done": true}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"id": 1}));
    }

    #[tokio::test]
    async fn create_with_empty_body_never_reaches_store() {
        let (status, body) = send(MockTodoItemRepository::new(), "POST", "/api/todo", "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "Invalid input body"}));
    }

    #[tokio::test]
    async fn create_with_blank_title_never_reaches_store() {
        let (status, body) = send(
            MockTodoItemRepository::new(),
            "POST",
            "/api/todo",
            r#"{"title": "", "date": "2024-06-05T20:00:00Z"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid input body");
    }

    #[tokio::test]
    async fn create_store_error_is_500_with_message() {
        let mut repo = MockTodoItemRepository::new();
        repo.expect_create().returning(|_| Err(store_failure()));

        let (status, body) = send(
            repo,
            "POST",
            "/api/todo",
            r#"{"title": "Test Task", "date": "2024-06-05T20:00:00Z"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], store_failure().to_string());
    }

    #[tokio::test]
    async fn list_store_error_is_500() {
        let mut repo = MockTodoItemRepository::new();
        repo.expect_get_all().returning(|| Err(store_failure()));

        let (status, body) = send(repo, "GET", "/api/todo", "").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("Something went wrong"));
    }

    #[tokio::test]
    async fn get_with_non_integer_id_is_400() {
        let (status, body) = send(MockTodoItemRepository::new(), "GET", "/api/todo/abc", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "Invalid ID"}));
    }

    #[tokio::test]
    async fn get_with_undecodable_id_is_json_400() {
        let (status, body) = send(MockTodoItemRepository::new(), "GET", "/api/todo/%FF", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "Invalid ID"}));
    }

    #[tokio::test]
    async fn get_missing_item_is_404() {
        let mut repo = MockTodoItemRepository::new();
        repo.expect_get_by_id()
            .with(eq(9))
            .returning(|id| Err(StoreError::NotFound(id)));

        let (status, body) = send(repo, "GET", "/api/todo/9", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "todo item 9 not found");
    }

    #[tokio::test]
    async fn update_without_fields_never_reaches_store() {
        let (status, body) = send(MockTodoItemRepository::new(), "PUT", "/api/todo/1", "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({"error": "update requires at least one field"})
        );
    }

    #[tokio::test]
    async fn update_with_malformed_body_is_400() {
        let (status, body) = send(
            MockTodoItemRepository::new(),
            "PUT",
            "/api/todo/1",
            r#"{"is_done": "yes"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_with_blank_title_never_reaches_store() {
        let (status, body) = send(
            MockTodoItemRepository::new(),
            "PUT",
            "/api/todo/1",
            r#"{"title": "  ", "is_done": true}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "title must not be empty"}));
    }

    #[tokio::test]
    async fn update_forwards_only_present_fields() {
        let expected = UpdateItemInput {
            title: Some("New".to_string()),
            ..Default::default()
        };
        let mut repo = MockTodoItemRepository::new();
        repo.expect_update()
            .with(eq(4), eq(expected))
            .times(1)
            .returning(|_, _| Ok(()));

        let (status, body) = send(repo, "PUT", "/api/todo/4", r#"{"title": "New"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn delete_with_non_integer_id_reports_parse_error() {
        let (status, body) =
            send(MockTodoItemRepository::new(), "DELETE", "/api/todo/abc", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let expected = "abc".parse::<i64>().unwrap_err().to_string();
        assert_eq!(body["error"], expected);
    }

    #[tokio::test]
    async fn delete_with_undecodable_id_is_json_400() {
        let (status, body) =
            send(MockTodoItemRepository::new(), "DELETE", "/api/todo/%FF", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn done_forwards_parsed_page() {
        let expected = ItemPage::new(2, 4).on(chrono::NaiveDate::from_ymd_opt(2024, 6, 5).unwrap());
        let mut repo = MockTodoItemRepository::new();
        repo.expect_get_done_items()
            .with(eq(expected))
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let (status, body) = send(
            repo,
            "GET",
            "/api/todo/done?date=2024-06-05&limit=2&offset=4",
            "",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"data": []}));
    }

    #[tokio::test]
    async fn done_with_negative_limit_is_400() {
        let (status, body) = send(
            MockTodoItemRepository::new(),
            "GET",
            "/api/todo/done?date=bad&limit=-1&offset=0",
            "",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "Invalid limit"}));
    }

    #[tokio::test]
    async fn done_with_repeated_limit_is_400() {
        let (status, body) = send(
            MockTodoItemRepository::new(),
            "GET",
            "/api/todo/done?limit=1&limit=2&offset=0",
            "",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "Invalid limit"}));
    }

    #[tokio::test]
    async fn undone_with_negative_offset_is_400() {
        let (status, body) = send(
            MockTodoItemRepository::new(),
            "GET",
            "/api/todo/undone?limit=1&offset=-1",
            "",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "Invalid offset"}));
    }

    #[tokio::test]
    async fn undone_store_error_is_500() {
        let mut repo = MockTodoItemRepository::new();
        repo.expect_get_undone_items()
            .returning(|_| Err(store_failure()));

        let (status, _) = send(repo, "GET", "/api/todo/undone?limit=1&offset=0", "").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
