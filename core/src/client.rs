//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    CreatedId, DataEnvelope, ErrorBody, ItemPage, NewTodoItem, TodoItem, UpdateItemInput,
};

const API_PREFIX: &str = "/api/todo";

/// Synchronous, stateless client for the todo API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}{API_PREFIX}{suffix}", self.base_url)
    }

    fn bare(&self, method: HttpMethod, suffix: &str) -> HttpRequest {
        HttpRequest {
            method,
            path: self.url(suffix),
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json<T: Serialize>(
        &self,
        method: HttpMethod,
        suffix: &str,
        payload: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: self.url(suffix),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_create_item(&self, input: &NewTodoItem) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, "", input)
    }

    pub fn build_list_items(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, "")
    }

    pub fn build_get_item(&self, id: i64) -> HttpRequest {
        self.bare(HttpMethod::Get, &format!("/{id}"))
    }

    pub fn build_update_item(
        &self,
        id: i64,
        input: &UpdateItemInput,
    ) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Put, &format!("/{id}"), input)
    }

    pub fn build_delete_item(&self, id: i64) -> HttpRequest {
        self.bare(HttpMethod::Delete, &format!("/{id}"))
    }

    pub fn build_list_done(&self, page: &ItemPage) -> HttpRequest {
        self.bare(HttpMethod::Get, &format!("/done?{}", page_query(page)))
    }

    pub fn build_list_undone(&self, page: &ItemPage) -> HttpRequest {
        self.bare(HttpMethod::Get, &format!("/undone?{}", page_query(page)))
    }

    pub fn parse_create_item(&self, response: HttpResponse) -> Result<i64, ApiError> {
        let created: CreatedId = parse_json(&response)?;
        Ok(created.id)
    }

    pub fn parse_list_items(&self, response: HttpResponse) -> Result<Vec<TodoItem>, ApiError> {
        let envelope: DataEnvelope<Vec<TodoItem>> = parse_json(&response)?;
        Ok(envelope.data)
    }

    pub fn parse_get_item(&self, response: HttpResponse) -> Result<TodoItem, ApiError> {
        let envelope: DataEnvelope<TodoItem> = parse_json(&response)?;
        Ok(envelope.data)
    }

    pub fn parse_update_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_list_done(&self, response: HttpResponse) -> Result<Vec<TodoItem>, ApiError> {
        self.parse_list_items(response)
    }

    pub fn parse_list_undone(&self, response: HttpResponse) -> Result<Vec<TodoItem>, ApiError> {
        self.parse_list_items(response)
    }
}

fn page_query(page: &ItemPage) -> String {
    let mut query = format!("limit={}&offset={}", page.limit, page.offset);
    if let Some(date) = page.date {
        query.push_str(&format!("&date={}", date.format("%Y-%m-%d")));
    }
    query
}

fn parse_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    check_status(response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Every endpoint answers 200 on success. Map anything else to an `ApiError`,
/// preferring the server's `{error}` message over the raw body.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 => Ok(()),
        404 => Err(ApiError::NotFound),
        status => {
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .map(|body| body.error)
                .unwrap_or_else(|_| response.body.clone());
            Err(ApiError::Http { status, message })
        }
    }
}
