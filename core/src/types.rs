//! Domain DTOs for the todo API.
//!
//! # Design
//! These types are the JSON contract of `/api/todo`. The server serializes
//! them directly and `TodoClient` deserializes them, so both sides share one
//! definition. Timestamps travel as RFC3339 strings; filter dates as
//! `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single to-do item as stored and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub is_done: bool,
}

/// Request payload for creating a new item. The store assigns the id, so an
/// `id` key in the body is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodoItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub is_done: bool,
}

impl NewTodoItem {
    /// `false` when the title is empty or only whitespace.
    pub fn has_title(&self) -> bool {
        !is_blank(&self.title)
    }

    /// The stored item this input becomes once the store assigns `id`.
    pub fn into_item(self, id: i64) -> TodoItem {
        TodoItem {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
            is_done: self.is_done,
        }
    }
}

/// Request payload for a partial update. Only the fields present in the JSON
/// are written; omitted fields (and explicit `null`s) keep their stored value.
/// An empty string is a present value and does clear `description`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateItemInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl UpdateItemInput {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.is_done.is_none()
            && self.date.is_none()
    }

    /// `true` when a title is present but empty or only whitespace, which
    /// would leave the item without a title.
    pub fn has_blank_title(&self) -> bool {
        self.title.as_deref().is_some_and(is_blank)
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Filter and window for the done/undone listings: optionally restrict to
/// one calendar day (UTC), then skip `offset` rows and return up to `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPage {
    pub date: Option<NaiveDate>,
    pub limit: i64,
    pub offset: i64,
}

impl ItemPage {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            date: None,
            limit,
            offset,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// `{"data": ...}` wrapper used by every read endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Response body of a successful create.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedId {
    pub id: i64,
}

/// `{"status":"ok"}` returned by update and delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusBody {
    pub status: String,
}

impl StatusBody {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
