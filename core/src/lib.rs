//! Wire types and a synchronous API client core for the todo service.
//!
//! # Overview
//! The server crate serializes the types in [`types`]; clients build
//! `HttpRequest` values and parse `HttpResponse` values through
//! [`TodoClient`] without touching the network (host-does-IO pattern).
//!
//! # Design
//! - `TodoClient` is stateless. It holds only `base_url`.
//! - Each endpoint is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - The server depends on this crate for its request and response bodies,
//!   so the two sides cannot drift apart.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{
    CreatedId, DataEnvelope, ErrorBody, ItemPage, NewTodoItem, StatusBody, TodoItem,
    UpdateItemInput,
};
