//! Request and response values exchanged between `TodoClient` and whatever
//! transport the caller plugs in.
//!
//! The client only ever talks to `/api/todo` and its `/{id}`, `/done` and
//! `/undone` children, always with JSON bodies, so both values stay plain
//! owned text.

/// The four verbs the todo API routes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// One call against the todo API.
///
/// `path` is the full URL: base, `/api/todo` prefix and, for the done/undone
/// listings, the `limit`/`offset`/`date` query string. Create and update set
/// `body` to the JSON payload and add a `content-type: application/json`
/// header; every other request has neither.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// What the server answered. `body` is the raw text: a `{data}`, `{id}` or
/// `{status}` document on 200, an `{error}` document otherwise.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
