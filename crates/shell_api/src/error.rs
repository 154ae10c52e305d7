use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Error as JsonError, Value};

#[derive(Debug)]
pub enum ShellApiError {
    InvalidBaseUrl(String),
    InvalidHeader(String),
    Request(reqwest::Error),
    /// Non-success HTTP response. `detail` is the flattened backend-provided
    /// failure detail when the body carried one.
    Status {
        status: StatusCode,
        detail: Option<String>,
    },
    Serde(JsonError),
    Runtime(String),
}

impl ShellApiError {
    /// Backend-provided failure detail, if the response carried one.
    ///
    /// Transport failures and bodies without a usable `detail` yield `None`;
    /// callers substitute their own canned message in that case.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ShellApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseUrl(value) => write!(f, "invalid base URL: {value}"),
            Self::InvalidHeader(value) => write!(f, "invalid header: {value}"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Status { status, detail } => match detail {
                Some(detail) => write!(f, "HTTP {status}: {detail}"),
                None => write!(f, "HTTP {status}"),
            },
            Self::Serde(error) => write!(f, "serialization error: {error}"),
            Self::Runtime(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ShellApiError {}

impl From<reqwest::Error> for ShellApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<JsonError> for ShellApiError {
    fn from(error: JsonError) -> Self {
        Self::Serde(error)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    detail: Option<Value>,
}

/// Extracts and flattens the backend `detail` field from an error body.
///
/// Returns `None` for non-JSON bodies, bodies without `detail`, and details
/// that flatten to nothing (null or blank strings).
pub fn parse_error_detail(body: &str) -> Option<String> {
    let payload = serde_json::from_str::<ErrorPayload>(body).ok()?;
    flatten_detail(&payload.detail?)
}

/// Flattens the three `detail` shapes the backend emits: a plain string, a
/// validation list of objects bearing `msg`/`message`, or an arbitrary
/// value rendered as compact JSON.
fn flatten_detail(detail: &Value) -> Option<String> {
    match detail {
        Value::Null => None,
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Array(items) => {
            if items.is_empty() {
                return None;
            }
            let parts: Vec<String> = items.iter().map(item_message).collect();
            Some(parts.join(", "))
        }
        other => serde_json::to_string(other).ok(),
    }
}

fn item_message(item: &Value) -> String {
    item.get("msg")
        .or_else(|| item.get("message"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| item.to_string())
}
