//! Transport-only TempShell API client primitives.
//!
//! This crate owns request building, response parsing, and error-detail
//! flattening for the TempShell REST endpoints only. It intentionally
//! contains no credential persistence and no terminal UI coupling; the
//! bearer token is an opaque slot that callers arm and clear.
//!
//! Backend failures carry a `detail` field that may be a plain string, a
//! validation list, or an arbitrary object. [`error::parse_error_detail`]
//! flattens all three shapes into one display string so callers never see
//! raw payload structure.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod payload;
pub mod url;

pub use client::ShellApiClient;
pub use config::ShellApiConfig;
pub use error::ShellApiError;
pub use payload::{ExecuteResponse, ShellStatus, TokenPair};
pub use url::{api_endpoint, DEFAULT_SHELL_BASE_URL};

/// Re-exported so callers can match on HTTP status codes without depending
/// on reqwest directly.
pub use reqwest::StatusCode;
