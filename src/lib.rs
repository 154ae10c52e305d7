//! Interactive terminal client for the TempShell service.
//!
//! Commands typed at the prompt run in an isolated Kubernetes environment
//! server-side; this crate owns the client half: the authenticated session
//! (restore, login, signup, total logout) and the single-flight command
//! submission loop with its append-only terminal log and recall history.
//!
//! Layering, transport-out:
//! - [`shell_api`] (member crate) — REST request building and error-detail
//!   flattening, no persistence, no UI.
//! - [`credential_store`] (member crate) — durable token/username entries.
//! - [`backend`] — the blocking seam over the async API client.
//! - [`session`] — credential lifecycle and bearer-token arming.
//! - [`app`] + [`runtime`] — the `Idle`/`Submitting` state machine and the
//!   controller that owns the one in-flight submission.
//! - [`tui`] + [`auth`] — crossterm presentation.

pub mod app;
pub mod auth;
pub mod backend;
pub mod commands;
pub mod config;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod tui;

pub use app::{EntryKind, Mode, ShellApp, SubmissionId, TerminalEntry};
pub use backend::{HttpShellBackend, ShellBackend};
pub use config::ClientConfig;
pub use runtime::{ExecEvent, ShellController};
pub use session::{AuthError, Session, SessionManager};
