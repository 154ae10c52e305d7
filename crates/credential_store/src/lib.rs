//! Durable credential storage for the TempShell client.
//!
//! This crate owns the persistence of login material only: bearer tokens and
//! the signed-in username, each stored as an independent keyed entry. It
//! intentionally contains no HTTP code and no session logic; callers decide
//! what a stored token means.
//!
//! Absence of the [`keys::ACCESS_TOKEN`] entry is the logged-out state.

mod error;
mod store;

pub mod keys;
pub mod paths;

pub use error::CredentialStoreError;
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
