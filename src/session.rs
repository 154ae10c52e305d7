use std::fmt;
use std::sync::Arc;

use credential_store::{keys, CredentialStore, CredentialStoreError};
use shell_api::{ShellApiError, TokenPair};
use tracing::warn;

use crate::backend::ShellBackend;

pub const LOGIN_FALLBACK_MESSAGE: &str = "Login failed. Please try again.";
pub const SIGNUP_FALLBACK_MESSAGE: &str = "Signup failed. Please try again.";

/// The client's current authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub token: String,
}

/// Login or signup rejection carrying a display-ready message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthError {
    message: String,
}

impl AuthError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AuthError {}

/// Owns the in-memory session, the credential store, and the bearer token
/// on the backend seam.
///
/// Every transition that sets or clears the token arms or clears the seam
/// in the same call, before the new session value is observable, so no
/// request goes out with a stale token while a session is present.
pub struct SessionManager {
    backend: Arc<dyn ShellBackend>,
    store: Arc<dyn CredentialStore>,
    session: Option<Session>,
}

impl SessionManager {
    pub fn new(backend: Arc<dyn ShellBackend>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            backend,
            store,
            session: None,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.session.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Rebuilds the session from persisted credentials. The presence of the
    /// access token alone decides whether a session exists; a missing
    /// username degrades to an empty display name.
    pub fn restore(&mut self) -> Result<(), CredentialStoreError> {
        let Some(token) = self.store.get(keys::ACCESS_TOKEN)? else {
            return Ok(());
        };

        let username = self.store.get(keys::USERNAME)?.unwrap_or_default();
        self.backend.set_bearer_token(&token);
        self.session = Some(Session { username, token });

        Ok(())
    }

    /// Exchanges credentials for a session. On failure every piece of prior
    /// state is left untouched.
    pub fn login(&mut self, username: &str, password: &str) -> Result<Session, AuthError> {
        let tokens = self
            .backend
            .login(username, password)
            .map_err(|error| auth_error(&error, LOGIN_FALLBACK_MESSAGE))?;

        self.persist_credentials(&tokens, username);
        self.backend.set_bearer_token(&tokens.access_token);

        let session = Session {
            username: username.to_string(),
            token: tokens.access_token,
        };
        self.session = Some(session.clone());

        Ok(session)
    }

    /// Registers a new account. Success grants no session; the caller logs
    /// in separately afterwards.
    pub fn signup(&self, username: &str, password: &str, email: &str) -> Result<(), AuthError> {
        self.backend
            .signup(username, password, email)
            .map_err(|error| auth_error(&error, SIGNUP_FALLBACK_MESSAGE))
    }

    /// Tears the session down unconditionally. The backend terminate call
    /// and credential removal are best-effort; their failures are logged
    /// and never surface.
    pub fn logout(&mut self) {
        if let Err(error) = self.backend.terminate() {
            warn!(%error, "shell terminate failed during logout");
        }

        for key in keys::ALL {
            if let Err(error) = self.store.remove(key) {
                warn!(%error, key, "failed to remove credential");
            }
        }

        self.backend.clear_bearer_token();
        self.session = None;
    }

    fn persist_credentials(&self, tokens: &TokenPair, username: &str) {
        let writes = [
            (keys::ACCESS_TOKEN, tokens.access_token.as_str()),
            (keys::REFRESH_TOKEN, tokens.refresh_token.as_str()),
            (keys::USERNAME, username),
        ];

        for (key, value) in writes {
            if let Err(error) = self.store.set(key, value) {
                warn!(%error, key, "failed to persist credential");
            }
        }
    }
}

fn auth_error(error: &ShellApiError, fallback: &str) -> AuthError {
    warn!(%error, "authentication request failed");
    match error.detail() {
        Some(detail) => AuthError::new(detail),
        None => AuthError::new(fallback),
    }
}
