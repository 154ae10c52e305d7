use std::future::Future;
use std::sync::Arc;

use shell_api::{ExecuteResponse, ShellApiClient, ShellApiError, ShellStatus, TokenPair};

/// Transport seam between the client and the TempShell backend.
///
/// The session manager arms and clears the bearer token through it; the
/// shell loop only issues requests and never mutates session state.
pub trait ShellBackend: Send + Sync {
    fn login(&self, username: &str, password: &str) -> Result<TokenPair, ShellApiError>;
    fn signup(&self, username: &str, password: &str, email: &str) -> Result<(), ShellApiError>;
    fn execute(&self, command: &str) -> Result<ExecuteResponse, ShellApiError>;
    fn terminate(&self) -> Result<(), ShellApiError>;
    fn shell_status(&self) -> Result<ShellStatus, ShellApiError>;
    fn set_bearer_token(&self, token: &str);
    fn clear_bearer_token(&self);
}

/// Blocking adapter over the async [`ShellApiClient`].
#[derive(Debug)]
pub struct HttpShellBackend {
    client: Arc<ShellApiClient>,
}

impl HttpShellBackend {
    pub fn new(client: Arc<ShellApiClient>) -> Self {
        Self { client }
    }

    fn block_on<F>(&self, future: F) -> Result<F::Output, ShellApiError>
    where
        F: Future,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|error| {
                ShellApiError::Runtime(format!("failed to initialize tokio runtime: {error}"))
            })?;

        Ok(runtime.block_on(future))
    }
}

impl ShellBackend for HttpShellBackend {
    fn login(&self, username: &str, password: &str) -> Result<TokenPair, ShellApiError> {
        self.block_on(self.client.login(username, password))?
    }

    fn signup(&self, username: &str, password: &str, email: &str) -> Result<(), ShellApiError> {
        self.block_on(self.client.signup(username, password, email))?
    }

    fn execute(&self, command: &str) -> Result<ExecuteResponse, ShellApiError> {
        self.block_on(self.client.execute(command))?
    }

    fn terminate(&self) -> Result<(), ShellApiError> {
        self.block_on(self.client.terminate())?
    }

    fn shell_status(&self) -> Result<ShellStatus, ShellApiError> {
        self.block_on(self.client.status())?
    }

    fn set_bearer_token(&self, token: &str) {
        self.client.set_access_token(token);
    }

    fn clear_bearer_token(&self) {
        self.client.clear_access_token();
    }
}
