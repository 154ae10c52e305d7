use std::sync::{Mutex, MutexGuard, PoisonError};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use serde::Serialize;

use crate::config::ShellApiConfig;
use crate::error::{parse_error_detail, ShellApiError};
use crate::headers::build_headers;
use crate::payload::{
    ExecuteRequest, ExecuteResponse, LoginRequest, ShellStatus, SignupRequest, TokenPair,
};
use crate::url::{
    api_endpoint, EXECUTE_PATH, LOGIN_PATH, SIGNUP_PATH, STATUS_PATH, TERMINATE_PATH,
};

/// HTTP client for the TempShell backend.
///
/// Holds the access token behind a mutex so one client can be shared across
/// threads; authenticated requests read the slot at build time.
#[derive(Debug)]
pub struct ShellApiClient {
    http: Client,
    config: ShellApiConfig,
    access_token: Mutex<Option<String>>,
}

impl ShellApiClient {
    pub fn new(config: ShellApiConfig) -> Result<Self, ShellApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ShellApiError::from)?;
        Ok(Self {
            http,
            config,
            access_token: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &ShellApiConfig {
        &self.config
    }

    pub fn endpoint(&self, path: &str) -> String {
        api_endpoint(&self.config.base_url, path)
    }

    pub fn set_access_token(&self, token: impl Into<String>) {
        *lock_unpoisoned(&self.access_token) = Some(token.into());
    }

    pub fn clear_access_token(&self) {
        *lock_unpoisoned(&self.access_token) = None;
    }

    pub fn has_access_token(&self) -> bool {
        lock_unpoisoned(&self.access_token).is_some()
    }

    fn header_map(&self, authenticated: bool) -> Result<HeaderMap, ShellApiError> {
        let token = if authenticated {
            lock_unpoisoned(&self.access_token).clone()
        } else {
            None
        };
        let headers = build_headers(&self.config, token.as_deref());
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                    ShellApiError::InvalidHeader(format!("invalid header name: {key}"))
                })?,
                HeaderValue::from_str(&value).map_err(|_| {
                    ShellApiError::InvalidHeader(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_post<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        authenticated: bool,
    ) -> Result<reqwest::RequestBuilder, ShellApiError> {
        let headers = self.header_map(authenticated)?;
        Ok(self
            .http
            .post(self.endpoint(path))
            .headers(headers)
            .json(body))
    }

    pub fn build_get(&self, path: &str) -> Result<reqwest::RequestBuilder, ShellApiError> {
        let headers = self.header_map(true)?;
        Ok(self.http.get(self.endpoint(path)).headers(headers))
    }

    pub fn build_delete(&self, path: &str) -> Result<reqwest::RequestBuilder, ShellApiError> {
        let headers = self.header_map(true)?;
        Ok(self.http.delete(self.endpoint(path)).headers(headers))
    }

    /// Exchanges credentials for a token pair. Does not install the access
    /// token; arming the bearer slot stays a caller decision.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ShellApiError> {
        let request = LoginRequest::new(username, password);
        let response = self.build_post(LOGIN_PATH, &request, false)?.send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Registers a new account. Success grants no session; callers log in
    /// separately afterwards.
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<(), ShellApiError> {
        let request = SignupRequest::new(username, password, email);
        let response = self.build_post(SIGNUP_PATH, &request, false)?.send().await?;
        check_status(response).await?;
        Ok(())
    }

    /// Runs one command in the session pod and waits for its result.
    pub async fn execute(&self, command: &str) -> Result<ExecuteResponse, ShellApiError> {
        let request = ExecuteRequest::new(command);
        let response = self.build_post(EXECUTE_PATH, &request, true)?.send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Asks the backend to tear down the session pod.
    pub async fn terminate(&self) -> Result<(), ShellApiError> {
        let response = self.build_delete(TERMINATE_PATH)?.send().await?;
        check_status(response).await?;
        Ok(())
    }

    /// Fetches the session pod's current state.
    pub async fn status(&self) -> Result<ShellStatus, ShellApiError> {
        let response = self.build_get(STATUS_PATH)?.send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

async fn check_status(response: Response) -> Result<Response, ShellApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ShellApiError::Status {
        status,
        detail: parse_error_detail(&body),
    })
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
