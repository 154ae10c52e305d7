use std::collections::BTreeMap;
use std::time::Duration;

use crate::url::DEFAULT_SHELL_BASE_URL;

/// Transport configuration for TempShell API requests.
#[derive(Debug, Clone)]
pub struct ShellApiConfig {
    /// Base URL of the TempShell backend.
    pub base_url: String,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
    /// Additional headers merged into every request.
    pub extra_headers: BTreeMap<String, String>,
    /// Optional whole-request timeout. Absent by default: an in-flight
    /// command has no deadline unless the caller sets one.
    pub timeout: Option<Duration>,
}

impl Default for ShellApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SHELL_BASE_URL.to_string(),
            user_agent: None,
            extra_headers: BTreeMap::new(),
            timeout: None,
        }
    }
}

impl ShellApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn insert_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }
}
