use std::path::PathBuf;
use std::time::Duration;

use shell_api::{ShellApiConfig, DEFAULT_SHELL_BASE_URL};

pub const API_URL_ENV_VAR: &str = "TEMPSHELL_API_URL";
pub const TIMEOUT_SECS_ENV_VAR: &str = "TEMPSHELL_TIMEOUT_SECS";
pub const CREDENTIALS_PATH_ENV_VAR: &str = "TEMPSHELL_CREDENTIALS_PATH";
pub const LOG_FILTER_ENV_VAR: &str = "TEMPSHELL_LOG";

/// Client configuration resolved from the environment.
///
/// `timeout` is absent unless explicitly configured: an in-flight command
/// has no deadline by default, and a hung backend blocks the loop until it
/// resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout: Option<Duration>,
    pub credentials_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_SHELL_BASE_URL.to_string(),
            timeout: None,
            credentials_path: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let api_url = non_blank(std::env::var(API_URL_ENV_VAR).ok())
            .unwrap_or_else(|| DEFAULT_SHELL_BASE_URL.to_string());
        let timeout = non_blank(std::env::var(TIMEOUT_SECS_ENV_VAR).ok())
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs);
        let credentials_path =
            non_blank(std::env::var(CREDENTIALS_PATH_ENV_VAR).ok()).map(PathBuf::from);

        Self {
            api_url,
            timeout,
            credentials_path,
        }
    }

    pub fn shell_api_config(&self) -> ShellApiConfig {
        let mut config = ShellApiConfig::new(self.api_url.clone());
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        config
    }
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
