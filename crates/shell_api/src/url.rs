/// Default base URL for a locally running TempShell backend.
pub const DEFAULT_SHELL_BASE_URL: &str = "http://localhost:8000";

pub const LOGIN_PATH: &str = "/api/v1/auth/login";
pub const SIGNUP_PATH: &str = "/api/v1/auth/signup";
pub const EXECUTE_PATH: &str = "/api/v1/shell/execute";
pub const TERMINATE_PATH: &str = "/api/v1/shell/terminate";
pub const STATUS_PATH: &str = "/api/v1/shell/status";

/// Joins a base URL and an endpoint path into one request URL.
///
/// A blank base falls back to [`DEFAULT_SHELL_BASE_URL`]; trailing slashes
/// on the base and a missing leading slash on the path are both tolerated.
pub fn api_endpoint(base_url: &str, path: &str) -> String {
    let base = if base_url.trim().is_empty() {
        DEFAULT_SHELL_BASE_URL
    } else {
        base_url.trim()
    };

    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}
