use std::collections::BTreeMap;

use crate::config::ShellApiConfig;

pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_AUTHORIZATION: &str = "authorization";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_USER_AGENT: &str = "user-agent";

const APPLICATION_JSON: &str = "application/json";

/// Header map for one request. `access_token` adds the bearer credential;
/// unauthenticated calls pass `None`.
#[must_use]
pub fn build_headers(
    config: &ShellApiConfig,
    access_token: Option<&str>,
) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert(HEADER_CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
    headers.insert(HEADER_ACCEPT.to_string(), APPLICATION_JSON.to_string());
    headers.insert(HEADER_USER_AGENT.to_string(), user_agent(config));
    if let Some(token) = access_token {
        headers.insert(HEADER_AUTHORIZATION.to_string(), format!("Bearer {token}"));
    }
    for (name, value) in &config.extra_headers {
        headers.insert(name.to_ascii_lowercase(), value.clone());
    }
    headers
}

fn user_agent(config: &ShellApiConfig) -> String {
    config
        .user_agent
        .clone()
        .unwrap_or_else(|| format!("tempshell/{}", env!("CARGO_PKG_VERSION")))
}
