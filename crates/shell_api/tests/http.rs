use shell_api::payload::{ExecuteRequest, LoginRequest};
use shell_api::url::{EXECUTE_PATH, LOGIN_PATH, STATUS_PATH, TERMINATE_PATH};
use shell_api::{api_endpoint, ShellApiClient, ShellApiConfig};

fn client() -> ShellApiClient {
    ShellApiClient::new(ShellApiConfig::new("http://localhost:8000")).expect("client")
}

#[test]
fn http_login_request_targets_login_endpoint_without_bearer() {
    let client = client();
    let body = LoginRequest::new("user", "secret");

    let request = client
        .build_post(LOGIN_PATH, &body, false)
        .expect("build login request")
        .build()
        .expect("request");

    assert_eq!(
        request.url().as_str(),
        api_endpoint("http://localhost:8000", LOGIN_PATH)
    );
    assert_eq!(request.method(), "POST");
    assert!(request.headers().get("authorization").is_none());
}

#[test]
fn http_execute_request_bears_installed_token_and_command_body() {
    let client = client();
    client.set_access_token("tok-123");
    let body = ExecuteRequest::new("ls -la");

    let request = client
        .build_post(EXECUTE_PATH, &body, true)
        .expect("build execute request")
        .build()
        .expect("request");

    assert_eq!(
        request.url().as_str(),
        api_endpoint("http://localhost:8000", EXECUTE_PATH)
    );
    assert_eq!(
        request.headers().get("authorization").expect("authorization"),
        "Bearer tok-123"
    );

    let bytes = request
        .body()
        .and_then(reqwest::Body::as_bytes)
        .expect("body bytes");
    let value: serde_json::Value = serde_json::from_slice(bytes).expect("json body");
    assert_eq!(value["command"], "ls -la");
}

#[test]
fn http_status_request_is_get_on_status_endpoint() {
    let client = client();
    client.set_access_token("tok-123");

    let request = client
        .build_get(STATUS_PATH)
        .expect("build status request")
        .build()
        .expect("request");

    assert_eq!(
        request.url().as_str(),
        api_endpoint("http://localhost:8000", STATUS_PATH)
    );
    assert_eq!(request.method(), "GET");
}

#[test]
fn http_terminate_request_is_delete_on_terminate_endpoint() {
    let client = client();
    client.set_access_token("tok-123");

    let request = client
        .build_delete(TERMINATE_PATH)
        .expect("build terminate request")
        .build()
        .expect("request");

    assert_eq!(
        request.url().as_str(),
        api_endpoint("http://localhost:8000", TERMINATE_PATH)
    );
    assert_eq!(request.method(), "DELETE");
}

#[test]
fn http_cleared_token_drops_authorization_header() {
    let client = client();
    client.set_access_token("tok-123");
    client.clear_access_token();
    assert!(!client.has_access_token());

    let request = client
        .build_get(STATUS_PATH)
        .expect("build status request")
        .build()
        .expect("request");

    assert!(request.headers().get("authorization").is_none());
}
