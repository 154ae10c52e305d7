use shell_api::payload::{ExecuteResponse, LoginRequest, SignupRequest};
use shell_api::ShellStatus;

#[test]
fn payload_login_request_serializes_expected_fields() {
    let request = LoginRequest::new("user", "secret");
    let value = serde_json::to_value(&request).expect("serialize login request");
    assert_eq!(value["username"], "user");
    assert_eq!(value["password"], "secret");
}

#[test]
fn payload_signup_request_serializes_expected_fields() {
    let request = SignupRequest::new("user", "secret", "user@example.com");
    let value = serde_json::to_value(&request).expect("serialize signup request");
    assert_eq!(value["username"], "user");
    assert_eq!(value["password"], "secret");
    assert_eq!(value["email"], "user@example.com");
}

#[test]
fn payload_execute_response_parses_full_body() {
    let body = r#"{"output":"total 0\n","exit_code":0,"executed_at":"2024-05-01T12:30:00Z"}"#;
    let response: ExecuteResponse = serde_json::from_str(body).expect("parse execute response");

    assert_eq!(response.output, "total 0\n");
    assert_eq!(response.exit_code, 0);
    let executed_at = response.executed_at.expect("executed_at");
    assert_eq!(executed_at.year(), 2024);
    assert_eq!(executed_at.hour(), 12);
}

#[test]
fn payload_execute_response_defaults_missing_output_to_empty() {
    let body = r#"{"exit_code":127}"#;
    let response: ExecuteResponse = serde_json::from_str(body).expect("parse execute response");

    assert_eq!(response.output, "");
    assert_eq!(response.exit_code, 127);
    assert!(response.executed_at.is_none());
}

#[test]
fn payload_shell_status_parses_pod_fields() {
    let body = r#"{"pod_id":"pod-7f3a","status":"running","created_at":"2024-05-01T12:00:00Z"}"#;
    let status: ShellStatus = serde_json::from_str(body).expect("parse shell status");

    assert_eq!(status.pod_id.as_deref(), Some("pod-7f3a"));
    assert_eq!(status.status, "running");
    assert!(status.created_at.is_some());
}

#[test]
fn payload_execute_response_tolerates_naive_backend_timestamp() {
    // The backend stamps timestamps with datetime.isoformat(): no offset.
    let body = r#"{"output":"a.txt\n","exit_code":0,"executed_at":"2024-05-01T12:30:00.123456"}"#;
    let response: ExecuteResponse = serde_json::from_str(body).expect("parse execute response");

    assert_eq!(response.output, "a.txt\n");
    assert_eq!(response.exit_code, 0);
    let executed_at = response.executed_at.expect("executed_at");
    assert_eq!(executed_at.offset(), time::UtcOffset::UTC);
    assert_eq!(executed_at.hour(), 12);
    assert_eq!(executed_at.microsecond(), 123_456);
}

#[test]
fn payload_execute_response_tolerates_naive_timestamp_without_fraction() {
    let body = r#"{"output":"","exit_code":0,"executed_at":"2024-05-01T12:30:00"}"#;
    let response: ExecuteResponse = serde_json::from_str(body).expect("parse execute response");

    let executed_at = response.executed_at.expect("executed_at");
    assert_eq!(executed_at.offset(), time::UtcOffset::UTC);
    assert_eq!(executed_at.minute(), 30);
}

#[test]
fn payload_shell_status_tolerates_naive_created_at() {
    let body = r#"{"pod_id":"pod-7f3a","status":"running","created_at":"2024-05-01T09:14:02.000001"}"#;
    let status: ShellStatus = serde_json::from_str(body).expect("parse shell status");

    let created_at = status.created_at.expect("created_at");
    assert_eq!(created_at.offset(), time::UtcOffset::UTC);
    assert_eq!(created_at.hour(), 9);
}

#[test]
fn payload_execute_response_rejects_garbage_timestamps() {
    let body = r#"{"output":"","exit_code":0,"executed_at":"yesterday"}"#;
    assert!(serde_json::from_str::<ExecuteResponse>(body).is_err());
}

#[test]
fn payload_timestamps_serialize_as_rfc3339() {
    let body = r#"{"output":"","exit_code":0,"executed_at":"2024-05-01T12:30:00.123456"}"#;
    let response: ExecuteResponse = serde_json::from_str(body).expect("parse execute response");

    let value = serde_json::to_value(&response).expect("serialize execute response");
    let raw = value["executed_at"].as_str().expect("string timestamp");
    assert!(raw.starts_with("2024-05-01T12:30:00"), "got {raw}");
    assert!(raw.ends_with('Z'), "an explicit offset is always emitted: {raw}");
}

#[test]
fn payload_shell_status_tolerates_unprovisioned_pod() {
    let body = r#"{"pod_id":null,"status":"pending","created_at":null}"#;
    let status: ShellStatus = serde_json::from_str(body).expect("parse shell status");

    assert!(status.pod_id.is_none());
    assert_eq!(status.status, "pending");
    assert!(status.created_at.is_none());
}
