use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Request body for `POST /api/v1/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Request body for `POST /api/v1/auth/signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl SignupRequest {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: email.into(),
        }
    }
}

/// Token pair returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Request body for `POST /api/v1/shell/execute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub command: String,
}

impl ExecuteRequest {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

/// Completed command result. `output` interleaves stdout and stderr as the
/// backend captured them; an absent field reads as empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteResponse {
    #[serde(default)]
    pub output: String,
    pub exit_code: i32,
    #[serde(default, with = "utc_timestamp")]
    pub executed_at: Option<OffsetDateTime>,
}

/// Pod state reported by `GET /api/v1/shell/status`. `pod_id` and
/// `created_at` are null until the backend has provisioned the pod.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellStatus {
    #[serde(default)]
    pub pod_id: Option<String>,
    pub status: String,
    #[serde(default, with = "utc_timestamp")]
    pub created_at: Option<OffsetDateTime>,
}

/// The backend stamps `executed_at`/`created_at` with `datetime.isoformat()`,
/// which carries no UTC offset. Accept that naive shape (assumed UTC) as well
/// as proper RFC3339; always emit RFC3339.
mod utc_timestamp {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::format_description::well_known::{Iso8601, Rfc3339};
    use time::{OffsetDateTime, PrimitiveDateTime};

    pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        time::serde::rfc3339::option::serialize(value, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => parse_timestamp(&raw)
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid timestamp: {raw}"))),
        }
    }

    fn parse_timestamp(raw: &str) -> Result<OffsetDateTime, time::error::Parse> {
        OffsetDateTime::parse(raw, &Rfc3339).or_else(|error| {
            PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT)
                .map(PrimitiveDateTime::assume_utc)
                .map_err(|_| error)
        })
    }
}
