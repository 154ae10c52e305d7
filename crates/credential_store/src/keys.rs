//! Well-known credential entry keys.
//!
//! The three entries are independent: a store may legitimately hold any
//! subset, and callers must treat a missing [`ACCESS_TOKEN`] as logged out
//! regardless of what else is present.

pub const ACCESS_TOKEN: &str = "access_token";
pub const REFRESH_TOKEN: &str = "refresh_token";
pub const USERNAME: &str = "username";

/// All well-known keys, in removal order for logout.
pub const ALL: [&str; 3] = [ACCESS_TOKEN, REFRESH_TOKEN, USERNAME];
