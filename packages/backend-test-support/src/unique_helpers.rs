//! Test helpers for generating unique test data
//!
//! ULID suffixes keep user ids and names unique across tests that share a
//! database.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("user");
/// let b = unique_str("user");
/// assert_ne!(a, b);
/// assert!(a.starts_with("user-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique opaque user id, the value clients send in `X-User-Id`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_user_id;
///
/// assert!(unique_user_id().starts_with("user-"));
/// ```
pub fn unique_user_id() -> String {
    unique_str("user")
}
