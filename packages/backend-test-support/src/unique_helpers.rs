//! Test helpers for generating unique test data
//!
//! This module provides utilities to help generate unique test data using ULIDs
//! to ensure test isolation and avoid conflicts between test runs.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("session");
/// let id2 = unique_str("session");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("session-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique username with the given prefix.
///
/// The suffix is truncated so the result stays within the backend's
/// 20-character username limit.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_username;
///
/// let name1 = unique_username("ada");
/// let name2 = unique_username("ada");
/// assert_ne!(name1, name2);
/// assert!(name1.len() <= 20);
/// ```
pub fn unique_username(prefix: &str) -> String {
    let ulid = Ulid::new().to_string().to_lowercase();
    let budget = 20usize.saturating_sub(prefix.len() + 1);
    format!("{}-{}", prefix, &ulid[ulid.len() - budget..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_username_fits_limit() {
        let name = unique_username("player");
        assert!(name.len() >= 3 && name.len() <= 20);
        assert!(name.starts_with("player-"));
    }

    #[test]
    fn unique_usernames_differ() {
        assert_ne!(unique_username("p"), unique_username("p"));
    }
}
