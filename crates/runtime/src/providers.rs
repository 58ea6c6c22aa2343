//! Collaborator seams: who is playing, and what the tiles look like.
//!
//! The session/identity system and any illustration fetcher live outside
//! this crate; the runtime only consumes these two traits. Both come with a
//! minimal built-in implementation for embedding and tests.

use async_trait::async_trait;
use thiserror::Error;

/// Maximum accepted username length.
const USERNAME_MAX_LEN: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("username must be 1-{USERNAME_MAX_LEN} letters, digits, spaces, underscores or hyphens")]
pub struct InvalidUsername;

/// Allow-list validation for usernames.
///
/// The character set deliberately excludes `:` so a username can be embedded
/// in a best-score key and extracted back without ambiguity. Returns the
/// trimmed name.
pub fn validate_username(raw: &str) -> Result<&str, InvalidUsername> {
    let name = raw.trim();
    let ok = !name.is_empty()
        && name.len() <= USERNAME_MAX_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '_' || c == '-');
    if ok { Ok(name) } else { Err(InvalidUsername) }
}

/// Supplies the name of the player owning this runtime instance.
pub trait SessionProvider: Send + Sync {
    fn current_user(&self) -> String;
}

/// Fixed-identity session for embedding and tests.
pub struct StaticSession {
    username: String,
}

impl StaticSession {
    pub fn new(username: impl AsRef<str>) -> Result<Self, InvalidUsername> {
        let username = validate_username(username.as_ref())?.to_string();
        Ok(Self { username })
    }

    /// The anonymous fallback identity.
    pub fn guest() -> Self {
        Self {
            username: "guest".to_string(),
        }
    }
}

impl SessionProvider for StaticSession {
    fn current_user(&self) -> String {
        self.username.clone()
    }
}

/// Supplies tile symbols for a deal.
///
/// `None` means "nothing external available, use the built-in pool" — the
/// contract an image-fetching collaborator implements by returning its image
/// identifiers on success and `None` on any failure.
#[async_trait]
pub trait SymbolSource: Send + Sync {
    async fn symbols(&self, pairs: usize) -> Option<Vec<String>>;
}

/// Source that always defers to the built-in symbol pool.
pub struct BuiltinPool;

#[async_trait]
impl SymbolSource for BuiltinPool {
    async fn symbols(&self, _pairs: usize) -> Option<Vec<String>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_safe_character_set() {
        assert_eq!(validate_username("alice"), Ok("alice"));
        assert_eq!(validate_username("Ann Marie_2"), Ok("Ann Marie_2"));
        assert_eq!(validate_username("  padded  "), Ok("padded"));
    }

    #[test]
    fn rejects_delimiters_and_degenerate_names() {
        assert_eq!(validate_username("a:b"), Err(InvalidUsername));
        assert_eq!(validate_username(""), Err(InvalidUsername));
        assert_eq!(validate_username("   "), Err(InvalidUsername));
        assert_eq!(validate_username("émile"), Err(InvalidUsername));
        assert_eq!(
            validate_username("this-name-is-way-too-long"),
            Err(InvalidUsername)
        );
    }

    #[test]
    fn static_session_hands_out_its_name() {
        let session = StaticSession::new("alice").unwrap();
        assert_eq!(session.current_user(), "alice");
        assert_eq!(StaticSession::guest().current_user(), "guest");
    }

    #[tokio::test]
    async fn builtin_pool_defers_to_the_default_symbols() {
        assert_eq!(BuiltinPool.symbols(8).await, None);
    }
}
