//! Persisted record naming scheme.
//!
//! These strings are the storage contract: they must stay stable across
//! versions so older records remain readable. Usernames are restricted by
//! the session collaborator to a character set without `:`, which is what
//! makes the user segment of a best-score key unambiguous to extract.

/// Single per-origin snapshot slot.
pub const SNAPSHOT_KEY: &str = "memo:snapshot:v1";

/// Prefix of every best-score key.
pub const BEST_KEY_PREFIX: &str = "memo:best:v1:";

/// Best-score key for one `(user, cell count)` pair.
pub fn best_key(user: &str, cells: u32) -> String {
    format!("{BEST_KEY_PREFIX}{user}:{cells}")
}

/// Extracts the user from a best-score key for the given cell count.
///
/// The cell count is parsed from the final segment and compared numerically;
/// a plain suffix match would confuse `:16` with `:116`. `None` when the key
/// belongs to another record type, another grid, or has an empty user.
pub fn user_from_best_key(key: &str, cells: u32) -> Option<&str> {
    let rest = key.strip_prefix(BEST_KEY_PREFIX)?;
    let (user, cells_segment) = rest.rsplit_once(':')?;
    if cells_segment.parse::<u32>().ok()? != cells || user.is_empty() {
        return None;
    }
    Some(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_key_embeds_user_and_cells() {
        assert_eq!(best_key("alice", 16), "memo:best:v1:alice:16");
    }

    #[test]
    fn extracts_the_user_segment() {
        assert_eq!(user_from_best_key("memo:best:v1:alice:16", 16), Some("alice"));
        assert_eq!(
            user_from_best_key("memo:best:v1:ann marie:12", 12),
            Some("ann marie")
        );
    }

    #[test]
    fn rejects_foreign_and_mismatched_keys() {
        assert_eq!(user_from_best_key("memo:snapshot:v1", 16), None);
        assert_eq!(user_from_best_key("memo:best:v1:alice:16", 12), None);
        assert_eq!(user_from_best_key("other:best:v1:alice:16", 16), None);
        assert_eq!(user_from_best_key("memo:best:v1::16", 16), None);
    }

    #[test]
    fn cell_count_matches_numerically_not_textually() {
        assert_eq!(user_from_best_key("memo:best:v1:alice:116", 16), None);
        assert_eq!(user_from_best_key("memo:best:v1:alice:116", 116), Some("alice"));
    }
}
