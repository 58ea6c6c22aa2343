//! Ranked results derived by scanning persisted best scores.

use std::sync::Arc;

use game_core::GridSize;
use tracing::warn;

use crate::keys;
use crate::records::BestScore;
use crate::storage::KeyValueStore;

/// One ranked entry. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub user: String,
    pub moves: u32,
    pub seconds: u64,
}

/// Read-only aggregator over the best-score records in the substrate.
///
/// There is no index: every call enumerates all keys, keeps the best-score
/// keys whose cell count matches the grid, and rebuilds the ranking from
/// scratch. Fine at the cardinality of a per-user local store; a system with
/// many records would want a secondary index maintained on write.
pub struct Leaderboard {
    store: Arc<dyn KeyValueStore>,
}

impl Leaderboard {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Ranked rows for `grid`, ascending by `(moves, seconds)`, at most
    /// `limit` entries. Malformed records are skipped.
    pub fn list(&self, grid: GridSize, limit: usize) -> Vec<LeaderboardRow> {
        let cells = grid.cells();
        let keys = match self.store.keys() {
            Ok(keys) => keys,
            Err(err) => {
                warn!(%err, "leaderboard scan failed; returning no rows");
                return Vec::new();
            }
        };

        let mut rows = Vec::new();
        for key in keys {
            let Some(user) = keys::user_from_best_key(&key, cells) else {
                continue;
            };
            let raw = match self.store.get(&key) {
                Ok(Some(raw)) => raw,
                Ok(None) => continue,
                Err(err) => {
                    warn!(%err, %key, "skipping unreadable best-score record");
                    continue;
                }
            };
            let Some(score) = BestScore::parse(&raw) else {
                continue;
            };
            rows.push(LeaderboardRow {
                user: user.to_string(),
                moves: score.moves,
                seconds: score.seconds,
            });
        }

        rows.sort_by(|a, b| {
            (a.moves, a.seconds, a.user.as_str()).cmp(&(b.moves, b.seconds, b.user.as_str()))
        });
        rows.truncate(limit);
        rows
    }

    /// Removes every best-score record for `grid` — the explicit reset used
    /// by administrative tooling, never by normal play.
    pub fn clear(&self, grid: GridSize) {
        let cells = grid.cells();
        let keys = match self.store.keys() {
            Ok(keys) => keys,
            Err(err) => {
                warn!(%err, "leaderboard clear scan failed");
                return;
            }
        };
        for key in keys {
            if keys::user_from_best_key(&key, cells).is_some()
                && let Err(err) = self.store.remove(&key)
            {
                warn!(%err, %key, "failed to remove best-score record");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    fn seeded() -> (Arc<InMemoryStore>, Leaderboard, GridSize) {
        let store = Arc::new(InMemoryStore::new());
        let grid = GridSize::new(3, 4).unwrap();
        let board = Leaderboard::new(store.clone());
        (store, board, grid)
    }

    fn put(store: &InMemoryStore, user: &str, cells: u32, raw: &str) {
        store.set(&keys::best_key(user, cells), raw).unwrap();
    }

    #[test]
    fn sorts_by_fewer_moves_then_fewer_seconds() {
        let (store, board, grid) = seeded();
        put(&store, "alice", 12, r#"{"moves":20,"seconds":75}"#);
        put(&store, "bob", 12, r#"{"moves":18,"seconds":140}"#);
        put(&store, "carol", 12, r#"{"moves":18,"seconds":120}"#);
        put(&store, "dave", 12, r#"{"moves":"x"}"#);

        let rows = board.list(grid, 100);
        let users: Vec<&str> = rows.iter().map(|r| r.user.as_str()).collect();
        assert_eq!(users, vec!["carol", "bob", "alice"]);
        assert_eq!(
            rows[0],
            LeaderboardRow {
                user: "carol".to_string(),
                moves: 18,
                seconds: 120
            }
        );
    }

    #[test]
    fn ignores_other_grids_and_foreign_keys() {
        let (store, board, grid) = seeded();
        put(&store, "alice", 12, r#"{"moves":20,"seconds":75}"#);
        put(&store, "bob", 16, r#"{"moves":1,"seconds":1}"#);
        store.set("memo:snapshot:v1", "{}").unwrap();

        let rows = board.list(grid, 100);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user, "alice");
    }

    #[test]
    fn truncates_to_the_limit() {
        let (store, board, grid) = seeded();
        for (i, user) in ["a", "b", "c", "d"].iter().enumerate() {
            put(
                &store,
                user,
                12,
                &format!(r#"{{"moves":{},"seconds":10}}"#, 10 + i),
            );
        }

        let rows = board.list(grid, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].user, "a");
        assert_eq!(rows[1].user, "b");
    }

    #[test]
    fn empty_store_yields_no_rows() {
        let (_, board, grid) = seeded();
        assert!(board.list(grid, 100).is_empty());
    }

    #[test]
    fn clear_removes_only_the_requested_grid() {
        let (store, board, grid) = seeded();
        put(&store, "alice", 12, r#"{"moves":20,"seconds":75}"#);
        put(&store, "bob", 16, r#"{"moves":1,"seconds":1}"#);

        board.clear(grid);

        assert!(board.list(grid, 100).is_empty());
        assert_eq!(
            board.list(GridSize::new(4, 4).unwrap(), 100).len(),
            1,
            "other grids untouched"
        );
    }
}
