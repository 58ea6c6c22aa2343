//! Per-(user, grid) personal records with a strict-improvement rule.

use std::sync::Arc;

use game_core::GridSize;
use tracing::{debug, warn};

use crate::events::{Event, EventBus, StorageEvent};
use crate::keys;
use crate::records::BestScore;
use crate::storage::KeyValueStore;

/// Durable per-user view over the substrate for finished-game results.
pub struct BestScoreStore {
    store: Arc<dyn KeyValueStore>,
    bus: EventBus,
}

impl BestScoreStore {
    pub fn new(store: Arc<dyn KeyValueStore>, bus: EventBus) -> Self {
        Self { store, bus }
    }

    /// Reads the stored best for `(user, grid)`, treating malformed records
    /// as absent.
    pub fn read(&self, user: &str, grid: GridSize) -> Option<BestScore> {
        let key = keys::best_key(user, grid.cells());
        match self.store.get(&key) {
            Ok(Some(raw)) => BestScore::parse(&raw),
            Ok(None) => None,
            Err(err) => {
                warn!(%err, %key, "best-score read failed; treating as absent");
                None
            }
        }
    }

    /// Replaces the stored record iff the candidate outranks it: fewer
    /// moves, or equal moves and fewer seconds. First results always land.
    ///
    /// Returns whether the record was written.
    pub fn maybe_write(&self, user: &str, grid: GridSize, moves: u32, seconds: u64) -> bool {
        let candidate = BestScore { moves, seconds };
        if let Some(existing) = self.read(user, grid)
            && candidate >= existing
        {
            debug!(user, %grid, "result does not beat the stored best");
            return false;
        }

        let key = keys::best_key(user, grid.cells());
        let raw = match serde_json::to_string(&candidate) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(%err, "best-score serialization failed");
                return false;
            }
        };
        if let Err(err) = self.store.set(&key, &raw) {
            warn!(%err, %key, "best-score write failed; result lost for this session");
            return false;
        }

        self.bus.publish(Event::Storage(StorageEvent::BestScoreWritten {
            user: user.to_string(),
            cells: grid.cells(),
        }));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    fn bests() -> (Arc<InMemoryStore>, BestScoreStore) {
        let store = Arc::new(InMemoryStore::new());
        let bests = BestScoreStore::new(store.clone(), EventBus::new());
        (store, bests)
    }

    fn grid() -> GridSize {
        GridSize::new(3, 4).unwrap()
    }

    #[test]
    fn stores_when_no_previous_best_exists() {
        let (_, bests) = bests();
        assert_eq!(bests.read("alice", grid()), None);

        assert!(bests.maybe_write("alice", grid(), 20, 100));
        assert_eq!(
            bests.read("alice", grid()),
            Some(BestScore {
                moves: 20,
                seconds: 100
            })
        );
    }

    #[test]
    fn strict_improvement_rule() {
        let (_, bests) = bests();
        bests.maybe_write("bob", grid(), 18, 120);

        // Same moves, faster: replaces.
        assert!(bests.maybe_write("bob", grid(), 18, 119));
        // More moves, much faster: does not.
        assert!(!bests.maybe_write("bob", grid(), 19, 50));
        // Fewer moves, much slower: replaces.
        assert!(bests.maybe_write("bob", grid(), 17, 500));

        assert_eq!(
            bests.read("bob", grid()),
            Some(BestScore {
                moves: 17,
                seconds: 500
            })
        );
    }

    #[test]
    fn an_equal_result_is_not_a_rewrite() {
        let (_, bests) = bests();
        bests.maybe_write("carol", grid(), 18, 120);
        assert!(!bests.maybe_write("carol", grid(), 18, 120));
    }

    #[test]
    fn a_malformed_record_is_replaced_like_a_missing_one() {
        let (store, bests) = bests();
        store
            .set(&keys::best_key("dave", grid().cells()), r#"{"moves":"x"}"#)
            .unwrap();

        assert_eq!(bests.read("dave", grid()), None);
        assert!(bests.maybe_write("dave", grid(), 30, 300));
        assert_eq!(
            bests.read("dave", grid()),
            Some(BestScore {
                moves: 30,
                seconds: 300
            })
        );
    }

    #[test]
    fn records_are_scoped_per_grid() {
        let (_, bests) = bests();
        bests.maybe_write("erin", grid(), 10, 10);
        assert_eq!(bests.read("erin", GridSize::new(4, 4).unwrap()), None);
    }

    #[test]
    fn writes_announce_themselves_on_the_bus() {
        let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
        let bus = EventBus::new();
        let bests = BestScoreStore::new(store, bus.clone());
        let mut rx = bus.subscribe(crate::events::Topic::Storage);

        bests.maybe_write("alice", grid(), 20, 100);
        assert_eq!(
            rx.try_recv().unwrap(),
            Event::Storage(StorageEvent::BestScoreWritten {
                user: "alice".to_string(),
                cells: 12
            })
        );

        // A losing result writes nothing and signals nothing.
        bests.maybe_write("alice", grid(), 25, 100);
        assert!(rx.try_recv().is_err());
    }
}
