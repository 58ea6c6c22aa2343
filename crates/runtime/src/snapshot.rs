//! Single-slot persistence of an in-progress game.
//!
//! Makes a game resumable after the process goes away while keeping a
//! finished game non-resumable. Write failures are swallowed: the in-memory
//! state stays authoritative and the worst case is losing resumability for
//! this session, never in-memory correctness.

use std::sync::Arc;

use chrono::Utc;
use game_core::{GameState, GridSize};
use tracing::{debug, warn};

use crate::events::{Event, EventBus, StorageEvent};
use crate::keys;
use crate::records::{SNAPSHOT_VERSION, SnapshotRecord};
use crate::storage::KeyValueStore;

/// Durable single-slot view over the substrate for in-progress games.
pub struct SnapshotStore {
    store: Arc<dyn KeyValueStore>,
    bus: EventBus,
}

impl SnapshotStore {
    pub fn new(store: Arc<dyn KeyValueStore>, bus: EventBus) -> Self {
        Self { store, bus }
    }

    /// Restores the saved game for `grid`, or `None` when no usable
    /// snapshot exists.
    ///
    /// A record with a different format version or cell count is treated as
    /// absent — changing the grid invalidates any in-flight save. When the
    /// saved game was running, the seconds that passed since `saved_at` are
    /// credited to the restored counter, as if the timer had kept going.
    pub fn read(&self, grid: GridSize) -> Option<GameState> {
        let raw = match self.store.get(keys::SNAPSHOT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(%err, "snapshot read failed; treating as absent");
                return None;
            }
        };

        let record = SnapshotRecord::parse(&raw)?;
        if record.v != SNAPSHOT_VERSION || record.size != grid.cells() {
            debug!(
                version = record.v,
                size = record.size,
                grid = %grid,
                "ignoring snapshot for a different format or grid"
            );
            return None;
        }
        if record.deck.len() != record.size as usize {
            warn!("snapshot deck length disagrees with its cell count; treating as absent");
            return None;
        }

        let mut seconds = record.seconds;
        if record.running {
            let offline_ms = Utc::now().timestamp_millis() - record.saved_at;
            seconds += (offline_ms.max(0) / 1000) as u64;
        }

        Some(GameState::resume(
            record.deck,
            record.moves,
            record.found_pairs,
            record.running,
            seconds,
        ))
    }

    /// Persists the full game tuple, stamped with the format version, the
    /// grid's cell count, and the current time.
    pub fn write(&self, grid: GridSize, state: &GameState) {
        let record = SnapshotRecord {
            v: SNAPSHOT_VERSION,
            size: grid.cells(),
            deck: state.deck.clone(),
            moves: state.moves,
            found_pairs: state.found_pairs,
            running: state.running,
            seconds: state.seconds,
            saved_at: Utc::now().timestamp_millis(),
        };
        let raw = match serde_json::to_string(&record) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(%err, "snapshot serialization failed");
                return;
            }
        };
        if let Err(err) = self.store.set(keys::SNAPSHOT_KEY, &raw) {
            warn!(%err, "snapshot write failed; in-memory state remains authoritative");
            return;
        }
        self.bus.publish(Event::Storage(StorageEvent::SnapshotWritten {
            cells: grid.cells(),
        }));
    }

    /// Removes the persisted slot entirely. A finished game must never be
    /// offered for resumption.
    pub fn clear(&self) {
        if let Err(err) = self.store.remove(keys::SNAPSHOT_KEY) {
            warn!(%err, "snapshot clear failed");
            return;
        }
        self.bus.publish(Event::Storage(StorageEvent::SnapshotCleared));
    }
}
