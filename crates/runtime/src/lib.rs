//! Runtime orchestration for the memory game.
//!
//! This crate wires the deterministic rules from `game-core` to everything
//! the rules deliberately leave out: durable storage, resumable snapshots
//! with offline-time reconciliation, per-user best scores, the derived
//! leaderboard, the event bus, and the timing of the mismatch display
//! window. Consumers embed [`Runtime`] and drive a game through
//! [`GameHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`storage`] is the shared durable key-value substrate
//! - [`snapshot`], [`best`], and [`leaderboard`] are independent persistence
//!   views over that substrate
//! - [`events`] provides the topic-based bus for board changes and
//!   cross-instance change signals
//! - [`providers`] holds the session and symbol collaborator seams

pub mod best;
pub mod events;
pub mod keys;
pub mod leaderboard;
pub mod providers;
pub mod records;
pub mod runtime;
pub mod snapshot;
pub mod storage;

mod error;
mod handle;
mod worker;

pub use best::BestScoreStore;
pub use error::{Result, RuntimeError};
pub use events::{Event, EventBus, GameEvent, StorageEvent, Topic};
pub use handle::{GameHandle, GameView};
pub use leaderboard::{Leaderboard, LeaderboardRow};
pub use providers::{
    BuiltinPool, InvalidUsername, SessionProvider, StaticSession, SymbolSource, validate_username,
};
pub use records::{BestScore, SNAPSHOT_VERSION, SnapshotRecord};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use snapshot::SnapshotStore;
pub use storage::{FileStore, InMemoryStore, KeyValueStore, StorageError};
