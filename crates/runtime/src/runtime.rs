//! High-level runtime orchestrator.
//!
//! The runtime owns the game worker, wires up the command channel and event
//! bus, and exposes a builder-based API. Construction is an explicit
//! lifecycle: [`RuntimeBuilder::build`] consults the snapshot store before
//! dealing fresh, [`Runtime::shutdown`] joins the worker. Nothing here is a
//! process-wide singleton; embed as many instances as you have boards.

use std::sync::Arc;
use std::time::Duration;

use game_core::GridSize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::best::BestScoreStore;
use crate::error::{Result, RuntimeError};
use crate::events::{Event, EventBus, GameEvent, Topic};
use crate::handle::GameHandle;
use crate::leaderboard::Leaderboard;
use crate::providers::{BuiltinPool, SessionProvider, StaticSession, SymbolSource};
use crate::snapshot::SnapshotStore;
use crate::storage::KeyValueStore;
use crate::worker::{self, GameWorker};

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Board dimensions for this instance.
    pub grid: GridSize,
    /// How long a mismatched pair stays on display before flipping back.
    pub mismatch_delay: Duration,
    /// Periodic snapshot cadence in game-seconds while running. Zero
    /// disables the periodic save (structural saves still happen).
    pub autosave_period_secs: u64,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            mismatch_delay: Duration::from_millis(650),
            autosave_period_secs: 5,
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// One running game instance.
///
/// Owns the worker task; [`GameHandle`] is the cloneable facade handed to
/// presentation code.
pub struct Runtime {
    handle: GameHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime.
    pub fn handle(&self) -> GameHandle {
        self.handle.clone()
    }

    /// Subscribe to a topic on this runtime's event bus.
    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shut down gracefully, joining the worker task.
    pub async fn shutdown(self) -> Result<()> {
        self.handle.send_shutdown().await;
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    store: Option<Arc<dyn KeyValueStore>>,
    session: Option<Arc<dyn SessionProvider>>,
    symbols: Option<Arc<dyn SymbolSource>>,
    bus: Option<EventBus>,
    deck_seed: Option<u64>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            store: None,
            session: None,
            symbols: None,
            bus: None,
            deck_seed: None,
        }
    }

    /// Override runtime configuration.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Board dimensions (keeps the rest of the configuration).
    pub fn grid(mut self, grid: GridSize) -> Self {
        self.config.grid = grid;
        self
    }

    /// Set the required durable key-value store.
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the session provider. Defaults to the anonymous guest session.
    pub fn session(mut self, session: impl SessionProvider + 'static) -> Self {
        self.session = Some(Arc::new(session));
        self
    }

    /// Set the symbol source. Defaults to the built-in pool.
    pub fn symbol_source(mut self, symbols: impl SymbolSource + 'static) -> Self {
        self.symbols = Some(Arc::new(symbols));
        self
    }

    /// Share an existing event bus instead of creating a private one. Lets
    /// several instances over the same store observe each other's writes.
    pub fn event_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Fix the shuffle seed for every deal. Test hook; omit for play.
    pub fn deck_seed(mut self, seed: u64) -> Self {
        self.deck_seed = Some(seed);
        self
    }

    /// Build the runtime: restore the saved game if one matches the grid,
    /// deal fresh otherwise, then spawn the worker.
    pub async fn build(self) -> Result<Runtime> {
        let store = self.store.ok_or(RuntimeError::MissingStore)?;
        let session = self
            .session
            .unwrap_or_else(|| Arc::new(StaticSession::guest()));
        let symbols = self.symbols.unwrap_or_else(|| Arc::new(BuiltinPool));
        let bus = self
            .bus
            .unwrap_or_else(|| EventBus::with_capacity(self.config.event_buffer_size));

        let snapshots = SnapshotStore::new(store.clone(), bus.clone());
        let bests = BestScoreStore::new(store.clone(), bus.clone());
        let leaderboard = Leaderboard::new(store);

        let grid = self.config.grid;
        let (state, resumed) = match snapshots.read(grid) {
            Some(state) => {
                info!(grid = %grid, moves = state.moves, "resuming saved game");
                (state, true)
            }
            None => {
                let seed = self.deck_seed.unwrap_or_else(rand::random);
                let state = worker::deal_fresh(grid, symbols.as_ref(), seed).await?;
                (state, false)
            }
        };
        let pairs = state.pairs();

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);
        let handle = GameHandle::new(command_tx.clone(), bus.clone());

        let worker = GameWorker {
            state,
            generation: 0,
            grid,
            config: self.config,
            session,
            symbols,
            snapshots,
            bests,
            leaderboard,
            bus: bus.clone(),
            command_rx,
            command_tx: command_tx.downgrade(),
            deck_seed: self.deck_seed,
        };
        let worker_handle = tokio::spawn(worker.run());

        bus.publish(Event::Game(GameEvent::DeckReady { pairs, resumed }));

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
