//! Game worker that owns the authoritative [`game_core::GameState`].
//!
//! Receives commands from [`crate::GameHandle`], drives transitions through
//! [`game_core::GameEngine`], publishes events to the bus, and keeps the
//! snapshot slot in sync. One worker per runtime instance; all game state
//! lives on this task, so no locks guard it.

use std::sync::Arc;
use std::time::Duration;

use game_core::{
    Deck, GameEngine, GameState, GridSize, PcgRng, PickOutcome, default_symbols,
};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::best::BestScoreStore;
use crate::error::Result;
use crate::events::{Event, EventBus, GameEvent};
use crate::handle::GameView;
use crate::leaderboard::{Leaderboard, LeaderboardRow};
use crate::providers::{SessionProvider, SymbolSource};
use crate::runtime::RuntimeConfig;
use crate::snapshot::SnapshotStore;

/// Commands that can be sent to the game worker.
pub(crate) enum Command {
    /// Discard the current game (and any snapshot) and deal a fresh deck.
    StartNew { reply: oneshot::Sender<Result<()>> },

    /// Player clicked the tile at `index`.
    TileClick {
        index: usize,
        reply: oneshot::Sender<()>,
    },

    /// Read-only projection of the current game.
    Query { reply: oneshot::Sender<GameView> },

    /// Ranked best scores for a grid (not necessarily the one in play).
    Leaderboard {
        grid: GridSize,
        limit: usize,
        reply: oneshot::Sender<Vec<LeaderboardRow>>,
    },

    /// Deferred mismatch conceal, scheduled when a pair failed to match.
    /// Carries the deal generation it was scheduled under; a stale
    /// generation means a restart happened during the display window and
    /// the conceal must not touch the new deck.
    Conceal {
        first: usize,
        second: usize,
        generation: u64,
    },

    /// Shut the worker down gracefully.
    Shutdown,
}

/// Deals a fresh game: symbols from the source, or the built-in pool when
/// the source has nothing to offer.
pub(crate) async fn deal_fresh(
    grid: GridSize,
    symbols: &dyn SymbolSource,
    seed: u64,
) -> Result<GameState> {
    let pairs = grid.pairs() as usize;
    let list = match symbols.symbols(pairs).await {
        Some(list) => list,
        None => default_symbols(pairs),
    };
    let deck = Deck::deal(&list, pairs, &mut PcgRng::new(seed))?;
    Ok(GameState::new(deck))
}

/// Background task that processes game commands and the timer tick.
pub(crate) struct GameWorker {
    pub(crate) state: GameState,
    pub(crate) generation: u64,
    pub(crate) grid: GridSize,
    pub(crate) config: RuntimeConfig,
    pub(crate) session: Arc<dyn SessionProvider>,
    pub(crate) symbols: Arc<dyn SymbolSource>,
    pub(crate) snapshots: SnapshotStore,
    pub(crate) bests: BestScoreStore,
    pub(crate) leaderboard: Leaderboard,
    pub(crate) bus: EventBus,
    pub(crate) command_rx: mpsc::Receiver<Command>,
    /// Weak sender for deferred conceals, so an in-flight mismatch window
    /// never keeps a discarded runtime's worker alive.
    pub(crate) command_tx: mpsc::WeakSender<Command>,
    pub(crate) deck_seed: Option<u64>,
}

impl GameWorker {
    /// Main worker loop: commands interleaved with a once-per-second tick.
    pub(crate) async fn run(mut self) {
        let mut ticker = time::interval_at(
            time::Instant::now() + Duration::from_secs(1),
            Duration::from_secs(1),
        );
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(Command::Shutdown) | None => break,
                        Some(cmd) => self.handle_command(cmd).await,
                    }
                }
                _ = ticker.tick() => self.handle_tick(),
            }
        }

        info!("game worker stopped");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::StartNew { reply } => {
                let result = self.start_new().await;
                if reply.send(result).is_err() {
                    debug!("start-new reply channel closed (caller dropped)");
                }
            }
            Command::TileClick { index, reply } => {
                self.handle_click(index);
                if reply.send(()).is_err() {
                    debug!("tile-click reply channel closed (caller dropped)");
                }
            }
            Command::Query { reply } => {
                if reply.send(self.view()).is_err() {
                    debug!("query reply channel closed (caller dropped)");
                }
            }
            Command::Leaderboard { grid, limit, reply } => {
                let rows = self.leaderboard.list(grid, limit);
                if reply.send(rows).is_err() {
                    debug!("leaderboard reply channel closed (caller dropped)");
                }
            }
            Command::Conceal {
                first,
                second,
                generation,
            } => self.handle_conceal(first, second, generation),
            Command::Shutdown => unreachable!("handled in the select loop"),
        }
    }

    fn handle_click(&mut self, index: usize) {
        match GameEngine::new(&mut self.state).pick(index) {
            PickOutcome::Ignored(reason) => {
                debug!(index, %reason, "pick ignored");
            }
            PickOutcome::FirstRevealed { index } => {
                self.bus
                    .publish(Event::Game(GameEvent::TileRevealed { index }));
                self.snapshots.write(self.grid, &self.state);
            }
            PickOutcome::Matched {
                second, completed, ..
            } => {
                self.bus
                    .publish(Event::Game(GameEvent::TileRevealed { index: second }));
                self.bus.publish(Event::Game(GameEvent::PairMatched {
                    found_pairs: self.state.found_pairs,
                }));
                if completed {
                    self.finish_game();
                } else {
                    self.snapshots.write(self.grid, &self.state);
                }
            }
            PickOutcome::Mismatched { first, second } => {
                self.bus
                    .publish(Event::Game(GameEvent::TileRevealed { index: second }));
                self.snapshots.write(self.grid, &self.state);
                self.schedule_conceal(first, second);
            }
        }
    }

    /// Spawns the fire-and-forget task that flips a mismatched pair back
    /// after the display window.
    fn schedule_conceal(&self, first: usize, second: usize) {
        let tx = self.command_tx.clone();
        let generation = self.generation;
        let delay = self.config.mismatch_delay;
        tokio::spawn(async move {
            time::sleep(delay).await;
            let Some(tx) = tx.upgrade() else {
                debug!("worker gone before mismatch conceal fired");
                return;
            };
            if tx
                .send(Command::Conceal {
                    first,
                    second,
                    generation,
                })
                .await
                .is_err()
            {
                debug!("worker gone before mismatch conceal fired");
            }
        });
    }

    fn handle_conceal(&mut self, first: usize, second: usize, generation: u64) {
        if generation != self.generation {
            debug!(generation, "dropping conceal scheduled under a previous deal");
            return;
        }
        GameEngine::new(&mut self.state).conceal_mismatch(first, second);
        self.bus
            .publish(Event::Game(GameEvent::MismatchHidden { first, second }));
        self.snapshots.write(self.grid, &self.state);
    }

    fn handle_tick(&mut self) {
        let Some(seconds) = GameEngine::new(&mut self.state).tick() else {
            return;
        };
        self.bus
            .publish(Event::Game(GameEvent::TimerTick { seconds }));

        // Periodic save purely off the tick, bounding write volume while a
        // game sits running.
        let period = self.config.autosave_period_secs;
        if period != 0 && seconds % period == 0 {
            self.snapshots.write(self.grid, &self.state);
        }
    }

    async fn start_new(&mut self) -> Result<()> {
        let seed = self.deck_seed.unwrap_or_else(rand::random);
        let state = deal_fresh(self.grid, self.symbols.as_ref(), seed).await?;
        // The bumped generation turns any conceal still in flight for the
        // old deck into a no-op. Bumped only once the deal succeeded: a
        // failed deal leaves the old game in place, conceal included.
        self.generation = self.generation.wrapping_add(1);
        self.state = state;
        self.snapshots.clear();
        self.bus.publish(Event::Game(GameEvent::DeckReady {
            pairs: self.state.pairs(),
            resumed: false,
        }));
        info!(grid = %self.grid, "new game started");
        Ok(())
    }

    fn finish_game(&mut self) {
        let user = self.session.current_user();
        let (moves, seconds) = (self.state.moves, self.state.seconds);
        self.bests.maybe_write(&user, self.grid, moves, seconds);
        self.snapshots.clear();
        self.bus
            .publish(Event::Game(GameEvent::GameCompleted { moves, seconds }));
        info!(%user, moves, seconds, grid = %self.grid, "game completed");
    }

    fn view(&self) -> GameView {
        GameView {
            user: self.session.current_user(),
            tiles: self.state.deck.tiles().to_vec(),
            moves: self.state.moves,
            found_pairs: self.state.found_pairs,
            pairs: self.state.pairs(),
            seconds: self.state.seconds,
            running: self.state.running,
            locked: self.state.locked(),
            best: self.bests.read(&self.session.current_user(), self.grid),
        }
    }
}
