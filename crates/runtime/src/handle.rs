//! Client-facing handle for one runtime instance.

use game_core::{GridSize, Tile};
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::error::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::leaderboard::LeaderboardRow;
use crate::records::BestScore;
use crate::worker::Command;

/// Read-only projection of the live game for presentation.
///
/// Tiles carry their symbols even while face-down; what to show for a hidden
/// tile is the presentation layer's call.
#[derive(Debug, Clone)]
pub struct GameView {
    pub user: String,
    pub tiles: Vec<Tile>,
    pub moves: u32,
    pub found_pairs: u32,
    pub pairs: u32,
    pub seconds: u64,
    pub running: bool,
    pub locked: bool,
    pub best: Option<BestScore>,
}

/// Cloneable facade over the game worker.
#[derive(Clone)]
pub struct GameHandle {
    command_tx: mpsc::Sender<Command>,
    bus: EventBus,
}

impl GameHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, bus: EventBus) -> Self {
        Self { command_tx, bus }
    }

    /// Discards the current game and any snapshot, then deals fresh.
    pub async fn start_new(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::StartNew { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Offers a click on the tile at `index`. Invalid picks are no-ops, not
    /// errors.
    pub async fn tile_click(&self, index: usize) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::TileClick {
                index,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Snapshot of the current game for rendering.
    pub async fn view(&self) -> Result<GameView> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Query { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Ranked best scores for `grid`, at most `limit` rows. Recomputed from
    /// the store on every call.
    pub async fn leaderboard(&self, grid: GridSize, limit: usize) -> Result<Vec<LeaderboardRow>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Leaderboard {
                grid,
                limit,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribes to a topic on this instance's event bus.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    pub(crate) async fn send_shutdown(&self) {
        if self.command_tx.send(Command::Shutdown).await.is_err() {
            tracing::debug!("worker already stopped");
        }
    }
}
