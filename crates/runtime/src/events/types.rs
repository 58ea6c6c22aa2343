//! Event payloads published on the bus.

/// Events emitted by the game worker as a board changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A deck was dealt or restored; counters may be non-zero after a resume.
    DeckReady { pairs: u32, resumed: bool },
    /// A tile was flipped face-up.
    TileRevealed { index: usize },
    /// A second pick matched its partner.
    PairMatched { found_pairs: u32 },
    /// A mismatched pair was flipped back after its display window.
    MismatchHidden { first: usize, second: usize },
    /// The seconds counter advanced.
    TimerTick { seconds: u64 },
    /// The final pair was found.
    GameCompleted { moves: u32, seconds: u64 },
}

/// Change signals emitted after substrate writes.
///
/// Another instance over the same store may subscribe to refresh its view;
/// delivery is best-effort and may be stale by the time it is observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageEvent {
    SnapshotWritten { cells: u32 },
    SnapshotCleared,
    BestScoreWritten { user: String, cells: u32 },
}
