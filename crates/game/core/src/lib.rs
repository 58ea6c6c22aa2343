//! Deterministic memory-game logic shared across clients.
//!
//! `game-core` defines the canonical rules: board geometry, deck generation
//! and shuffling, and the pick/match state machine. All state mutation flows
//! through [`engine::GameEngine`], and the crate performs no I/O, takes no
//! clock, and draws no OS entropy — the runtime supplies seeds and schedules
//! time-based transitions.

pub mod deck;
pub mod engine;
pub mod grid;
pub mod rng;
pub mod state;
pub mod symbols;

pub use deck::{Deck, DeckError, Tile};
pub use engine::{GameEngine, PickIgnored, PickOutcome};
pub use grid::{GridError, GridSize};
pub use rng::{DeckRng, PcgRng};
pub use state::GameState;
pub use symbols::{SYMBOL_POOL, default_symbols};
