//! Pick/match state machine.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]: every
//! board mutation (picks, the deferred mismatch conceal, timer ticks) flows
//! through it. The board moves between three acceptance states — idle, one
//! tile pending, and locked while a mismatch is on display. Scheduling the
//! mismatch delay is the caller's job; the engine only records the lock and
//! applies the conceal when told to.

use strum::Display;

use crate::state::GameState;

/// Why a pick left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum PickIgnored {
    /// A mismatch is on display; input is rejected until the conceal runs.
    BoardLocked,
    /// No tile at that index.
    OutOfBounds,
    /// The tile already found its partner.
    AlreadyMatched,
    /// The tile is already face-up.
    AlreadyRevealed,
}

/// Result of offering a tile pick to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// The pick was a no-op; state is unchanged.
    Ignored(PickIgnored),
    /// First tile of a pair revealed; awaiting the second pick.
    FirstRevealed { index: usize },
    /// Second pick matched the first. `completed` is set when this was the
    /// final pair.
    Matched {
        first: usize,
        second: usize,
        completed: bool,
    },
    /// Second pick did not match. Both tiles stay face-up and the board is
    /// locked; the caller must conceal them after the display window.
    Mismatched { first: usize, second: usize },
}

/// Reducer driving all [`GameState`] transitions.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Handles a click on the tile at `index`.
    ///
    /// Picks on locked boards, matched tiles, or already-revealed tiles are
    /// no-ops. The very first pick of a fresh game starts the seconds
    /// counter. A completed second pick always costs exactly one move,
    /// matched or not.
    pub fn pick(&mut self, index: usize) -> PickOutcome {
        if self.state.locked {
            return PickOutcome::Ignored(PickIgnored::BoardLocked);
        }
        let Some(tile) = self.state.deck.get(index) else {
            return PickOutcome::Ignored(PickIgnored::OutOfBounds);
        };
        if tile.matched {
            return PickOutcome::Ignored(PickIgnored::AlreadyMatched);
        }
        if tile.revealed {
            return PickOutcome::Ignored(PickIgnored::AlreadyRevealed);
        }

        if !self.state.running && self.state.moves == 0 && self.state.first_pick.is_none() {
            self.state.running = true;
        }

        if let Some(tile) = self.state.deck.get_mut(index) {
            tile.revealed = true;
        }

        let Some(first) = self.state.first_pick.take() else {
            self.state.first_pick = Some(index);
            return PickOutcome::FirstRevealed { index };
        };

        self.state.moves += 1;

        let matched = match (self.state.deck.get(first), self.state.deck.get(index)) {
            (Some(a), Some(b)) => a.symbol == b.symbol,
            _ => false,
        };

        if matched {
            for i in [first, index] {
                if let Some(tile) = self.state.deck.get_mut(i) {
                    tile.matched = true;
                }
            }
            self.state.found_pairs += 1;
            let completed = self.state.completed();
            if completed {
                self.state.running = false;
            }
            return PickOutcome::Matched {
                first,
                second: index,
                completed,
            };
        }

        self.state.locked = true;
        PickOutcome::Mismatched {
            first,
            second: index,
        }
    }

    /// Hides a mismatched pair after its display window and unlocks the board.
    ///
    /// Both indices are re-checked before touching anything: the deck may
    /// have been replaced or a tile matched in the meantime, and a stale
    /// conceal must never flip a tile that earned its face-up state.
    pub fn conceal_mismatch(&mut self, first: usize, second: usize) {
        for index in [first, second] {
            if let Some(tile) = self.state.deck.get_mut(index)
                && !tile.matched
            {
                tile.revealed = false;
            }
        }
        self.state.locked = false;
    }

    /// Advances the seconds counter by one if the game is running.
    ///
    /// Returns the new count, or `None` when the timer is stopped.
    pub fn tick(&mut self) -> Option<u64> {
        if !self.state.running {
            return None;
        }
        self.state.seconds += 1;
        Some(self.state.seconds)
    }
}
