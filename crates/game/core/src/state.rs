//! Authoritative in-memory state of one game.

use crate::deck::Deck;

/// Live state of a single game.
///
/// Counters and the deck are public for reading; the pending pick and the
/// board lock can only change through [`crate::engine::GameEngine`], which
/// keeps the pick/resolve transitions in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub deck: Deck,
    pub moves: u32,
    pub found_pairs: u32,
    pub seconds: u64,
    pub running: bool,
    pub(crate) first_pick: Option<usize>,
    pub(crate) locked: bool,
}

impl GameState {
    /// Fresh game over a newly dealt deck: all counters zero, board idle.
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            moves: 0,
            found_pairs: 0,
            seconds: 0,
            running: false,
            first_pick: None,
            locked: false,
        }
    }

    /// Rebuilds state from a persisted snapshot.
    ///
    /// The snapshot carries no pending pick or lock, so the board is
    /// normalized back to idle: any revealed-but-unmatched tile is hidden
    /// again. Without this, a tile revealed at save time could never be
    /// flipped back and its pair would become unwinnable.
    pub fn resume(deck: Deck, moves: u32, found_pairs: u32, running: bool, seconds: u64) -> Self {
        let mut state = Self {
            deck,
            moves,
            found_pairs,
            seconds,
            running,
            first_pick: None,
            locked: false,
        };
        for index in 0..state.deck.len() {
            if let Some(tile) = state.deck.get_mut(index)
                && tile.revealed
                && !tile.matched
            {
                tile.revealed = false;
            }
        }
        state
    }

    /// Number of symbol pairs on the board.
    pub fn pairs(&self) -> u32 {
        self.deck.pairs()
    }

    /// All pairs found.
    pub fn completed(&self) -> bool {
        !self.deck.is_empty() && self.found_pairs == self.pairs()
    }

    /// Index of the tile awaiting its partner, if any.
    pub fn first_pick(&self) -> Option<usize> {
        self.first_pick
    }

    /// Whether the board is rejecting input while a mismatch is displayed.
    pub fn locked(&self) -> bool {
        self.locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Deck;
    use crate::rng::PcgRng;
    use crate::symbols::default_symbols;

    fn dealt(pairs: usize) -> Deck {
        Deck::deal(&default_symbols(pairs), pairs, &mut PcgRng::new(3)).unwrap()
    }

    #[test]
    fn fresh_state_is_idle() {
        let state = GameState::new(dealt(2));
        assert_eq!(state.moves, 0);
        assert_eq!(state.found_pairs, 0);
        assert!(!state.running);
        assert!(!state.locked());
        assert_eq!(state.first_pick(), None);
        assert!(!state.completed());
    }

    #[test]
    fn resume_hides_revealed_unmatched_tiles() {
        let mut deck = dealt(2);
        // Simulate a snapshot taken mid-pick: one tile face-up, one pair matched.
        deck.get_mut(0).unwrap().revealed = true;
        deck.get_mut(1).unwrap().revealed = true;
        deck.get_mut(1).unwrap().matched = true;

        let state = GameState::resume(deck, 3, 1, true, 42);

        assert!(!state.deck.get(0).unwrap().revealed);
        assert!(state.deck.get(1).unwrap().revealed, "matched tiles stay up");
        assert_eq!(state.moves, 3);
        assert_eq!(state.found_pairs, 1);
        assert_eq!(state.seconds, 42);
        assert!(state.running);
        assert_eq!(state.first_pick(), None);
        assert!(!state.locked());
    }
}
