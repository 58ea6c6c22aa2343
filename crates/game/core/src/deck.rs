//! Tiles and deck generation.

use thiserror::Error;

use crate::rng::DeckRng;

/// Errors raised when dealing a deck.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("symbol source supplied {available} symbols but {needed} pairs were requested")]
    NotEnoughSymbols { needed: usize, available: usize },
}

/// One face-down/face-up playing piece.
///
/// `symbol` identifies the pairing; it may be display text or an opaque image
/// identifier. Tile identity is `id`, not board position.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub id: u32,
    pub symbol: String,
    pub revealed: bool,
    pub matched: bool,
}

impl Tile {
    fn hidden(id: u32, symbol: String) -> Self {
        Self {
            id,
            symbol,
            revealed: false,
            matched: false,
        }
    }
}

/// The full ordered tile set for one game.
///
/// Order is the post-shuffle presentation order. Every symbol in a dealt deck
/// appears in exactly two tiles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Deck {
    tiles: Vec<Tile>,
}

impl Deck {
    /// Deals a shuffled deck of `2 * pairs` tiles.
    ///
    /// Selection from `symbols` is deterministic (the first `pairs` entries);
    /// only the ordering is random. Tile ids are assigned `0..2*pairs` before
    /// the shuffle, so id and final position are unrelated.
    pub fn deal(
        symbols: &[String],
        pairs: usize,
        rng: &mut impl DeckRng,
    ) -> Result<Self, DeckError> {
        if symbols.len() < pairs {
            return Err(DeckError::NotEnoughSymbols {
                needed: pairs,
                available: symbols.len(),
            });
        }

        let mut tiles = Vec::with_capacity(pairs * 2);
        let mut id = 0;
        for symbol in &symbols[..pairs] {
            for _ in 0..2 {
                tiles.push(Tile::hidden(id, symbol.clone()));
                id += 1;
            }
        }

        shuffle(&mut tiles, rng);
        Ok(Self { tiles })
    }

    /// Rebuilds a deck from already-dealt tiles (snapshot restore).
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of symbol pairs in this deck.
    pub fn pairs(&self) -> u32 {
        (self.tiles.len() / 2) as u32
    }

    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Tile> {
        self.tiles.get_mut(index)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }
}

/// Unbiased Fisher-Yates: walk from the last index down to 1, swapping with a
/// uniformly chosen index in `[0, i]`.
fn shuffle(tiles: &mut [Tile], rng: &mut impl DeckRng) {
    for i in (1..tiles.len()).rev() {
        let j = rng.index_below(i as u32 + 1) as usize;
        tiles.swap(i, j);
    }
}
