//! Built-in symbol pool used when no external symbol source is supplied.

/// Default tile faces. 32 entries caps the built-in pool at an 8x8 board.
pub const SYMBOL_POOL: [&str; 32] = [
    "🍎", "🍌", "🍇", "🍑", "🍉", "🍓", "🍍", "🥝", "🍒", "🍐", "🍊", "🥥", "🍈", "🥕", "🌽", "🍆",
    "🥔", "🧄", "🧅", "🍄", "🥜", "🧀", "🥨", "🍪", "🍩", "🍰", "🧁", "🍔", "🍕", "🌮", "🍣", "🍤",
];

/// First `pairs` symbols from the built-in pool, fewer if the pool runs out
/// (deck generation reports the shortfall).
pub fn default_symbols(pairs: usize) -> Vec<String> {
    SYMBOL_POOL
        .iter()
        .take(pairs)
        .map(|s| (*s).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_a_prefix_of_the_pool() {
        let symbols = default_symbols(8);
        assert_eq!(symbols.len(), 8);
        assert_eq!(symbols[0], SYMBOL_POOL[0]);
        assert_eq!(symbols[7], SYMBOL_POOL[7]);
    }

    #[test]
    fn pool_has_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for symbol in SYMBOL_POOL {
            assert!(seen.insert(symbol), "duplicate symbol {symbol}");
        }
    }
}
