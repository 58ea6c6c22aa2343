//! Persisted record schemas and the validation boundary.
//!
//! Everything read back from the key-value substrate passes through the
//! `parse` constructors here, which turn any malformed value — broken JSON,
//! wrong field types, missing fields — into absence. Another instance over
//! the same substrate may interleave a partial or differently-shaped write
//! at any time, so a failed parse is an expected condition, not a fault.

use game_core::Deck;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Format version stamped into every snapshot record.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A player's personal record for one grid size.
///
/// Field order matters: the derived ordering compares `moves` first and
/// breaks ties on `seconds`, which is the single ranking rule used by both
/// the best-score store and the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BestScore {
    pub moves: u32,
    pub seconds: u64,
}

impl BestScore {
    /// Parses a persisted best score, treating malformed values as absent.
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(score) => Some(score),
            Err(err) => {
                warn!(%err, "discarding malformed best-score record");
                None
            }
        }
    }
}

/// Durable form of an in-progress game, one slot per store.
///
/// `saved_at` is epoch milliseconds at write time; restores use it to credit
/// the seconds that elapsed while no runtime was loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub v: u32,
    pub size: u32,
    pub deck: Deck,
    pub moves: u32,
    pub found_pairs: u32,
    pub running: bool,
    pub seconds: u64,
    pub saved_at: i64,
}

impl SnapshotRecord {
    /// Parses a persisted snapshot, treating malformed values as absent.
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(%err, "discarding malformed snapshot record");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_score_roundtrips() {
        let raw = serde_json::to_string(&BestScore {
            moves: 18,
            seconds: 120,
        })
        .unwrap();
        assert_eq!(
            BestScore::parse(&raw),
            Some(BestScore {
                moves: 18,
                seconds: 120
            })
        );
    }

    #[test]
    fn malformed_best_scores_read_as_absent() {
        for raw in [
            "",
            "not json",
            "[]",
            r#"{"moves":"x"}"#,
            r#"{"moves":18}"#,
            r#"{"moves":18,"seconds":"slow"}"#,
            r#"{"moves":-3,"seconds":10}"#,
            r#"{"moves":1.5,"seconds":10}"#,
        ] {
            assert_eq!(BestScore::parse(raw), None, "accepted {raw:?}");
        }
    }

    #[test]
    fn ordering_prefers_fewer_moves_then_less_time() {
        let base = BestScore {
            moves: 18,
            seconds: 120,
        };
        assert!(BestScore { moves: 17, seconds: 500 } < base);
        assert!(BestScore { moves: 18, seconds: 119 } < base);
        assert!(BestScore { moves: 19, seconds: 50 } > base);
    }

    #[test]
    fn malformed_snapshots_read_as_absent() {
        for raw in ["", "null", "{}", r#"{"v":1,"size":"big"}"#] {
            assert_eq!(SnapshotRecord::parse(raw), None, "accepted {raw:?}");
        }
    }
}
