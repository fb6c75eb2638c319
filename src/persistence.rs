//! Versioned flat encoding of a state cache
//!
//! A cache is stored as a document with a format version and a sorted list
//! of per-state codes. A code is the nine-character board code, optionally
//! followed by `|` and the flattened desirability `O,<score>,X,<score>`:
//!
//! ```text
//! {"version":2,"codes":["....O....|O,12,X,-3","X.O......"]}
//! ```
//!
//! Version 1 files carry bare board codes only. The earliest files were a
//! plain JSON array of board codes and are read as version 1.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    cache::{CachedState, StateCache},
    desirability::Desirability,
    tictactoe::{Board, Player},
};

/// Format written by this crate
pub const FORMAT_VERSION: u32 = 2;

/// Board codes without desirability
pub const LEGACY_VERSION: u32 = 1;

const SCORE_DELIMITER: char = '|';

/// Serialized form of a [`StateCache`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheDocument {
    pub version: u32,
    pub codes: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDocument {
    Versioned(CacheDocument),
    Bare(Vec<String>),
}

fn malformed(message: impl Into<String>) -> Error {
    Error::MalformedPersistence {
        message: message.into(),
    }
}

impl CacheDocument {
    /// Encode every cached state at the current format version
    pub fn from_cache(cache: &StateCache) -> Self {
        let mut codes: Vec<String> = cache.iter().map(|state| encode_state(&state)).collect();
        codes.sort();
        Self {
            version: FORMAT_VERSION,
            codes,
        }
    }

    /// Parse a JSON document, accepting the bare-array legacy layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPersistence`] if the bytes are neither layout.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let parsed: JsonDocument = serde_json::from_slice(bytes)
            .map_err(|e| malformed(format!("unreadable cache document: {e}")))?;
        Ok(match parsed {
            JsonDocument::Versioned(document) => document,
            JsonDocument::Bare(codes) => CacheDocument {
                version: LEGACY_VERSION,
                codes,
            },
        })
    }

    /// Decode every code and rebuild the cache through symmetry-aware adds.
    ///
    /// Nothing is built unless every code decodes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPersistence`] for an unknown version or any
    /// malformed code.
    pub fn into_cache(self) -> Result<StateCache> {
        if self.version != FORMAT_VERSION && self.version != LEGACY_VERSION {
            return Err(malformed(format!(
                "unsupported format version {} (expected {LEGACY_VERSION} or {FORMAT_VERSION})",
                self.version
            )));
        }

        let states = self
            .codes
            .iter()
            .map(|code| decode_state(code, self.version))
            .collect::<Result<Vec<_>>>()?;

        let mut cache = StateCache::new();
        for state in states {
            cache.add_state(state);
        }
        Ok(cache)
    }
}

/// Code for one cached state; unscored states get the bare board code
pub fn encode_state(state: &CachedState) -> String {
    let board = state.board.to_code();
    match state.desirability {
        None => board,
        Some(desirability) => {
            let flat: Vec<String> = desirability
                .entries()
                .iter()
                .map(|(player, score)| format!("{player},{score}"))
                .collect();
            format!("{board}{SCORE_DELIMITER}{}", flat.join(","))
        }
    }
}

/// Parse one state code written at `version`
pub fn decode_state(code: &str, version: u32) -> Result<CachedState> {
    let (board_code, scores) = match code.split_once(SCORE_DELIMITER) {
        Some(_) if version == LEGACY_VERSION => {
            return Err(malformed(format!(
                "version {LEGACY_VERSION} code '{code}' must not carry scores"
            )));
        }
        Some((board, scores)) => (board, Some(scores)),
        None => (code, None),
    };

    let board = Board::from_code(board_code).map_err(|e| malformed(e.to_string()))?;
    let state = CachedState::new(board);
    match scores {
        None => Ok(state),
        Some(flat) => Ok(state.with_desirability(decode_desirability(flat, code)?)),
    }
}

fn decode_desirability(flat: &str, code: &str) -> Result<Desirability> {
    let fields: Vec<&str> = flat.split(',').collect();
    if fields.len() != 2 * Player::ALL.len() {
        return Err(malformed(format!(
            "expected 'mark,score,mark,score' in '{code}'"
        )));
    }

    let mut desirability = Desirability::ZERO;
    let mut seen = Vec::with_capacity(2);
    for pair in fields.chunks(2) {
        let player = match pair[0] {
            "O" => Player::O,
            "X" => Player::X,
            other => return Err(malformed(format!("invalid mark '{other}' in '{code}'"))),
        };
        let score: i64 = pair[1]
            .parse()
            .map_err(|_| malformed(format!("invalid score '{}' in '{code}'", pair[1])))?;
        if seen.contains(&player) {
            return Err(malformed(format!("mark {player} repeated in '{code}'")));
        }
        seen.push(player);
        desirability.set(player, score);
    }
    Ok(desirability)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(code: &str) -> Board {
        Board::from_code(code).unwrap()
    }

    #[test]
    fn test_encode_scored_and_unscored() {
        let unscored = CachedState::new(board("X.O......"));
        assert_eq!(encode_state(&unscored), "X.O......");

        let scored = unscored.with_desirability(Desirability::new(12, -3));
        assert_eq!(encode_state(&scored), "X.O......|O,12,X,-3");
    }

    #[test]
    fn test_decode_accepts_either_mark_order() {
        let state = decode_state("....O....|X,-3,O,12", FORMAT_VERSION).unwrap();
        assert_eq!(state.board, board("....O...."));
        assert_eq!(state.desirability, Some(Desirability::new(12, -3)));
    }

    #[test]
    fn test_decode_rejects_malformed_codes() {
        for bad in [
            "X.O.....",
            "X.O......|",
            "X.O......|O,1",
            "X.O......|O,1,O,2",
            "X.O......|O,one,X,2",
            "X.O......|Q,1,X,2",
            "X.Z......",
            "x........",
            "X O......",
            "O........|O, 1,X,-1",
            "O........|o,1,x,-1",
            "O........|O,1, X,-1",
        ] {
            assert!(
                matches!(
                    decode_state(bad, FORMAT_VERSION),
                    Err(Error::MalformedPersistence { .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_legacy_codes_must_be_bare() {
        assert!(decode_state("X.O......", LEGACY_VERSION).is_ok());
        assert!(decode_state("X.O......|O,1,X,2", LEGACY_VERSION).is_err());
    }

    #[test]
    fn test_bare_array_is_legacy() {
        let doc = CacheDocument::from_json_slice(br#"["X........", "....O...."]"#).unwrap();
        assert_eq!(doc.version, LEGACY_VERSION);
        let cache = doc.into_cache().unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.scored_count(), 0);
    }

    #[test]
    fn test_legacy_array_with_loose_codes_is_rejected() {
        let doc = CacheDocument::from_json_slice(br#"["x........", "    o    "]"#).unwrap();
        assert!(matches!(
            doc.into_cache(),
            Err(Error::MalformedPersistence { .. })
        ));
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let doc = CacheDocument {
            version: 7,
            codes: vec!["X........".to_string()],
        };
        assert!(matches!(
            doc.into_cache(),
            Err(Error::MalformedPersistence { .. })
        ));
    }

    #[test]
    fn test_garbage_json_is_malformed() {
        assert!(matches!(
            CacheDocument::from_json_slice(b"{\"codes\": 3}"),
            Err(Error::MalformedPersistence { .. })
        ));
    }

    #[test]
    fn test_load_merges_isomorphs() {
        let doc = CacheDocument {
            version: FORMAT_VERSION,
            codes: vec!["X........|O,-1,X,1".to_string(), "..X......".to_string()],
        };
        let cache = doc.into_cache().unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.lookup(&board("..X......")).unwrap().state.desirability,
            Some(Desirability::new(-1, 1))
        );
    }

    #[test]
    fn test_document_codes_are_sorted() {
        let cache: StateCache = [board("X........"), board("....O...."), Board::empty()]
            .into_iter()
            .collect();
        let doc = CacheDocument::from_cache(&cache);
        assert_eq!(doc.version, FORMAT_VERSION);
        assert_eq!(doc.codes, vec![".........", "....O....", "X........"]);
    }
}
