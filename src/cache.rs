//! Symmetry-aware store of canonical game states
//!
//! The cache keeps one representative board per symmetry class: whichever
//! isomorph was added first. Keys are the boards themselves, so hashing only
//! ever sees the cells and never the desirability attached to them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    desirability::Desirability,
    tictactoe::{Board, D4Transform, SymmetryPair},
};

/// A stored canonical board with its desirability, if computed yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedState {
    pub board: Board,
    pub desirability: Option<Desirability>,
}

impl CachedState {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            desirability: None,
        }
    }

    #[must_use]
    pub fn with_desirability(mut self, desirability: Desirability) -> Self {
        self.desirability = Some(desirability);
        self
    }
}

/// Result of a symmetry-aware lookup.
///
/// `transform` maps the queried board onto the stored canonical board and
/// `inverse` maps it back, so `inverse(transform(query)) == query`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheHit {
    pub state: CachedState,
    pub transform: D4Transform,
    pub inverse: D4Transform,
}

impl CacheHit {
    /// The stored board re-expressed in the caller's orientation
    pub fn to_original(&self) -> Board {
        self.state.board.transform(&self.inverse)
    }
}

/// Canonical state cache.
///
/// Entries are only created by [`StateCache::add`] and only modified by
/// [`StateCache::update`] or [`StateCache::reset_desirability`]; callers get
/// copies, never references into the map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateCache {
    states: HashMap<Board, Option<Desirability>>,
}

impl StateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of canonical classes stored
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of stored states with desirability filled in
    pub fn scored_count(&self) -> usize {
        self.states.values().filter(|d| d.is_some()).count()
    }

    /// True iff some isomorph of `board` is stored
    pub fn contains(&self, board: &Board) -> bool {
        board
            .isomorphs()
            .iter()
            .any(|iso| self.states.contains_key(iso))
    }

    /// Insert `board` as a new canonical entry unless its class is already
    /// present. Returns whether an entry was created.
    pub fn add(&mut self, board: Board) -> bool {
        self.add_state(CachedState::new(board))
    }

    /// Like [`StateCache::add`], keeping the state's desirability when the
    /// class is new.
    pub fn add_state(&mut self, state: CachedState) -> bool {
        if self.contains(&state.board) {
            return false;
        }
        self.states.insert(state.board, state.desirability);
        true
    }

    /// Find the stored entry for `board`'s class.
    ///
    /// Symmetries are tried in group order and the first whose image of
    /// `board` is stored wins.
    pub fn lookup(&self, board: &Board) -> Option<CacheHit> {
        SymmetryPair::all().into_iter().find_map(|pair| {
            let image = board.transform(&pair.transform);
            self.states.get(&image).map(|&desirability| CacheHit {
                state: CachedState {
                    board: image,
                    desirability,
                },
                transform: pair.transform,
                inverse: pair.inverse,
            })
        })
    }

    /// Look `board` up, first adding it as a new canonical entry if its
    /// class is absent
    pub fn resolve(&mut self, board: Board) -> CacheHit {
        if let Some(hit) = self.lookup(&board) {
            return hit;
        }
        self.states.insert(board, None);
        let [identity, ..] = SymmetryPair::all();
        CacheHit {
            state: CachedState::new(board),
            transform: identity.transform,
            inverse: identity.inverse,
        }
    }

    /// The entry stored under exactly this board, without symmetry search
    pub fn get(&self, board: &Board) -> Option<CachedState> {
        self.states.get(board).map(|&desirability| CachedState {
            board: *board,
            desirability,
        })
    }

    /// Replace the entry for `state.board`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] unless `state.board` is literally a stored
    /// canonical board; an isomorph of one is not accepted.
    pub fn update(&mut self, state: CachedState) -> Result<()> {
        match self.states.get_mut(&state.board) {
            Some(slot) => {
                *slot = state.desirability;
                Ok(())
            }
            None => Err(Error::NotFound {
                code: state.board.to_code(),
            }),
        }
    }

    /// Forget every computed desirability
    pub fn reset_desirability(&mut self) {
        self.states.values_mut().for_each(|d| *d = None);
    }

    /// Every stored state exactly once, in hash order
    pub fn iter(&self) -> impl Iterator<Item = CachedState> + '_ {
        self.states.iter().map(|(&board, &desirability)| CachedState {
            board,
            desirability,
        })
    }
}

impl FromIterator<Board> for StateCache {
    fn from_iter<I: IntoIterator<Item = Board>>(iter: I) -> Self {
        let mut cache = StateCache::new();
        for board in iter {
            cache.add(board);
        }
        cache
    }
}
