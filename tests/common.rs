//! Common fixtures for the tttai integration tests.
//!
//! Building and scoring the full cache takes a noticeable moment, so each
//! test binary builds it once and shares it.

#![allow(dead_code)]

use std::sync::OnceLock;

use tttai::{Board, FULL_DEPTH, StateCache, populate, recompute_all};

/// Cache holding every class reachable from the empty board, unscored
pub fn populated_cache() -> &'static StateCache {
    static CACHE: OnceLock<StateCache> = OnceLock::new();
    CACHE.get_or_init(|| {
        let mut cache = StateCache::new();
        populate(&mut cache, FULL_DEPTH);
        cache
    })
}

/// The populated cache after a full recompute
pub fn scored_cache() -> &'static StateCache {
    static CACHE: OnceLock<StateCache> = OnceLock::new();
    CACHE.get_or_init(|| {
        let mut cache = populated_cache().clone();
        recompute_all(&mut cache).expect("recompute on a populated cache");
        cache
    })
}

pub fn board(code: &str) -> Board {
    Board::from_code(code).expect("valid board code")
}

/// Every raw board reachable in legal play with `opener` moving first,
/// terminal boards included.
pub fn reachable_boards(opener: tttai::Player) -> Vec<Board> {
    tttai::branch_to_depth(vec![Board::empty()], opener, FULL_DEPTH).collect()
}
