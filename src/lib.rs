//! Solved Tic-Tac-Toe lookup table
//!
//! This crate provides:
//! - A Tic-Tac-Toe board model with the eight-element symmetry group
//! - Exhaustive enumeration into a cache of canonical states
//! - Per-player desirability scores computed by backward induction
//! - Best-move selection in the caller's own orientation
//! - Versioned JSON and MessagePack persistence of the scored cache
//!
//! # Example
//!
//! ```
//! use tttai::{Board, Player, StateCache, best_next_state, populate, recompute_all};
//!
//! let mut cache = StateCache::new();
//! populate(&mut cache, tttai::FULL_DEPTH);
//! recompute_all(&mut cache)?;
//!
//! let board: Board = "..X/.O./...".parse()?;
//! let next = best_next_state(&cache, &board, Player::O)?;
//! assert_eq!(next.count(Player::O), 2);
//! # Ok::<(), tttai::Error>(())
//! ```

pub mod adapters;
pub mod app;
pub mod cache;
pub mod cli;
pub mod desirability;
pub mod error;
pub mod persistence;
pub mod play;
pub mod ports;
pub mod selection;
pub mod tictactoe;

pub use app::{load_cache, save_cache};
pub use cache::{CacheHit, CachedState, StateCache};
pub use desirability::{Desirability, recompute_all, score_state, terminal_score};
pub use error::{Error, Result};
pub use persistence::{CacheDocument, FORMAT_VERSION};
pub use selection::{ScoredMove, best_next_state, score_moves};
pub use tictactoe::{
    Board, CELLS, Cell, D4Transform, FULL_DEPTH, Game, GameOutcome, Player, SymmetryPair,
    branch_once, branch_to_depth, populate,
};
