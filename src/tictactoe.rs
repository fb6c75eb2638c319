//! Tic-Tac-Toe board model, symmetry group and state enumeration

pub mod board;
pub mod enumerate;
pub mod game;
pub mod lines;
pub mod symmetry;

pub use board::{Board, CELLS, Cell, Player, SIDE};
pub use enumerate::{FULL_DEPTH, branch_once, branch_to_depth, populate};
pub use game::{Game, GameOutcome, Move};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use symmetry::{D4Transform, Generator, SymmetryPair};
