//! CLI infrastructure for the tttai solver
//!
//! Commands build and rescore the state cache, play games against it, and
//! inspect single positions.

pub mod commands;
pub mod output;
