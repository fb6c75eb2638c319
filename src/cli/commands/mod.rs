//! Subcommands of the `tttai` binary.
//!
//! Each command takes its parsed arguments plus the [`SolverConfig`] built
//! from the global options.
//!
//! [`SolverConfig`]: crate::app::SolverConfig

pub mod best;
pub mod generate;
pub mod lookup;
pub mod play;
pub mod recompute;
