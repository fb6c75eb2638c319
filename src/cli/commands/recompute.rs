//! Recompute command - Rescore a saved cache from scratch

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{App, SolverConfig},
    cli::output::{create_spinner, format_desirability, format_number, print_kv, print_section},
    tictactoe::Board,
};

#[derive(Parser, Debug)]
#[command(about = "Clear and recompute desirability for a saved cache")]
pub struct RecomputeArgs {}

pub fn execute(_args: RecomputeArgs, config: SolverConfig) -> Result<()> {
    let app = App::new(config);
    let started = Instant::now();

    let spinner = create_spinner("Recomputing desirability...");
    let cache = app.recompute();
    spinner.finish_and_clear();
    let cache = cache
        .with_context(|| format!("failed to recompute {}", app.cache_path().display()))?;

    app.save_cache(&cache)
        .with_context(|| format!("failed to write {}", app.cache_path().display()))?;

    let root = cache.get(&Board::empty()).and_then(|state| state.desirability);
    print_section("Desirability recomputed");
    print_kv("Canonical classes", &format_number(cache.len()));
    print_kv("Scored", &format_number(cache.scored_count()));
    print_kv("Empty board", &format_desirability(root));
    print_kv("Elapsed", &format!("{} ms", started.elapsed().as_millis()));
    Ok(())
}
