//! Generate command - Enumerate every position, score it and save the cache

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{App, SolverConfig},
    cli::output::{create_spinner, format_number, print_kv, print_section},
    tictactoe::FULL_DEPTH,
};

#[derive(Parser, Debug)]
#[command(about = "Enumerate all positions, score them and write the cache")]
pub struct GenerateArgs {
    /// Plies to enumerate from the empty board
    #[arg(long, short = 'd', default_value_t = FULL_DEPTH)]
    pub depth: usize,
}

pub fn execute(args: GenerateArgs, config: SolverConfig) -> Result<()> {
    let app = App::new(config.with_depth(args.depth));
    let started = Instant::now();

    let spinner = create_spinner("Enumerating and scoring positions...");
    let cache = app.build_cache();
    spinner.finish_and_clear();
    let cache = cache.context("failed to build the state cache")?;

    app.save_cache(&cache)
        .with_context(|| format!("failed to write {}", app.cache_path().display()))?;

    print_section("State cache generated");
    print_kv("Depth", &app.config().depth.to_string());
    print_kv("Canonical classes", &format_number(cache.len()));
    print_kv("Scored", &format_number(cache.scored_count()));
    print_kv("Written to", &app.cache_path().display().to_string());
    print_kv("Elapsed", &format!("{} ms", started.elapsed().as_millis()));
    Ok(())
}
