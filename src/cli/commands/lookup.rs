//! Lookup command - Show the cache entry for a board

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{App, SolverConfig},
    cli::output::{format_desirability, print_board, print_kv, print_section},
    tictactoe::Board,
};

#[derive(Parser, Debug)]
#[command(about = "Show the canonical cache entry for a board")]
pub struct LookupArgs {
    /// Nine-character board code, rows may be separated by '/'
    #[arg(long, short = 'b')]
    pub board: Board,
}

pub fn execute(args: LookupArgs, config: SolverConfig) -> Result<()> {
    let app = App::new(config);
    let cache = app
        .load_cache()
        .with_context(|| format!("failed to load {}", app.cache_path().display()))?;

    let board = args.board;
    print_section(&format!("Lookup {}", board.to_code()));
    print_board(&board);

    let marks: Vec<String> = board
        .legal_next_marks()
        .iter()
        .map(ToString::to_string)
        .collect();
    print_kv(
        "Legal marks",
        &if marks.is_empty() {
            "none".to_string()
        } else {
            marks.join(", ")
        },
    );
    if let Some(winner) = board.winner() {
        print_kv("Winner", &winner.to_string());
    }

    let Some(hit) = cache.lookup(&board) else {
        print_kv("Cache entry", "none");
        return Ok(());
    };
    print_kv("Canonical", &hit.state.board.to_code());
    print_kv("Transform", &hit.transform.to_string());
    print_kv("Inverse", &hit.inverse.to_string());
    print_kv("Desirability", &format_desirability(hit.state.desirability));
    Ok(())
}
