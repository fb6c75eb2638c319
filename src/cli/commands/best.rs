//! Best command - Print the highest-desirability next board

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{App, SolverConfig},
    cli::output::{print_board, print_kv, print_section, print_subsection},
    selection::{best_next_state, score_moves},
    tictactoe::{Board, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Pick the best next board for a mark")]
pub struct BestArgs {
    /// Nine-character board code, rows may be separated by '/'
    #[arg(long, short = 'b')]
    pub board: Board,

    /// Mark to place (o or x)
    #[arg(long, short = 'm')]
    pub mark: Player,
}

pub fn execute(args: BestArgs, config: SolverConfig) -> Result<()> {
    let app = App::new(config);
    let cache = app
        .load_cache()
        .with_context(|| format!("failed to load {}", app.cache_path().display()))?;

    let candidates = score_moves(&cache, &args.board, args.mark)
        .with_context(|| format!("cannot score moves from {}", args.board.to_code()))?;
    let best = best_next_state(&cache, &args.board, args.mark)
        .with_context(|| format!("no best move from {}", args.board.to_code()))?;

    print_subsection(&format!("Candidates for {}", args.mark));
    for candidate in &candidates {
        print_kv(&candidate.board.to_code(), &candidate.score.to_string());
    }

    print_section(&format!("Best move for {}", args.mark));
    print_board(&best);
    print_kv("Code", &best.to_code());
    Ok(())
}
