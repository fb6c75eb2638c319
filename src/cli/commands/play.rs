//! Play command - Play a game from the empty board against the cache

use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::{
    app::{App, SolverConfig},
    cli::output::{print_board, print_kv, print_section},
    play::{CacheStrategy, RandomStrategy, Strategy, play_game},
    tictactoe::{GameOutcome, Player},
};

/// Who plays X against the engine's O
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OpponentKind {
    /// The engine plays both sides
    #[value(name = "self")]
    SelfPlay,
    /// Uniformly random placements
    Random,
}

#[derive(Parser, Debug)]
#[command(about = "Play a game from the empty board; O always opens")]
pub struct PlayArgs {
    /// Opponent playing X
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentKind::SelfPlay)]
    pub opponent: OpponentKind,
}

pub fn execute(args: PlayArgs, config: SolverConfig) -> Result<()> {
    let seed = config.seed;
    let app = App::new(config);
    let cache = app
        .load_cache()
        .with_context(|| format!("failed to load {}", app.cache_path().display()))?;

    let mut engine = CacheStrategy::new(&cache);
    let mut opponent: Box<dyn Strategy + '_> = match args.opponent {
        OpponentKind::SelfPlay => Box::new(CacheStrategy::new(&cache)),
        OpponentKind::Random => Box::new(RandomStrategy::new(seed)),
    };

    let started = Instant::now();
    let game = play_game(Player::O, &mut engine, opponent.as_mut())
        .context("game could not be completed from the cached scores")?;
    let elapsed = started.elapsed();

    println!(
        "Calculated {} moves in {} ms",
        game.moves.len(),
        elapsed.as_millis()
    );
    for board in game.state_sequence()? {
        println!();
        print_board(&board);
    }

    print_section("Result");
    print_kv("X player", opponent.name());
    let outcome = match game.outcome() {
        Some(GameOutcome::Win(player)) => format!("{player} wins"),
        Some(GameOutcome::Draw) => "draw".to_string(),
        None => "unfinished".to_string(),
    };
    print_kv("Outcome", &outcome);
    Ok(())
}
