//! tttai CLI - Solved Tic-Tac-Toe lookup table
//!
//! This CLI provides a unified interface for:
//! - Generating the canonical state cache with desirability scores
//! - Recomputing desirability for a saved cache
//! - Playing games against the cache
//! - Looking up positions and their best next move

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tttai::{
    app::{DEFAULT_CACHE_PATH, SolverConfig, StorageFormat},
    cli::commands::{best, generate, lookup, play, recompute},
};

#[derive(Parser)]
#[command(name = "tttai")]
#[command(version, about = "Solved Tic-Tac-Toe lookup table", long_about = None)]
struct Cli {
    /// Cache file to read and write
    #[arg(long, global = true, env = "TTTAI_CACHE", default_value = DEFAULT_CACHE_PATH)]
    cache: PathBuf,

    /// Storage format of the cache file
    #[arg(long, global = true, value_enum, default_value_t = StorageFormat::Json)]
    format: StorageFormat,

    /// Seed for the random opponent (omit for a fresh game each run)
    #[arg(long, global = true, env = "TTTAI_SEED")]
    seed: Option<u64>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate all positions, score them and write the cache
    Generate(generate::GenerateArgs),

    /// Clear and recompute desirability for a saved cache
    Recompute(recompute::RecomputeArgs),

    /// Play a game against the cache
    Play(play::PlayArgs),

    /// Print the best next board for a mark
    Best(best::BestArgs),

    /// Show the cache entry for a board
    Lookup(lookup::LookupArgs),
}

impl Cli {
    fn solver_config(&self) -> SolverConfig {
        let config = SolverConfig::new(&self.cache).with_format(self.format);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = cli.solver_config();
    match cli.command {
        Commands::Generate(args) => generate::execute(args, config),
        Commands::Recompute(args) => recompute::execute(args, config),
        Commands::Play(args) => play::execute(args, config),
        Commands::Best(args) => best::execute(args, config),
        Commands::Lookup(args) => lookup::execute(args, config),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_seed_reaches_config() {
        let args = ["tttai", "play", "--opponent", "random", "--seed", "7"];
        let cli = Cli::try_parse_from(args).unwrap();
        let config = cli.solver_config();
        assert_eq!(config.seed, Some(7));
        assert!(matches!(
            cli.command,
            Commands::Play(play::PlayArgs {
                opponent: play::OpponentKind::Random
            })
        ));
    }

    #[test]
    fn test_global_options_build_config() {
        let args = ["tttai", "--cache", "t.bin", "--format", "msgpack", "recompute"];
        let cli = Cli::try_parse_from(args).unwrap();
        let config = cli.solver_config();
        assert_eq!(config.cache_path, PathBuf::from("t.bin"));
        assert_eq!(config.format, StorageFormat::Msgpack);
        assert_eq!(config.seed, None);
    }
}
