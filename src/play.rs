//! Playing whole games against the cache
//!
//! A [`Strategy`] picks the next board for one side. The engine side reads
//! [`best_next_state`]; the random side picks uniformly among the legal
//! placements with a seedable RNG so playouts can be replayed.

use log::{debug, info};
use rand::{SeedableRng, prelude::IndexedRandom, rngs::StdRng};

use crate::{
    Error, Result,
    cache::StateCache,
    selection::best_next_state,
    tictactoe::{Board, Game, Player, branch_once},
};

/// Move source for one side of a game
pub trait Strategy {
    fn name(&self) -> &'static str;

    /// Board after placing `mark` once on `board`
    fn next_board(&mut self, board: &Board, mark: Player) -> Result<Board>;
}

/// Plays the highest-desirability move from a scored cache
#[derive(Debug, Clone, Copy)]
pub struct CacheStrategy<'a> {
    cache: &'a StateCache,
}

impl<'a> CacheStrategy<'a> {
    pub fn new(cache: &'a StateCache) -> Self {
        Self { cache }
    }
}

impl Strategy for CacheStrategy<'_> {
    fn name(&self) -> &'static str {
        "engine"
    }

    fn next_board(&mut self, board: &Board, mark: Player) -> Result<Board> {
        best_next_state(self.cache, board, mark)
    }
}

/// Plays uniformly at random among empty cells
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    /// Seeded when `seed` is given, otherwise from entropy
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        };
        Self { rng }
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn next_board(&mut self, board: &Board, mark: Player) -> Result<Board> {
        let candidates: Vec<Board> = branch_once(*board, mark).collect();
        candidates
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| Error::NoMovesAvailable {
                code: board.to_code(),
            })
    }
}

/// Play from the empty board until a win or a draw.
///
/// `first` places the opening mark; each side's strategy is asked only for
/// its own mark. Every returned board is checked to add exactly one mark.
///
/// # Errors
///
/// Propagates strategy failures, such as [`Error::IncompleteData`] from an
/// unscored cache, and [`Error::IllegalMove`] for a strategy that changes
/// anything but one empty cell.
pub fn play_game(first: Player, o: &mut dyn Strategy, x: &mut dyn Strategy) -> Result<Game> {
    let mut game = Game::new(first);
    while game.outcome().is_none() {
        let mark = game.to_move();
        let strategy: &mut dyn Strategy = match mark {
            Player::O => &mut *o,
            Player::X => &mut *x,
        };
        let current = game.current();
        let next = strategy.next_board(&current, mark)?;
        let placed = game.advance_to(next)?;
        debug!(
            "{} played {mark} at {}: {}",
            strategy.name(),
            placed.position,
            next.to_code()
        );
    }

    info!(
        "game over after {} moves: {:?}",
        game.moves.len(),
        game.outcome()
    );
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_games_reach_an_outcome() {
        for seed in 0..20 {
            let mut o = RandomStrategy::new(Some(seed));
            let mut x = RandomStrategy::new(Some(seed + 1000));
            let game = play_game(Player::X, &mut o, &mut x).unwrap();
            assert!(game.outcome().is_some());
            assert!(game.moves.len() >= 5 && game.moves.len() <= 9);
        }
    }

    #[test]
    fn same_seed_same_game() {
        let play = |seed| {
            let mut o = RandomStrategy::new(Some(seed));
            let mut x = RandomStrategy::new(Some(seed));
            play_game(Player::O, &mut o, &mut x).unwrap().current()
        };
        assert_eq!(play(7), play(7));
    }

    #[test]
    fn random_strategy_on_full_board() {
        let full = Board::from_code("XOXXOOOXX").unwrap();
        let err = RandomStrategy::new(Some(1))
            .next_board(&full, Player::O)
            .unwrap_err();
        assert!(matches!(err, Error::NoMovesAvailable { .. }));
    }

    struct Cheater;

    impl Strategy for Cheater {
        fn name(&self) -> &'static str {
            "cheater"
        }

        fn next_board(&mut self, _board: &Board, _mark: Player) -> Result<Board> {
            Board::from_code("XXX......")
        }
    }

    #[test]
    fn illegal_boards_are_rejected() {
        let mut random = RandomStrategy::new(Some(3));
        let err = play_game(Player::X, &mut random, &mut Cheater).unwrap_err();
        assert!(matches!(err, Error::IllegalMove { .. }));
    }

    #[test]
    fn engine_without_scores_is_incomplete() {
        let cache = StateCache::new();
        let mut engine = CacheStrategy::new(&cache);
        let mut random = RandomStrategy::new(Some(5));
        let err = play_game(Player::O, &mut engine, &mut random).unwrap_err();
        assert!(matches!(err, Error::IncompleteData { .. }));
    }
}
