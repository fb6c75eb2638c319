//! Backward-induction scoring of cached states
//!
//! Terminal boards score +1 for the winner and -1 for the loser, or 0 each
//! for a draw. Every other state scores, per player, the *sum* of its
//! distinct canonical children's scores: the total outcome mass over all
//! continuations rather than a minimax value. Move selection relies on these
//! sums, so they are stored exactly as computed.

use std::{
    iter::Sum,
    ops::{Add, AddAssign},
};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    cache::{CachedState, StateCache},
    tictactoe::{Board, Player, branch_once},
};

/// Per-player score attached to a cached state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Desirability {
    o: i64,
    x: i64,
}

impl Desirability {
    pub const ZERO: Desirability = Desirability { o: 0, x: 0 };

    pub fn new(o: i64, x: i64) -> Self {
        Self { o, x }
    }

    /// Payoff of a game won by `winner`
    pub fn terminal(winner: Player) -> Self {
        let mut score = Self::ZERO;
        score.set(winner, 1);
        score.set(winner.opponent(), -1);
        score
    }

    pub fn for_player(&self, player: Player) -> i64 {
        match player {
            Player::O => self.o,
            Player::X => self.x,
        }
    }

    pub fn set(&mut self, player: Player, score: i64) {
        match player {
            Player::O => self.o = score,
            Player::X => self.x = score,
        }
    }

    /// Scores in [`Player::ALL`] order
    pub fn entries(&self) -> [(Player, i64); 2] {
        Player::ALL.map(|p| (p, self.for_player(p)))
    }
}

impl Add for Desirability {
    type Output = Desirability;

    fn add(self, rhs: Desirability) -> Desirability {
        Desirability {
            o: self.o + rhs.o,
            x: self.x + rhs.x,
        }
    }
}

impl AddAssign for Desirability {
    fn add_assign(&mut self, rhs: Desirability) {
        *self = *self + rhs;
    }
}

impl Sum for Desirability {
    fn sum<I: Iterator<Item = Desirability>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Payoff of a finished game, or `None` while the game is still open
pub fn terminal_score(board: &Board) -> Option<Desirability> {
    match board.winner() {
        Some(winner) => Some(Desirability::terminal(winner)),
        None if board.is_full() => Some(Desirability::ZERO),
        None => None,
    }
}

/// Distinct canonical children of `board` under `mark`, in first-seen order.
///
/// Children missing from the cache are added.
pub fn canonical_children(cache: &mut StateCache, board: &Board, mark: Player) -> Vec<Board> {
    let mut children = Vec::new();
    for child in branch_once(*board, mark) {
        let canonical = cache.resolve(child).state.board;
        if !children.contains(&canonical) {
            children.push(canonical);
        }
    }
    children
}

/// Score `board` with `mark` to move, memoizing through the cache.
///
/// Children whose desirability is already known are reused, never
/// recomputed. Scores are written back with [`StateCache::update`] for every
/// child and for `board` itself when it is a stored canonical board.
pub fn score_state(cache: &mut StateCache, board: &Board, mark: Player) -> Result<Desirability> {
    let score = match terminal_score(board) {
        Some(score) => score,
        None => {
            let mut total = Desirability::ZERO;
            for child in canonical_children(cache, board, mark) {
                total += score_child(cache, child, mark.opponent())?;
            }
            total
        }
    };

    if cache.get(board).is_some() {
        cache.update(CachedState::new(*board).with_desirability(score))?;
    }
    Ok(score)
}

fn score_child(cache: &mut StateCache, child: Board, next: Player) -> Result<Desirability> {
    if let Some(score) = terminal_score(&child) {
        cache.update(CachedState::new(child).with_desirability(score))?;
        return Ok(score);
    }
    match cache.get(&child).and_then(|state| state.desirability) {
        Some(score) => Ok(score),
        None => score_state(cache, &child, next),
    }
}

/// Clear all desirability and rescore from the empty board, first with O
/// to move and then with X.
pub fn recompute_all(cache: &mut StateCache) -> Result<()> {
    cache.reset_desirability();
    let root = Board::empty();
    cache.add(root);
    for opener in Player::ALL {
        let score = score_state(cache, &root, opener)?;
        info!(
            "scored empty board with {opener} to move: O={}, X={}",
            score.for_player(Player::O),
            score.for_player(Player::X)
        );
    }
    info!(
        "recompute finished: {} of {} cached states scored",
        cache.scored_count(),
        cache.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(code: &str) -> Board {
        Board::from_code(code).unwrap()
    }

    #[test]
    fn test_terminal_score_win() {
        let score = terminal_score(&board("XXXOO....")).unwrap();
        assert_eq!(score.for_player(Player::X), 1);
        assert_eq!(score.for_player(Player::O), -1);

        let score = terminal_score(&board("OOOXX.X..")).unwrap();
        assert_eq!(score, Desirability::new(1, -1));
    }

    #[test]
    fn test_terminal_score_draw() {
        assert_eq!(terminal_score(&board("XOXXOOOXX")), Some(Desirability::ZERO));
    }

    #[test]
    fn test_terminal_score_open_game() {
        assert_eq!(terminal_score(&board("XO.......")), None);
        assert_eq!(terminal_score(&Board::empty()), None);
    }

    #[test]
    fn test_desirability_sum() {
        let total: Desirability = [Desirability::new(1, -1), Desirability::new(-1, 1)]
            .into_iter()
            .chain([Desirability::terminal(Player::O)])
            .sum();
        assert_eq!(total, Desirability::new(1, -1));
    }

    #[test]
    fn test_score_state_sums_children() {
        // O to move with two cells left.
        let start = board("XXOOOXX..");
        let mut cache: StateCache = [start].into_iter().collect();
        let score = score_state(&mut cache, &start, Player::O).unwrap();

        let children = canonical_children(&mut cache, &start, Player::O);
        let expected: Desirability = children
            .iter()
            .map(|c| cache.get(c).unwrap().desirability.unwrap())
            .sum();
        assert_eq!(score, expected);
        assert_eq!(cache.get(&start).unwrap().desirability, Some(score));
    }

    #[test]
    fn test_score_state_on_terminal_board() {
        let won = board("XXXOO....");
        let mut cache: StateCache = [won].into_iter().collect();
        let score = score_state(&mut cache, &won, Player::O).unwrap();
        assert_eq!(score, Desirability::terminal(Player::X));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_known_scores_are_reused() {
        let start = board("XXOOOX...");
        let mut cache: StateCache = [start].into_iter().collect();
        let children = canonical_children(&mut cache, &start, Player::X);
        let pinned = Desirability::new(100, -100);
        for child in &children {
            if terminal_score(child).is_none() {
                cache
                    .update(CachedState::new(*child).with_desirability(pinned))
                    .unwrap();
            }
        }

        let score = score_state(&mut cache, &start, Player::X).unwrap();
        let open = children
            .iter()
            .filter(|c| terminal_score(c).is_none())
            .count() as i64;
        let terminal: Desirability = children.iter().filter_map(terminal_score).sum();
        assert_eq!(
            score.for_player(Player::O),
            100 * open + terminal.for_player(Player::O)
        );
    }
}
