//! Best-move selection from a scored cache

use log::debug;

use crate::{
    Error, Result,
    cache::StateCache,
    tictactoe::{Board, Player, branch_once},
};

/// A candidate next board with its desirability for the mover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    /// Resulting board in the caller's orientation
    pub board: Board,
    pub score: i64,
}

/// Every board reachable by placing `mark` once, in branch order, with the
/// mover's score read from the cache.
///
/// # Errors
///
/// Returns [`Error::IncompleteData`] if any result's class is missing from
/// the cache or has no desirability yet.
pub fn score_moves(cache: &StateCache, board: &Board, mark: Player) -> Result<Vec<ScoredMove>> {
    branch_once(*board, mark)
        .map(|candidate| {
            let incomplete = || Error::IncompleteData {
                code: candidate.to_code(),
            };
            let hit = cache.lookup(&candidate).ok_or_else(incomplete)?;
            let desirability = hit.state.desirability.ok_or_else(incomplete)?;
            Ok(ScoredMove {
                board: hit.to_original(),
                score: desirability.for_player(mark),
            })
        })
        .collect()
}

/// The resulting board with the highest desirability for `mark`.
///
/// Ties go to the first candidate in branch order. The result is expressed
/// in `board`'s own orientation.
///
/// # Errors
///
/// Returns [`Error::IncompleteData`] if the cache was not fully scored for
/// this branch, or if `board` has no empty cell.
pub fn best_next_state(cache: &StateCache, board: &Board, mark: Player) -> Result<Board> {
    let mut best: Option<ScoredMove> = None;
    for candidate in score_moves(cache, board, mark)? {
        if best.is_none_or(|top| candidate.score > top.score) {
            best = Some(candidate);
        }
    }

    let chosen = best.ok_or_else(|| Error::IncompleteData {
        code: board.to_code(),
    })?;
    debug!(
        "best move for {mark} from {} is {} (score {})",
        board.to_code(),
        chosen.board.to_code(),
        chosen.score
    );
    Ok(chosen.board)
}
