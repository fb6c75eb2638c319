//! Exhaustive enumeration of reachable positions

use log::info;

use super::{
    Player,
    board::{Board, Cell},
};
use crate::cache::StateCache;

/// Depth that reaches every terminal position from the empty board
pub const FULL_DEPTH: usize = 9;

/// Every board obtained by placing `mark` into one empty cell of `board`.
///
/// Results follow row-major cell order; a full board yields nothing.
pub fn branch_once(board: Board, mark: Player) -> impl Iterator<Item = Board> {
    let cells = *board.cells();
    (0..cells.len())
        .filter(move |&pos| cells[pos] == Cell::Empty)
        .map(move |pos| {
            let mut next = cells;
            next[pos] = mark.to_cell();
            Board::from_cells(next)
        })
}

/// The input boards followed by everything reachable from them in up to
/// `depth` alternating plies, starting with `mark`.
///
/// Descendants are produced depth-first per parent: all children of a
/// parent, then the subtree of each child in turn. Boards that already
/// have a winner are emitted but never expanded. The iterator is lazy and
/// can be restarted by calling again with the same arguments.
pub fn branch_to_depth(
    boards: Vec<Board>,
    mark: Player,
    depth: usize,
) -> Box<dyn Iterator<Item = Board>> {
    if depth == 0 {
        return Box::new(boards.into_iter());
    }

    let parents = boards.clone();
    let descendants = parents
        .into_iter()
        .filter(|board| board.winner().is_none())
        .flat_map(move |board| {
            let children: Vec<Board> = branch_once(board, mark).collect();
            branch_to_depth(children, mark.opponent(), depth - 1)
        });

    Box::new(boards.into_iter().chain(descendants))
}

/// Seed `cache` with every class reachable from the empty board, first
/// with O opening and then with X opening.
///
/// Returns the number of newly cached classes.
pub fn populate(cache: &mut StateCache, depth: usize) -> usize {
    let before = cache.len();
    for opener in Player::ALL {
        let mut visited = 0usize;
        for board in branch_to_depth(vec![Board::empty()], opener, depth) {
            cache.add(board);
            visited += 1;
        }
        info!(
            "enumerated {visited} positions with {opener} opening; cache holds {} classes",
            cache.len()
        );
    }
    cache.len() - before
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn branch_once_fills_each_empty_cell() {
        let board = Board::from_code("X...O....").unwrap();
        let children: Vec<Board> = branch_once(board, Player::X).collect();
        assert_eq!(children.len(), 7);
        assert_eq!(children[0].to_code(), "XX..O....");
        for child in &children {
            assert_eq!(child.occupied_count(), 3);
            assert_eq!(child.count(Player::X), 2);
        }
    }

    #[test]
    fn branch_once_on_full_board_is_empty() {
        let full = Board::from_code("XOXXOOOXX").unwrap();
        assert_eq!(branch_once(full, Player::O).count(), 0);
    }

    #[test]
    fn branch_to_depth_zero_returns_inputs() {
        let boards = vec![Board::empty()];
        let all: Vec<Board> = branch_to_depth(boards.clone(), Player::O, 0).collect();
        assert_eq!(all, boards);
    }

    #[test]
    fn branch_to_depth_two_counts() {
        // 1 root + 9 children + 9 * 8 grandchildren
        let all: Vec<Board> = branch_to_depth(vec![Board::empty()], Player::X, 2).collect();
        assert_eq!(all.len(), 1 + 9 + 72);
        assert_eq!(all[0], Board::empty());
        assert!(all[1..10].iter().all(|b| b.count(Player::X) == 1));
    }

    #[test]
    fn branch_to_depth_depends_on_opening_mark() {
        let o: Vec<Board> = branch_to_depth(vec![Board::empty()], Player::O, 2).collect();
        let x: Vec<Board> = branch_to_depth(vec![Board::empty()], Player::X, 2).collect();
        assert_ne!(o, x);
    }

    #[test]
    fn branch_to_depth_stops_under_winners() {
        let won = Board::from_code("XXXOO....").unwrap();
        let all: Vec<Board> = branch_to_depth(vec![won], Player::O, 4).collect();
        assert_eq!(all, vec![won]);
    }

    #[test]
    fn branch_to_depth_is_restartable() {
        let first: Vec<Board> = branch_to_depth(vec![Board::empty()], Player::O, 3).collect();
        let second: Vec<Board> = branch_to_depth(vec![Board::empty()], Player::O, 3).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn full_enumeration_matches_known_position_count() {
        let distinct: HashSet<Board> =
            branch_to_depth(vec![Board::empty()], Player::X, FULL_DEPTH).collect();
        assert_eq!(distinct.len(), 5478);
    }
}
