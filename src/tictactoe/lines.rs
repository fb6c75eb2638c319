//! The eight lines of three and who owns them

use super::{CELLS, Cell, Player};

/// Row-major cell indices of every line: rows, then columns, then diagonals
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Line queries over a raw cell array
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// The player holding all three cells of `line`, if any
    pub fn line_owner(cells: &[Cell; CELLS], line: &[usize; 3]) -> Option<Player> {
        let [a, b, c] = line.map(|idx| cells[idx]);
        if a == b && b == c { a.to_player() } else { None }
    }

    /// First completed line in [`WINNING_LINES`] order
    pub fn winning_line(cells: &[Cell; CELLS]) -> Option<&'static [usize; 3]> {
        WINNING_LINES
            .iter()
            .find(|line| Self::line_owner(cells, line).is_some())
    }

    pub fn has_won(cells: &[Cell; CELLS], player: Player) -> bool {
        WINNING_LINES
            .iter()
            .any(|line| Self::line_owner(cells, line) == Some(player))
    }
}
