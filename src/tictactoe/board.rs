//! Board representation and basic operations

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;
use crate::{Error, Result};

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// Side length of the board.
pub const SIDE: usize = 3;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    O,
    X,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::O => 'O',
            Cell::X => 'X',
        }
    }

    /// Strict inverse of [`Cell::to_char`], used for stored codes
    pub fn from_code_char(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Empty),
            'O' => Some(Cell::O),
            'X' => Some(Cell::X),
            _ => None,
        }
    }

    /// Lenient mapping for typed input: blanks and lowercase marks pass
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'O' | 'o' => Some(Cell::O),
            'X' | 'x' => Some(Cell::X),
            _ => None,
        }
    }

    /// The mark occupying this cell, if any
    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::O => Some(Player::O),
            Cell::X => Some(Player::X),
            Cell::Empty => None,
        }
    }
}

/// A player's mark.
///
/// Only the two placeable marks exist here, so "next mark" is total; an
/// empty cell is a [`Cell`], never a `Player`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    O,
    X,
}

impl Player {
    /// Both marks, in persistence order
    pub const ALL: [Player; 2] = [Player::O, Player::X];

    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::O => Player::X,
            Player::X => Player::O,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::O => Cell::O,
            Player::X => Cell::X,
        }
    }

    pub fn to_char(self) -> char {
        self.to_cell().to_char()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl FromStr for Player {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "O" | "o" => Ok(Player::O),
            "X" | "x" => Ok(Player::X),
            other => Err(Error::InvalidMark {
                mark: other.to_string(),
            }),
        }
    }
}

/// A 3x3 grid of cells, stored row-major.
///
/// Boards are values: every operation that places a mark returns a new
/// board, so anything derived from the cells (winner, fullness) can be
/// recomputed at any time without going stale. Equality and hashing are
/// over the flattened cell sequence only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    /// Create a board with every cell empty
    pub fn empty() -> Self {
        Board {
            cells: [Cell::Empty; CELLS],
        }
    }

    pub fn from_cells(cells: [Cell; CELLS]) -> Self {
        Board { cells }
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Get cell at row-major position (0-8)
    pub fn cell(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Get cell at (row, col).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if either coordinate is outside 0-2.
    pub fn get(&self, row: usize, col: usize) -> Result<Cell> {
        Ok(self.cells[Self::index(row, col)?])
    }

    fn index(row: usize, col: usize) -> Result<usize> {
        if row < SIDE && col < SIDE {
            Ok(row * SIDE + col)
        } else {
            Err(Error::OutOfRange { row, col })
        }
    }

    /// Return a new board with `mark` placed at (row, col).
    ///
    /// This is the entry point for external callers and will overwrite an
    /// occupied cell; enumeration only ever fills empty ones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if either coordinate is outside 0-2.
    #[must_use = "with_mark returns a new board; the original is unchanged"]
    pub fn with_mark(&self, row: usize, col: usize, mark: Player) -> Result<Board> {
        let idx = Self::index(row, col)?;
        let mut cells = self.cells;
        cells[idx] = mark.to_cell();
        Ok(Board { cells })
    }

    /// Number of cells holding `player`'s mark
    pub fn count(&self, player: Player) -> usize {
        let target = player.to_cell();
        self.cells.iter().filter(|&&c| c == target).count()
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Get all empty positions in row-major order
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Check if a player has three in a row
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        LineAnalyzer::winning_line(&self.cells).and_then(|line| self.cells[line[0]].to_player())
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Check if the position is a draw (all cells filled, no winner)
    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winner().is_none()
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Marks that may legally be placed next.
    ///
    /// Turn order is not tracked; it is implied by the piece counts. Equal
    /// counts allow either mark (either player may have opened), otherwise
    /// only the mark with fewer placements may move. A full board allows
    /// nothing.
    pub fn legal_next_marks(&self) -> BTreeSet<Player> {
        if self.is_full() {
            return BTreeSet::new();
        }
        let os = self.count(Player::O);
        let xs = self.count(Player::X);
        if os == xs {
            Player::ALL.into_iter().collect()
        } else if xs > os {
            BTreeSet::from([Player::O])
        } else {
            BTreeSet::from([Player::X])
        }
    }

    /// Nine-character row-major code, e.g. `".OX.XOO.."`
    pub fn to_code(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }

    /// Parse a board from its nine-character code.
    ///
    /// # Errors
    ///
    /// Returns error if the code is not exactly 9 characters or any
    /// character is not one of `.`, `O`, `X`.
    pub fn from_code(code: &str) -> Result<Self> {
        Self::parse_cells(code, Cell::from_code_char)
    }

    fn parse_cells(code: &str, to_cell: fn(char) -> Option<Cell>) -> Result<Self> {
        let chars: Vec<char> = code.chars().collect();
        if chars.len() != CELLS {
            return Err(Error::InvalidBoardLength {
                expected: CELLS,
                got: chars.len(),
                context: code.to_string(),
            });
        }

        let mut cells = [Cell::Empty; CELLS];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = to_cell(c).ok_or_else(|| Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: code.to_string(),
            })?;
        }

        Ok(Board { cells })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

/// Lenient parse for user input: whitespace and `/` row separators are
/// ignored and lowercase marks are accepted, so `"..x / .O. / ..."` parses.
impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let cleaned: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        Board::parse_cells(&cleaned, Cell::from_char)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.chunks(SIDE).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            let marks: Vec<String> = row.iter().map(|c| c.to_char().to_string()).collect();
            write!(f, "|{}|", marks.join(" "))?;
        }
        Ok(())
    }
}
