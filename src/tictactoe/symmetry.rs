//! D4 symmetry group operations for board canonicalization
//!
//! Every symmetry of the square is built from two generators: a quarter turn
//! counter-clockwise and a transpose across the main diagonal. Each of the
//! eight group elements is kept in the normal form "transpose (optionally),
//! then rotate", and composing with a generator stays in that form because
//! `T R^k = R^-k T`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{Board, CELLS, Cell, SIDE};

/// One of the two generators of the square's symmetry group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Generator {
    /// 90° counter-clockwise rotation
    Rotate,
    /// Reflection across the main diagonal
    Transpose,
}

impl Generator {
    fn apply(self, (row, col): (usize, usize)) -> (usize, usize) {
        match self {
            Generator::Rotate => (SIDE - 1 - col, row),
            Generator::Transpose => (col, row),
        }
    }

    /// Generator sequence that undoes this generator
    pub fn inverse(self) -> &'static [Generator] {
        match self {
            Generator::Rotate => &[Generator::Rotate, Generator::Rotate, Generator::Rotate],
            Generator::Transpose => &[Generator::Transpose],
        }
    }
}

use Generator::{Rotate as R, Transpose as T};

/// Generator sequences of the eight symmetries, identity first.
const SEQUENCES: [&[Generator]; 8] = [
    &[],
    &[R],
    &[T],
    &[R, T],
    &[R, R],
    &[T, R],
    &[R, R, T],
    &[T, R, T],
];

/// D4 symmetry transformation (dihedral group of the square)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct D4Transform {
    /// Counter-clockwise quarter turns applied after the optional transpose (0-3)
    pub quarter_turns: u8,
    /// Whether to transpose first
    pub transpose: bool,
}

impl D4Transform {
    /// Create identity transform
    pub fn identity() -> Self {
        D4Transform {
            quarter_turns: 0,
            transpose: false,
        }
    }

    /// The transform that applies `self` and then `generator`
    pub fn then(self, generator: Generator) -> Self {
        match generator {
            Generator::Rotate => D4Transform {
                quarter_turns: (self.quarter_turns + 1) % 4,
                transpose: self.transpose,
            },
            Generator::Transpose => D4Transform {
                quarter_turns: (4 - self.quarter_turns) % 4,
                transpose: !self.transpose,
            },
        }
    }

    /// Fold a generator sequence, applied left to right, into one transform
    pub fn from_generators<I>(generators: I) -> Self
    where
        I: IntoIterator<Item = Generator>,
    {
        generators
            .into_iter()
            .fold(Self::identity(), |acc, g| acc.then(g))
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Apply transform to a position (0-8)
    pub fn transform_position(&self, pos: usize) -> usize {
        let mut rc = (pos / SIDE, pos % SIDE);
        if self.transpose {
            rc = Generator::Transpose.apply(rc);
        }
        for _ in 0..self.quarter_turns {
            rc = Generator::Rotate.apply(rc);
        }
        rc.0 * SIDE + rc.1
    }

    /// Apply transform to an array of cells
    pub fn apply_to_cells(&self, cells: &[Cell; CELLS]) -> [Cell; CELLS] {
        let mut transformed = [Cell::Empty; CELLS];
        for (idx, &cell) in cells.iter().enumerate() {
            transformed[self.transform_position(idx)] = cell;
        }
        transformed
    }

    /// Get the inverse transform.
    ///
    /// Every element with a transpose is a reflection and therefore its own
    /// inverse; pure rotations invert by turning the other way.
    pub fn inverse(&self) -> D4Transform {
        if self.transpose {
            *self
        } else {
            D4Transform {
                quarter_turns: (4 - self.quarter_turns) % 4,
                transpose: false,
            }
        }
    }
}

impl Default for D4Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for D4Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.transpose, self.quarter_turns) {
            (false, 0) => write!(f, "identity"),
            (false, k) => write!(f, "rotate {}°", 90 * u16::from(k)),
            (true, 0) => write!(f, "transpose"),
            (true, k) => write!(f, "transpose, rotate {}°", 90 * u16::from(k)),
        }
    }
}

/// A symmetry together with the transform that undoes it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymmetryPair {
    pub transform: D4Transform,
    pub inverse: D4Transform,
}

impl SymmetryPair {
    /// Build the pair for a generator sequence; the inverse is the reversed
    /// sequence of inverse generators.
    fn from_sequence(sequence: &[Generator]) -> Self {
        let inverse = sequence
            .iter()
            .rev()
            .flat_map(|g| g.inverse().iter().copied());
        SymmetryPair {
            transform: D4Transform::from_generators(sequence.iter().copied()),
            inverse: D4Transform::from_generators(inverse),
        }
    }

    /// All eight pairs in fixed enumeration order, identity first
    pub fn all() -> [SymmetryPair; 8] {
        SEQUENCES.map(Self::from_sequence)
    }
}

impl Board {
    /// Apply a D4 transform to the board
    pub fn transform(&self, t: &D4Transform) -> Board {
        Board::from_cells(t.apply_to_cells(self.cells()))
    }

    /// The board under each of the eight symmetries, in group order.
    ///
    /// Symmetric boards yield repeats; the identity image comes first.
    pub fn isomorphs(&self) -> [Board; 8] {
        SymmetryPair::all().map(|pair| self.transform(&pair.transform))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::tictactoe::Player;

    fn asymmetric() -> Board {
        Board::from_code("XO.....X.").unwrap()
    }

    #[test]
    fn test_identity_comes_first() {
        let pairs = SymmetryPair::all();
        assert!(pairs[0].transform.is_identity());
        assert!(pairs[0].inverse.is_identity());
    }

    #[test]
    fn test_group_has_eight_distinct_elements() {
        let transforms: HashSet<D4Transform> =
            SymmetryPair::all().iter().map(|p| p.transform).collect();
        assert_eq!(transforms.len(), 8);

        let images: HashSet<Board> = asymmetric().isomorphs().into_iter().collect();
        assert_eq!(images.len(), 8);
    }

    #[test]
    fn test_paired_inverse_matches_algebraic_inverse() {
        for pair in SymmetryPair::all() {
            assert_eq!(pair.inverse, pair.transform.inverse());
        }
    }

    #[test]
    fn test_inverse_undoes_transform() {
        let board = asymmetric();
        for pair in SymmetryPair::all() {
            let there = board.transform(&pair.transform);
            assert_eq!(there.transform(&pair.inverse), board, "{}", pair.transform);
        }
    }

    #[test]
    fn test_rotate_is_counter_clockwise() {
        // top-right corner moves to top-left
        let board = Board::empty().with_mark(0, 2, Player::X).unwrap();
        let rotated = board.transform(&D4Transform::from_generators([Generator::Rotate]));
        assert_eq!(rotated.to_code(), "X........");
    }

    #[test]
    fn test_four_quarter_turns_is_identity() {
        let t = D4Transform::from_generators([Generator::Rotate; 4]);
        assert!(t.is_identity());
        let tt = D4Transform::from_generators([Generator::Transpose; 2]);
        assert!(tt.is_identity());
    }

    #[test]
    fn test_symmetric_board_repeats_isomorphs() {
        let center = Board::empty().with_mark(1, 1, Player::O).unwrap();
        assert!(center.isomorphs().iter().all(|b| *b == center));
    }

    #[test]
    fn test_display() {
        assert_eq!(D4Transform::identity().to_string(), "identity");
        let t = D4Transform::from_generators([Generator::Transpose, Generator::Rotate]);
        assert_eq!(t.to_string(), "transpose, rotate 90°");
    }
}
