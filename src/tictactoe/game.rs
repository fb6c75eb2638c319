//! A single game as a sequence of alternating placements

use serde::{Deserialize, Serialize};

use super::board::{Board, Cell, Player, SIDE};
use crate::{Error, Result};

/// A placement in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Outcome of `board`, or `None` while it is still open
    pub fn of(board: &Board) -> Option<Self> {
        match board.winner() {
            Some(winner) => Some(GameOutcome::Win(winner)),
            None if board.is_full() => Some(GameOutcome::Draw),
            None => None,
        }
    }
}

/// A game from the empty board, with its history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub first: Player,
    pub moves: Vec<Move>,
    current: Board,
}

impl Game {
    /// Start a game on the empty board with `first` to move
    pub fn new(first: Player) -> Self {
        Game {
            first,
            moves: Vec::new(),
            current: Board::empty(),
        }
    }

    pub fn current(&self) -> Board {
        self.current
    }

    /// Mark to place next; players alternate from `first`
    pub fn to_move(&self) -> Player {
        if self.moves.len() % 2 == 0 {
            self.first
        } else {
            self.first.opponent()
        }
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        GameOutcome::of(&self.current)
    }

    /// Place the mark to move at `position` (row-major, 0-8).
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] once the game has finished,
    /// [`Error::OutOfRange`] for a position off the board and
    /// [`Error::IllegalMove`] for an occupied cell.
    pub fn play(&mut self, position: usize) -> Result<Board> {
        if self.outcome().is_some() {
            return Err(Error::GameOver {
                code: self.current.to_code(),
            });
        }

        let player = self.to_move();
        let (row, col) = (position / SIDE, position % SIDE);
        let next = self.current.with_mark(row, col, player)?;
        if self.current.cell(position) != Cell::Empty {
            return Err(Error::IllegalMove {
                from: self.current.to_code(),
                to: next.to_code(),
                mark: player.to_char(),
            });
        }

        self.moves.push(Move { position, player });
        self.current = next;
        Ok(next)
    }

    /// Advance to `next`, which must add exactly one mark of the player to
    /// move and change nothing else.
    pub fn advance_to(&mut self, next: Board) -> Result<Move> {
        let player = self.to_move();
        let illegal = || Error::IllegalMove {
            from: self.current.to_code(),
            to: next.to_code(),
            mark: player.to_char(),
        };

        let mut changed = self
            .current
            .cells()
            .iter()
            .zip(next.cells())
            .enumerate()
            .filter(|(_, (before, after))| before != after);
        let position = match (changed.next(), changed.next()) {
            (Some((position, (&Cell::Empty, &after))), None) if after == player.to_cell() => {
                position
            }
            _ => return Err(illegal()),
        };

        self.play(position)?;
        Ok(Move { position, player })
    }

    /// Every board in the game, starting with the empty board
    pub fn state_sequence(&self) -> Result<Vec<Board>> {
        let mut states = Vec::with_capacity(self.moves.len() + 1);
        let mut board = Board::empty();
        states.push(board);
        for m in &self.moves {
            board = board.with_mark(m.position / SIDE, m.position % SIDE, m.player)?;
            states.push(board);
        }
        Ok(states)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Player::X)
    }
}
