//! Core domain types for tic-tac-toe.

use super::position::Position;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Player {
    /// Player X (goes first).
    #[display("X")]
    X,
    /// Player O (goes second).
    #[display("O")]
    O,
}

impl Player {
    /// The player who moves first in every game.
    pub const FIRST: Player = Player::X;

    /// Returns the player whose turn follows this one.
    pub fn next(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Returns the cell this player's mark produces.
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
pub enum Cell {
    /// No mark.
    #[default]
    #[display(" ")]
    Empty,
    /// Marked by X.
    #[display("X")]
    X,
    /// Marked by O.
    #[display("O")]
    O,
}

impl Cell {
    /// Returns the player owning this cell, if any.
    pub fn mark(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }

    /// Checks if the cell holds no mark.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        player.to_cell()
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from cells in row-major order.
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.index()] = cell;
    }

    pub(crate) fn clear(&mut self) {
        self.cells = [Cell::Empty; 9];
    }

    /// Checks if the cell at the position is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_empty()
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Iterates the board one row at a time, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(3)
    }

    /// Counts the cells equal to `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, cells) in self.rows().enumerate() {
            if row > 0 {
                writeln!(f)?;
                writeln!(f, "-+-+-")?;
            }
            for (col, cell) in cells.iter().enumerate() {
                if col > 0 {
                    write!(f, "|")?;
                }
                match cell {
                    Cell::Empty => write!(f, "{}", row * 3 + col + 1)?,
                    mark => write!(f, "{}", mark)?,
                }
            }
        }
        Ok(())
    }
}

/// Outcome of a placement request.
///
/// Placing on an occupied cell is not an error, the request is simply
/// ignored. The variant tells the caller which of the two happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Placement {
    /// The mark was written and the turn passed to the other player.
    #[display("{player} placed at {position}")]
    Placed {
        /// Where the mark went.
        position: Position,
        /// Who placed it.
        player: Player,
    },
    /// The cell was already taken; nothing changed.
    #[display("{position} already taken by {by}")]
    Occupied {
        /// The requested position.
        position: Position,
        /// The mark already there.
        by: Player,
    },
}

impl Placement {
    /// Returns true if the board changed.
    pub fn is_placed(&self) -> bool {
        matches!(self, Placement::Placed { .. })
    }
}

/// Complete game state: the board and whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GameSnapshot")]
pub struct GameState {
    /// The board.
    board: Board,
    /// Player who places the next mark.
    current_player: Player,
}

impl GameState {
    /// Creates the initial state: empty board, X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::FIRST,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the cell at a position.
    pub fn cell(&self, pos: Position) -> Cell {
        self.board.get(pos)
    }

    /// Number of marks `player` has on the board.
    pub fn marks(&self, player: Player) -> usize {
        self.board.count(player.to_cell())
    }

    /// Writes the current player's mark if the cell is empty.
    pub(crate) fn place(&mut self, position: Position) -> Placement {
        if let Some(by) = self.board.get(position).mark() {
            return Placement::Occupied { position, by };
        }
        let player = self.current_player;
        self.board.set(position, player.to_cell());
        self.current_player = player.next();
        Placement::Placed { position, player }
    }

    /// Returns to the initial state.
    pub(crate) fn reset(&mut self) {
        self.board.clear();
        self.current_player = Player::FIRST;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Unvalidated game state, as read from an external source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Cells in row-major order.
    pub board: Board,
    /// Player to move.
    pub current_player: Player,
}

impl From<GameState> for GameSnapshot {
    fn from(state: GameState) -> Self {
        Self {
            board: state.board,
            current_player: state.current_player,
        }
    }
}

/// A snapshot that no sequence of alternating placements could produce.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid game state: {x_marks} X marks, {o_marks} O marks, {current_player} to move")]
pub struct InvalidState {
    /// Number of X marks in the snapshot.
    pub x_marks: usize,
    /// Number of O marks in the snapshot.
    pub o_marks: usize,
    /// Player the snapshot claims is to move.
    pub current_player: Player,
}

impl TryFrom<GameSnapshot> for GameState {
    type Error = InvalidState;

    #[instrument(skip(snapshot), fields(current_player = %snapshot.current_player))]
    fn try_from(snapshot: GameSnapshot) -> Result<Self, Self::Error> {
        let state = GameState {
            board: snapshot.board,
            current_player: snapshot.current_player,
        };
        if super::invariants::check(&state).is_ok() {
            Ok(state)
        } else {
            Err(InvalidState {
                x_marks: state.marks(Player::X),
                o_marks: state.marks(Player::O),
                current_player: state.current_player,
            })
        }
    }
}
