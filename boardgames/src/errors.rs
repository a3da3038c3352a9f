use crate::Coordinate;

/// The error type for creating a board with unusable dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidDimensions {
    pub cols: usize,
    pub rows: usize,
}

impl std::error::Error for InvalidDimensions {}

impl std::fmt::Display for InvalidDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "A {}x{} board is too small for this game",
            self.cols, self.rows
        )
    }
}

/// The error type for [`Checkers::check_move()`](crate::Checkers::check_move) and
/// everything that applies a move.
///
/// A move that fails with one of these never changes the game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    OutOfBounds,
    NullMove,
    GameOver,
    /// The previous move finished the turn, but [`Checkers::end_turn()`](crate::Checkers::end_turn)
    /// has not been called yet.
    TurnNotFinished,
    NoPieceAt { from: Coordinate },
    NotYourPiece { from: Coordinate },
    DestinationOccupied { to: Coordinate },
    NotDiagonal,
    WrongDirection,
    TooFar,
    NothingToCapture,
    BlockedByOwnPiece { at: Coordinate },
    MultiplePiecesOnRay,
    /// A capture chain is in progress and this move does not continue it.
    MustContinueCapture { piece: Coordinate },
    /// `end_turn()` was called while the turn is not over.
    TurnNotOver,
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::OutOfBounds => write!(f, "Coordinate is outside of the board"),
            IllegalMove::NullMove => write!(f, "A piece has to move somewhere"),
            IllegalMove::GameOver => write!(f, "The game is already over"),
            IllegalMove::TurnNotFinished => {
                write!(f, "The turn is over, but has not been handed to the other side yet")
            }
            IllegalMove::NoPieceAt { from } => write!(f, "There is no piece at {}", from),
            IllegalMove::NotYourPiece { from } => {
                write!(f, "The piece at {} belongs to the other side", from)
            }
            IllegalMove::DestinationOccupied { to } => write!(f, "{} is already occupied", to),
            IllegalMove::NotDiagonal => write!(f, "Pieces only move diagonally"),
            IllegalMove::WrongDirection => write!(f, "Men can only move forward"),
            IllegalMove::TooFar => write!(f, "The piece cannot move that far"),
            IllegalMove::NothingToCapture => {
                write!(f, "The piece cannot move that far without capturing")
            }
            IllegalMove::BlockedByOwnPiece { at } => {
                write!(f, "The way is blocked by your own piece at {}", at)
            }
            IllegalMove::MultiplePiecesOnRay => {
                write!(f, "Only a single piece can be captured per jump")
            }
            IllegalMove::MustContinueCapture { piece } => {
                write!(f, "The piece at {} must continue capturing", piece)
            }
            IllegalMove::TurnNotOver => write!(f, "The current turn is not over yet"),
        }
    }
}

/// The error type for Minesweeper actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalAction {
    OutOfBounds { coord: Coordinate },
    GameOver,
    /// Revealed cells cannot be flagged.
    CellRevealed { coord: Coordinate },
}

impl std::error::Error for IllegalAction {}

impl std::fmt::Display for IllegalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalAction::OutOfBounds { coord } => {
                write!(f, "{} is outside of the minefield", coord)
            }
            IllegalAction::GameOver => write!(f, "The game is already over"),
            IllegalAction::CellRevealed { coord } => {
                write!(f, "The cell at {} is already open", coord)
            }
        }
    }
}
