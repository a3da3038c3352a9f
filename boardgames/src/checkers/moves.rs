use super::{Board, Piece, Rank};
use crate::{Coordinate, IllegalMove};

/// The four diagonal directions, as `(dx, dy)`.
pub(crate) const DIAGONALS: [(isize, isize); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// What a geometrically valid move does.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// A single diagonal step onto an empty square.
    Step,
    /// A jump that removes the opposing piece at `captured`.
    Capture { captured: Coordinate },
}

impl MoveKind {
    pub fn is_capture(self) -> bool {
        matches!(self, MoveKind::Capture { .. })
    }
}

/// The squares from `from` (exclusive) in direction `(dx, dy)` up to the edge of the board.
pub(crate) fn ray(
    board: &Board,
    from: Coordinate,
    (dx, dy): (isize, isize),
) -> impl Iterator<Item = Coordinate> + '_ {
    std::iter::successors(from.offset(dx, dy), move |c| c.offset(dx, dy))
        .take_while(move |&c| board.contains(c))
}

/// Classifies moving `piece` from `from` to `to` by the movement rules alone.
///
/// The caller is responsible for everything that is not about the shape
/// of the move: bounds, ownership, whose turn it is, an empty destination
/// and pending capture chains.
pub(crate) fn classify(
    board: &Board,
    piece: Piece,
    from: Coordinate,
    to: Coordinate,
) -> Result<MoveKind, IllegalMove> {
    let dx = to.x as isize - from.x as isize;
    let dy = to.y as isize - from.y as isize;
    if dx.abs() != dy.abs() {
        return Err(IllegalMove::NotDiagonal);
    }
    let distance = dx.abs();

    match piece.rank {
        Rank::Man => {
            if dy.signum() != piece.side.forward() {
                return Err(IllegalMove::WrongDirection);
            }
            match distance {
                1 => Ok(MoveKind::Step),
                2 => {
                    let mid = from
                        .offset(dx / 2, dy / 2)
                        .ok_or(IllegalMove::OutOfBounds)?;
                    match board.get(mid).copied().flatten() {
                        Some(other) if piece.is_opponent_of(other) => {
                            Ok(MoveKind::Capture { captured: mid })
                        }
                        Some(_) => Err(IllegalMove::BlockedByOwnPiece { at: mid }),
                        None => Err(IllegalMove::NothingToCapture),
                    }
                }
                _ => Err(IllegalMove::TooFar),
            }
        }
        Rank::King => {
            if distance == 1 {
                return Ok(MoveKind::Step);
            }
            // Flying capture: walk the ray and make sure exactly one
            // opposing piece sits between the two squares.
            let mut captured = None;
            for c in ray(board, from, (dx.signum(), dy.signum())).take_while(|&c| c != to) {
                match board[c] {
                    None => {}
                    Some(other) if !piece.is_opponent_of(other) => {
                        return Err(IllegalMove::BlockedByOwnPiece { at: c });
                    }
                    Some(_) if captured.is_some() => {
                        return Err(IllegalMove::MultiplePiecesOnRay);
                    }
                    Some(_) => captured = Some(c),
                }
            }
            captured
                .map(|captured| MoveKind::Capture { captured })
                .ok_or(IllegalMove::NothingToCapture)
        }
    }
}

/// Can the piece standing on `from` capture anything right now?
///
/// A man looks at its two forward diagonals, a king at the first piece on
/// each of its four rays. In both cases the square directly behind the
/// opposing piece has to be empty.
pub(crate) fn can_capture_from(board: &Board, from: Coordinate) -> bool {
    let Some(piece) = board.get(from).copied().flatten() else {
        return false;
    };
    match piece.rank {
        Rank::Man => {
            let dy = piece.side.forward();
            [-1, 1].into_iter().any(|dx| {
                let (Some(mid), Some(landing)) = (from.offset(dx, dy), from.offset(2 * dx, 2 * dy))
                else {
                    return false;
                };
                matches!(board.get(mid), Some(Some(other)) if piece.is_opponent_of(*other))
                    && matches!(board.get(landing), Some(None))
            })
        }
        Rank::King => DIAGONALS.into_iter().any(|dir| {
            let mut squares = ray(board, from, dir).skip_while(|&c| board[c].is_none());
            match (squares.next(), squares.next()) {
                (Some(blocker), Some(landing)) => {
                    matches!(board[blocker], Some(other) if piece.is_opponent_of(other))
                        && board[landing].is_none()
                }
                _ => false,
            }
        }),
    }
}

/// Every square on a diagonal through `from`, which is a superset of the
/// squares the piece there could ever move to.
pub(crate) fn diagonal_squares(board: &Board, from: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
    DIAGONALS.into_iter().flat_map(move |dir| ray(board, from, dir))
}
