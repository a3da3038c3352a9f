use quickcheck::{Arbitrary, Gen};

use crate::checkers::{Board, Checkers, Piece, Rank, Side};
use crate::{Coordinate, Grid};

/// Coordinates on boards of up to 16x16.
impl Arbitrary for Coordinate {
    fn arbitrary(g: &mut Gen) -> Self {
        Coordinate::new(usize::from(u8::arbitrary(g) % 16), usize::from(u8::arbitrary(g) % 16))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let (x, y) = (self.x, self.y);
        Box::new(
            x.shrink()
                .map(move |x| Coordinate::new(x, y))
                .chain(y.shrink().map(move |y| Coordinate::new(x, y))),
        )
    }
}

impl Arbitrary for Side {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[Side::White, Side::Black]).unwrap()
    }
}

impl Arbitrary for Piece {
    fn arbitrary(g: &mut Gen) -> Self {
        let rank = *g.choose(&[Rank::Man, Rank::King]).unwrap();
        Piece {
            side: Side::arbitrary(g),
            rank,
        }
    }
}

/// A game in some mid-game position on the standard board.
#[derive(Clone, Debug)]
pub struct CheckersPosition {
    pub game: Checkers,
}

impl Arbitrary for CheckersPosition {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut board: Board = Grid::new(8, 8, None).unwrap();
        // Pieces only stand on dark squares, and men never stand on their
        // own promotion row.
        for y in 0..8 {
            for x in (y % 2..8).step_by(2) {
                if u8::arbitrary(g) % 3 != 0 {
                    continue;
                }
                let mut piece = Piece::arbitrary(g);
                if piece.side.promotion_row(8) == y {
                    piece = piece.promoted();
                }
                board[Coordinate::new(x, y)] = Some(piece);
            }
        }
        CheckersPosition {
            game: Checkers::from_board(board, Side::arbitrary(g)),
        }
    }
}
