/// One of the two players.
///
/// White starts on the first three rows and moves towards higher row indices,
/// Black starts on the last three rows and moves towards row 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// The row delta of a forward step for a man of this side.
    pub fn forward(self) -> isize {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// The row on which a man of this side is crowned, i.e. the far edge
    /// in its forward direction.
    pub fn promotion_row(self, rows: usize) -> usize {
        match self {
            Side::White => rows - 1,
            Side::Black => 0,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rank {
    Man,
    King,
}

/// A checkers piece. Empty squares are represented as `None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub rank: Rank,
}

impl Piece {
    pub const fn man(side: Side) -> Self {
        Self {
            side,
            rank: Rank::Man,
        }
    }

    pub const fn king(side: Side) -> Self {
        Self {
            side,
            rank: Rank::King,
        }
    }

    pub fn is_king(self) -> bool {
        self.rank == Rank::King
    }

    pub fn is_opponent_of(self, other: Piece) -> bool {
        self.side != other.side
    }

    /// The same piece, crowned. Kings stay kings.
    #[must_use]
    pub fn promoted(self) -> Self {
        Self::king(self.side)
    }

    /// Render this piece as a Unicode draughts character.
    pub fn unicode_char(self) -> char {
        match (self.side, self.rank) {
            (Side::Black, Rank::Man) => '⛀',
            (Side::Black, Rank::King) => '⛁',
            (Side::White, Rank::Man) => '⛂',
            (Side::White, Rank::King) => '⛃',
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.unicode_char())
    }
}
