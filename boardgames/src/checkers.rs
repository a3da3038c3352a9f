mod moves;
mod piece;

pub use moves::MoveKind;
pub use piece::*;

use tracing::{debug, trace};

use crate::{visualize_checkers_board, Coordinate, Grid, IllegalMove, InvalidDimensions};
use moves::{can_capture_from, classify, diagonal_squares};

/// A checkers board. `None` is an empty square.
pub type Board = Grid<Option<Piece>>;

/// The side length of the standard board.
pub const DEFAULT_SIZE: usize = 8;

/// After this many completed turns without a piece being captured, the game is drawn.
pub const NO_PROGRESS_LIMIT: u32 = 20;

/// How many rows each side fills at the start.
const STARTING_ROWS: usize = 3;

/// The number of pieces each side has on the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PieceCounts {
    pub white: usize,
    pub black: usize,
}

impl PieceCounts {
    fn on_board(board: &Board) -> Self {
        let mut counts = Self::default();
        for (_, piece) in board.iter() {
            match piece.map(|p| p.side) {
                Some(Side::White) => counts.white += 1,
                Some(Side::Black) => counts.black += 1,
                None => {}
            }
        }
        counts
    }

    pub fn of(self, side: Side) -> usize {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }

    fn decrement(&mut self, side: Side) {
        let count = match side {
            Side::White => &mut self.white,
            Side::Black => &mut self.black,
        };
        *count = count.saturating_sub(1);
    }
}

/// Where the game is in its turn cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The side to move may move any of its pieces.
    AwaitingMove,
    /// The piece at `piece` has captured and can capture again, so it has to.
    ChainInProgress { piece: Coordinate },
    /// The last move finished the turn. Call [`Checkers::end_turn()`] to hand over.
    TurnOver,
    GameOver(Outcome),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win(Side),
    Draw(DrawReason),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrawReason {
    /// [`NO_PROGRESS_LIMIT`] turns passed without a capture.
    NoProgress,
    /// Only one king per side is left.
    InsufficientMaterial,
}

/// Summarizes what a single move did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub from: Coordinate,
    pub to: Coordinate,
    pub kind: MoveKind,
    pub promoted: bool,
    /// Should the same piece capture again?
    pub chain_continues: bool,
    /// The phase after the move (and, for [`Checkers::play()`], after handing over the turn).
    pub phase: Phase,
}

/// The complete state of a game of checkers.
///
/// All mutation goes through [`Self::move_piece()`] and [`Self::end_turn()`],
/// which check legality before touching the board, so a rejected move
/// never leaves anything half-applied.
#[derive(Clone, Debug)]
pub struct Checkers {
    board: Board,
    turn: Side,
    phase: Phase,
    counts: PieceCounts,
    moves_without_progress: u32,
    /// The counts when the no-progress counter was last reset.
    last_counts: PieceCounts,
}

impl Default for Checkers {
    fn default() -> Self {
        Self::new()
    }
}

impl Checkers {
    /// A new game on the standard 8x8 board, Black to move.
    pub fn new() -> Self {
        Self::with_size(DEFAULT_SIZE, DEFAULT_SIZE).expect("8x8 is a valid checkers board")
    }

    /// A new game with the default layout: each side's men fill the dark
    /// squares of its first three rows.
    pub fn with_size(cols: usize, rows: usize) -> Result<Self, InvalidDimensions> {
        if cols < 2 || rows < 2 * STARTING_ROWS {
            return Err(InvalidDimensions { cols, rows });
        }
        let board = Grid::from_fn(cols, rows, |c| {
            if (c.x + c.y) % 2 != 0 {
                None
            } else if c.y < STARTING_ROWS {
                Some(Piece::man(Side::White))
            } else if c.y >= rows - STARTING_ROWS {
                Some(Piece::man(Side::Black))
            } else {
                None
            }
        })?;
        Ok(Self::from_board(board, Side::Black))
    }

    /// Starts a game from an arbitrary position.
    ///
    /// The piece counts are taken from the board. If the position is already
    /// decided, the game starts out as over.
    pub fn from_board(board: Board, to_move: Side) -> Self {
        let counts = PieceCounts::on_board(&board);
        let mut game = Self {
            board,
            turn: to_move,
            phase: Phase::AwaitingMove,
            counts,
            moves_without_progress: 0,
            last_counts: counts,
        };
        if let Some(winner) = game.winner() {
            game.phase = Phase::GameOver(Outcome::Win(winner));
        } else if game.is_insufficient_material() {
            game.phase = Phase::GameOver(Outcome::Draw(DrawReason::InsufficientMaterial));
        }
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The piece at `coord`, if any. Out-of-bounds coordinates are empty.
    pub fn piece(&self, coord: Coordinate) -> Option<Piece> {
        self.board.get(coord).copied().flatten()
    }

    /// The side whose move it is.
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn piece_counts(&self) -> PieceCounts {
        self.counts
    }

    /// Is a capture chain waiting to be continued?
    pub fn capture_pending(&self) -> bool {
        self.pending_piece().is_some()
    }

    /// The piece that has to continue capturing, if any.
    pub fn pending_piece(&self) -> Option<Coordinate> {
        match self.phase {
            Phase::ChainInProgress { piece } => Some(piece),
            _ => None,
        }
    }

    pub fn moves_without_progress(&self) -> u32 {
        self.moves_without_progress
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Checks whether the side to move may move the piece at `from` to `to`,
    /// and what kind of move that would be.
    pub fn check_move(&self, from: Coordinate, to: Coordinate) -> Result<MoveKind, IllegalMove> {
        self.ensure_accepting_moves()?;
        self.validate(self.turn, self.pending_piece(), from, to)
            .map(|(_, kind)| kind)
    }

    pub fn is_legal_move(&self, from: Coordinate, to: Coordinate) -> bool {
        self.check_move(from, to).is_ok()
    }

    /// Moves a piece, capturing if the move jumps an opposing piece.
    ///
    /// Returns `true` iff the same piece now has to capture again. In that
    /// case it stays the same side's turn. Otherwise the turn is over and
    /// has to be handed over with [`Self::end_turn()`].
    pub fn move_piece(&mut self, from: Coordinate, to: Coordinate) -> Result<bool, IllegalMove> {
        self.apply(from, to).map(|report| report.chain_continues)
    }

    /// Hands the turn to the other side and checks whether the game is over.
    ///
    /// Only valid right after a move finished the turn.
    pub fn end_turn(&mut self) -> Result<Phase, IllegalMove> {
        match self.phase {
            Phase::TurnOver => {}
            Phase::GameOver(_) => return Err(IllegalMove::GameOver),
            Phase::AwaitingMove | Phase::ChainInProgress { .. } => {
                return Err(IllegalMove::TurnNotOver)
            }
        }
        self.turn = self.turn.opponent();
        self.phase = match self.evaluate() {
            Some(outcome) => {
                debug!(?outcome, "Game over");
                Phase::GameOver(outcome)
            }
            None => Phase::AwaitingMove,
        };
        trace!("\n{}", self);
        Ok(self.phase)
    }

    /// Moves a piece and, if that finished the turn, hands the turn over.
    pub fn play(&mut self, from: Coordinate, to: Coordinate) -> Result<MoveReport, IllegalMove> {
        let mut report = self.apply(from, to)?;
        if !report.chain_continues {
            report.phase = self.end_turn()?;
        }
        Ok(report)
    }

    /// All legal moves for the side to move, as `(from, to)` pairs.
    pub fn legal_moves(&self) -> Vec<(Coordinate, Coordinate)> {
        match self.phase {
            Phase::AwaitingMove => self.moves_for(self.turn, None).collect(),
            Phase::ChainInProgress { piece } => self.moves_for(self.turn, Some(piece)).collect(),
            Phase::TurnOver | Phase::GameOver(_) => Vec::new(),
        }
    }

    /// The squares the piece at `from` may legally move to.
    pub fn legal_destinations(&self, from: Coordinate) -> Vec<Coordinate> {
        if !self.board.contains(from) {
            return Vec::new();
        }
        diagonal_squares(&self.board, from)
            .filter(|&to| self.is_legal_move(from, to))
            .collect()
    }

    fn apply(&mut self, from: Coordinate, to: Coordinate) -> Result<MoveReport, IllegalMove> {
        self.ensure_accepting_moves()?;
        let (piece, kind) = self.validate(self.turn, self.pending_piece(), from, to)?;

        self.board[from] = None;
        self.board[to] = Some(piece);
        if let MoveKind::Capture { captured } = kind {
            self.take_piece(captured);
        }

        let chain_continues = kind.is_capture() && can_capture_from(&self.board, to);
        let promoted =
            !chain_continues && !piece.is_king() && to.y == piece.side.promotion_row(self.board.rows());
        if promoted {
            self.board[to] = Some(piece.promoted());
        }
        self.phase = if chain_continues {
            Phase::ChainInProgress { piece: to }
        } else {
            Phase::TurnOver
        };
        debug!(side = %piece.side, %from, %to, ?kind, promoted, chain_continues, "Moved piece");

        Ok(MoveReport {
            from,
            to,
            kind,
            promoted,
            chain_continues,
            phase: self.phase,
        })
    }

    fn ensure_accepting_moves(&self) -> Result<(), IllegalMove> {
        match self.phase {
            Phase::GameOver(_) => Err(IllegalMove::GameOver),
            Phase::TurnOver => Err(IllegalMove::TurnNotFinished),
            Phase::AwaitingMove | Phase::ChainInProgress { .. } => Ok(()),
        }
    }

    /// Removes a captured piece and updates the counts.
    fn take_piece(&mut self, coord: Coordinate) {
        if let Some(piece) = self.board.get_mut(coord).and_then(Option::take) {
            self.counts.decrement(piece.side);
        }
    }

    // The actual rule check, independent of the phase.
    fn validate(
        &self,
        side: Side,
        pending: Option<Coordinate>,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<(Piece, MoveKind), IllegalMove> {
        if from == to {
            return Err(IllegalMove::NullMove);
        }
        if !self.board.contains(from) || !self.board.contains(to) {
            return Err(IllegalMove::OutOfBounds);
        }
        if let Some(piece) = pending.filter(|&p| p != from) {
            return Err(IllegalMove::MustContinueCapture { piece });
        }
        let piece = self.board[from].ok_or(IllegalMove::NoPieceAt { from })?;
        if piece.side != side {
            return Err(IllegalMove::NotYourPiece { from });
        }
        if self.board[to].is_some() {
            return Err(IllegalMove::DestinationOccupied { to });
        }
        let kind = classify(&self.board, piece, from, to)?;
        if let (Some(piece), false) = (pending, kind.is_capture()) {
            return Err(IllegalMove::MustContinueCapture { piece });
        }
        Ok((piece, kind))
    }

    fn moves_for(
        &self,
        side: Side,
        pending: Option<Coordinate>,
    ) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.board
            .iter()
            .filter(move |(_, piece)| matches!(piece, Some(p) if p.side == side))
            .flat_map(move |(from, _)| diagonal_squares(&self.board, from).map(move |to| (from, to)))
            .filter(move |&(from, to)| self.validate(side, pending, from, to).is_ok())
    }

    fn winner(&self) -> Option<Side> {
        if self.counts.white == 0 {
            Some(Side::Black)
        } else if self.counts.black == 0 {
            Some(Side::White)
        } else if self.moves_for(self.turn, None).next().is_none() {
            Some(self.turn.opponent())
        } else {
            None
        }
    }

    fn is_insufficient_material(&self) -> bool {
        self.counts == (PieceCounts { white: 1, black: 1 })
            && self
                .board
                .iter()
                .all(|(_, piece)| piece.map_or(true, Piece::is_king))
    }

    // Runs once per completed turn, after the turn was handed over.
    fn evaluate(&mut self) -> Option<Outcome> {
        if let Some(winner) = self.winner() {
            return Some(Outcome::Win(winner));
        }

        // Only a change in the piece counts counts as progress. A promotion
        // on its own does not reset the counter.
        if self.counts != self.last_counts {
            self.moves_without_progress = 0;
            self.last_counts = self.counts;
        } else {
            self.moves_without_progress += 1;
        }
        if self.moves_without_progress >= NO_PROGRESS_LIMIT {
            return Some(Outcome::Draw(DrawReason::NoProgress));
        }

        if self.is_insufficient_material() {
            return Some(Outcome::Draw(DrawReason::InsufficientMaterial));
        }
        None
    }
}

impl std::fmt::Display for Checkers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", visualize_checkers_board(&self.board))?;
        write!(
            f,
            "White: {} | Black: {} | {} to move",
            self.counts.white, self.counts.black, self.turn
        )
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::CheckersPosition;

    fn c(x: usize, y: usize) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn position(pieces: &[(usize, usize, Piece)], to_move: Side) -> Checkers {
        let mut board = Grid::new(8, 8, None).unwrap();
        for &(x, y, piece) in pieces {
            board[c(x, y)] = Some(piece);
        }
        Checkers::from_board(board, to_move)
    }

    const WHITE_MAN: Piece = Piece::man(Side::White);
    const BLACK_MAN: Piece = Piece::man(Side::Black);
    const WHITE_KING: Piece = Piece::king(Side::White);
    const BLACK_KING: Piece = Piece::king(Side::Black);

    quickcheck! {
        fn no_null_moves(pos: CheckersPosition, x: u8, y: u8) -> bool {
            let coord = c(x as usize % 8, y as usize % 8);
            !pos.game.is_legal_move(coord, coord)
        }

        fn men_step_forward_only(pos: CheckersPosition) -> bool {
            let game = pos.game;
            game.legal_moves().into_iter().all(|(from, to)| {
                let piece = game.piece(from).unwrap();
                match (piece.rank, game.check_move(from, to)) {
                    (Rank::Man, Ok(MoveKind::Step)) => {
                        to.y as isize - from.y as isize == piece.side.forward()
                    }
                    _ => true,
                }
            })
        }

        fn captures_remove_exactly_one_piece(pos: CheckersPosition) -> bool {
            let game = pos.game;
            let opponent = game.turn().opponent();
            game.legal_moves().into_iter().all(|(from, to)| {
                let Ok(MoveKind::Capture { captured }) = game.check_move(from, to) else {
                    return true;
                };
                let mut after = game.clone();
                after.move_piece(from, to).unwrap();
                after.piece_counts().of(opponent) + 1 == game.piece_counts().of(opponent)
                    && after.piece(captured).is_none()
            })
        }

        fn king_never_jumps_two_pieces(pos: CheckersPosition) -> bool {
            let game = pos.game;
            game.legal_moves().into_iter().all(|(from, to)| {
                let piece = game.piece(from).unwrap();
                let (dx, dy) = (
                    (to.x as isize - from.x as isize).signum(),
                    (to.y as isize - from.y as isize).signum(),
                );
                let jumped = moves::ray(game.board(), from, (dx, dy))
                    .take_while(|&sq| sq != to)
                    .filter(|&sq| game.piece(sq).is_some_and(|p| p.is_opponent_of(piece)))
                    .count();
                jumped <= 1
            })
        }

        fn chain_keeps_turn_and_piece(pos: CheckersPosition) -> bool {
            let game = pos.game;
            let side = game.turn();
            game.legal_moves().into_iter().all(|(from, to)| {
                let mut after = game.clone();
                if !after.move_piece(from, to).unwrap() {
                    return after.phase() == Phase::TurnOver;
                }
                after.turn() == side
                    && after.legal_moves().iter().all(|&(f, t)| {
                        f == to && after.check_move(f, t).is_ok_and(MoveKind::is_capture)
                    })
            })
        }
    }

    #[test]
    fn default_layout() {
        let game = Checkers::new();
        assert_eq!(game.piece_counts(), PieceCounts { white: 12, black: 12 });
        assert_eq!(game.turn(), Side::Black);
        assert_eq!(game.phase(), Phase::AwaitingMove);
        assert_eq!(game.piece(c(0, 0)), Some(WHITE_MAN));
        assert_eq!(game.piece(c(1, 0)), None);
        assert_eq!(game.piece(c(1, 5)), Some(BLACK_MAN));
        assert_eq!(game.piece(c(0, 3)), None);
        // Only the front row can move at the start.
        assert_eq!(game.legal_moves().len(), 7);
    }

    #[test]
    fn tiny_boards_are_rejected() {
        assert!(Checkers::with_size(0, 0).is_err());
        assert!(Checkers::with_size(8, 5).is_err());
        assert!(Checkers::with_size(10, 10).is_ok());
    }

    #[test]
    fn rejected_moves_do_not_change_the_game() {
        let mut game = Checkers::new();
        let before = game.clone();
        assert_eq!(
            game.move_piece(c(1, 5), c(1, 4)),
            Err(IllegalMove::NotDiagonal)
        );
        assert_eq!(
            game.move_piece(c(0, 2), c(1, 3)),
            Err(IllegalMove::NotYourPiece { from: c(0, 2) })
        );
        assert_eq!(
            game.move_piece(c(1, 5), c(9, 13)),
            Err(IllegalMove::OutOfBounds)
        );
        assert_eq!(
            game.move_piece(c(1, 3), c(2, 2)),
            Err(IllegalMove::NoPieceAt { from: c(1, 3) })
        );
        assert_eq!(game.board(), before.board());
        assert_eq!(game.phase(), before.phase());
    }

    #[test]
    fn turn_must_be_handed_over() {
        let mut game = Checkers::new();
        assert_eq!(game.end_turn(), Err(IllegalMove::TurnNotOver));
        assert_eq!(game.move_piece(c(1, 5), c(0, 4)), Ok(false));
        assert_eq!(game.phase(), Phase::TurnOver);
        assert_eq!(
            game.move_piece(c(0, 2), c(1, 3)),
            Err(IllegalMove::TurnNotFinished)
        );
        assert_eq!(game.end_turn(), Ok(Phase::AwaitingMove));
        assert_eq!(game.turn(), Side::White);
        assert!(game.is_legal_move(c(0, 2), c(1, 3)));
    }

    #[test]
    fn capture_chain_must_be_continued() {
        let mut game = position(
            &[
                (1, 0, WHITE_MAN),
                (7, 0, WHITE_MAN),
                (2, 1, BLACK_MAN),
                (4, 3, BLACK_MAN),
                (7, 7, BLACK_MAN),
            ],
            Side::White,
        );
        assert_eq!(game.move_piece(c(1, 0), c(3, 2)), Ok(true));
        assert!(game.capture_pending());
        assert_eq!(game.turn(), Side::White);
        assert_eq!(game.piece_counts().black, 2);
        assert_eq!(
            game.check_move(c(7, 0), c(6, 1)),
            Err(IllegalMove::MustContinueCapture { piece: c(3, 2) })
        );
        assert_eq!(
            game.check_move(c(3, 2), c(2, 3)),
            Err(IllegalMove::MustContinueCapture { piece: c(3, 2) })
        );
        assert_eq!(game.end_turn(), Err(IllegalMove::TurnNotOver));
        assert_eq!(game.legal_moves(), vec![(c(3, 2), c(5, 4))]);

        let report = game.play(c(3, 2), c(5, 4)).unwrap();
        assert!(!report.chain_continues);
        assert_eq!(report.phase, Phase::AwaitingMove);
        assert_eq!(game.turn(), Side::Black);
        assert_eq!(game.piece_counts().black, 1);
        assert!(game.piece(c(4, 3)).is_none());
    }

    #[test]
    fn men_are_crowned_on_the_far_row() {
        let mut game = position(
            &[(2, 6, WHITE_MAN), (5, 1, BLACK_MAN), (0, 7, BLACK_MAN)],
            Side::White,
        );
        let report = game.play(c(2, 6), c(3, 7)).unwrap();
        assert!(report.promoted);
        assert_eq!(game.piece(c(3, 7)), Some(WHITE_KING));

        let report = game.play(c(5, 1), c(4, 0)).unwrap();
        assert!(report.promoted);
        assert_eq!(game.piece(c(4, 0)), Some(BLACK_KING));

        // Kings move backwards.
        assert!(game.is_legal_move(c(3, 7), c(2, 6)));
    }

    #[test]
    fn losing_the_last_piece_loses_the_game() {
        let mut game = position(&[(3, 2, WHITE_MAN), (4, 3, BLACK_MAN)], Side::White);
        let report = game.play(c(3, 2), c(5, 4)).unwrap();
        assert_eq!(report.phase, Phase::GameOver(Outcome::Win(Side::White)));
        assert!(game.legal_moves().is_empty());
        assert_eq!(game.move_piece(c(5, 4), c(6, 5)), Err(IllegalMove::GameOver));
    }

    #[test]
    fn side_without_moves_loses() {
        let mut game = position(
            &[
                (0, 0, WHITE_MAN),
                (1, 1, BLACK_MAN),
                (2, 2, BLACK_MAN),
                (5, 5, BLACK_MAN),
            ],
            Side::Black,
        );
        let report = game.play(c(5, 5), c(4, 4)).unwrap();
        assert_eq!(report.phase, Phase::GameOver(Outcome::Win(Side::Black)));
    }

    #[test]
    fn lone_kings_are_a_draw() {
        let game = position(&[(0, 0, WHITE_KING), (7, 7, BLACK_KING)], Side::White);
        assert_eq!(
            game.outcome(),
            Some(Outcome::Draw(DrawReason::InsufficientMaterial))
        );

        let mut game = position(
            &[(0, 0, WHITE_KING), (2, 2, BLACK_MAN), (7, 7, BLACK_KING)],
            Side::White,
        );
        let report = game.play(c(0, 0), c(3, 3)).unwrap();
        assert_eq!(
            report.phase,
            Phase::GameOver(Outcome::Draw(DrawReason::InsufficientMaterial))
        );
    }

    #[test]
    fn twenty_turns_without_progress_are_a_draw() {
        let mut game = position(
            &[
                (0, 0, WHITE_KING),
                (0, 2, WHITE_KING),
                (7, 7, BLACK_KING),
                (7, 5, BLACK_KING),
            ],
            Side::Black,
        );
        let shuffles = [
            (c(7, 7), c(6, 6)),
            (c(0, 0), c(1, 1)),
            (c(6, 6), c(7, 7)),
            (c(1, 1), c(0, 0)),
        ];
        for turn in 0..NO_PROGRESS_LIMIT as usize {
            assert_eq!(game.moves_without_progress(), turn as u32);
            let (from, to) = shuffles[turn % shuffles.len()];
            let report = game.play(from, to).unwrap();
            if turn + 1 < NO_PROGRESS_LIMIT as usize {
                assert_eq!(report.phase, Phase::AwaitingMove);
            } else {
                assert_eq!(
                    report.phase,
                    Phase::GameOver(Outcome::Draw(DrawReason::NoProgress))
                );
            }
        }
    }

    #[test]
    fn promotion_alone_is_not_progress() {
        let mut game = position(
            &[(2, 6, WHITE_MAN), (0, 0, WHITE_KING), (7, 1, BLACK_KING), (7, 3, BLACK_KING)],
            Side::White,
        );
        game.play(c(2, 6), c(3, 7)).unwrap();
        assert_eq!(game.moves_without_progress(), 1);
    }
}
