use boardgames::checkers::{DrawReason, MoveKind, Outcome, Phase, Piece, Side};
use boardgames::{Checkers, Coordinate};

fn c(x: usize, y: usize) -> Coordinate {
    Coordinate::new(x, y)
}

#[test]
fn capture_on_a_full_board() {
    // The standard layout, with one man of each side moved into contact.
    let mut board = Checkers::new().board().clone();
    board[c(2, 2)] = None;
    board[c(3, 2)] = Some(Piece::man(Side::White));
    board[c(3, 5)] = None;
    board[c(4, 3)] = Some(Piece::man(Side::Black));
    let mut game = Checkers::from_board(board, Side::White);
    assert_eq!(game.piece_counts().black, 12);

    assert!(game.is_legal_move(c(3, 2), c(5, 4)));
    assert_eq!(
        game.check_move(c(3, 2), c(5, 4)),
        Ok(MoveKind::Capture { captured: c(4, 3) })
    );
    let report = game.play(c(3, 2), c(5, 4)).unwrap();
    assert!(report.kind.is_capture());
    assert!(!report.chain_continues);
    assert_eq!(game.piece(c(4, 3)), None);
    assert_eq!(game.piece(c(5, 4)), Some(Piece::man(Side::White)));
    assert_eq!(game.piece_counts().black, 11);
    assert_eq!(game.piece_counts().white, 12);
    assert_eq!(game.turn(), Side::Black);
    assert_eq!(game.moves_without_progress(), 0);
}

#[test]
fn two_kings_are_a_draw() {
    let mut board = Checkers::new().board().clone();
    for coord in board.coordinates().collect::<Vec<_>>() {
        board[coord] = None;
    }
    board[c(1, 1)] = Some(Piece::king(Side::White));
    board[c(6, 6)] = Some(Piece::king(Side::Black));
    let game = Checkers::from_board(board, Side::Black);
    assert_eq!(
        game.outcome(),
        Some(Outcome::Draw(DrawReason::InsufficientMaterial))
    );
    assert!(game.is_game_over());
    assert!(game.legal_moves().is_empty());
}

#[test]
fn twenty_quiet_turns_end_in_a_draw() {
    // Both kings walk back and forth while the men stay put.
    let mut board = Checkers::new().board().clone();
    for coord in board.coordinates().collect::<Vec<_>>() {
        board[coord] = None;
    }
    board[c(0, 0)] = Some(Piece::king(Side::White));
    board[c(2, 0)] = Some(Piece::man(Side::White));
    board[c(7, 7)] = Some(Piece::king(Side::Black));
    board[c(5, 7)] = Some(Piece::man(Side::Black));
    let mut game = Checkers::from_board(board, Side::Black);

    let mut turns = 0;
    while !game.is_game_over() {
        let (from, to) = match (game.turn(), turns % 4) {
            (Side::Black, 0) => (c(7, 7), c(6, 6)),
            (Side::White, 1) => (c(0, 0), c(1, 1)),
            (Side::Black, 2) => (c(6, 6), c(7, 7)),
            (Side::White, 3) => (c(1, 1), c(0, 0)),
            other => panic!("unexpected turn {:?}", other),
        };
        game.play(from, to).unwrap();
        turns += 1;
    }
    assert_eq!(turns, 20);
    assert_eq!(
        game.phase(),
        Phase::GameOver(Outcome::Draw(DrawReason::NoProgress))
    );
}

#[test]
fn a_full_game_of_legal_moves_terminates() {
    let mut game = Checkers::new();
    let mut plies = 0;
    while let Some(&(from, to)) = game.legal_moves().first() {
        let more = game.move_piece(from, to).unwrap();
        if !more {
            game.end_turn().unwrap();
        }
        plies += 1;
        assert!(plies < 10_000, "the game should have ended by now");
    }
    assert!(game.is_game_over());
    let counts = game.piece_counts();
    assert!(counts.white <= 12 && counts.black <= 12);
}
