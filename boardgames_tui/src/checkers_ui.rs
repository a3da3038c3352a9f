use boardgames::checkers::{DrawReason, Outcome, Phase, Side, NO_PROGRESS_LIMIT};
use boardgames::{Checkers, Coordinate};
use ratatui::{crossterm::event::KeyCode, prelude::*, widgets::*};
use tracing::{debug, info};

use crate::screen::{board_frame, draw_cell, render_board_block, split_status, Cursor, Screen};

pub struct CheckersScreen {
    game: Checkers,
    cursor: Cursor,
    /// The piece that is about to move.
    selected: Option<Coordinate>,
    message: String,
}

impl CheckersScreen {
    pub fn new(game: Checkers) -> Self {
        let cursor = Cursor::new(game.board().cols(), game.board().rows());
        Self {
            game,
            cursor,
            selected: None,
            message: String::from("Select a piece with Enter or Space"),
        }
    }

    /// Where the selected piece may go.
    fn destinations(&self) -> Vec<Coordinate> {
        match self.selected {
            Some(from) => self.game.legal_destinations(from),
            None => Vec::new(),
        }
    }

    fn is_own_piece(&self, at: Coordinate) -> bool {
        self.game
            .piece(at)
            .is_some_and(|piece| piece.side == self.game.turn())
    }

    /// Selects a piece, or moves the selected piece to the cursor.
    fn activate(&mut self) {
        if self.game.is_game_over() {
            return;
        }
        let at = self.cursor.pos;
        let chain = self.game.capture_pending();
        match self.selected {
            Some(from) if from == at && !chain => {
                self.selected = None;
                self.message.clear();
            }
            Some(_) if self.is_own_piece(at) && !chain => {
                self.selected = Some(at);
                self.message.clear();
            }
            Some(from) => self.play(from, at),
            None if self.is_own_piece(at) => {
                self.selected = Some(at);
                self.message.clear();
            }
            None => self.message = format!("Select one of {}'s pieces", self.game.turn()),
        }
    }

    fn play(&mut self, from: Coordinate, to: Coordinate) {
        match self.game.play(from, to) {
            Ok(report) if report.chain_continues => {
                self.selected = Some(to);
                self.message = String::from("Keep capturing with the same piece");
            }
            Ok(report) => {
                self.selected = None;
                self.message = if report.promoted {
                    String::from("Crowned!")
                } else {
                    String::new()
                };
                if let Phase::GameOver(outcome) = report.phase {
                    info!(outcome = %describe_outcome(outcome), "Checkers game over");
                }
            }
            Err(err) => {
                debug!(%from, %to, %err, "Rejected move");
                self.message = err.to_string();
            }
        }
    }

    fn status_lines(&self) -> Vec<Line<'_>> {
        let counts = self.game.piece_counts();
        let headline = match self.game.outcome() {
            Some(outcome) => describe_outcome(outcome),
            None if self.game.capture_pending() => {
                format!("{} must continue capturing", self.game.turn())
            }
            None => format!("{} to move", self.game.turn()),
        };
        vec![
            Line::from(headline).bold(),
            Line::from(format!(
                "White: {} | Black: {} | Turns without capture: {}/{}",
                counts.white,
                counts.black,
                self.game.moves_without_progress(),
                NO_PROGRESS_LIMIT
            )),
            Line::from(self.message.as_str()).italic(),
        ]
    }
}

pub fn describe_outcome(outcome: Outcome) -> String {
    match outcome {
        Outcome::Win(side) => format!("{} wins", side),
        Outcome::Draw(DrawReason::NoProgress) => format!(
            "Draw after {} turns without a capture",
            NO_PROGRESS_LIMIT
        ),
        Outcome::Draw(DrawReason::InsufficientMaterial) => {
            String::from("Draw, only two kings are left")
        }
    }
}

struct BoardWidget<'a> {
    game: &'a Checkers,
    cursor: Coordinate,
    selected: Option<Coordinate>,
    destinations: &'a [Coordinate],
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let board = self.game.board();
        let inner = render_board_block(" Checkers ", area, buf);
        for (coord, square) in board.iter() {
            let background = if coord == self.cursor {
                Color::Yellow
            } else if Some(coord) == self.selected {
                Color::Blue
            } else if self.destinations.contains(&coord) {
                Color::Green
            } else if (coord.x + coord.y) % 2 == 0 {
                Color::DarkGray
            } else {
                Color::Gray
            };
            let (symbol, foreground) = match square {
                Some(piece) => {
                    let color = match piece.side {
                        Side::White => Color::White,
                        Side::Black => Color::Red,
                    };
                    (format!("{} ", piece.unicode_char()), color)
                }
                None => (String::from("  "), Color::Reset),
            };
            draw_cell(
                buf,
                inner,
                coord,
                &symbol,
                Style::new().fg(foreground).bg(background),
            );
        }
    }
}

impl Screen for CheckersScreen {
    fn render(&self, frame: &mut Frame) {
        let (board_area, status_area) = split_status(frame.size(), 3);
        let board = self.game.board();
        let destinations = self.destinations();
        frame.render_widget(
            BoardWidget {
                game: &self.game,
                cursor: self.cursor.pos,
                selected: self.selected,
                destinations: &destinations,
            },
            board_frame(board_area, board.cols(), board.rows()),
        );
        frame.render_widget(Paragraph::new(self.status_lines()), status_area);
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.cursor.handle_key(key) {
            return;
        }
        if let KeyCode::Enter | KeyCode::Char(' ') = key {
            self.activate();
        }
    }
}
