use boardgames::minesweeper::{Cell, CellKind, GameStatus};
use boardgames::{Coordinate, Minesweeper};
use ratatui::{crossterm::event::KeyCode, prelude::*, widgets::*};
use tracing::{debug, info};

use crate::screen::{board_frame, draw_cell, render_board_block, split_status, Cursor, Screen};

pub struct MinesweeperScreen {
    game: Minesweeper,
    cursor: Cursor,
    message: String,
}

impl MinesweeperScreen {
    pub fn new(game: Minesweeper) -> Self {
        let cursor = Cursor::new(game.field().cols(), game.field().rows());
        Self {
            game,
            cursor,
            message: String::from("Space opens a cell, f places a flag"),
        }
    }

    fn open(&mut self) {
        match self.game.open_cell(self.cursor.pos) {
            Ok(GameStatus::Playing) => self.message.clear(),
            Ok(status) => {
                info!(?status, "Minesweeper game over");
                self.message.clear();
            }
            Err(err) => {
                debug!(%err, "Rejected action");
                self.message = err.to_string();
            }
        }
    }

    fn toggle_flag(&mut self) {
        match self.game.toggle_flag(self.cursor.pos) {
            Ok(_) => self.message.clear(),
            Err(err) => self.message = err.to_string(),
        }
    }

    fn status_lines(&self) -> Vec<Line<'_>> {
        let headline = match self.game.status() {
            GameStatus::Playing => Line::from(format!(
                "Mines: {} | Flags: {}",
                self.game.mines_remaining(),
                self.game.flags_placed()
            )),
            GameStatus::Won => Line::from("All mines found, you win!").green().bold(),
            GameStatus::Lost => Line::from("Boom! You opened a mine.").red().bold(),
        };
        vec![headline, Line::from(self.message.as_str()).italic()]
    }
}

/// The symbol and style of a cell.
fn appearance(cell: Cell, flagged: bool) -> (&'static str, Style) {
    if flagged {
        return ("⚑ ", Style::new().fg(Color::Red).bg(Color::DarkGray));
    }
    if !cell.revealed {
        return ("■ ", Style::new().fg(Color::Gray).bg(Color::DarkGray));
    }
    let style = Style::new().bg(Color::Black);
    match cell.kind {
        CellKind::Empty => ("  ", style),
        CellKind::Mine => ("* ", style.fg(Color::LightRed).bold()),
        CellKind::Count(n) => {
            const DIGITS: [&str; 9] = ["0 ", "1 ", "2 ", "3 ", "4 ", "5 ", "6 ", "7 ", "8 "];
            let color = match n {
                1 => Color::LightBlue,
                2 => Color::Green,
                3 => Color::LightRed,
                4 => Color::Blue,
                5 => Color::Red,
                6 => Color::Cyan,
                _ => Color::Magenta,
            };
            (DIGITS[usize::from(n.min(8))], style.fg(color))
        }
    }
}

struct FieldWidget<'a> {
    game: &'a Minesweeper,
    cursor: Coordinate,
}

impl Widget for FieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = render_board_block(" Minesweeper ", area, buf);
        for (coord, &cell) in self.game.field().iter() {
            let (symbol, mut style) = appearance(cell, self.game.is_flagged(coord));
            if coord == self.cursor {
                style = style.bg(Color::Yellow);
            }
            draw_cell(buf, inner, coord, symbol, style);
        }
    }
}

impl Screen for MinesweeperScreen {
    fn render(&self, frame: &mut Frame) {
        let (field_area, status_area) = split_status(frame.size(), 2);
        let field = self.game.field();
        frame.render_widget(
            FieldWidget {
                game: &self.game,
                cursor: self.cursor.pos,
            },
            board_frame(field_area, field.cols(), field.rows()),
        );
        frame.render_widget(Paragraph::new(self.status_lines()), status_area);
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.cursor.handle_key(key) {
            return;
        }
        match key {
            KeyCode::Enter | KeyCode::Char(' ') => self.open(),
            KeyCode::Char('f') => self.toggle_flag(),
            _ => {}
        }
    }
}
