use std::time::Instant;

use boardgames::snake::{self, SnakeStatus};
use boardgames::Snake;
use ratatui::{crossterm::event::KeyCode, prelude::*, widgets::*};
use tracing::info;

use crate::screen::{board_frame, draw_cell, render_board_block, split_status, Screen};

pub struct SnakeScreen {
    game: Snake,
    last_step: Instant,
}

impl SnakeScreen {
    pub fn new(game: Snake) -> Self {
        Self {
            game,
            last_step: Instant::now(),
        }
    }

    fn status_line(&self) -> Line<'_> {
        let stats = format!(
            "Score: {} | Level: {} | Speed: {} ms",
            self.game.score(),
            self.game.level(),
            self.game.interval().as_millis()
        );
        match self.game.status() {
            SnakeStatus::Running => Line::from(stats),
            SnakeStatus::Crashed => Line::from(format!("Game over! {}", stats)).red().bold(),
            SnakeStatus::Won => Line::from(format!("The board is full! {}", stats))
                .green()
                .bold(),
        }
    }
}

struct FieldWidget<'a> {
    game: &'a Snake,
}

impl Widget for FieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = render_board_block(" Snake ", area, buf);
        let body_style = Style::new().fg(Color::Green);
        for segment in self.game.body().skip(1) {
            draw_cell(buf, inner, segment, "o ", body_style);
        }
        draw_cell(buf, inner, self.game.head(), "@ ", body_style.bold());
        if let Some(fruit) = self.game.fruit() {
            draw_cell(buf, inner, fruit, "● ", Style::new().fg(Color::Red));
        }
    }
}

impl Screen for SnakeScreen {
    fn render(&self, frame: &mut Frame) {
        let (field_area, status_area) = split_status(frame.size(), 1);
        frame.render_widget(
            FieldWidget { game: &self.game },
            board_frame(field_area, self.game.cols(), self.game.rows()),
        );
        frame.render_widget(Paragraph::new(self.status_line()), status_area);
    }

    fn handle_key(&mut self, key: KeyCode) {
        let direction = match key {
            KeyCode::Up | KeyCode::Char('k') => snake::Direction::Up,
            KeyCode::Down | KeyCode::Char('j') => snake::Direction::Down,
            KeyCode::Left | KeyCode::Char('h') => snake::Direction::Left,
            KeyCode::Right | KeyCode::Char('l') => snake::Direction::Right,
            _ => return,
        };
        self.game.change_direction(direction);
    }

    fn tick(&mut self) {
        if self.game.status() != SnakeStatus::Running
            || self.last_step.elapsed() < self.game.interval()
        {
            return;
        }
        self.last_step = Instant::now();
        let status = self.game.step();
        if status != SnakeStatus::Running {
            info!(?status, score = self.game.score(), "Snake game over");
        }
    }
}
