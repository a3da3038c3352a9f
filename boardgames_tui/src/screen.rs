use boardgames::Coordinate;
use ratatui::{crossterm::event::KeyCode, prelude::*, widgets::*};

/// Every board cell is this many terminal columns wide, so that cells look
/// roughly square.
pub const CELL_WIDTH: u16 = 2;

/// One game, as seen by the event loop.
pub trait Screen {
    fn render(&self, frame: &mut Frame);

    /// Handles a key press. Quitting is taken care of by the caller.
    fn handle_key(&mut self, key: KeyCode);

    /// Called once per frame, for games that advance on their own.
    fn tick(&mut self) {}
}

/// The highlighted cell on a board, moved with the arrow keys or hjkl.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub pos: Coordinate,
    cols: usize,
    rows: usize,
}

impl Cursor {
    /// A cursor in the middle of a `cols` x `rows` board.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            pos: Coordinate::new(cols / 2, rows / 2),
            cols,
            rows,
        }
    }

    /// Moves the cursor if `key` is a movement key and tells whether it was.
    /// The cursor stops at the edges.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        let (dx, dy) = match key {
            KeyCode::Up | KeyCode::Char('k') => (0, -1),
            KeyCode::Down | KeyCode::Char('j') => (0, 1),
            KeyCode::Left | KeyCode::Char('h') => (-1, 0),
            KeyCode::Right | KeyCode::Char('l') => (1, 0),
            _ => return false,
        };
        if let Some(next) = self.pos.offset(dx, dy) {
            if next.x < self.cols && next.y < self.rows {
                self.pos = next;
            }
        }
        true
    }
}

/// The bordered area a board of `cols` x `rows` cells takes up, placed at the
/// top left of `area` and clipped to it.
pub fn board_frame(area: Rect, cols: usize, rows: usize) -> Rect {
    let width = (cols as u16).saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = (rows as u16).saturating_add(2);
    Rect {
        x: area.x,
        y: area.y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Renders a rounded block with `title` and returns the area inside it.
pub fn render_board_block(title: &str, area: Rect, buf: &mut Buffer) -> Rect {
    let block = Block::new()
        .title(title)
        .border_type(BorderType::Rounded)
        .borders(Borders::all());
    let inner = block.inner(area);
    block.render(area, buf);
    inner
}

/// Draws `symbol` into the cell at `coord`, if it is visible inside `area`.
pub fn draw_cell(buf: &mut Buffer, area: Rect, coord: Coordinate, symbol: &str, style: Style) {
    let Ok(x) = u16::try_from(coord.x) else {
        return;
    };
    let Ok(y) = u16::try_from(coord.y) else {
        return;
    };
    let x = area.x.saturating_add(x.saturating_mul(CELL_WIDTH));
    let y = area.y.saturating_add(y);
    if x.saturating_add(CELL_WIDTH) > area.right() || y >= area.bottom() {
        return;
    }
    buf.set_stringn(x, y, symbol, CELL_WIDTH as usize, style);
}

/// Splits the frame into a board area and a status bar of `status_lines` lines.
pub fn split_status(area: Rect, status_lines: u16) -> (Rect, Rect) {
    let layout = Layout::new(
        Direction::Vertical,
        [Constraint::Min(0), Constraint::Length(status_lines)],
    )
    .split(area);
    (layout[0], layout[1])
}
