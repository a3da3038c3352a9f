use std::collections::{BTreeSet, VecDeque};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::{visualize_minefield, Coordinate, Grid, IllegalAction, InvalidDimensions};

/// Percentage of the board covered by mines.
pub const MINE_DENSITY_PERCENT: usize = 17;

/// The first opened cell and every cell within this many rows and columns
/// of it never contains a mine.
pub const SAFE_ZONE_RADIUS: usize = 2;

/// What is under a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellKind {
    /// No mine, and no mines around it either.
    Empty,
    /// No mine, but 1 to 8 mines around it.
    Count(u8),
    Mine,
}

impl CellKind {
    /// The number of adjacent mines. Mines themselves report 0.
    pub fn adjacent_mines(self) -> u8 {
        match self {
            CellKind::Count(n) => n,
            CellKind::Empty | CellKind::Mine => 0,
        }
    }

    fn with_one_more_mine_around(self) -> Self {
        match self {
            CellKind::Empty => CellKind::Count(1),
            CellKind::Count(n) => CellKind::Count(n + 1),
            CellKind::Mine => CellKind::Mine,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub kind: CellKind,
    pub revealed: bool,
}

impl Cell {
    const HIDDEN_EMPTY: Cell = Cell {
        kind: CellKind::Empty,
        revealed: false,
    };
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Every cell without a mine is open.
    Won,
    /// A mine was opened.
    Lost,
}

/// A game of Minesweeper.
///
/// Mines are only laid when the first cell is opened, so that the first
/// click always lands in a mine-free area.
#[derive(Clone, Debug)]
pub struct Minesweeper {
    field: Grid<Cell>,
    /// Flags are kept apart from the cells, so a flagged mine is still a mine.
    flags: BTreeSet<Coordinate>,
    mine_count: usize,
    mines_placed: bool,
    status: GameStatus,
    rng: StdRng,
}

impl Minesweeper {
    pub fn new(cols: usize, rows: usize, rng: StdRng) -> Result<Self, InvalidDimensions> {
        let field = Grid::new(cols, rows, Cell::HIDDEN_EMPTY)?;
        let mine_count = (field.area() * MINE_DENSITY_PERCENT / 100).max(1);
        Ok(Self {
            field,
            flags: BTreeSet::new(),
            mine_count,
            mines_placed: false,
            status: GameStatus::Playing,
            rng,
        })
    }

    /// A game with mines at exactly the given coordinates.
    ///
    /// Coordinates outside of the board are ignored.
    pub fn from_mines(
        cols: usize,
        rows: usize,
        mines: &[Coordinate],
    ) -> Result<Self, InvalidDimensions> {
        let mut game = Self::new(cols, rows, StdRng::seed_from_u64(0))?;
        let mines: BTreeSet<Coordinate> = mines
            .iter()
            .copied()
            .filter(|&c| game.field.contains(c))
            .collect();
        for &mine in &mines {
            game.place_mine(mine);
        }
        game.mine_count = mines.len();
        game.mines_placed = true;
        Ok(game)
    }

    pub fn field(&self) -> &Grid<Cell> {
        &self.field
    }

    pub fn cell(&self, coord: Coordinate) -> Option<Cell> {
        self.field.get(coord).copied()
    }

    pub fn is_flagged(&self, coord: Coordinate) -> bool {
        self.flags.contains(&coord)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// The number of mines on the board, or that will be laid on the first click.
    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn flags_placed(&self) -> usize {
        self.flags.len()
    }

    /// The mine count minus the number of flags, for display.
    pub fn mines_remaining(&self) -> usize {
        self.mine_count.saturating_sub(self.flags.len())
    }

    /// Lays the mines, keeping the area around `first_click` free.
    ///
    /// Every cell at least [`SAFE_ZONE_RADIUS`] + 1 rows or columns away from
    /// the first click is a candidate. If there are fewer candidates than
    /// mines, every candidate gets a mine. Does nothing once the mines have
    /// been laid.
    pub fn generate_mines(&mut self, first_click: Coordinate) {
        if self.mines_placed {
            return;
        }
        let mut candidates: Vec<Coordinate> = self
            .field
            .coordinates()
            .filter(|c| {
                c.x.abs_diff(first_click.x) > SAFE_ZONE_RADIUS
                    || c.y.abs_diff(first_click.y) > SAFE_ZONE_RADIUS
            })
            .collect();
        candidates.shuffle(&mut self.rng);
        candidates.truncate(self.mine_count);

        for &mine in &candidates {
            self.place_mine(mine);
        }
        self.mine_count = candidates.len();
        self.mines_placed = true;
        debug!(mines = self.mine_count, %first_click, "Placed mines");
    }

    /// Opens a cell. Opening a mine loses the game.
    ///
    /// Flagged and already open cells are left alone.
    pub fn open_cell(&mut self, coord: Coordinate) -> Result<GameStatus, IllegalAction> {
        self.ensure_playable(coord)?;
        if self.is_flagged(coord) || self.field[coord].revealed {
            return Ok(self.status);
        }
        self.generate_mines(coord);

        self.field[coord].revealed = true;
        match self.field[coord].kind {
            CellKind::Mine => {
                debug!(%coord, "Opened a mine");
                self.reveal_all_mines();
                self.status = GameStatus::Lost;
                return Ok(self.status);
            }
            CellKind::Empty => self.flood_reveal(coord),
            CellKind::Count(_) => {}
        }

        if self.check_win() {
            debug!("All safe cells are open");
            self.status = GameStatus::Won;
        }
        trace!("\n{}", self);
        Ok(self.status)
    }

    /// Flags or unflags a closed cell and returns whether it is flagged now.
    pub fn toggle_flag(&mut self, coord: Coordinate) -> Result<bool, IllegalAction> {
        self.ensure_playable(coord)?;
        if self.field[coord].revealed {
            return Err(IllegalAction::CellRevealed { coord });
        }
        if self.flags.remove(&coord) {
            Ok(false)
        } else {
            self.flags.insert(coord);
            Ok(true)
        }
    }

    /// True iff every cell without a mine is open. Flags don't matter.
    pub fn check_win(&self) -> bool {
        self.mines_placed
            && self
                .field
                .iter()
                .all(|(_, cell)| cell.revealed || cell.kind == CellKind::Mine)
    }

    fn ensure_playable(&self, coord: Coordinate) -> Result<(), IllegalAction> {
        if self.status != GameStatus::Playing {
            return Err(IllegalAction::GameOver);
        }
        if !self.field.contains(coord) {
            return Err(IllegalAction::OutOfBounds { coord });
        }
        Ok(())
    }

    fn place_mine(&mut self, coord: Coordinate) {
        self.field[coord].kind = CellKind::Mine;
        let neighbors: Vec<Coordinate> = self.field.neighbors(coord).collect();
        for n in neighbors {
            let cell = &mut self.field[n];
            cell.kind = cell.kind.with_one_more_mine_around();
        }
    }

    /// Breadth-first opening of the area around an empty cell.
    ///
    /// Every closed neighbor of a visited cell is opened, but only empty
    /// cells are expanded further. Flagged cells and mines are never opened.
    fn flood_reveal(&mut self, start: Coordinate) {
        let mut queue = VecDeque::from([start]);
        let mut opened = 0usize;
        while let Some(current) = queue.pop_front() {
            let neighbors: Vec<Coordinate> = self.field.neighbors(current).collect();
            for n in neighbors {
                if self.flags.contains(&n) {
                    continue;
                }
                let cell = &mut self.field[n];
                if cell.revealed || cell.kind == CellKind::Mine {
                    continue;
                }
                cell.revealed = true;
                opened += 1;
                if cell.kind == CellKind::Empty {
                    queue.push_back(n);
                }
            }
        }
        debug!(%start, opened, "Flood reveal");
    }

    fn reveal_all_mines(&mut self) {
        let mines: Vec<Coordinate> = self
            .field
            .iter()
            .filter(|(_, cell)| cell.kind == CellKind::Mine)
            .map(|(c, _)| c)
            .collect();
        for mine in mines {
            self.field[mine].revealed = true;
        }
    }
}

impl std::fmt::Display for Minesweeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", visualize_minefield(self))?;
        write!(
            f,
            "Mines: {} | Flags: {}",
            self.mine_count,
            self.flags.len()
        )
    }
}
