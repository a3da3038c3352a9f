use std::collections::VecDeque;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use tracing::debug;

use crate::{Coordinate, Grid, InvalidDimensions};

/// The time between two steps at level 1.
pub const INITIAL_INTERVAL: Duration = Duration::from_millis(200);

/// The game does not get faster than this.
pub const MIN_INTERVAL: Duration = Duration::from_millis(20);

/// How much faster every level gets.
pub const SPEEDUP_PER_LEVEL: Duration = Duration::from_millis(10);

/// Every this many fruits placed, counting the first one, the level goes up.
/// The first level up therefore comes after the second fruit eaten.
pub const FRUITS_PER_LEVEL: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// `(dx, dy)`, with row 0 at the top.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SnakeStatus {
    Running,
    /// The snake left the board or ran into itself.
    Crashed,
    /// The snake fills the whole board.
    Won,
}

/// A game of Snake on a bounded board.
///
/// The engine has no notion of time. The caller is expected to call
/// [`Snake::step()`] every [`Snake::interval()`].
#[derive(Clone, Debug)]
pub struct Snake {
    /// Which cells the snake's body covers.
    occupied: Grid<bool>,
    /// Head first.
    body: VecDeque<Coordinate>,
    direction: Direction,
    /// The direction of the last step, which is what reversals are checked against.
    last_moved: Direction,
    fruit: Option<Coordinate>,
    /// Including the fruit placed at the start.
    fruits_placed: usize,
    level: u32,
    interval: Duration,
    status: SnakeStatus,
    rng: StdRng,
}

impl Snake {
    /// A snake of length 1 in the middle of the board, heading right,
    /// with one fruit somewhere else.
    pub fn new(cols: usize, rows: usize, rng: StdRng) -> Result<Self, InvalidDimensions> {
        let mut occupied = Grid::new(cols, rows, false)?;
        let head = Coordinate::new(cols / 2, rows / 2);
        occupied[head] = true;
        let mut snake = Self {
            occupied,
            body: VecDeque::from([head]),
            direction: Direction::Right,
            last_moved: Direction::Right,
            fruit: None,
            fruits_placed: 0,
            level: 1,
            interval: INITIAL_INTERVAL,
            status: SnakeStatus::Running,
            rng,
        };
        if !snake.place_fruit() {
            snake.status = SnakeStatus::Won;
        }
        Ok(snake)
    }

    pub fn cols(&self) -> usize {
        self.occupied.cols()
    }

    pub fn rows(&self) -> usize {
        self.occupied.rows()
    }

    pub fn head(&self) -> Coordinate {
        self.body[0]
    }

    /// The snake's cells, head first.
    pub fn body(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn is_on_snake(&self, coord: Coordinate) -> bool {
        self.occupied.get(coord).copied().unwrap_or(false)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn fruit(&self) -> Option<Coordinate> {
        self.fruit
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// How long to wait between two steps.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn status(&self) -> SnakeStatus {
        self.status
    }

    /// The length minus the initial segment.
    pub fn score(&self) -> usize {
        self.body.len() - 1
    }

    /// Turns the snake before the next step. Turning back onto the
    /// snake's own neck is ignored.
    pub fn change_direction(&mut self, direction: Direction) {
        if direction != self.last_moved.opposite() {
            self.direction = direction;
        }
    }

    /// Moves the snake one cell and returns the status afterwards.
    pub fn step(&mut self) -> SnakeStatus {
        if self.status != SnakeStatus::Running {
            return self.status;
        }
        let (dx, dy) = self.direction.delta();
        let Some(new_head) = self
            .head()
            .offset(dx, dy)
            .filter(|&c| self.occupied.contains(c))
        else {
            debug!(head = %self.head(), direction = ?self.direction, "Snake left the board");
            self.status = SnakeStatus::Crashed;
            return self.status;
        };
        self.last_moved = self.direction;

        let eating = self.fruit == Some(new_head);
        // Unless the snake grows, its tail moves away in the same step, so
        // the head may follow it into that cell.
        let leaving_tail = if eating { None } else { self.body.back().copied() };
        if self.occupied[new_head] && Some(new_head) != leaving_tail {
            debug!(head = %new_head, "Snake ran into itself");
            self.status = SnakeStatus::Crashed;
            return self.status;
        }
        if let Some(tail) = leaving_tail {
            self.body.pop_back();
            self.occupied[tail] = false;
        }
        self.body.push_front(new_head);
        self.occupied[new_head] = true;

        if eating {
            self.eat();
        }
        self.status
    }

    fn eat(&mut self) {
        if !self.place_fruit() {
            debug!(length = self.body.len(), "The snake fills the board");
            self.status = SnakeStatus::Won;
            return;
        }
        if self.fruits_placed % FRUITS_PER_LEVEL == 0 && self.interval > MIN_INTERVAL {
            self.interval = self
                .interval
                .saturating_sub(SPEEDUP_PER_LEVEL)
                .max(MIN_INTERVAL);
            self.level += 1;
            debug!(level = self.level, interval = ?self.interval, "Level up");
        }
    }

    /// Puts a fruit on a random free cell. Returns false if there is none.
    fn place_fruit(&mut self) -> bool {
        self.fruit = self
            .occupied
            .iter()
            .filter(|&(_, &taken)| !taken)
            .map(|(c, _)| c)
            .choose(&mut self.rng);
        if self.fruit.is_some() {
            self.fruits_placed += 1;
        }
        self.fruit.is_some()
    }
}

impl std::fmt::Display for Snake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.rows() {
            for x in 0..self.cols() {
                let c = Coordinate::new(x, y);
                let symbol = if c == self.head() {
                    '@'
                } else if self.is_on_snake(c) {
                    'O'
                } else if self.fruit == Some(c) {
                    '*'
                } else {
                    '.'
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        write!(f, "Score: {} | Level: {}", self.score(), self.level)
    }
}
