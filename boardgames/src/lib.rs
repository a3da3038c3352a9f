pub use checkers::Checkers;
pub use errors::*;
pub use grid::*;
pub use minesweeper::Minesweeper;
pub use snake::Snake;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
pub mod checkers;
mod errors;
mod grid;
pub mod minesweeper;
pub mod snake;
mod visualization;
