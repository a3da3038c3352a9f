use crate::checkers::Board;
use crate::minesweeper::{CellKind, Minesweeper};
use crate::{Coordinate, Grid};

/// Draws a box around the grid, with column numbers on top and row
/// numbers on the left. Every cell is two characters wide.
fn visualize_grid<T>(
    grid: &Grid<T>,
    mut draw_cell: impl FnMut(usize, usize, &T) -> String,
) -> String {
    // Draw the top of the box
    let mut result = String::from("    ");
    for x in 0..grid.cols() {
        result += &format!("{:<2}", x % 100);
    }
    result += "\n    ╭";
    for _ in 0..grid.cols() {
        result += "──";
    }
    result += "╮\n";

    for (coord, cell) in grid.iter() {
        if coord.x == 0 {
            result += &format!("{:>3} │", coord.y);
        }
        result += &draw_cell(coord.x, coord.y, cell);
        if coord.x + 1 == grid.cols() {
            result += "│\n";
        }
    }

    // Draw the bottom of the box
    result += "    ╰";
    for _ in 0..grid.cols() {
        result += "──";
    }
    result += "╯";
    result
}

/// Renders a checkers board. Dark squares without a piece are shown as dots.
pub fn visualize_checkers_board(board: &Board) -> String {
    visualize_grid(board, |x, y, square| match square {
        Some(piece) => format!("{} ", piece),
        None if (x + y) % 2 == 0 => "· ".to_owned(),
        None => "  ".to_owned(),
    })
}

/// Renders a minefield from the player's point of view: closed cells are
/// `#`, flags `F`, and opened mines `*`.
pub fn visualize_minefield(game: &Minesweeper) -> String {
    visualize_grid(game.field(), |x, y, cell| {
        let symbol = if game.is_flagged(Coordinate::new(x, y)) {
            'F'
        } else if !cell.revealed {
            '#'
        } else {
            match cell.kind {
                CellKind::Empty => ' ',
                CellKind::Mine => '*',
                CellKind::Count(n) => char::from(b'0' + n),
            }
        };
        format!("{} ", symbol)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::{Piece, Side};

    #[test]
    fn checkers_board_has_one_line_per_row() {
        let mut board: Board = Grid::new(4, 3, None).unwrap();
        board[Coordinate::new(0, 0)] = Some(Piece::man(Side::White));
        board[Coordinate::new(3, 2)] = Some(Piece::king(Side::Black));
        let expected = "    0 1 2 3 \n    ╭────────╮\n  0 │⛂   ·   │\n  1 │  ·   · │\n  2 │·   · ⛁ │\n    ╰────────╯";
        assert_eq!(visualize_checkers_board(&board), expected);
    }

    #[test]
    fn minefield_hides_closed_cells() {
        let mut game = Minesweeper::from_mines(3, 1, &[Coordinate::new(0, 0)]).unwrap();
        game.toggle_flag(Coordinate::new(0, 0)).unwrap();
        game.open_cell(Coordinate::new(1, 0)).unwrap();
        let expected = "    0 1 2 \n    ╭──────╮\n  0 │F 1 # │\n    ╰──────╯";
        assert_eq!(visualize_minefield(&game), expected);
    }
}
