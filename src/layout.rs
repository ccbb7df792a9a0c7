//! Text form of a grid, used for fixtures and the headless runner.
//!
//! Format (one row per line, `y` grows downwards):
//! - `.`: unselected
//! - `#`: obstacle
//! - `S`: start
//! - `E`: end
//! - `o`: visited, `+`: frontier, `*`: path (output only)

use crate::cell::Status;
use crate::grid::{Brush, Grid, GridError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("no grid lines found")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected} (grids are square)")]
    NotSquare { row: usize, expected: usize, found: usize },
    #[error("unknown character '{ch}' at ({x},{y})")]
    UnknownChar { ch: char, x: usize, y: usize },
    #[error("more than one start cell")]
    DuplicateStart,
    #[error("more than one end cell")]
    DuplicateEnd,
    #[error(transparent)]
    Grid(#[from] GridError),
}

pub fn status_char(status: Status) -> char {
    match status {
        Status::Unselected => '.',
        Status::Obstacle => '#',
        Status::Visited => 'o',
        Status::Frontier => '+',
        Status::Start => 'S',
        Status::End => 'E',
        Status::Path => '*',
    }
}

/// Parse a square layout into a grid in edit mode
pub fn parse_layout(text: &str) -> Result<Grid, LayoutError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(LayoutError::Empty);
    }

    let size = lines.len();
    for (row, line) in lines.iter().enumerate() {
        let found = line.chars().count();
        if found != size {
            return Err(LayoutError::NotSquare { row, expected: size, found });
        }
    }

    let mut grid = Grid::new(size as i32)?;

    for (y, line) in lines.iter().enumerate() {
        for (x, ch) in line.chars().enumerate() {
            let brush = match ch {
                '.' => continue,
                '#' => Brush::Obstacle,
                'S' => {
                    if grid.start().is_some() {
                        return Err(LayoutError::DuplicateStart);
                    }
                    Brush::Start
                }
                'E' => {
                    if grid.end().is_some() {
                        return Err(LayoutError::DuplicateEnd);
                    }
                    Brush::End
                }
                _ => return Err(LayoutError::UnknownChar { ch, x, y }),
            };
            grid.set_selection(brush);
            grid.paint(x as i32, y as i32);
        }
    }

    grid.set_selection(Brush::Obstacle);
    Ok(grid)
}

/// Render every cell of the grid, one row per line
pub fn render_layout(grid: &Grid) -> String {
    let size = grid.size();
    let mut result = String::with_capacity(((size + 1) * size) as usize);

    for y in 0..size {
        for x in 0..size {
            let status = grid.status_at(x, y).unwrap_or(Status::Unselected);
            result.push(status_char(status));
        }
        result.push('\n');
    }

    result
}
