use crate::cell::{Cell, Position, Status};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("grid size must be positive (got {0})")]
    InvalidSize(i32),
    #[error("grid size {0} is too large (cell count overflows)")]
    TooLarge(i32),
}

/// Whether input edits the grid or the engine advances the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Edit,
    Search,
}

/// Status a paint action applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Brush {
    Obstacle,
    Start,
    End,
}

impl From<Brush> for Status {
    fn from(brush: Brush) -> Self {
        match brush {
            Brush::Obstacle => Status::Obstacle,
            Brush::Start => Status::Start,
            Brush::End => Status::End,
        }
    }
}

/// Square lattice of cells plus edit/search state.
/// Cells are stored row by row: index = x + y * size.
#[derive(Debug, Clone)]
pub struct Grid {
    size: i32,
    cells: Vec<Cell>,
    pub(crate) mode: Mode,
    selection: Brush,
    /// Pacing accumulator, see `Grid::step`
    pub(crate) ticks: u32,
    pub(crate) start: Option<usize>,
    pub(crate) end: Option<usize>,
    /// Insertion-ordered; pop order is decided by score with first-seen ties
    pub(crate) frontier: Vec<usize>,
    /// Set when a running search is paused; cleared by edits, resets and completion
    pub(crate) paused: bool,
    /// Revision number - incremented whenever a cell status changes
    revision: u64,
}

impl Grid {
    /// Create a `size` x `size` grid with every cell unselected
    pub fn new(size: i32) -> Result<Self, GridError> {
        if size <= 0 {
            return Err(GridError::InvalidSize(size));
        }

        let count = size.checked_mul(size).ok_or(GridError::TooLarge(size))?;

        let mut cells = Vec::with_capacity(count as usize);
        for y in 0..size {
            for x in 0..size {
                cells.push(Cell::new(x, y));
            }
        }

        Ok(Grid {
            size,
            cells,
            mode: Mode::Edit,
            selection: Brush::Obstacle,
            ticks: 0,
            start: None,
            end: None,
            frontier: Vec::new(),
            paused: false,
            revision: 0,
        })
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.size && y >= 0 && y < self.size
    }

    /// Convert (x, y) coordinates to an arena index
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some((x + y * self.size) as usize)
        } else {
            None
        }
    }

    /// Convert an arena index to (x, y) coordinates
    pub fn coords(&self, index: usize) -> Position {
        let id = index as i32;
        Position::new(id % self.size, id / self.size)
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn cell_at(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    pub(crate) fn cell_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn status_at(&self, x: i32, y: i32) -> Option<Status> {
        self.cell(x, y).map(|c| c.status)
    }

    pub fn score_at(&self, x: i32, y: i32) -> Option<f64> {
        self.cell(x, y).map(|c| c.score)
    }

    pub fn parent_of(&self, x: i32, y: i32) -> Option<Position> {
        self.cell(x, y)
            .and_then(|c| c.parent)
            .map(|p| self.coords(p))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selection(&self) -> Brush {
        self.selection
    }

    pub fn set_selection(&mut self, brush: Brush) {
        self.selection = brush;
    }

    pub fn start(&self) -> Option<Position> {
        self.start.map(|i| self.coords(i))
    }

    pub fn end(&self) -> Option<Position> {
        self.end.map(|i| self.coords(i))
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn frontier(&self) -> Vec<Position> {
        self.frontier.iter().map(|&i| self.coords(i)).collect()
    }

    /// Get current grid revision number
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Count cells with the given status
    pub fn count(&self, status: Status) -> usize {
        self.cells.iter().filter(|c| c.status == status).count()
    }

    /// Set a cell's status, bumping the revision when it changes
    pub(crate) fn set_status(&mut self, index: usize, status: Status) {
        let cell = &mut self.cells[index];
        if cell.status != status {
            cell.status = status;
            self.revision += 1;
        }
    }

    pub fn set_on_screen(&mut self, x: i32, y: i32, on_screen: bool) {
        if let Some(i) = self.index(x, y) {
            self.cells[i].on_screen = on_screen;
        }
    }

    /// Mark the `extent` x `extent` sub-square at the origin as on screen and
    /// everything else as off screen, as a render pass over that subset would.
    pub fn set_visible_subset(&mut self, extent: i32) {
        for cell in &mut self.cells {
            cell.on_screen = cell.x < extent && cell.y < extent;
        }
    }

    /// Adjacent cells the search may expand into, in the order +x, -x, +y, -y.
    /// Only the two "+1" neighbours are checked against `visible_extent` and
    /// the on-screen flag.
    pub fn neighbors(&self, x: i32, y: i32, visible_extent: i32) -> Vec<usize> {
        let mut neighbors = Vec::with_capacity(4);
        if !self.in_bounds(x, y) {
            return neighbors;
        }

        // (x, y, coordinate checked against the visible extent)
        let candidates = [
            (x + 1, y, Some(x + 1)),
            (x - 1, y, None),
            (x, y + 1, Some(y + 1)),
            (x, y - 1, None),
        ];

        for (nx, ny, clipped) in candidates {
            let Some(i) = self.index(nx, ny) else {
                continue;
            };
            let cell = &self.cells[i];
            if cell.status == Status::Obstacle {
                continue;
            }
            if let Some(coord) = clipped {
                if coord >= visible_extent || !cell.on_screen {
                    continue;
                }
            }
            neighbors.push(i);
        }

        neighbors
    }

    /// Apply the selection brush to (x, y). Only allowed in edit mode.
    /// Returns true if the grid changed.
    pub fn paint(&mut self, x: i32, y: i32) -> bool {
        if self.mode != Mode::Edit {
            return false;
        }
        let Some(index) = self.index(x, y) else {
            return false;
        };

        let status = Status::from(self.selection);
        if self.cells[index].status == status {
            return false;
        }

        self.release_endpoint(index);

        match self.selection {
            Brush::Start => {
                if let Some(prev) = self.start.take() {
                    self.set_status(prev, Status::Unselected);
                }
                self.start = Some(index);
            }
            Brush::End => {
                if let Some(prev) = self.end.take() {
                    self.set_status(prev, Status::Unselected);
                }
                self.end = Some(index);
            }
            Brush::Obstacle => {}
        }

        self.set_status(index, status);
        self.paused = false;
        true
    }

    /// Clear (x, y) back to unselected, whatever it was. Only allowed in edit mode.
    pub fn erase(&mut self, x: i32, y: i32) -> bool {
        if self.mode != Mode::Edit {
            return false;
        }
        let Some(index) = self.index(x, y) else {
            return false;
        };
        if self.cells[index].status == Status::Unselected {
            return false;
        }

        self.release_endpoint(index);
        self.set_status(index, Status::Unselected);
        self.paused = false;
        true
    }

    /// Drop the start/end reference if it points at `index`
    fn release_endpoint(&mut self, index: usize) {
        if self.start == Some(index) {
            self.start = None;
        }
        if self.end == Some(index) {
            self.end = None;
        }
    }

    /// Clear every cell, both endpoints and the frontier
    pub fn reset(&mut self) {
        self.start = None;
        self.end = None;
        self.frontier.clear();
        self.mode = Mode::Edit;
        self.ticks = 0;
        self.paused = false;
        for i in 0..self.cells.len() {
            self.set_status(i, Status::Unselected);
            self.cells[i].clear_search_state();
        }
        log::debug!("grid reset");
    }

    /// Clear search-derived state but keep obstacles and endpoints
    pub fn soft_reset(&mut self) {
        self.mode = Mode::Edit;
        self.clear_search();
        log::debug!("grid soft reset");
    }

    /// Drop frontier, pacing, scores, parents and visited/frontier/path marks
    pub(crate) fn clear_search(&mut self) {
        self.frontier.clear();
        self.ticks = 0;
        self.paused = false;
        for i in 0..self.cells.len() {
            if self.cells[i].status.is_search_derived() {
                self.set_status(i, Status::Unselected);
            }
            self.cells[i].clear_search_state();
        }
    }

    /// True while a search is paused and can be resumed where it stopped
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Positions of the current path from start to end, following parents
    /// back from the end cell. Empty if the end has no parent chain.
    pub fn path(&self) -> Vec<Position> {
        let Some(end) = self.end else {
            return Vec::new();
        };
        if self.cells[end].parent.is_none() {
            return Vec::new();
        }

        let mut path = Vec::new();
        let mut current = Some(end);
        while let Some(i) = current {
            if path.len() > self.cells.len() {
                break;
            }
            path.push(self.coords(i));
            current = self.cells[i].parent;
        }
        path.reverse();
        path
    }
}
