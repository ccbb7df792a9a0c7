use serde::{Deserialize, Serialize};

/// Score of a cell the search has not reached yet
pub const UNREACHED: f64 = f64::INFINITY;

/// Status of a single lattice cell. Exactly one holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Unselected,
    Obstacle,
    Visited,
    Frontier,
    Start,
    End,
    Path,
}

impl Status {
    /// Start and End cells are never overwritten by the search
    pub fn is_endpoint(self) -> bool {
        matches!(self, Status::Start | Status::End)
    }

    /// Statuses produced by a search run (cleared by a soft reset)
    pub fn is_search_derived(self) -> bool {
        matches!(self, Status::Visited | Status::Frontier | Status::Path)
    }
}

/// A position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Calculate Euclidean distance squared (avoid sqrt for performance)
    pub fn distance_squared(&self, other: &Position) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Calculate Euclidean distance
    pub fn distance(&self, other: &Position) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }

    /// Number of 4-connected hops between two positions
    pub fn manhattan(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// True when the two positions share an edge
    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.manhattan(other) == 1
    }
}

/// One lattice position. Cells live in the grid's arena and refer to each
/// other by arena index.
#[derive(Debug, Clone)]
pub struct Cell {
    pub status: Status,
    pub score: f64,
    /// Arena index of the cell that produced the best known score
    pub parent: Option<usize>,
    /// Set by the render pass; off-screen cells are not expandable from below
    pub on_screen: bool,
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Cell {
            status: Status::Unselected,
            score: UNREACHED,
            parent: None,
            on_screen: true,
            x,
            y,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Drop search-derived score and parent
    pub(crate) fn clear_search_state(&mut self) {
        self.score = UNREACHED;
        self.parent = None;
    }
}
