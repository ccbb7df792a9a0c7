use crate::cell::{Position, Status};
use crate::grid::{Grid, Mode};
use serde::{Deserialize, Serialize};

/// Frames a step has to accumulate before it runs, at speed 1
pub const DEFAULT_STEP_THRESHOLD: u32 = 60;

/// Scoring function deciding frontier pop order and relaxation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Strategy {
    /// Hop count from the start; behaves like breadth-first search
    #[default]
    #[serde(rename = "bfs")]
    Unweighted,
    /// Straight-line distance to the end; depth-first flavoured, not optimal
    #[serde(rename = "dfs", alias = "greedy")]
    Greedy,
    /// Straight-line distance to the start plus straight-line distance to the end.
    /// The "g" term is not an accumulated path cost, so this is not canonical A*.
    #[serde(rename = "astar", alias = "a*")]
    AStar,
}

impl Strategy {
    pub fn label(self) -> &'static str {
        match self {
            Strategy::Unweighted => "BFS",
            Strategy::Greedy => "DFS",
            Strategy::AStar => "A*",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bfs" | "unweighted" => Some(Strategy::Unweighted),
            "dfs" | "greedy" => Some(Strategy::Greedy),
            "astar" | "a*" => Some(Strategy::AStar),
            _ => None,
        }
    }
}

/// Result of a single `Grid::step` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// No state change: edit mode, or the pacing threshold was not reached
    Idle,
    /// One cell was expanded and the end is not reached yet
    NotFinished,
    /// The end was reached and the path has been marked
    Finished,
    /// The frontier ran dry before reaching the end
    Unreachable,
}

impl StepOutcome {
    /// True when the run is over, one way or the other
    pub fn is_terminal(self) -> bool {
        matches!(self, StepOutcome::Finished | StepOutcome::Unreachable)
    }
}

/// Per-run search settings and statistics, passed into every step so
/// independent searches never share state.
#[derive(Debug, Clone)]
pub struct SearchSession {
    pub strategy: Strategy,
    /// Side of the visible sub-square; "+1" neighbours beyond it are not expanded
    pub visible_extent: i32,
    pub step_threshold: u32,
    /// Lowest candidate score produced by any relaxation in this run
    pub best_score: Option<f64>,
    /// Number of cells expanded in this run
    pub steps: u64,
    pub last_expanded: Option<Position>,
}

impl SearchSession {
    pub fn new(strategy: Strategy, visible_extent: i32) -> Self {
        SearchSession {
            strategy,
            visible_extent,
            step_threshold: DEFAULT_STEP_THRESHOLD,
            best_score: None,
            steps: 0,
            last_expanded: None,
        }
    }

    /// Session covering the whole grid
    pub fn for_grid(grid: &Grid, strategy: Strategy) -> Self {
        Self::new(strategy, grid.size())
    }

    pub fn with_step_threshold(mut self, step_threshold: u32) -> Self {
        self.step_threshold = step_threshold;
        self
    }

    /// Forget the statistics of the previous run
    pub fn restart(&mut self) {
        self.best_score = None;
        self.steps = 0;
        self.last_expanded = None;
    }

    fn record_score(&mut self, score: f64) {
        if self.best_score.map_or(true, |best| score < best) {
            self.best_score = Some(score);
        }
    }
}

impl Grid {
    /// Move to `mode`. Returns false when nothing changed.
    ///
    /// Entering search requires both endpoints. A paused run picks up its
    /// frontier where it stopped; otherwise previous search state is cleared
    /// and the frontier is seeded with the start cell. Leaving search pauses
    /// the run until the next edit or reset.
    pub fn transition(&mut self, mode: Mode) -> bool {
        if self.mode == mode {
            return false;
        }

        match mode {
            Mode::Search => {
                let (Some(start), Some(_)) = (self.start, self.end) else {
                    log::debug!("search requested without start and end, ignoring");
                    return false;
                };
                if self.paused {
                    self.paused = false;
                    self.ticks = 0;
                    log::debug!("resuming search with {} frontier cells", self.frontier.len());
                } else {
                    self.clear_search();
                    let start_cell = self.cell_mut(start);
                    start_cell.score = 0.0;
                    start_cell.parent = None;
                    self.frontier.push(start);
                    log::debug!("entering search from {:?}", self.coords(start));
                }
                self.mode = Mode::Search;
            }
            Mode::Edit => {
                self.mode = Mode::Edit;
                self.paused = true;
                log::debug!("search paused, back to edit mode");
            }
        }
        true
    }

    /// End the run: back to edit mode with nothing left to resume
    fn complete(&mut self) {
        self.transition(Mode::Edit);
        self.paused = false;
    }

    /// Play/pause toggle as a UI would drive it
    pub fn request_play(&mut self, play: bool) -> bool {
        self.transition(if play { Mode::Search } else { Mode::Edit })
    }

    /// Advance the search by one expansion once `speed` accumulated over
    /// calls reaches the session's step threshold.
    pub fn step(&mut self, speed: u32, session: &mut SearchSession) -> StepOutcome {
        if self.mode != Mode::Search {
            return StepOutcome::Idle;
        }
        let (Some(start), Some(end)) = (self.start, self.end) else {
            self.complete();
            return StepOutcome::Idle;
        };

        self.ticks = self.ticks.saturating_add(speed);
        if self.ticks < session.step_threshold {
            return StepOutcome::Idle;
        }
        self.ticks = 0;

        let Some(current) = self.pop_smallest_score() else {
            log::debug!("frontier exhausted after {} steps, end unreachable", session.steps);
            self.complete();
            return StepOutcome::Unreachable;
        };

        session.steps += 1;
        let current_pos = self.coords(current);
        session.last_expanded = Some(current_pos);
        log::trace!(
            "step {}: expanding {:?} score={}",
            session.steps,
            current_pos,
            self.cell_at(current).score
        );

        let start_pos = self.coords(start);
        let end_pos = self.coords(end);

        for neighbor in self.neighbors(current_pos.x, current_pos.y, session.visible_extent) {
            let status = self.cell_at(neighbor).status;
            if status == Status::Start {
                continue;
            }

            let target = match session.strategy {
                Strategy::Unweighted => current,
                Strategy::Greedy | Strategy::AStar => neighbor,
            };
            let candidate = self.candidate_score(target, session.strategy, start_pos, end_pos);

            match status {
                Status::End => {
                    self.relax(neighbor, current, candidate, session);
                    self.finish(neighbor);
                    log::debug!("end reached after {} steps", session.steps);
                    return StepOutcome::Finished;
                }
                Status::Unselected => {
                    self.relax(neighbor, current, candidate, session);
                    self.cell_mut(neighbor).parent = Some(current);
                    self.set_status(neighbor, Status::Frontier);
                    self.frontier.push(neighbor);
                }
                Status::Visited => {
                    self.relax(neighbor, current, candidate, session);
                }
                _ => {}
            }
        }

        if current == end {
            self.finish(current);
            return StepOutcome::Finished;
        }

        if self.cell_at(current).status != Status::Start {
            self.set_status(current, Status::Visited);
        }
        StepOutcome::NotFinished
    }

    /// Remove and return the frontier cell with the smallest score.
    /// Ties go to the earliest inserted cell.
    fn pop_smallest_score(&mut self) -> Option<usize> {
        let first = *self.frontier.first()?;
        let mut smallest_index = 0;
        let mut smallest_score = self.cell_at(first).score;
        for (i, &cell) in self.frontier.iter().enumerate() {
            let score = self.cell_at(cell).score;
            if score < smallest_score {
                smallest_score = score;
                smallest_index = i;
            }
        }
        Some(self.frontier.remove(smallest_index))
    }

    fn candidate_score(&self, target: usize, strategy: Strategy, start: Position, end: Position) -> f64 {
        let cell = self.cell_at(target);
        match strategy {
            Strategy::Unweighted => cell.score + 1.0,
            Strategy::Greedy => cell.position().distance(&end),
            Strategy::AStar => cell.position().distance(&start) + cell.position().distance(&end),
        }
    }

    /// Record `candidate` for `cell` if it beats the known score
    fn relax(&mut self, cell: usize, from: usize, candidate: f64, session: &mut SearchSession) {
        let entry = self.cell_mut(cell);
        if candidate < entry.score {
            entry.score = candidate;
            entry.parent = Some(from);
            session.record_score(candidate);
        }
    }

    fn finish(&mut self, reached: usize) {
        self.build_path(reached);
        self.complete();
    }

    /// Walk parents back from `from`, marking everything but the endpoints as path
    fn build_path(&mut self, from: usize) {
        let mut current = Some(from);
        let mut remaining = self.cells().len();
        while let Some(i) = current {
            if remaining == 0 {
                log::warn!("parent chain longer than the grid, stopping path reconstruction");
                break;
            }
            remaining -= 1;

            if !self.cell_at(i).status.is_endpoint() {
                self.set_status(i, Status::Path);
            }
            current = self.cell_at(i).parent;
        }
    }
}
