use crate::cell::Position;
use crate::search::{SearchSession, StepOutcome};
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// One search step with timestamp and the state it left behind
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedStep {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    /// Expansion counter of the session after this step
    pub step: u64,
    /// Cell expanded by this step
    pub cell: Option<Position>,
    /// Score of the expanded cell
    pub score: Option<f64>,
    /// Lowest score seen so far in the run
    pub best_score: Option<f64>,
    pub frontier_len: usize,
    pub outcome: StepOutcome,
}

/// Step logger
pub struct StepLog {
    start_time: Instant,
    steps: Vec<LoggedStep>,
}

impl Default for StepLog {
    fn default() -> Self {
        Self::new()
    }
}

impl StepLog {
    pub fn new() -> Self {
        StepLog {
            start_time: Instant::now(),
            steps: Vec::new(),
        }
    }

    /// Record the outcome of a step. Idle steps are skipped.
    pub fn record(&mut self, grid: &Grid, session: &SearchSession, outcome: StepOutcome) {
        if outcome == StepOutcome::Idle {
            return;
        }

        let cell = match outcome {
            StepOutcome::Unreachable => None,
            _ => session.last_expanded,
        };
        let score = cell
            .and_then(|p| grid.score_at(p.x, p.y))
            .filter(|s| s.is_finite());

        self.steps.push(LoggedStep {
            timestamp_ms: self.start_time.elapsed().as_millis() as u64,
            step: session.steps,
            cell,
            score,
            best_score: session.best_score,
            frontier_len: grid.frontier_len(),
            outcome,
        });
    }

    pub fn steps(&self) -> &[LoggedStep] {
        &self.steps
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.steps)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Print log to console
    pub fn print(&self) {
        println!("\n{}", self.trace());
    }

    /// One line per logged step, framed by a header and footer
    pub fn trace(&self) -> String {
        let mut out = format!("=== Step Log ({} steps) ===\n", self.steps.len());
        for logged in &self.steps {
            let cell = logged
                .cell
                .map(|p| format!("({},{})", p.x, p.y))
                .unwrap_or_else(|| "-".to_string());
            let score = logged
                .score
                .map(|s| format!("{:.2}", s))
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "[{:6}ms] #{:4} {:>9} score={:>7} frontier={:4} {:?}\n",
                logged.timestamp_ms, logged.step, cell, score, logged.frontier_len, logged.outcome
            ));
        }
        out.push_str("=== End of Log ===\n");
        out
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let expansions = self
            .steps
            .iter()
            .filter(|s| s.cell.is_some())
            .count();
        let peak_frontier = self.steps.iter().map(|s| s.frontier_len).max().unwrap_or(0);
        let outcome = self
            .steps
            .last()
            .map(|s| format!("{:?}", s.outcome))
            .unwrap_or_else(|| "none".to_string());
        let best = self
            .steps
            .iter()
            .rev()
            .find_map(|s| s.best_score)
            .map(|s| format!("{:.2}", s))
            .unwrap_or_else(|| "-".to_string());
        let duration = self.steps.last().map(|s| s.timestamp_ms).unwrap_or(0);

        format!(
            "Search Duration: {}ms\n\
             Expansions: {} (peak frontier {})\n\
             Best Score: {}\n\
             Outcome: {}",
            duration, expansions, peak_frontier, best, outcome
        )
    }
}
