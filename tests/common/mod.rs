#![allow(dead_code)]

use gridsearch::{parse_layout, render_layout, Grid, Mode, Position, SearchSession, Status, StepOutcome};
use std::collections::{HashSet, VecDeque};

/// Parse a layout fixture, panicking with the layout on error
pub fn grid(layout: &str) -> Grid {
    match parse_layout(layout) {
        Ok(grid) => grid,
        Err(e) => panic!("bad fixture ({}):\n{}", e, layout),
    }
}

/// Enter search mode and step at full speed until the run ends.
/// Returns the terminal outcome.
pub fn run_to_end(grid: &mut Grid, session: &mut SearchSession) -> StepOutcome {
    assert!(grid.transition(Mode::Search), "search did not start");

    let speed = session.step_threshold.max(1);
    // Every cell is expanded at most once, plus the final empty pop
    let limit = grid.cells().len() + 2;
    for _ in 0..limit {
        let outcome = grid.step(speed, session);
        assert_ne!(outcome, StepOutcome::Idle, "full-speed step should never idle");
        if outcome.is_terminal() {
            return outcome;
        }
    }

    panic!("search did not end within {} steps:\n{}", limit, render_layout(grid));
}

/// Hop count of the shortest 4-connected route between start and end,
/// ignoring visibility
pub fn shortest_hops(grid: &Grid) -> Option<usize> {
    let start = grid.start()?;
    let end = grid.end()?;

    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(start);
    queue.push_back((start, 0));

    while let Some((pos, dist)) = queue.pop_front() {
        if pos == end {
            return Some(dist);
        }
        for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            let next = Position::new(pos.x + dx, pos.y + dy);
            match grid.status_at(next.x, next.y) {
                None | Some(Status::Obstacle) => continue,
                _ => {}
            }
            if seen.insert(next) {
                queue.push_back((next, dist + 1));
            }
        }
    }

    None
}

/// Check the reconstructed path links start to end through distinct,
/// 4-adjacent, non-obstacle cells and that the grid marks it as such.
pub fn assert_valid_path(grid: &Grid) -> Vec<Position> {
    let path = grid.path();
    let layout = render_layout(grid);

    assert!(path.len() >= 2, "path too short: {:?}\n{}", path, layout);
    assert_eq!(path.first().copied(), grid.start(), "path must begin at start\n{}", layout);
    assert_eq!(path.last().copied(), grid.end(), "path must finish at end\n{}", layout);

    let unique: HashSet<_> = path.iter().collect();
    assert_eq!(unique.len(), path.len(), "path repeats a cell\n{}", layout);

    for pair in path.windows(2) {
        assert!(
            pair[0].is_adjacent(&pair[1]),
            "({},{}) -> ({},{}) is not a 4-neighbour step\n{}",
            pair[0].x, pair[0].y, pair[1].x, pair[1].y, layout
        );
    }

    for pos in &path[1..path.len() - 1] {
        assert_eq!(
            grid.status_at(pos.x, pos.y),
            Some(Status::Path),
            "({},{}) should be marked as path\n{}",
            pos.x, pos.y, layout
        );
    }

    // Nothing outside the chain is marked
    assert_eq!(grid.count(Status::Path), path.len() - 2, "stray path cells\n{}", layout);
    path
}
