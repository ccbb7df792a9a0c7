pub mod cell;
pub mod config;
pub mod grid;
pub mod layout;
pub mod search;
pub mod step_log;

pub use cell::{Cell, Position, Status, UNREACHED};
pub use grid::{Brush, Grid, GridError, Mode};
pub use layout::{parse_layout, render_layout};
pub use search::{SearchSession, StepOutcome, Strategy};
