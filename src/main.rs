use gridsearch::config::Config;
use gridsearch::step_log::StepLog;
use gridsearch::{parse_layout, render_layout, Grid, Mode, StepOutcome, Strategy};
use std::fs;

const USAGE: &str = "Usage: gridsearch <layout.txt> [--strategy bfs|dfs|astar] [--speed N] [--show-every N] [--log PATH] [--config PATH]";

/// Command line overrides on top of config.toml
struct RunOptions {
    layout_path: String,
    strategy: Option<Strategy>,
    speed: Option<u32>,
    show_every: Option<u64>,
    log_path: Option<String>,
    config_path: Option<String>,
}

fn parse_args(args: &[String]) -> Result<RunOptions, String> {
    let mut layout_path = None;
    let mut options = RunOptions {
        layout_path: String::new(),
        strategy: None,
        speed: None,
        show_every: None,
        log_path: None,
        config_path: None,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--strategy" => {
                let name = iter.next().ok_or("--strategy needs a value")?;
                let strategy = Strategy::parse(name)
                    .ok_or_else(|| format!("unknown strategy '{}'", name))?;
                options.strategy = Some(strategy);
            }
            "--speed" => {
                let value = iter.next().ok_or("--speed needs a value")?;
                options.speed = Some(value.parse().map_err(|e| format!("bad --speed: {}", e))?);
            }
            "--show-every" => {
                let value = iter.next().ok_or("--show-every needs a value")?;
                options.show_every =
                    Some(value.parse().map_err(|e| format!("bad --show-every: {}", e))?);
            }
            "--config" => {
                options.config_path = Some(iter.next().ok_or("--config needs a value")?.clone());
            }
            "--log" => {
                options.log_path = Some(iter.next().ok_or("--log needs a value")?.clone());
            }
            other if other.starts_with("--") => return Err(format!("unknown option '{}'", other)),
            other => layout_path = Some(other.to_string()),
        }
    }

    options.layout_path = layout_path.ok_or("missing layout file")?;
    Ok(options)
}

fn print_grid(grid: &Grid, title: &str) {
    println!("--- {} ---", title);
    print!("{}", render_layout(grid));
}

fn run(options: RunOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &options.config_path {
        Some(path) => {
            let config = Config::from_file(path)?;
            println!("Loaded search settings from {}", path);
            config
        }
        None => Config::load(),
    };
    if let Some(strategy) = options.strategy {
        config.search.strategy = strategy;
    }
    if let Some(speed) = options.speed {
        config.search.speed = speed;
    }
    if let Some(path) = options.log_path {
        config.logging.enable_step_log = true;
        config.logging.step_log_path = path;
    }

    let contents = fs::read_to_string(&options.layout_path)?;
    let mut grid = parse_layout(&contents)?;
    let mut session = config.session(&grid);
    grid.set_visible_subset(session.visible_extent);

    println!(
        "Grid {}x{}, strategy {}, speed {}, visible extent {}",
        grid.size(),
        grid.size(),
        session.strategy.label(),
        config.search.speed,
        session.visible_extent
    );

    if !grid.transition(Mode::Search) {
        return Err("layout needs both a start (S) and an end (E) cell".into());
    }

    let mut log = StepLog::new();
    let mut outcome = StepOutcome::Idle;
    let mut calls = 0u64;
    // Pacing may need several calls per expansion
    let max_calls = config
        .search
        .max_steps
        .saturating_mul(u64::from(config.search.step_threshold.max(1)));

    while !outcome.is_terminal() && calls < max_calls {
        outcome = grid.step(config.search.speed, &mut session);
        calls += 1;
        log.record(&grid, &session, outcome);

        if let Some(every) = options.show_every {
            if outcome == StepOutcome::NotFinished && every > 0 && session.steps % every == 0 {
                print_grid(&grid, &format!("step {}", session.steps));
            }
        }
    }

    print_grid(&grid, "final");

    match outcome {
        StepOutcome::Finished => {
            let path = grid.path();
            println!(
                "Path found: {} hops after {} expansions",
                path.len().saturating_sub(1),
                session.steps
            );
        }
        StepOutcome::Unreachable => {
            println!("End is unreachable ({} expansions)", session.steps);
        }
        _ => {
            println!("Stopped after {} expansions without finishing", session.steps);
        }
    }

    if config.logging.trace {
        log.print();
    }

    if config.logging.enable_step_log {
        log.save_to_file(&config.logging.step_log_path)?;
        println!("Step log saved to {}", config.logging.step_log_path);
        println!("{}", log.summary());
    }

    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", USAGE);
        return;
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(options) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
