use crate::grid::Grid;
use crate::search::{SearchSession, Strategy};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_size")]
    pub size: i32,
}

#[derive(Debug, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default = "default_speed")]
    pub speed: u32,
    #[serde(default = "default_step_threshold")]
    pub step_threshold: u32,
    /// Defaults to the full grid when absent
    #[serde(default)]
    pub visible_extent: Option<i32>,
    #[serde(default = "default_max_steps")]
    pub max_steps: u64,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_step_log: bool,
    #[serde(default = "default_step_log_path")]
    pub step_log_path: String,
    #[serde(default)]
    pub trace: bool,
}

// Default values
fn default_size() -> i32 { 40 }
fn default_speed() -> u32 { 60 }
fn default_step_threshold() -> u32 { 60 }
fn default_max_steps() -> u64 { 100_000 }
fn default_step_log_path() -> String { "step_log.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            speed: default_speed(),
            step_threshold: default_step_threshold(),
            visible_extent: None,
            max_steps: default_max_steps(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_step_log: false,
            step_log_path: default_step_log_path(),
            trace: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            search: SearchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Read `config.toml` from the working directory. A missing file means
    /// built-in search settings; a broken one is reported and ignored.
    pub fn load() -> Self {
        const PATH: &str = "config.toml";
        if !Path::new(PATH).exists() {
            println!("Search settings: built-in defaults ({} not present)", PATH);
            return Config::default();
        }
        match Self::from_file(PATH) {
            Ok(config) => {
                println!(
                    "Search settings from {}: {} on a {}x{} grid",
                    PATH,
                    config.search.strategy.label(),
                    config.grid.size,
                    config.grid.size
                );
                config
            }
            Err(e) => {
                eprintln!("Ignoring {}: {}", PATH, e);
                Config::default()
            }
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Build a search session for `grid` from the `[search]` table
    pub fn session(&self, grid: &Grid) -> SearchSession {
        let extent = self.search.visible_extent.unwrap_or_else(|| grid.size());
        SearchSession::new(self.search.strategy, extent)
            .with_step_threshold(self.search.step_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.grid.size, 40);
        assert_eq!(config.search.strategy, Strategy::Unweighted);
        assert_eq!(config.search.speed, 60);
        assert_eq!(config.search.step_threshold, 60);
        assert_eq!(config.search.visible_extent, None);
        assert!(!config.logging.enable_step_log);
        assert_eq!(config.logging.step_log_path, "step_log.json");
    }

    #[test]
    fn partial_tables_are_filled_in() {
        let config = Config::from_toml_str(
            r#"
            [search]
            strategy = "astar"
            visible_extent = 12

            [logging]
            enable_step_log = true
            "#,
        )
        .unwrap();

        assert_eq!(config.search.strategy, Strategy::AStar);
        assert_eq!(config.search.visible_extent, Some(12));
        assert_eq!(config.search.step_threshold, 60);
        assert!(config.logging.enable_step_log);
        assert_eq!(config.grid.size, 40);
    }

    #[test]
    fn strategy_names() {
        for (name, expected) in [
            ("bfs", Strategy::Unweighted),
            ("dfs", Strategy::Greedy),
            ("greedy", Strategy::Greedy),
            ("astar", Strategy::AStar),
        ] {
            let config = Config::from_toml_str(&format!("[search]\nstrategy = \"{}\"", name)).unwrap();
            assert_eq!(config.search.strategy, expected, "strategy {}", name);
        }
    }

    #[test]
    fn unknown_strategy_is_an_error() {
        let err = Config::from_toml_str("[search]\nstrategy = \"dijkstra\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Config::from_file("no/such/dir/config.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn reads_settings_from_a_file() {
        let path = std::env::temp_dir().join(format!("gridsearch-config-{}.toml", std::process::id()));
        fs::write(&path, "[grid]\nsize = 12\n[search]\nstrategy = \"dfs\"\nspeed = 5\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.grid.size, 12);
        assert_eq!(config.search.strategy, Strategy::Greedy);
        assert_eq!(config.search.speed, 5);
    }

    #[test]
    fn session_defaults_extent_to_grid_size() {
        let grid = Grid::new(7).unwrap();
        let session = Config::default().session(&grid);
        assert_eq!(session.visible_extent, 7);
        assert_eq!(session.step_threshold, 60);
    }
}
