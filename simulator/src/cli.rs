//! Command-line and environment configuration.

use clap::{Parser, ValueEnum};
use skylink_grid::GridConfig;
use skylink_grid::config::{DEFAULT_COLS, DEFAULT_ROWS};

/// Which value source drives the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FeedKind {
    /// Uniform random integers in 0..=100.
    Uniform,
    /// Smooth 0..=100 sine sweep.
    Sine,
}

#[derive(Parser, Debug)]
#[command(name = "skylink-sim")]
#[command(author, version)]
#[command(about = "Desktop window for the skylink grid dashboard")]
pub struct Cli {
    /// Grid rows (bottom to top)
    #[arg(long, env = "SKYLINK_ROWS", default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Grid columns (left to right)
    #[arg(long, env = "SKYLINK_COLS", default_value_t = DEFAULT_COLS)]
    pub cols: usize,

    /// Seed for the uniform feed (default: derived from the clock)
    #[arg(long, env = "SKYLINK_SEED")]
    pub seed: Option<u64>,

    /// Value source
    #[arg(long, value_enum, default_value_t = FeedKind::Uniform)]
    pub feed: FeedKind,

    /// Window pixel scale
    #[arg(long, env = "SKYLINK_SCALE", default_value_t = 1)]
    pub scale: u32,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "SKYLINK_LOG", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Grid shape on the default canvas.
    pub const fn grid_config(&self) -> GridConfig {
        GridConfig::new(self.rows, self.cols)
    }
}
