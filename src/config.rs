use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_DATA_FILE: &str = "nama_10_gdp_1_Data.csv";
/// Geography shown in the detail chart before the first hover.
pub const DEFAULT_FALLBACK_GEOGRAPHY: &str = "Belgium";

#[derive(Parser, Debug)]
#[command(name = "gdp-crossfilter")]
#[command(about = "Cross-filter dashboard for Eurostat GDP indicators")]
#[command(version)]
pub struct Cli {
    /// Eurostat nama_10_gdp CSV export
    #[arg(env = "GDP_DASHBOARD_DATA", default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    /// Debug logging and a diagnostics window
    #[arg(long)]
    pub debug: bool,

    /// Geography charted before any point is hovered
    #[arg(long, default_value = DEFAULT_FALLBACK_GEOGRAPHY)]
    pub fallback_geography: String,
}

/// Resolved startup settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub debug: bool,
    pub fallback_geography: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl From<Cli> for DashboardConfig {
    fn from(cli: Cli) -> Self {
        Self {
            data_path: cli.data,
            debug: cli.debug,
            fallback_geography: cli.fallback_geography,
            window_size: [1200.0, 900.0],
            min_window_size: [640.0, 480.0],
        }
    }
}

impl DashboardConfig {
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "info,gdp_crossfilter=debug"
        } else {
            "info"
        }
    }
}
