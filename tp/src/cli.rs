//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::config::{LlmConfig, WeatherConfig};
use crate::domain::TripForm;

/// TripPack - weather-aware trip planning assistant
#[derive(Parser)]
#[command(
    name = "tp",
    about = "Packing lists, daily routines and sightseeing tips from the weather forecast",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute (defaults to chat)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive session: enter trip details, then ask follow-up questions
    Chat,

    /// Generate a plan for one trip and print it
    Plan {
        /// Destination, e.g. "London, UK"
        #[arg(short, long)]
        destination: String,

        /// First day of the trip (YYYY-MM-DD)
        #[arg(short, long)]
        start: String,

        /// Last day of the trip (YYYY-MM-DD)
        #[arg(short, long)]
        end: String,

        /// Planned activity; repeat for several
        #[arg(short, long = "activity", required = true)]
        activities: Vec<String>,

        /// Continue into interactive chat after the plan
        #[arg(long)]
        chat: bool,
    },

    /// Fetch and print the raw forecast for a location
    Forecast {
        /// Location query, e.g. "Paris, France"
        location: String,

        /// Number of days to request
        #[arg(short, long, default_value = "3")]
        days: u32,
    },

    /// Print the effective configuration
    Config,
}

impl Command {
    /// Build the trip form from `plan` arguments
    pub fn trip_form(&self) -> Option<TripForm> {
        match self {
            Command::Plan {
                destination,
                start,
                end,
                activities,
                ..
            } => Some(TripForm::new(
                destination.clone(),
                start.clone(),
                end.clone(),
                activities.join("\n"),
            )),
            _ => None,
        }
    }
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("trippack")
        .join("logs")
        .join("trippack.log")
}

/// Generate the after_help text with credential checks and the log location
pub fn generate_after_help() -> String {
    debug!("generate_after_help: called");
    let mut help = String::new();

    help.push_str("Credentials (default variable names):\n");
    for var in [LlmConfig::default().api_key_env, WeatherConfig::default().api_key_env] {
        let icon = if std::env::var(&var).is_ok() { "\u{2705}" } else { "\u{274C}" };
        help.push_str(&format!("  {} {}\n", icon, var));
    }

    help.push('\n');
    help.push_str(&format!("Logs are written to: {}\n", get_log_path().display()));
    help
}
