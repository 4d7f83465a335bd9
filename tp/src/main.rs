//! TripPack - weather-aware trip planning assistant
//!
//! CLI entry point for planning a trip and chatting about it.

use std::fs;

use clap::{CommandFactory, FromArgMatches};
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info};

use trippack::cli::{Cli, Command, generate_after_help, get_log_path};
use trippack::config::Config;
use trippack::repl::{self, render};
use trippack::session::Session;
use trippack::weather::{WeatherApiClient, WeatherProvider};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Priority: CLI --log-level > config file > default (INFO)
    let level_str = cli_log_level.or(config_log_level);
    let level = match level_str.map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Build command with dynamic after_help that shows credential status
    let cmd = Cli::command().after_help(generate_after_help());
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(provider = %config.llm.provider, model = %config.llm.model, "TripPack loaded config");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        None | Some(Command::Chat) => cmd_chat(&config).await,
        Some(command @ Command::Plan { .. }) => {
            let chat = matches!(command, Command::Plan { chat: true, .. });
            let form = command
                .trip_form()
                .ok_or_else(|| eyre::eyre!("plan command without trip details"))?;
            cmd_plan(&config, form, chat).await
        }
        Some(Command::Forecast { location, days }) => cmd_forecast(&config, &location, days).await,
        Some(Command::Config) => cmd_config(&config),
    }
}

async fn cmd_chat(config: &Config) -> Result<()> {
    let assistant = repl::build_assistant(config)?;
    repl::run_interactive(assistant, None).await
}

async fn cmd_plan(config: &Config, form: trippack::TripForm, chat: bool) -> Result<()> {
    let assistant = repl::build_assistant(config)?;
    let mut session = Session::new();

    println!("{}", render::planning_line(assistant.planned_artifacts()).dimmed());
    let outcome = match assistant.submit_trip(&mut session, &form).await {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Some(hint) = render::error_hint(&e) {
                eprintln!("{}", hint.dimmed());
            }
            return Err(e.into());
        }
    };

    if let Some(trip) = session.trip() {
        println!("{}", render::trip_summary(trip));
    }
    for message in session.transcript().messages() {
        render::print_message(message);
    }
    render::print_outcome_problems(&outcome);

    if outcome.is_empty() {
        return Err(eyre::eyre!("No plan could be generated"));
    }
    if chat {
        println!();
        return repl::run_interactive(assistant, Some(session)).await;
    }
    Ok(())
}

async fn cmd_forecast(config: &Config, location: &str, days: u32) -> Result<()> {
    config.validate_weather()?;
    let client = WeatherApiClient::from_config(&config.weather).context("Failed to create weather client")?;
    let days = trippack::forecast_days(days, config.weather.max_forecast_days);
    let forecast = client.forecast(location, days).await?;
    println!("{}", serde_json::to_string_pretty(forecast.as_value())?);
    Ok(())
}

fn cmd_config(config: &Config) -> Result<()> {
    let yaml = serde_yaml::to_string(config).context("Failed to serialize config")?;
    print!("{yaml}");
    Ok(())
}
