use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{InquireError, Password, Text};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use weather_core::{
    Config, OpenWeatherProvider, SearchOutcome, SearchSession, provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather by city")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "London".
        city: String,

        /// Print the outcome as JSON instead of a card.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for cities until Esc or Ctrl-C.
    Search,
}

const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

impl Cli {
    /// `RUST_LOG` takes precedence over `-v`.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(self.verbose)));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => configure().map(|()| ExitCode::SUCCESS),
            Command::Show { city, json } => show(&city, json).await,
            Command::Search => interactive().await.map(|()| ExitCode::SUCCESS),
        }
    }
}

/// Process exit status for a one-shot search.
fn exit_status(outcome: &SearchOutcome) -> u8 {
    if outcome.is_success() { 0 } else { 1 }
}

fn session_from_config() -> anyhow::Result<SearchSession<OpenWeatherProvider>> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    Ok(SearchSession::new(provider))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(api_key.to_string());
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: &str, json: bool) -> anyhow::Result<ExitCode> {
    let session = session_from_config()?;
    let outcome = session.search(city).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", render::render_view(&session.view()));
    }

    Ok(ExitCode::from(exit_status(&outcome)))
}

async fn interactive() -> anyhow::Result<()> {
    let session = session_from_config()?;

    loop {
        let prompt = Text::new("City:")
            .with_placeholder("Enter city name...")
            .prompt();

        let city = match prompt {
            Ok(city) => city,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        info!(city = %city.trim(), "searching");
        session.search(&city).await?;
        println!("{}\n", render::render_view(&session.view()));
    }

    Ok(())
}
