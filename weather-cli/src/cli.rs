use std::io::IsTerminal;

use anyhow::Context;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use inquire::{
    CustomType, Text,
    error::CustomUserError,
    validator::Validation,
};
use tracing::debug;
use weather_core::{
    Card, Config, HtmlRenderer, HttpWeatherApi, WeatherApi, WeatherReport,
    config::{BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS},
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather dashboard CLI")]
pub struct Cli {
    /// Log requests and responses to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show cards for every configured location.
    List {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Show the card for a single city.
    Show {
        /// City name, e.g. "Castlemaine".
        city: String,

        /// Country filter passed to the API.
        #[arg(long, default_value = weather_core::DEFAULT_COUNTRY)]
        country: String,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Check that the dashboard API is up.
    Health,

    /// Set the API origin and request timeout.
    Configure,

    /// Print the config file location.
    ConfigPath,
}

/// How cards are presented.
#[derive(Debug, Clone, Copy, Args)]
pub struct ViewArgs {
    /// Emit an HTML document instead of terminal text.
    #[arg(long)]
    pub html: bool,

    /// Render cards with the body collapsed.
    #[arg(long)]
    pub collapsed: bool,

    /// Open the fire danger rating legend on cards that have ratings.
    #[arg(long)]
    pub legend: bool,
}

impl ViewArgs {
    fn cards(&self, reports: &[WeatherReport]) -> Vec<Card> {
        reports
            .iter()
            .map(|report| {
                let mut card = Card::new(report);
                if self.collapsed {
                    card.state.toggle_body();
                }
                if self.legend {
                    card.state.toggle_help();
                }
                card
            })
            .collect()
    }

    fn print(&self, reports: &[WeatherReport]) -> anyhow::Result<()> {
        let cards = self.cards(reports);

        if self.html {
            let renderer = HtmlRenderer::new().context("Failed to load HTML templates")?;
            let page = renderer.render_page("Weather", &cards).context("Failed to render HTML")?;
            print!("{page}");
        } else {
            let colored = std::io::stdout().is_terminal();
            println!("Updated {}", Local::now().format("%a %d %b %H:%M"));
            for card in &cards {
                println!();
                print!("{}", output::card_text(card, colored)?);
            }
        }

        Ok(())
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::List { view } => {
                let api = build_client()?;
                let reports = api.get_all().await.context("Failed to fetch weather")?;
                debug!(count = reports.len(), "fetched reports");
                view.print(&reports)?;
            }
            Command::Show { city, country, view } => {
                let api = build_client()?;
                let report = api
                    .get_by_city(&city, Some(&country))
                    .await
                    .with_context(|| format!("Failed to fetch weather for {city}, {country}"))?;
                view.print(std::slice::from_ref(&report))?;
            }
            Command::Health => {
                let api = build_client()?;
                let health = api.health().await.context("Health check failed")?;
                println!("{}: {}", api.base_url(), health.status);
            }
            Command::Configure => configure()?,
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
            }
        }

        Ok(())
    }
}

fn build_client() -> anyhow::Result<HttpWeatherApi> {
    let config = Config::load()?;
    let settings = config.resolve();
    debug!(base_url = %settings.base_url, timeout = ?settings.timeout, "client settings");

    HttpWeatherApi::new(&settings).context("Failed to create API client")
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let current_url = config.api.base_url.clone().unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = Text::new("API origin:")
        .with_default(&current_url)
        .with_help_message(&format!("{BASE_URL_ENV} overrides this when set"))
        .prompt()?;

    let timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
        .with_error_message("Please enter a whole number of seconds")
        .with_validator(validate_timeout)
        .prompt()?;

    config.set_base_url(&base_url);
    config.set_timeout_secs(timeout_secs);

    // Reject origins the client could not use before writing them.
    HttpWeatherApi::new(&config.resolve_with(None)).context("Invalid API origin")?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

fn validate_timeout(secs: &u64) -> Result<Validation, CustomUserError> {
    Ok(if *secs == 0 {
        Validation::Invalid("Timeout must be at least 1 second".into())
    } else {
        Validation::Valid
    })
}
