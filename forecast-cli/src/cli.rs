use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use forecast_core::{Config, Coordinate, DisplayLocale, ForecastClient};
use inquire::{CustomType, Password, Text};
use tracing::debug;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Short-range weather forecast from WeatherAPI.com")]
pub struct Cli {
    /// Print debug logs to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key, language, horizon and default location.
    Configure,

    /// Show the forecast for a coordinate.
    Show {
        /// Coordinate as "lat,lon"; defaults to the configured location.
        #[arg(allow_hyphen_values = true)]
        coordinate: Option<Coordinate>,

        /// Number of forecast days; defaults to the configured horizon.
        #[arg(long)]
        days: Option<u8>,

        /// Response language code, e.g. "ja" or "en".
        #[arg(long)]
        lang: Option<String>,

        /// API key for this run only.
        #[arg(long, env = "WEATHERAPI_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Include hourly rows.
        #[arg(long)]
        hourly: bool,

        /// Print the decoded response as JSON with the API's key names.
        #[arg(long, conflicts_with = "hourly")]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { coordinate, days, lang, api_key, hourly, json } => {
                let mut config = Config::load()?;
                if let Some(key) = api_key {
                    config.set_api_key(key);
                }

                let coordinate = resolve_coordinate(coordinate, &config)?;

                let client = ForecastClient::new(config.client_config()?);
                let mut request = client.request(coordinate);
                if let Some(days) = days {
                    request = request.days(days);
                }
                if let Some(lang) = lang {
                    request = request.language(lang);
                }

                let info = client
                    .fetch(&request)
                    .await
                    .with_context(|| format!("Could not fetch forecast for {coordinate}"))?;

                if json {
                    let out = serde_json::to_string_pretty(&info)
                        .context("Failed to serialize forecast to JSON")?;
                    println!("{out}");
                } else {
                    let locale = DisplayLocale::from_language(&request.language);
                    print!("{}", render::render_forecast(&info, locale, hourly));
                }

                Ok(())
            }
        }
    }
}

/// Command-line coordinate first, then the configured default.
fn resolve_coordinate(arg: Option<Coordinate>, config: &Config) -> anyhow::Result<Coordinate> {
    let from_arg = arg.is_some();
    let coordinate = arg.or(config.default_location).ok_or_else(|| {
        anyhow!(
            "No coordinate given.\n\
             Hint: pass `lat,lon` or set a default location with `forecast configure`."
        )
    })?;

    debug!(%coordinate, from_arg, base_url = %config.base_url, "resolved forecast coordinate");
    Ok(coordinate)
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI key:")
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    let language = Text::new("Response language:").with_default(&config.language).prompt()?;
    config.language = language;

    config.days = CustomType::<u8>::new("Forecast days:")
        .with_default(config.days)
        .with_error_message("Please enter a whole number between 1 and 255")
        .prompt()?;

    let current = config.default_location.map(|c| c.to_string()).unwrap_or_default();
    let location = Text::new("Default location (lat,lon):")
        .with_initial_value(&current)
        .with_help_message("Leave empty for none")
        .prompt()?;
    config.default_location = match location.trim() {
        "" => None,
        raw => Some(raw.parse()?),
    };

    if !config.is_configured() {
        return Err(anyhow!("An API key is required.\nHint: get one at https://www.weatherapi.com/"));
    }

    config.save()?;
    debug!(language = %config.language, days = config.days, "saved configuration");
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_negative_coordinate() {
        let cli = Cli::try_parse_from(["forecast", "show", "-33.87,151.21", "--days", "2"]).unwrap();

        match cli.command {
            Command::Show { coordinate, days, .. } => {
                assert_eq!(coordinate, Some(Coordinate::new(-33.87, 151.21)));
                assert_eq!(days, Some(2));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn argument_coordinate_wins_over_default() {
        let mut config = Config::default();
        config.default_location = Some(Coordinate::new(39.9, 141.1));

        let chosen = resolve_coordinate(Some(Coordinate::new(35.7, 139.7)), &config).unwrap();
        assert_eq!(chosen, Coordinate::new(35.7, 139.7));

        let fallback = resolve_coordinate(None, &config).unwrap();
        assert_eq!(fallback, Coordinate::new(39.9, 141.1));
    }

    #[test]
    fn missing_coordinate_points_at_configure() {
        let err = resolve_coordinate(None, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("forecast configure"));
    }

    #[test]
    fn rejects_malformed_coordinate() {
        assert!(Cli::try_parse_from(["forecast", "show", "tokyo"]).is_err());
    }

    #[test]
    fn json_conflicts_with_hourly() {
        assert!(Cli::try_parse_from(["forecast", "show", "1,2", "--json", "--hourly"]).is_err());
    }
}
