use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use qweather_core::{
    CallContext, CapabilityId, CityQuery, Config, ForecastDays, ForecastHours, ForecastQuery,
    HourlyQuery, IndexHorizon, IndexType, IndicesQuery, LogLevel, QWeather,
};
use serde::Serialize;
use std::time::Duration;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "qweather", version, about = "QWeather CLI")]
pub struct Cli {
    /// Override the configured log level (none, error, info, debug).
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Print the result as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Give up on a call after this many seconds.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API base URL and key.
    Configure {
        /// API host, e.g. "https://abc123.qweatherapi.com".
        #[arg(long)]
        base_url: Option<String>,
    },

    /// List the available capabilities.
    Tools,

    /// Current weather.
    Now { city: String },

    /// Daily forecast.
    Forecast {
        city: String,

        /// 3d, 7d, 10d, 15d or 30d.
        #[arg(long)]
        days: Option<ForecastDays>,
    },

    /// Precipitation for the next two hours.
    Minutely { city: String },

    /// Hourly forecast.
    Hourly {
        city: String,

        /// 24h, 72h or 168h.
        #[arg(long)]
        hours: Option<ForecastHours>,
    },

    /// Active weather warnings.
    Warning { city: String },

    /// Life indices.
    Indices {
        city: String,

        /// Index type, 0 (all) to 16.
        #[arg(long = "type")]
        index_type: Option<IndexType>,

        /// 1d or 3d.
        #[arg(long)]
        days: Option<IndexHorizon>,
    },

    /// Real-time air quality.
    Air { city: String },

    /// Hourly air quality forecast.
    AirHourly { city: String },

    /// Daily air quality forecast.
    AirDaily { city: String },
}

impl Cli {
    /// Effective config: file, then environment, then command-line flags.
    pub fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::load()?.with_env()?;
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(timeout) = self.timeout_secs {
            config.timeout_secs = timeout;
        }
        Ok(config)
    }

    pub async fn run(self, config: Config) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { base_url } => configure(config, base_url),
            Command::Tools => {
                list_tools(self.json)?;
                Ok(())
            }
            command => {
                let qweather = QWeather::from_settings(config.client_settings()?)?;
                let mut ctx = CallContext::new();
                if let Some(secs) = self.timeout_secs {
                    ctx = ctx.with_timeout(Duration::from_secs(secs));
                }

                let canceller = ctx.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        tracing::info!("interrupted, cancelling request");
                        canceller.cancel();
                    }
                });

                let output = invoke(&qweather, command, &ctx, self.json).await?;
                println!("{output}");
                Ok(())
            }
        }
    }
}

async fn invoke(
    qweather: &QWeather,
    command: Command,
    ctx: &CallContext,
    json: bool,
) -> anyhow::Result<String> {
    match command {
        Command::Now { city } => {
            let result = qweather.weather_now(&CityQuery::new(city), ctx).await?;
            output(&result, json, render::current_weather)
        }
        Command::Forecast { city, days } => {
            let result = qweather
                .weather_forecast(&ForecastQuery { city, days }, ctx)
                .await?;
            output(&result, json, render::weather_forecast)
        }
        Command::Minutely { city } => {
            let result = qweather
                .minutely_precipitation(&CityQuery::new(city), ctx)
                .await?;
            output(&result, json, render::minutely_precipitation)
        }
        Command::Hourly { city, hours } => {
            let result = qweather
                .hourly_forecast(&HourlyQuery { city, hours }, ctx)
                .await?;
            output(&result, json, render::hourly_forecast)
        }
        Command::Warning { city } => {
            let result = qweather.weather_warning(&CityQuery::new(city), ctx).await?;
            output(&result, json, render::weather_warnings)
        }
        Command::Indices {
            city,
            index_type,
            days,
        } => {
            let query = IndicesQuery {
                city,
                index_type,
                days,
            };
            let result = qweather.weather_indices(&query, ctx).await?;
            output(&result, json, render::life_indices)
        }
        Command::Air { city } => {
            let result = qweather.air_quality(&CityQuery::new(city), ctx).await?;
            output(&result, json, render::air_quality)
        }
        Command::AirHourly { city } => {
            let result = qweather
                .air_quality_hourly(&CityQuery::new(city), ctx)
                .await?;
            output(&result, json, render::air_quality_hourly)
        }
        Command::AirDaily { city } => {
            let result = qweather
                .air_quality_daily(&CityQuery::new(city), ctx)
                .await?;
            output(&result, json, render::air_quality_daily)
        }
        Command::Configure { .. } | Command::Tools => {
            anyhow::bail!("not a capability command")
        }
    }
}

fn output<T: Serialize>(result: &T, json: bool, text: fn(&T) -> String) -> anyhow::Result<String> {
    if json {
        serde_json::to_string_pretty(result).context("Failed to serialize result to JSON")
    } else {
        Ok(text(result))
    }
}

#[derive(Serialize)]
struct ToolEntry {
    name: &'static str,
    description: &'static str,
}

fn list_tools(json: bool) -> anyhow::Result<()> {
    if json {
        let tools: Vec<ToolEntry> = CapabilityId::all()
            .iter()
            .map(|id| ToolEntry {
                name: id.as_str(),
                description: id.description(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&tools)?);
    } else {
        for id in CapabilityId::all() {
            println!("{:<28} {}", id.as_str(), id.description());
        }
    }
    Ok(())
}

fn configure(mut config: Config, base_url: Option<String>) -> anyhow::Result<()> {
    let base_url = match base_url {
        Some(url) => url,
        None => {
            let mut prompt = Text::new("API base URL:")
                .with_help_message("Your API host, e.g. https://abc123.qweatherapi.com");
            if let Some(current) = config.base_url.as_deref() {
                prompt = prompt.with_default(current);
            }
            prompt.prompt().context("Failed to read API base URL")?
        }
    };
    let api_key = Password::new("API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if base_url.trim().is_empty() || api_key.trim().is_empty() {
        anyhow::bail!("Base URL and API key must both be non-empty.");
    }

    config.set_base_url(base_url.trim().to_string());
    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!(
        "Configuration saved to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}
