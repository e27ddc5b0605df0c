//! Core library for the `qweather` CLI.
//!
//! This crate defines:
//! - The HTTP transport and client session for the QWeather API
//! - Status normalization for upstream response envelopes
//! - City name resolution
//! - One async orchestration method per weather / air-quality capability
//! - Configuration & credentials handling
//!
//! It is used by `qweather-cli`, but any async caller can drive [`QWeather`]
//! directly:
//!
//! ```no_run
//! # async fn demo() -> qweather_core::Result<()> {
//! use qweather_core::{CallContext, CityQuery, ClientSettings, QWeather};
//!
//! let qweather = QWeather::from_settings(ClientSettings::new(
//!     "https://abc123.qweatherapi.com",
//!     "api-key",
//! ))?;
//! let now = qweather
//!     .weather_now(&CityQuery::new("Beijing"), &CallContext::new())
//!     .await?;
//! println!("{} °C", now.now.temp);
//! # Ok(())
//! # }
//! ```

#[macro_use]
pub mod model;

pub mod capability;
pub mod config;
pub mod context;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod log_level;
pub mod resolver;
pub mod transport;

pub use capability::{
    AirQuality, AirQualityDaily, AirQualityHourly, CapabilityId, CityQuery, CurrentWeather,
    ForecastQuery, HourlyQuery, HourlyWeather, IndicesQuery, LifeIndices, MinutelyPrecipitation,
    QWeather, WeatherForecast, WeatherWarnings,
};
pub use config::Config;
pub use context::CallContext;
pub use envelope::Status;
pub use error::{ErrorKind, ParseValueError, QWeatherError, Result};
pub use log_level::LogLevel;
pub use model::{ForecastDays, ForecastHours, IndexHorizon, IndexType, Location};
pub use resolver::LocationResolver;
pub use transport::{ClientSettings, HttpTransport, Transport};
