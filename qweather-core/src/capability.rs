//! Capability orchestration.
//!
//! [`QWeather`] owns the shared transport and exposes one async method per
//! capability. Every method follows the same steps: validate input, resolve
//! the city, fetch, apply the endpoint's status policy, assemble the output.
//! The first failure ends the call.

use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::{
    context::CallContext,
    endpoint::Endpoint,
    envelope::{Envelope, Status, decode, log_unverified},
    error::{QWeatherError, Result},
    log_level::LogLevel,
    model::{Coordinates, Location},
    resolver::LocationResolver,
    transport::{ClientSettings, HttpTransport, Transport},
};

pub mod air_quality;
pub mod indices;
pub mod weather;

pub use air_quality::{AirQuality, AirQualityDaily, AirQualityHourly};
pub use indices::{IndicesQuery, LifeIndices};
pub use weather::{
    CityQuery, CurrentWeather, ForecastQuery, HourlyQuery, HourlyWeather, MinutelyPrecipitation,
    WeatherForecast, WeatherWarnings,
};

closed_set! {
    /// Stable names of the exposed capabilities.
    CapabilityId, "capability" {
        #[default]
        WeatherNow => "get-weather-now",
        WeatherForecast => "get-weather-forecast",
        MinutelyPrecipitation => "get-minutely-precipitation",
        HourlyForecast => "get-hourly-forecast",
        WeatherWarning => "get-weather-warning",
        WeatherIndices => "get-weather-indices",
        AirQuality => "get-air-quality",
        AirQualityHourly => "get-air-quality-hourly",
        AirQualityDaily => "get-air-quality-daily",
    }
}

impl CapabilityId {
    pub fn description(&self) -> &'static str {
        match self {
            CapabilityId::WeatherNow => {
                "Current conditions for a city: temperature, feels-like, wind, humidity, precipitation, pressure and visibility."
            }
            CapabilityId::WeatherForecast => {
                "Daily forecast for 3 to 30 days: sun and moon times, temperature range, wind, humidity, precipitation and UV index."
            }
            CapabilityId::MinutelyPrecipitation => {
                "Precipitation type and amount for the next two hours in 5-minute steps."
            }
            CapabilityId::HourlyForecast => {
                "Hourly forecast for the next 24, 72 or 168 hours."
            }
            CapabilityId::WeatherWarning => {
                "Active weather warnings issued by official agencies."
            }
            CapabilityId::WeatherIndices => {
                "Life indices (sports, car washing, UV, allergy and more) for 1 or 3 days."
            }
            CapabilityId::AirQuality => {
                "Real-time air quality: AQI under local standards, pollutant concentrations and health advice."
            }
            CapabilityId::AirQualityHourly => {
                "Hourly air quality forecast for the next 24 hours."
            }
            CapabilityId::AirQualityDaily => {
                "Daily air quality forecast for the next 3 days."
            }
        }
    }

    /// Whether the capability's data call is keyed by coordinates rather than
    /// the location id.
    pub fn keyed_by_coordinates(&self) -> bool {
        matches!(
            self,
            CapabilityId::MinutelyPrecipitation
                | CapabilityId::AirQuality
                | CapabilityId::AirQualityHourly
                | CapabilityId::AirQualityDaily
        )
    }
}

/// Entry point for every capability. Cheap to clone; clones share the
/// underlying client session.
#[derive(Debug, Clone)]
pub struct QWeather {
    transport: Arc<dyn Transport>,
}

impl QWeather {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn from_settings(settings: ClientSettings) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new(settings)?)))
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    fn log_level(&self) -> LogLevel {
        self.transport.log_level()
    }

    async fn locate(&self, city: &str, ctx: &CallContext) -> Result<Location> {
        let city = city.trim();
        if city.is_empty() {
            return Err(QWeatherError::EmptyInput { field: "city name" });
        }
        LocationResolver::new(self.transport.as_ref())
            .resolve(city, ctx)
            .await
            .map_err(QWeatherError::city_lookup)
    }

    /// One data call: fetch, decode, then the endpoint's status policy.
    ///
    /// `payload` picks the collection that rescues an empty status code;
    /// strict endpoints never look at it.
    async fn fetch<E, T, F>(
        &self,
        endpoint: &Endpoint,
        path_params: &[&str],
        query: &[(&str, &str)],
        coordinates: Option<&Coordinates>,
        payload: F,
        ctx: &CallContext,
    ) -> Result<E>
    where
        E: Envelope + DeserializeOwned,
        F: Fn(&E) -> &[T],
    {
        let attempt = async {
            let body = self
                .transport
                .get(endpoint, path_params, query, ctx)
                .await?;
            let envelope: E = decode(endpoint.resource, &body, self.log_level())?;
            let envelope = endpoint.status.apply(envelope, &payload)?;
            if *envelope.status() == Status::Unverified {
                log_unverified(endpoint.resource, payload(&envelope).len(), self.log_level());
            }
            Ok(envelope)
        };

        attempt
            .await
            .map_err(|err: QWeatherError| err.fetching(endpoint.resource, coordinates))
    }
}
