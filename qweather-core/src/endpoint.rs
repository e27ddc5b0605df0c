//! Upstream endpoint descriptors.
//!
//! An [`Endpoint`] is fixed per resource: its path template (with `{}`
//! placeholders filled positionally), the query parameters it accepts, and
//! how much its `code` field can be trusted.

use crate::error::{QWeatherError, Result};

const PLACEHOLDER: &str = "{}";

/// How a resource's envelope status is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Anything but `"200"` is a failure.
    Strict,
    /// An empty status is resolved by looking at the payload.
    EmptyMeansPayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Resource name used in failure messages.
    pub resource: &'static str,
    pub path: &'static str,
    pub query: &'static [&'static str],
    pub status: StatusPolicy,
}

impl Endpoint {
    pub const fn new(
        resource: &'static str,
        path: &'static str,
        query: &'static [&'static str],
        status: StatusPolicy,
    ) -> Self {
        Self {
            resource,
            path,
            query,
            status,
        }
    }

    pub fn placeholder_count(&self) -> usize {
        self.path.matches(PLACEHOLDER).count()
    }

    /// Substitute `params` into the template, one placeholder each, in order.
    pub fn render_path(&self, params: &[&str]) -> Result<String> {
        let expected = self.placeholder_count();
        if params.len() != expected {
            return Err(QWeatherError::InvalidRequest {
                endpoint: self.path,
                message: format!("expected {expected} path parameters, got {}", params.len()),
            });
        }

        let mut path = self.path.to_string();
        for param in params {
            if param.is_empty() || param.contains('/') {
                return Err(QWeatherError::InvalidRequest {
                    endpoint: self.path,
                    message: format!("invalid path parameter '{param}'"),
                });
            }
            path = path.replacen(PLACEHOLDER, param, 1);
        }
        Ok(path)
    }

    pub fn check_query(&self, query: &[(&str, &str)]) -> Result<()> {
        match query.iter().find(|(key, _)| !self.query.contains(key)) {
            Some((key, _)) => Err(QWeatherError::InvalidRequest {
                endpoint: self.path,
                message: format!("unexpected query parameter '{key}'"),
            }),
            None => Ok(()),
        }
    }
}

pub const CITY_LOOKUP: Endpoint = Endpoint::new(
    "location",
    "/geo/v2/city/lookup",
    &["location"],
    StatusPolicy::Strict,
);

pub const WEATHER_NOW: Endpoint = Endpoint::new(
    "real-time weather",
    "/v7/weather/now",
    &["location"],
    StatusPolicy::Strict,
);

pub const WEATHER_DAILY: Endpoint = Endpoint::new(
    "weather forecast",
    "/v7/weather/{}",
    &["location"],
    StatusPolicy::Strict,
);

pub const WEATHER_HOURLY: Endpoint = Endpoint::new(
    "hourly weather forecast",
    "/v7/weather/{}",
    &["location"],
    StatusPolicy::Strict,
);

pub const MINUTELY_PRECIPITATION: Endpoint = Endpoint::new(
    "minutely precipitation forecast",
    "/v7/minutely/5m",
    &["location"],
    StatusPolicy::Strict,
);

pub const WEATHER_WARNING: Endpoint = Endpoint::new(
    "weather warning",
    "/v7/warning/now",
    &["location"],
    StatusPolicy::Strict,
);

pub const WEATHER_INDICES: Endpoint = Endpoint::new(
    "weather indices",
    "/v7/indices/{}",
    &["location", "type"],
    StatusPolicy::Strict,
);

pub const AIR_QUALITY_CURRENT: Endpoint = Endpoint::new(
    "air quality",
    "/airquality/v1/current/{}/{}",
    &[],
    StatusPolicy::EmptyMeansPayload,
);

pub const AIR_QUALITY_HOURLY: Endpoint = Endpoint::new(
    "hourly air quality forecast",
    "/airquality/v1/hourly/{}/{}",
    &[],
    StatusPolicy::EmptyMeansPayload,
);

pub const AIR_QUALITY_DAILY: Endpoint = Endpoint::new(
    "daily air quality forecast",
    "/airquality/v1/daily/{}/{}",
    &[],
    StatusPolicy::EmptyMeansPayload,
);
