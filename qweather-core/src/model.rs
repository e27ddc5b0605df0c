//! Wire models for the upstream provider and the closed input sets used to
//! query it.
//!
//! Payload fields are kept exactly as the provider sends them (mostly
//! strings); nothing here converts units.

/// Implements [`Envelope`](crate::envelope::Envelope) for structs whose status
/// lives in a `code` field.
macro_rules! impl_envelope {
    ($($ty:ty),+ $(,)?) => {$(
        impl crate::envelope::Envelope for $ty {
            fn status(&self) -> &crate::envelope::Status {
                &self.code
            }

            fn set_status(&mut self, status: crate::envelope::Status) {
                self.code = status;
            }
        }
    )+};
}

/// A string-backed enum with a fixed set of wire values.
macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            pub const fn all() -> &'static [$name] {
                &[$($name::$variant),+]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::error::ParseValueError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value.trim().to_ascii_lowercase().as_str() {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(crate::error::ParseValueError::new(
                        $kind,
                        value,
                        $name::all().iter().map($name::as_str),
                    )),
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

pub mod air_quality;
pub mod indices;
pub mod location;
pub mod weather;

pub use air_quality::{
    AirQualityDailyResponse, AirQualityDay, AirQualityHour, AirQualityHourlyResponse,
    AirQualityIndex, AirQualityResponse, Color, Concentration, Health, HealthAdvice, Metadata,
    Pollutant, PrimaryPollutant, Station, SubIndex,
};
pub use indices::{IndexHorizon, IndexType, IndicesResponse, LifeIndex};
pub use location::{Coordinates, Location, LocationCandidate, LocationResponse};
pub use weather::{
    DailyForecast, DailyForecastResponse, ForecastDays, ForecastHours, HourlyEntry,
    HourlyResponse, MinutelyEntry, MinutelyResponse, NowWeather, Warning, WarningResponse,
    WeatherNowResponse,
};
