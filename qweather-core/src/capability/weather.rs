use serde::Serialize;

use crate::{
    context::CallContext,
    endpoint::{
        MINUTELY_PRECIPITATION, WEATHER_DAILY, WEATHER_HOURLY, WEATHER_NOW, WEATHER_WARNING,
    },
    error::Result,
    model::{
        DailyForecast, DailyForecastResponse, ForecastDays, ForecastHours, HourlyEntry,
        HourlyResponse, Location, MinutelyEntry, MinutelyResponse, NowWeather, Warning,
        WarningResponse, WeatherNowResponse,
    },
};

use super::QWeather;

/// Input for capabilities that only need a city.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityQuery {
    pub city: String,
}

impl CityQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForecastQuery {
    pub city: String,
    /// Defaults to three days.
    pub days: Option<ForecastDays>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HourlyQuery {
    pub city: String,
    /// Defaults to 24 hours.
    pub hours: Option<ForecastHours>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeather {
    pub location: Location,
    pub update_time: String,
    pub fx_link: String,
    pub now: NowWeather,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherForecast {
    pub location: Location,
    pub days: ForecastDays,
    pub update_time: String,
    pub fx_link: String,
    pub daily: Vec<DailyForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinutelyPrecipitation {
    pub location: Location,
    pub update_time: String,
    pub fx_link: String,
    pub summary: String,
    pub minutely: Vec<MinutelyEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyWeather {
    pub location: Location,
    pub hours: ForecastHours,
    pub update_time: String,
    pub fx_link: String,
    pub hourly: Vec<HourlyEntry>,
}

/// Active warnings; an empty list means there are none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherWarnings {
    pub location: Location,
    pub update_time: String,
    pub warnings: Vec<Warning>,
}

impl QWeather {
    pub async fn weather_now(&self, query: &CityQuery, ctx: &CallContext) -> Result<CurrentWeather> {
        let location = self.locate(&query.city, ctx).await?;

        let response: WeatherNowResponse = self
            .fetch(
                &WEATHER_NOW,
                &[],
                &[("location", location.id.as_str())],
                None,
                |r: &WeatherNowResponse| std::slice::from_ref(&r.now),
                ctx,
            )
            .await?;

        Ok(CurrentWeather {
            location,
            update_time: response.update_time,
            fx_link: response.fx_link,
            now: response.now,
        })
    }

    pub async fn weather_forecast(
        &self,
        query: &ForecastQuery,
        ctx: &CallContext,
    ) -> Result<WeatherForecast> {
        let days = query.days.unwrap_or_default();
        let location = self.locate(&query.city, ctx).await?;

        let response: DailyForecastResponse = self
            .fetch(
                &WEATHER_DAILY,
                &[days.as_str()],
                &[("location", location.id.as_str())],
                None,
                |r: &DailyForecastResponse| r.daily.as_slice(),
                ctx,
            )
            .await?;

        Ok(WeatherForecast {
            location,
            days,
            update_time: response.update_time,
            fx_link: response.fx_link,
            daily: response.daily,
        })
    }

    /// Keyed by the unrounded `lon,lat` of the candidate rather than the
    /// location id.
    pub async fn minutely_precipitation(
        &self,
        query: &CityQuery,
        ctx: &CallContext,
    ) -> Result<MinutelyPrecipitation> {
        let location = self.locate(&query.city, ctx).await?;
        let coordinates = location.raw_coordinates.clone();
        let lon_lat = coordinates.lon_lat();

        let response: MinutelyResponse = self
            .fetch(
                &MINUTELY_PRECIPITATION,
                &[],
                &[("location", lon_lat.as_str())],
                Some(&coordinates),
                |r: &MinutelyResponse| r.minutely.as_slice(),
                ctx,
            )
            .await?;

        Ok(MinutelyPrecipitation {
            location,
            update_time: response.update_time,
            fx_link: response.fx_link,
            summary: response.summary,
            minutely: response.minutely,
        })
    }

    pub async fn hourly_forecast(
        &self,
        query: &HourlyQuery,
        ctx: &CallContext,
    ) -> Result<HourlyWeather> {
        let hours = query.hours.unwrap_or_default();
        let location = self.locate(&query.city, ctx).await?;

        let response: HourlyResponse = self
            .fetch(
                &WEATHER_HOURLY,
                &[hours.as_str()],
                &[("location", location.id.as_str())],
                None,
                |r: &HourlyResponse| r.hourly.as_slice(),
                ctx,
            )
            .await?;

        Ok(HourlyWeather {
            location,
            hours,
            update_time: response.update_time,
            fx_link: response.fx_link,
            hourly: response.hourly,
        })
    }

    pub async fn weather_warning(
        &self,
        query: &CityQuery,
        ctx: &CallContext,
    ) -> Result<WeatherWarnings> {
        let location = self.locate(&query.city, ctx).await?;

        let response: WarningResponse = self
            .fetch(
                &WEATHER_WARNING,
                &[],
                &[("location", location.id.as_str())],
                None,
                |r: &WarningResponse| r.warning.as_slice(),
                ctx,
            )
            .await?;

        Ok(WeatherWarnings {
            location,
            update_time: response.update_time,
            warnings: response.warning,
        })
    }
}
