use serde::Serialize;

use crate::{
    context::CallContext,
    endpoint::{AIR_QUALITY_CURRENT, AIR_QUALITY_DAILY, AIR_QUALITY_HOURLY},
    envelope::Status,
    error::Result,
    model::{
        AirQualityDailyResponse, AirQualityDay, AirQualityHour, AirQualityHourlyResponse,
        AirQualityIndex, AirQualityResponse, Location, Pollutant, Station,
    },
};

use super::{CityQuery, QWeather};

/// Real-time air quality. `status` is [`Status::Unverified`] when upstream
/// omitted its code but sent data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQuality {
    pub location: Location,
    pub status: Status,
    pub tag: String,
    pub indexes: Vec<AirQualityIndex>,
    pub pollutants: Vec<Pollutant>,
    pub stations: Vec<Station>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQualityHourly {
    pub location: Location,
    pub status: Status,
    pub tag: String,
    pub hours: Vec<AirQualityHour>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQualityDaily {
    pub location: Location,
    pub status: Status,
    pub tag: String,
    pub days: Vec<AirQualityDay>,
}

impl QWeather {
    pub async fn air_quality(&self, query: &CityQuery, ctx: &CallContext) -> Result<AirQuality> {
        let location = self.locate(&query.city, ctx).await?;
        let coordinates = location.coordinates();

        let response: AirQualityResponse = self
            .fetch(
                &AIR_QUALITY_CURRENT,
                &[coordinates.latitude.as_str(), coordinates.longitude.as_str()],
                &[],
                Some(&coordinates),
                |r: &AirQualityResponse| r.indexes.as_slice(),
                ctx,
            )
            .await?;

        Ok(AirQuality {
            location,
            status: response.code,
            tag: response.metadata.tag,
            indexes: response.indexes,
            pollutants: response.pollutants,
            stations: response.stations,
        })
    }

    pub async fn air_quality_hourly(
        &self,
        query: &CityQuery,
        ctx: &CallContext,
    ) -> Result<AirQualityHourly> {
        let location = self.locate(&query.city, ctx).await?;
        let coordinates = location.coordinates();

        let response: AirQualityHourlyResponse = self
            .fetch(
                &AIR_QUALITY_HOURLY,
                &[coordinates.latitude.as_str(), coordinates.longitude.as_str()],
                &[],
                Some(&coordinates),
                |r: &AirQualityHourlyResponse| r.hours.as_slice(),
                ctx,
            )
            .await?;

        Ok(AirQualityHourly {
            location,
            status: response.code,
            tag: response.metadata.tag,
            hours: response.hours,
        })
    }

    pub async fn air_quality_daily(
        &self,
        query: &CityQuery,
        ctx: &CallContext,
    ) -> Result<AirQualityDaily> {
        let location = self.locate(&query.city, ctx).await?;
        let coordinates = location.coordinates();

        let response: AirQualityDailyResponse = self
            .fetch(
                &AIR_QUALITY_DAILY,
                &[coordinates.latitude.as_str(), coordinates.longitude.as_str()],
                &[],
                Some(&coordinates),
                |r: &AirQualityDailyResponse| r.days.as_slice(),
                ctx,
            )
            .await?;

        Ok(AirQualityDaily {
            location,
            status: response.code,
            tag: response.metadata.tag,
            days: response.days,
        })
    }
}
