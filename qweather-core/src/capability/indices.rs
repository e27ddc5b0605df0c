use serde::Serialize;

use crate::{
    context::CallContext,
    endpoint::WEATHER_INDICES,
    error::Result,
    model::{IndexHorizon, IndexType, IndicesResponse, LifeIndex, Location},
};

use super::QWeather;

/// Life index request. Both selectors are closed sets, so anything that
/// reaches the provider is already a value it accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndicesQuery {
    pub city: String,
    pub index_type: Option<IndexType>,
    pub days: Option<IndexHorizon>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifeIndices {
    pub location: Location,
    pub index_type: IndexType,
    pub days: IndexHorizon,
    pub update_time: String,
    pub daily: Vec<LifeIndex>,
}

impl QWeather {
    pub async fn weather_indices(
        &self,
        query: &IndicesQuery,
        ctx: &CallContext,
    ) -> Result<LifeIndices> {
        let index_type = query.index_type.unwrap_or_default();
        let days = query.days.unwrap_or_default();
        let location = self.locate(&query.city, ctx).await?;

        let response: IndicesResponse = self
            .fetch(
                &WEATHER_INDICES,
                &[days.as_str()],
                &[("location", location.id.as_str()), ("type", index_type.as_str())],
                None,
                |r: &IndicesResponse| r.daily.as_slice(),
                ctx,
            )
            .await?;

        Ok(LifeIndices {
            location,
            index_type,
            days,
            update_time: response.update_time,
            daily: response.daily,
        })
    }
}
