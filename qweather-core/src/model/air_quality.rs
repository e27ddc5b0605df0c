use serde::{Deserialize, Serialize};

use crate::envelope::Status;

/// Real-time air quality response.
///
/// The air-quality endpoints sometimes omit `code`; see
/// [`normalize`](crate::envelope::normalize).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AirQualityResponse {
    pub code: Status,
    pub metadata: Metadata,
    pub indexes: Vec<AirQualityIndex>,
    pub pollutants: Vec<Pollutant>,
    pub stations: Vec<Station>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AirQualityHourlyResponse {
    pub code: Status,
    pub metadata: Metadata,
    pub hours: Vec<AirQualityHour>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AirQualityDailyResponse {
    pub code: Status,
    pub metadata: Metadata,
    pub days: Vec<AirQualityDay>,
}

impl_envelope!(
    AirQualityResponse,
    AirQualityHourlyResponse,
    AirQualityDailyResponse,
);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub tag: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AirQualityHour {
    pub forecast_time: String,
    pub indexes: Vec<AirQualityIndex>,
    pub pollutants: Vec<Pollutant>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AirQualityDay {
    pub forecast_start_time: String,
    pub forecast_end_time: String,
    pub indexes: Vec<AirQualityIndex>,
    pub pollutants: Vec<Pollutant>,
}

/// One AQI under a given standard (`qaqi`, `cn-mee`, `us-epa`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AirQualityIndex {
    pub code: String,
    pub name: String,
    pub aqi: f64,
    pub aqi_display: String,
    pub level: String,
    pub category: String,
    pub color: Color,
    pub primary_pollutant: Option<PrimaryPollutant>,
    pub health: Option<Health>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrimaryPollutant {
    pub code: String,
    pub name: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Health {
    pub effect: String,
    pub advice: HealthAdvice,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HealthAdvice {
    pub general_population: String,
    pub sensitive_population: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pollutant {
    pub code: String,
    pub name: String,
    pub full_name: String,
    pub concentration: Concentration,
    pub sub_indexes: Vec<SubIndex>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Concentration {
    pub value: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubIndex {
    pub code: String,
    pub aqi: f64,
    pub aqi_display: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Station {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_code_decodes_as_empty_status() {
        let parsed: AirQualityResponse = serde_json::from_str(
            r#"{"indexes":[{"code":"qaqi","aqi":50}],"pollutants":[]}"#,
        )
        .unwrap();

        assert_eq!(parsed.code, Status::Empty);
        assert_eq!(parsed.indexes.len(), 1);
        assert_eq!(parsed.indexes[0].aqi, 50.0);
        assert!(parsed.indexes[0].health.is_none());
    }

    #[test]
    fn nested_index_fields_decode() {
        let parsed: AirQualityHourlyResponse = serde_json::from_str(
            r#"{
                "code": "200",
                "metadata": {"tag": "abc"},
                "hours": [{
                    "forecastTime": "2025-05-01T08:00Z",
                    "indexes": [{
                        "code": "us-epa",
                        "aqi": 46,
                        "aqiDisplay": "46",
                        "color": {"red": 0, "green": 228, "blue": 0, "alpha": 1},
                        "primaryPollutant": {"code": "pm2p5", "name": "PM 2.5", "fullName": "Fine particulate matter"},
                        "health": {"effect": "None", "advice": {"generalPopulation": "Enjoy", "sensitivePopulation": "Enjoy"}}
                    }],
                    "pollutants": [{"code": "pm2p5", "name": "PM 2.5", "concentration": {"value": 11.5, "unit": "μg/m3"}}]
                }]
            }"#,
        )
        .unwrap();

        let hour = &parsed.hours[0];
        let index = &hour.indexes[0];
        assert_eq!(parsed.metadata.tag, "abc");
        assert_eq!(index.color.green, 228);
        assert_eq!(index.primary_pollutant.as_ref().unwrap().name, "PM 2.5");
        assert_eq!(index.health.as_ref().unwrap().advice.general_population, "Enjoy");
        assert_eq!(hour.pollutants[0].concentration.value, 11.5);
    }
}
