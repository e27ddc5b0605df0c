use serde::{Deserialize, Serialize};

use crate::envelope::Status;

closed_set! {
    /// Daily forecast horizon.
    ForecastDays, "forecast days" {
        #[default]
        ThreeDays => "3d",
        SevenDays => "7d",
        TenDays => "10d",
        FifteenDays => "15d",
        ThirtyDays => "30d",
    }
}

closed_set! {
    /// Hourly forecast horizon.
    ForecastHours, "forecast hours" {
        #[default]
        TwentyFour => "24h",
        SeventyTwo => "72h",
        OneSixtyEight => "168h",
    }
}

impl ForecastDays {
    pub fn count(&self) -> u8 {
        match self {
            ForecastDays::ThreeDays => 3,
            ForecastDays::SevenDays => 7,
            ForecastDays::TenDays => 10,
            ForecastDays::FifteenDays => 15,
            ForecastDays::ThirtyDays => 30,
        }
    }
}

impl ForecastHours {
    pub fn count(&self) -> u8 {
        match self {
            ForecastHours::TwentyFour => 24,
            ForecastHours::SeventyTwo => 72,
            ForecastHours::OneSixtyEight => 168,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WeatherNowResponse {
    pub code: Status,
    pub update_time: String,
    pub fx_link: String,
    pub now: NowWeather,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NowWeather {
    pub obs_time: String,
    pub temp: String,
    pub feels_like: String,
    pub icon: String,
    pub text: String,
    pub wind360: String,
    pub wind_dir: String,
    pub wind_scale: String,
    pub wind_speed: String,
    pub humidity: String,
    pub precip: String,
    pub pressure: String,
    pub vis: String,
    pub cloud: String,
    pub dew: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DailyForecastResponse {
    pub code: Status,
    pub update_time: String,
    pub fx_link: String,
    pub daily: Vec<DailyForecast>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DailyForecast {
    pub fx_date: String,
    pub sunrise: String,
    pub sunset: String,
    pub moonrise: String,
    pub moonset: String,
    pub moon_phase: String,
    pub moon_phase_icon: String,
    pub temp_max: String,
    pub temp_min: String,
    pub icon_day: String,
    pub text_day: String,
    pub icon_night: String,
    pub text_night: String,
    pub wind360_day: String,
    pub wind_dir_day: String,
    pub wind_scale_day: String,
    pub wind_speed_day: String,
    pub wind360_night: String,
    pub wind_dir_night: String,
    pub wind_scale_night: String,
    pub wind_speed_night: String,
    pub humidity: String,
    pub precip: String,
    pub pressure: String,
    pub vis: String,
    pub cloud: String,
    pub uv_index: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MinutelyResponse {
    pub code: Status,
    pub update_time: String,
    pub fx_link: String,
    pub summary: String,
    pub minutely: Vec<MinutelyEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MinutelyEntry {
    pub fx_time: String,
    pub precip: String,
    /// `rain` or `snow`.
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HourlyResponse {
    pub code: Status,
    pub update_time: String,
    pub fx_link: String,
    pub hourly: Vec<HourlyEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HourlyEntry {
    pub fx_time: String,
    pub temp: String,
    pub icon: String,
    pub text: String,
    pub wind360: String,
    pub wind_dir: String,
    pub wind_scale: String,
    pub wind_speed: String,
    pub humidity: String,
    pub pop: String,
    pub precip: String,
    pub pressure: String,
    pub cloud: String,
    pub dew: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WarningResponse {
    pub code: Status,
    pub update_time: String,
    pub fx_link: String,
    pub warning: Vec<Warning>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Warning {
    pub id: String,
    pub sender: String,
    pub pub_time: String,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    pub severity: String,
    pub severity_color: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub type_name: String,
    pub urgency: String,
    pub certainty: String,
    pub text: String,
    pub related: String,
}

impl_envelope!(
    WeatherNowResponse,
    DailyForecastResponse,
    MinutelyResponse,
    HourlyResponse,
    WarningResponse,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizons_parse_and_default() {
        assert_eq!("7d".parse::<ForecastDays>().unwrap(), ForecastDays::SevenDays);
        assert_eq!("168H".parse::<ForecastHours>().unwrap(), ForecastHours::OneSixtyEight);
        assert_eq!(ForecastDays::default().as_str(), "3d");
        assert_eq!(ForecastHours::default().as_str(), "24h");
        assert_eq!(ForecastDays::ThirtyDays.count(), 30);
    }

    #[test]
    fn unknown_horizon_is_rejected() {
        let err = "5d".parse::<ForecastDays>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown forecast days '5d'. Supported values: 3d, 7d, 10d, 15d, 30d."
        );
    }

    #[test]
    fn daily_fields_follow_camel_case() {
        let parsed: DailyForecastResponse = serde_json::from_str(
            r#"{"code":"200","daily":[{"fxDate":"2025-05-01","tempMax":"28","wind360Day":"90","uvIndex":"7"}]}"#,
        )
        .unwrap();

        let day = &parsed.daily[0];
        assert_eq!(day.fx_date, "2025-05-01");
        assert_eq!(day.temp_max, "28");
        assert_eq!(day.wind360_day, "90");
        assert_eq!(day.uv_index, "7");
    }

    #[test]
    fn minutely_type_maps_to_kind() {
        let parsed: MinutelyResponse = serde_json::from_str(
            r#"{"code":"200","summary":"No rain","minutely":[{"fxTime":"2025-05-01T12:05+08:00","precip":"0.00","type":"snow"}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.minutely[0].kind, "snow");
    }
}
