//! Human-readable text for capability results.

use chrono::{DateTime, NaiveDateTime, Utc};
use qweather_core::{
    AirQuality, AirQualityDaily, AirQualityHourly, CurrentWeather, HourlyWeather, IndexHorizon,
    LifeIndices, Location, MinutelyPrecipitation, Status, WeatherForecast, WeatherWarnings,
    model::{AirQualityIndex, Pollutant},
};

fn heading(title: &str, location: &Location) -> String {
    format!(
        "{title} - {} ({} {}):",
        location.name, location.adm1, location.adm2
    )
}

/// `HH:MM` part of a provider timestamp like `2025-05-01T12:05+08:00`.
fn clock(fx_time: &str) -> &str {
    let time = fx_time.split_once('T').map_or(fx_time, |(_, time)| time);
    time.split(['+', '-', 'Z']).next().unwrap_or(time)
}

/// Air-quality timestamps, shown in UTC. Unparseable input is shown as is.
pub fn utc_time(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    // The air-quality API drops seconds: `2025-05-01T08:00Z` or `...T08:00+08:00`.
    if let Some(naive) = raw.strip_suffix('Z') {
        return NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M")
            .ok()
            .map(|t| t.and_utc());
    }
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z")
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

pub fn current_weather(result: &CurrentWeather) -> String {
    let now = &result.now;
    [
        heading("Current Weather", &result.location),
        format!("Temperature: {}°C (Feels like: {}°C)", now.temp, now.feels_like),
        format!("Weather Condition: {}", now.text),
        format!("Wind Direction: {} Wind Force: {}", now.wind_dir, now.wind_scale),
        format!("Humidity: {}%", now.humidity),
        format!("Precipitation: {}mm", now.precip),
        format!("Pressure: {}hPa", now.pressure),
        format!("Visibility: {}km", now.vis),
        format!("Last Updated: {}", result.update_time),
    ]
    .join("\n")
}

pub fn weather_forecast(result: &WeatherForecast) -> String {
    let mut lines = vec![
        heading(
            &format!("{} Day Weather Forecast", result.days.count()),
            &result.location,
        ),
        format!("Last Updated: {}", result.update_time),
        String::new(),
    ];

    for day in &result.daily {
        lines.extend([
            format!("Date: {}", day.fx_date),
            format!("Temperature: {}°C ~ {}°C", day.temp_min, day.temp_max),
            format!("Day: {}", day.text_day),
            format!("Night: {}", day.text_night),
            format!("Sunrise: {}  Sunset: {}", day.sunrise, day.sunset),
            format!("Precipitation: {}mm", day.precip),
            format!("Humidity: {}%", day.humidity),
            format!(
                "Wind: Day-{}(Force {}), Night-{}(Force {})",
                day.wind_dir_day, day.wind_scale_day, day.wind_dir_night, day.wind_scale_night
            ),
            format!("UV Index: {}", day.uv_index),
            "---".to_string(),
        ]);
    }
    lines.join("\n")
}

pub fn minutely_precipitation(result: &MinutelyPrecipitation) -> String {
    let mut lines = vec![
        heading("Minutely Precipitation Forecast", &result.location),
        format!("Forecast Description: {}", result.summary),
        format!("Last Updated: {}", result.update_time),
        String::new(),
        "2-Hour Precipitation Forecast:".to_string(),
    ];

    for minute in &result.minutely {
        let kind = if minute.kind == "snow" { "Snow" } else { "Rain" };
        lines.push(format!(
            "Time: {} - {kind}: {}mm",
            clock(&minute.fx_time),
            minute.precip
        ));
    }

    lines.push(String::new());
    lines.push(format!("Data Source: {}", result.fx_link));
    lines.join("\n")
}

pub fn hourly_forecast(result: &HourlyWeather) -> String {
    let mut lines = vec![
        heading(
            &format!("{} Hour Weather Forecast", result.hours.count()),
            &result.location,
        ),
        format!("Last Updated: {}", result.update_time),
        String::new(),
    ];

    for hour in &result.hourly {
        lines.extend([
            format!("Time: {}", clock(&hour.fx_time)),
            format!("Temperature: {}°C", hour.temp),
            format!("Weather: {}", hour.text),
            format!(
                "Wind Direction: {} (Force {}, {}km/h)",
                hour.wind_dir, hour.wind_scale, hour.wind_speed
            ),
            format!("Humidity: {}%", hour.humidity),
            format!("Precipitation: {}mm", hour.precip),
            format!("Pressure: {}hPa", hour.pressure),
        ]);
        if !hour.cloud.is_empty() {
            lines.push(format!("Cloud Cover: {}%", hour.cloud));
        }
        if !hour.dew.is_empty() {
            lines.push(format!("Dew Point: {}°C", hour.dew));
        }
        lines.push("---".to_string());
    }
    lines.join("\n")
}

pub fn weather_warnings(result: &WeatherWarnings) -> String {
    let location = &result.location;
    if result.warnings.is_empty() {
        return format!(
            "Currently {} ({} {}) has no active weather warnings",
            location.name, location.adm1, location.adm2
        );
    }

    let or_unspecified = |value: &str| {
        if value.is_empty() {
            "Not specified".to_string()
        } else {
            value.to_string()
        }
    };

    let mut lines = vec![
        heading("Weather Warnings", location),
        format!("Last Updated: {}", result.update_time),
        String::new(),
    ];
    for warning in &result.warnings {
        lines.extend([
            format!("Warning Title: {}", warning.title),
            format!("Issuing Agency: {}", warning.sender),
            format!("Publication Time: {}", warning.pub_time),
            format!("Warning Type: {}", warning.type_name),
            format!("Severity: {} ({})", warning.severity, warning.severity_color),
            format!(
                "Valid Period: {} to {}",
                or_unspecified(&warning.start_time),
                or_unspecified(&warning.end_time)
            ),
            format!("Status: {}", warning.status),
            format!("Details: {}", warning.text),
            "---".to_string(),
        ]);
    }
    lines.join("\n")
}

pub fn life_indices(result: &LifeIndices) -> String {
    let days = match result.days {
        IndexHorizon::OneDay => "1-day",
        IndexHorizon::ThreeDays => "3-day",
    };
    let mut lines = vec![
        heading(&format!("{days} Weather Indices"), &result.location),
        format!("Last Updated: {}", result.update_time),
        String::new(),
    ];

    for index in &result.daily {
        lines.extend([
            format!("Date: {}", index.date),
            format!("Index Type: {}", index.name),
            format!("Level: {}", index.level),
            format!("Category: {}", index.category),
            format!("Recommendation: {}", index.text),
            "---".to_string(),
        ]);
    }
    lines.join("\n")
}

fn unverified_note(status: &Status) -> Option<String> {
    (*status == Status::Unverified)
        .then(|| "Note: upstream sent no status code; data accepted as unverified.".to_string())
}

pub fn air_quality(result: &AirQuality) -> String {
    let mut lines = vec![heading("Real-time Air Quality", &result.location)];
    lines.extend(unverified_note(&result.status));

    if result.indexes.is_empty() {
        lines.push(String::new());
        lines.push("No air quality indexes available.".to_string());
        return lines.join("\n");
    }

    lines.push(String::new());
    lines.push("Air Quality Index:".to_string());
    for index in &result.indexes {
        lines.push(format!("{}: {}", index.name, index.aqi_display));
        if !index.level.is_empty() {
            lines.push(format!("Level: {}", index.level));
        }
        if !index.category.is_empty() {
            lines.push(format!("Category: {}", index.category));
        }
        if let Some(primary) = &index.primary_pollutant {
            lines.push(format!("Main Pollutant: {}", primary.name));
        }
        if let Some(health) = &index.health {
            lines.extend([
                "Health Effects:".to_string(),
                format!("- {}", health.effect),
                "Health Recommendations:".to_string(),
                format!("- General Population: {}", health.advice.general_population),
                format!("- Sensitive Population: {}", health.advice.sensitive_population),
            ]);
        }
        lines.push("---".to_string());
    }

    lines.push(String::new());
    lines.push("Pollutant Concentrations:".to_string());
    lines.extend(result.pollutants.iter().map(|p| concentration(p, "")));

    if !result.stations.is_empty() {
        lines.push(String::new());
        lines.push("Related Monitoring Stations:".to_string());
        lines.extend(result.stations.iter().map(|s| format!("- {}", s.name)));
    }
    lines.join("\n")
}

fn concentration(pollutant: &Pollutant, indent: &str) -> String {
    format!(
        "{indent}{}: {:.1}{}",
        pollutant.name, pollutant.concentration.value, pollutant.concentration.unit
    )
}

/// One forecast slot of the hourly and daily air-quality views.
fn forecast_block(when: String, indexes: &[AirQualityIndex], pollutants: &[Pollutant]) -> String {
    let mut sections = vec![when];

    for index in indexes {
        let mut block = vec![
            "Air Quality Index:".to_string(),
            format!("  {}: {}", index.name, index.aqi_display),
            format!("  Level: {}", index.level),
            format!("  Category: {}", index.category),
        ];
        if let Some(primary) = &index.primary_pollutant {
            block.push(format!("  Main Pollutant: {}", primary.name));
        }
        if let Some(health) = &index.health {
            block.extend([
                format!("Health Effects: {}", health.effect),
                "Health Recommendations:".to_string(),
                format!("  General Population: {}", health.advice.general_population),
                format!("  Sensitive Population: {}", health.advice.sensitive_population),
            ]);
        }
        sections.push(block.join("\n"));
    }

    if pollutants.is_empty() {
        sections.push("No pollutant data".to_string());
    } else {
        let mut block = vec!["Pollutant Concentrations:".to_string()];
        block.extend(pollutants.iter().map(|p| concentration(p, "  ")));
        sections.push(block.join("\n"));
    }

    sections.push("---".to_string());
    sections.join("\n\n")
}

pub fn air_quality_hourly(result: &AirQualityHourly) -> String {
    let mut lines = vec![heading("24-hour Air Quality Forecast", &result.location)];
    lines.extend(unverified_note(&result.status));
    lines.push(String::new());

    if result.hours.is_empty() {
        lines.push("No forecast hours available.".to_string());
    }
    for hour in &result.hours {
        lines.push(forecast_block(
            format!("Forecast Time: {}", utc_time(&hour.forecast_time)),
            &hour.indexes,
            &hour.pollutants,
        ));
    }
    lines.join("\n")
}

pub fn air_quality_daily(result: &AirQualityDaily) -> String {
    let mut lines = vec![heading("3-day Air Quality Forecast", &result.location)];
    lines.extend(unverified_note(&result.status));
    lines.push(String::new());

    if result.days.is_empty() {
        lines.push("No forecast days available.".to_string());
    }
    for day in &result.days {
        lines.push(forecast_block(
            format!(
                "Forecast Period: {} to {}",
                utc_time(&day.forecast_start_time),
                utc_time(&day.forecast_end_time)
            ),
            &day.indexes,
            &day.pollutants,
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use qweather_core::model::{
        AirQualityHour, Concentration, DailyForecast, MinutelyEntry, NowWeather, Station,
    };

    fn beijing() -> Location {
        Location {
            id: "101010100".into(),
            name: "Beijing".into(),
            adm1: "Beijing".into(),
            adm2: "Beijing".into(),
            country: "China".into(),
            latitude: "39.90".into(),
            longitude: "116.41".into(),
            ..Default::default()
        }
    }

    #[test]
    fn utc_time_accepts_provider_formats() {
        assert_eq!(utc_time("2025-05-01T08:00Z"), "2025-05-01 08:00 UTC");
        assert_eq!(utc_time("2025-05-01T08:00+08:00"), "2025-05-01 00:00 UTC");
        assert_eq!(utc_time("2025-05-01T08:00:00Z"), "2025-05-01 08:00 UTC");
        assert_eq!(utc_time("tomorrow"), "tomorrow");
    }

    #[test]
    fn clock_strips_date_and_offset() {
        assert_eq!(clock("2025-05-01T12:05+08:00"), "12:05");
        assert_eq!(clock("2025-05-01T12:05-05:00"), "12:05");
        assert_eq!(clock("12:05"), "12:05");
    }

    #[test]
    fn current_weather_layout() {
        let result = CurrentWeather {
            location: beijing(),
            update_time: "2025-05-01T12:00+08:00".into(),
            fx_link: String::new(),
            now: NowWeather {
                temp: "20".into(),
                feels_like: "19".into(),
                text: "Sunny".into(),
                ..Default::default()
            },
        };

        let text = current_weather(&result);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Current Weather - Beijing (Beijing Beijing):"));
        assert_eq!(lines.next(), Some("Temperature: 20°C (Feels like: 19°C)"));
        assert!(text.ends_with("Last Updated: 2025-05-01T12:00+08:00"));
    }

    #[test]
    fn forecast_has_one_block_per_day() {
        let result = WeatherForecast {
            location: beijing(),
            days: qweather_core::ForecastDays::SevenDays,
            update_time: String::new(),
            fx_link: String::new(),
            daily: vec![DailyForecast::default(), DailyForecast::default()],
        };

        let text = weather_forecast(&result);
        assert!(text.starts_with("7 Day Weather Forecast - Beijing"));
        assert_eq!(text.matches("---").count(), 2);
    }

    #[test]
    fn minutely_labels_snow() {
        let result = MinutelyPrecipitation {
            location: beijing(),
            update_time: String::new(),
            fx_link: "https://example.com".into(),
            summary: "Light snow".into(),
            minutely: vec![MinutelyEntry {
                fx_time: "2025-05-01T12:05+08:00".into(),
                precip: "0.10".into(),
                kind: "snow".into(),
            }],
        };

        let text = minutely_precipitation(&result);
        assert!(text.contains("Time: 12:05 - Snow: 0.10mm"));
        assert!(text.ends_with("Data Source: https://example.com"));
    }

    #[test]
    fn no_warnings_message() {
        let result = WeatherWarnings {
            location: beijing(),
            update_time: String::new(),
            warnings: vec![],
        };
        assert_eq!(
            weather_warnings(&result),
            "Currently Beijing (Beijing Beijing) has no active weather warnings"
        );
    }

    #[test]
    fn air_quality_notes_unverified_status_and_stations() {
        let result = AirQuality {
            location: beijing(),
            status: Status::Unverified,
            tag: String::new(),
            indexes: vec![AirQualityIndex {
                name: "QAQI".into(),
                aqi_display: "0.9".into(),
                ..Default::default()
            }],
            pollutants: vec![Pollutant {
                name: "PM 2.5".into(),
                concentration: Concentration {
                    value: 11.54,
                    unit: "μg/m3".into(),
                },
                ..Default::default()
            }],
            stations: vec![Station {
                id: "P1".into(),
                name: "Dongcheng".into(),
            }],
        };

        let text = air_quality(&result);
        assert!(text.contains("unverified"));
        assert!(text.contains("QAQI: 0.9"));
        assert!(text.contains("PM 2.5: 11.5μg/m3"));
        assert!(text.ends_with("- Dongcheng"));
    }

    #[test]
    fn air_quality_without_indexes_says_so() {
        let result = AirQuality {
            location: beijing(),
            status: Status::Success,
            tag: String::new(),
            indexes: vec![],
            pollutants: vec![],
            stations: vec![],
        };
        assert!(air_quality(&result).ends_with("No air quality indexes available."));
    }

    #[test]
    fn hourly_air_quality_blocks() {
        let result = AirQualityHourly {
            location: beijing(),
            status: Status::Success,
            tag: String::new(),
            hours: vec![AirQualityHour {
                forecast_time: "2025-05-01T08:00Z".into(),
                indexes: vec![],
                pollutants: vec![],
            }],
        };

        let text = air_quality_hourly(&result);
        assert!(text.contains("Forecast Time: 2025-05-01 08:00 UTC"));
        assert!(text.contains("No pollutant data"));
        assert!(!text.contains("unverified"));
    }
}
