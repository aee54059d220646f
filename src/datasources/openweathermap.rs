use crate::config::OpenWeatherMapConfig;
use crate::error::{Result, SapcastError};
use crate::models::forecast::{CurrentConditions, DailyForecast, WeatherForecast};
use chrono::{DateTime, Utc};
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/3.0";

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    base_url: String,
    config: OpenWeatherMapConfig,
}

/// Request URLs carry the API key, so they are stripped before the error is kept
fn transport_error(e: reqwest::Error) -> SapcastError {
    SapcastError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e.without_url()))
}

// OpenWeatherMap One Call API response structures
#[derive(Debug, Deserialize)]
struct OwmOneCallResponse {
    lat: f64,
    lon: f64,
    #[serde(default)]
    timezone_offset: i32, // seconds east of UTC
    #[serde(default)]
    current: Option<OwmCurrent>,
    #[serde(default)]
    daily: Vec<OwmDaily>,
}

#[derive(Debug, Deserialize)]
struct OwmCurrent {
    temp: f64,
    #[serde(default)]
    weather: Vec<OwmWeather>,
}

#[derive(Debug, Deserialize)]
struct OwmDaily {
    dt: i64,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    temp: Option<OwmDailyTemp>,
    #[serde(default)]
    weather: Vec<OwmWeather>,
}

#[derive(Debug, Deserialize)]
struct OwmDailyTemp {
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    #[allow(dead_code)]
    id: u32,
    description: String,
    icon: String,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .build()
                .unwrap_or_default(),
            base_url: API_BASE_URL.to_string(),
            config,
        }
    }

    /// Fetch current conditions and the daily forecast (metric units)
    pub async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<WeatherForecast> {
        let url = format!(
            "{}/onecall?lat={}&lon={}&exclude=minutely,hourly,alerts&units=metric&appid={}",
            self.base_url, latitude, longitude, self.config.api_key
        );

        tracing::debug!(latitude, longitude, "Fetching OpenWeatherMap forecast");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SapcastError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        let body = response.text().await.map_err(transport_error)?;

        let forecast = Self::parse_response(&body)?;
        tracing::info!(
            days = forecast.daily.len(),
            latitude,
            longitude,
            "Weather forecast fetched"
        );
        Ok(forecast)
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self, latitude: f64, longitude: f64) -> Result<bool> {
        let url = format!(
            "{}/onecall?lat={}&lon={}&exclude=current,minutely,hourly,daily,alerts&appid={}",
            self.base_url, latitude, longitude, self.config.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        Ok(response.status().is_success())
    }

    fn parse_response(body: &str) -> Result<WeatherForecast> {
        let response: OwmOneCallResponse = serde_json::from_str(body).map_err(|e| {
            SapcastError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })?;

        Ok(Self::convert_response(response))
    }

    fn convert_response(response: OwmOneCallResponse) -> WeatherForecast {
        let offset = response.timezone_offset;

        let current = response.current.map(|c| {
            let weather = c.weather.first();
            CurrentConditions {
                temp_c: c.temp,
                summary: weather.map(|w| w.description.clone()).unwrap_or_default(),
                icon: weather.map(|w| w.icon.clone()).unwrap_or_default(),
            }
        });

        let mut daily: Vec<DailyForecast> = response
            .daily
            .into_iter()
            .filter_map(|d| Self::convert_daily(d, offset))
            .collect();
        daily.sort_by_key(|d| d.date);

        WeatherForecast {
            fetched_at: Utc::now(),
            latitude: response.lat,
            longitude: response.lon,
            timezone_offset_secs: offset,
            current,
            daily,
        }
    }

    fn convert_daily(day: OwmDaily, offset_secs: i32) -> Option<DailyForecast> {
        // Local calendar date at the forecast location
        let date = match DateTime::from_timestamp(day.dt + offset_secs as i64, 0) {
            Some(ts) => ts.date_naive(),
            None => {
                tracing::warn!(dt = day.dt, "Skipping forecast day with invalid timestamp");
                return None;
            }
        };

        let weather = day.weather.first();
        let summary = day
            .summary
            .filter(|s| !s.is_empty())
            .or_else(|| weather.map(|w| w.description.clone()))
            .unwrap_or_default();

        Some(DailyForecast {
            date,
            low_c: day.temp.as_ref().and_then(|t| t.min),
            high_c: day.temp.as_ref().and_then(|t| t.max),
            summary,
            icon: weather.map(|w| w.icon.clone()).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_config() -> OpenWeatherMapConfig {
        OpenWeatherMapConfig {
            api_key: "test_key".to_string(),
            enabled: true,
        }
    }

    // Daily entries are stamped at local noon, 16:00 UTC at a -4h offset
    const SAMPLE: &str = r#"{
        "lat": 44.26,
        "lon": -72.58,
        "timezone": "America/New_York",
        "timezone_offset": -14400,
        "current": {
            "dt": 1741600800,
            "temp": -1.5,
            "weather": [{"id": 600, "main": "Snow", "description": "light snow", "icon": "13d"}]
        },
        "daily": [
            {
                "dt": 1741622400,
                "summary": "Expect a day of partly cloudy with snow",
                "temp": {"day": 3.1, "min": -4.2, "max": 6.3, "night": -2.0, "eve": 1.0, "morn": -4.0},
                "weather": [{"id": 600, "main": "Snow", "description": "light snow", "icon": "13d"}]
            },
            {
                "dt": 1741708800,
                "temp": {"min": -6.0},
                "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}]
            }
        ]
    }"#;

    #[test]
    fn client_creation() {
        let client = OpenWeatherMapClient::new(sample_config());
        assert!(client.config.enabled);
    }

    #[test]
    fn parses_one_call_response() {
        let forecast = OpenWeatherMapClient::parse_response(SAMPLE).unwrap();
        assert_eq!(forecast.latitude, 44.26);
        assert_eq!(forecast.timezone_offset_secs, -14400);

        let current = forecast.current.unwrap();
        assert_eq!(current.temp_c, -1.5);
        assert_eq!(current.summary, "light snow");
        assert_eq!(current.icon, "13d");

        assert_eq!(forecast.daily.len(), 2);
        let first = &forecast.daily[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert_eq!(first.low_c, Some(-4.2));
        assert_eq!(first.high_c, Some(6.3));
        assert_eq!(first.summary, "Expect a day of partly cloudy with snow");
    }

    #[test]
    fn missing_values_stay_missing() {
        let forecast = OpenWeatherMapClient::parse_response(SAMPLE).unwrap();
        let second = &forecast.daily[1];
        assert_eq!(second.date, NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());
        assert_eq!(second.low_c, Some(-6.0));
        assert_eq!(second.high_c, None);
        // Falls back to the weather description
        assert_eq!(second.summary, "clear sky");
        assert_eq!(second.icon, "01d");
    }

    #[test]
    fn malformed_body_is_unavailable() {
        let err = OpenWeatherMapClient::parse_response("{\"cod\": 401}").unwrap_err();
        assert!(matches!(err, SapcastError::DataSourceUnavailable(_)));
    }

    #[tokio::test]
    async fn transport_errors_hide_the_api_key() {
        let mut client = OpenWeatherMapClient::new(OpenWeatherMapConfig {
            api_key: "SECRETKEY123".to_string(),
            enabled: true,
        });
        // Nothing listens on port 1, so the request fails before any response
        client.base_url = "http://127.0.0.1:1/data/3.0".to_string();

        let err = client.fetch_forecast(44.0, -72.0).await.unwrap_err();
        assert!(matches!(err, SapcastError::DataSourceUnavailable(_)));
        let shown = err.to_string();
        assert!(!shown.contains("SECRETKEY123"), "{}", shown);
        assert!(!shown.contains("appid"), "{}", shown);

        let err = client.test_connection(44.0, -72.0).await.unwrap_err();
        assert!(!err.to_string().contains("SECRETKEY123"));
    }
}
