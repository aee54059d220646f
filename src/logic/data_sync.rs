use super::{build_report, RatingThresholds};
use crate::config::{CacheConfig, Config, LocationConfig};
use crate::datasources::OpenWeatherMapClient;
use crate::db::{cache_key, Database};
use crate::error::{Result, SapcastError};
use crate::models::TapReport;
use std::sync::Arc;

/// Fetches forecasts, rates them and keeps the report cache warm.
///
/// Cheap to clone; the HTTP handlers share one instance across requests.
#[derive(Clone)]
pub struct ReportService {
    db: Database,
    openweathermap_client: Option<Arc<OpenWeatherMapClient>>,
    thresholds: RatingThresholds,
    cache: CacheConfig,
    location: LocationConfig,
}

impl ReportService {
    pub fn new(config: &Config, db: Database) -> Self {
        let openweathermap_client = if config.openweathermap.is_usable() {
            tracing::info!("OpenWeatherMap client configured for forecast data");
            Some(Arc::new(OpenWeatherMapClient::new(
                config.openweathermap.clone(),
            )))
        } else {
            tracing::warn!("OpenWeatherMap API key not configured - only cached reports are available");
            None
        };

        Self {
            db,
            openweathermap_client,
            thresholds: config.thresholds,
            cache: config.cache.clone(),
            location: config.location.clone(),
        }
    }

    pub fn location(&self) -> &LocationConfig {
        &self.location
    }

    /// Report for the configured sugarbush
    pub async fn home_report(&self, force_refresh: bool) -> Result<TapReport> {
        self.report_for(self.location.latitude, self.location.longitude, force_refresh)
            .await
    }

    /// Report for arbitrary coordinates, served from cache while fresh
    pub async fn report_for(
        &self,
        latitude: f64,
        longitude: f64,
        force_refresh: bool,
    ) -> Result<TapReport> {
        let key = cache_key(latitude, longitude, self.cache.coordinate_precision);
        let ttl = self.cache.ttl();

        if !force_refresh {
            match self.db.get_cached_report(&key, ttl) {
                Ok(Some(report)) => {
                    tracing::debug!(cache_key = %key, "Serving cached report");
                    return Ok(report);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(cache_key = %key, "Report cache read failed: {}", e),
            }
        }

        let client = self.openweathermap_client.as_ref().ok_or_else(|| {
            SapcastError::MissingCredentials("OpenWeatherMap API key is not configured".into())
        })?;

        let forecast = client.fetch_forecast(latitude, longitude).await?;
        let report = build_report(&forecast, &self.thresholds)?;

        if let Err(e) = self.db.store_report(&key, &report) {
            tracing::warn!(cache_key = %key, "Failed to cache report: {}", e);
        }
        match self.db.purge_stale_reports(ttl) {
            Ok(0) => {}
            Ok(removed) => tracing::debug!(removed, "Purged stale cached reports"),
            Err(e) => tracing::warn!("Failed to purge report cache: {}", e),
        }

        Ok(report)
    }

    pub async fn check_connections(&self) -> ConnectionStatus {
        let database = self
            .db
            .with_conn(|conn| Ok(conn.query_row("SELECT 1", [], |row| row.get::<_, i32>(0))?))
            .is_ok();

        let openweathermap = match self.openweathermap_client {
            Some(ref client) => client
                .test_connection(self.location.latitude, self.location.longitude)
                .await
                .unwrap_or(false),
            None => false,
        };

        ConnectionStatus {
            database,
            openweathermap_configured: self.openweathermap_client.is_some(),
            openweathermap,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConnectionStatus {
    pub database: bool,
    pub openweathermap_configured: bool,
    pub openweathermap: bool,
}

impl ConnectionStatus {
    pub fn all_connected(&self) -> bool {
        self.database && self.openweathermap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyForecast, RecommendationKind, WeatherForecast};
    use chrono::{NaiveDate, Utc};

    fn config(api_key: &str) -> Config {
        let yaml = format!(
            "location:\n  name: Test bush\n  latitude: 44.48\n  longitude: -73.21\nopenweathermap:\n  api_key: \"{}\"\n",
            api_key
        );
        Config::parse(&yaml).unwrap()
    }

    fn cached_report() -> TapReport {
        let forecast = WeatherForecast {
            fetched_at: Utc::now(),
            latitude: 44.48,
            longitude: -73.21,
            timezone_offset_secs: 0,
            current: None,
            daily: vec![DailyForecast {
                date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
                low_c: Some(-4.0),
                high_c: Some(6.0),
                summary: "Clear".into(),
                icon: "01d".into(),
            }],
        };
        build_report(&forecast, &RatingThresholds::default()).unwrap()
    }

    #[tokio::test]
    async fn missing_key_without_cache_is_missing_credentials() {
        let db = Database::open_in_memory().unwrap();
        let service = ReportService::new(&config(""), db);

        let err = service.report_for(44.48, -73.21, false).await.unwrap_err();
        assert!(matches!(err, SapcastError::MissingCredentials(_)));
    }

    #[tokio::test]
    async fn fresh_cache_entry_is_served_without_a_client() {
        let db = Database::open_in_memory().unwrap();
        db.store_report("44.48,-73.21", &cached_report()).unwrap();
        let service = ReportService::new(&config(""), db);

        // Nearby coordinates round to the same key
        let report = service.report_for(44.4812, -73.2089, false).await.unwrap();
        assert_eq!(report.recommendation.kind, RecommendationKind::NoWindow);
        assert_eq!(report.days.len(), 1);
    }

    #[tokio::test]
    async fn forced_refresh_skips_the_cache() {
        let db = Database::open_in_memory().unwrap();
        db.store_report("44.48,-73.21", &cached_report()).unwrap();
        let service = ReportService::new(&config(""), db);

        let err = service.home_report(true).await.unwrap_err();
        assert!(matches!(err, SapcastError::MissingCredentials(_)));
    }

    #[tokio::test]
    async fn status_without_client() {
        let db = Database::open_in_memory().unwrap();
        let service = ReportService::new(&config(""), db);
        let status = service.check_connections().await;
        assert!(status.database);
        assert!(!status.openweathermap_configured);
        assert!(!status.all_connected());
    }
}
