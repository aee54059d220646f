use crate::db::Database;
use crate::error::Result;
use crate::models::TapReport;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rusqlite::params;
use tracing::warn;

/// Cache key for a coordinate pair rounded to `precision` decimal places
pub fn cache_key(latitude: f64, longitude: f64, precision: usize) -> String {
    let scale = 10f64.powi(precision as i32);
    // Adding 0.0 folds -0.0 into 0.0 so both print the same
    let lat = (latitude * scale).round() / scale + 0.0;
    let lon = (longitude * scale).round() / scale + 0.0;
    format!("{:.*},{:.*}", precision, lat, precision, lon)
}

fn timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

// Report Cache Queries

impl Database {
    /// Cached report for `key` if it was stored less than `ttl` ago
    pub fn get_cached_report(&self, key: &str, ttl: Duration) -> Result<Option<TapReport>> {
        let row = self.with_conn(|conn| {
            conn.query_row(
                "SELECT payload, fetched_at FROM report_cache WHERE cache_key = ?1",
                [key],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()
            .map_err(Into::into)
        })?;

        let (payload, fetched_at) = match row {
            Some(r) => r,
            None => return Ok(None),
        };

        let fetched_at = match DateTime::parse_from_rfc3339(&fetched_at) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(e) => {
                warn!(cache_key = %key, error = %e, "Unreadable cache timestamp, ignoring entry");
                return Ok(None);
            }
        };

        if Utc::now() - fetched_at >= ttl {
            return Ok(None);
        }

        match serde_json::from_str(&payload) {
            Ok(report) => Ok(Some(report)),
            Err(e) => {
                warn!(cache_key = %key, error = %e, "Corrupt cached report, ignoring entry");
                Ok(None)
            }
        }
    }

    pub fn store_report(&self, key: &str, report: &TapReport) -> Result<()> {
        let payload = serde_json::to_string(report)?;
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT OR REPLACE INTO report_cache
                    (cache_key, latitude, longitude, payload, fetched_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    key,
                    report.latitude,
                    report.longitude,
                    payload,
                    timestamp(report.generated_at),
                ],
            )?;
            Ok(())
        })
    }

    /// Delete entries older than `ttl`, returning how many were removed
    pub fn purge_stale_reports(&self, ttl: Duration) -> Result<usize> {
        let cutoff = timestamp(Utc::now() - ttl);
        self.with_conn(|conn| {
            let removed = conn.execute(
                "DELETE FROM report_cache WHERE fetched_at < ?1",
                [cutoff],
            )?;
            Ok(removed)
        })
    }
}

trait OptionalExt<T> {
    fn optional(self) -> rusqlite::Result<Option<T>>;
}

impl<T> OptionalExt<T> for rusqlite::Result<T> {
    fn optional(self) -> rusqlite::Result<Option<T>> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
