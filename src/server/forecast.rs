use super::error::ApiError;
use crate::config::{self, LATITUDE_LIMIT, LONGITUDE_LIMIT};
use crate::logic::ReportService;
use crate::models::TapReport;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

pub fn router() -> Router<ReportService> {
    Router::new().route("/api/forecast", get(handler))
}

/// Raw query; parsed by hand so bad input maps to our own 400 body
#[derive(Debug, Default, Deserialize)]
pub struct ForecastQuery {
    lat: Option<String>,
    lon: Option<String>,
}

async fn handler(
    Query(params): Query<ForecastQuery>,
    State(service): State<ReportService>,
) -> Result<Json<TapReport>, ApiError> {
    let (latitude, longitude) = parse_coordinates(&params)?;
    tracing::info!(latitude, longitude, "GET /api/forecast");

    let report = service.report_for(latitude, longitude, false).await?;
    Ok(Json(report))
}

fn parse_coordinates(params: &ForecastQuery) -> Result<(f64, f64), ApiError> {
    let latitude = parse_coordinate(params.lat.as_deref(), "lat", LATITUDE_LIMIT)?;
    let longitude = parse_coordinate(params.lon.as_deref(), "lon", LONGITUDE_LIMIT)?;
    Ok((latitude, longitude))
}

fn parse_coordinate(raw: Option<&str>, name: &str, limit: f64) -> Result<f64, ApiError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| {
        ApiError::InvalidCoordinates("Valid lat and lon query parameters are required".into())
    })?;

    config::parse_coordinate(raw, name, limit).map_err(ApiError::InvalidCoordinates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(lat: Option<&str>, lon: Option<&str>) -> ForecastQuery {
        ForecastQuery {
            lat: lat.map(String::from),
            lon: lon.map(String::from),
        }
    }

    #[test]
    fn accepts_valid_coordinates() {
        let (lat, lon) = parse_coordinates(&query(Some("44.48"), Some(" -73.21 "))).unwrap();
        assert_eq!(lat, 44.48);
        assert_eq!(lon, -73.21);
    }

    #[test]
    fn rejects_missing_or_garbage() {
        for q in [
            query(None, Some("-73.2")),
            query(Some("44.5"), None),
            query(Some(""), Some("-73.2")),
            query(Some("maple"), Some("-73.2")),
            query(Some("NaN"), Some("-73.2")),
            query(Some("inf"), Some("-73.2")),
        ] {
            assert!(matches!(
                parse_coordinates(&q),
                Err(ApiError::InvalidCoordinates(_))
            ));
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(parse_coordinates(&query(Some("90.5"), Some("0"))).is_err());
        assert!(parse_coordinates(&query(Some("0"), Some("-180.1"))).is_err());
        assert!(parse_coordinates(&query(Some("-90"), Some("180"))).is_ok());
    }
}
