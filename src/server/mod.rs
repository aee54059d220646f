//! HTTP surface: the JSON forecast endpoint plus the bundled web page.
//!
//! Each endpoint module exports a subrouter; this gateway merges them and
//! attaches the shared `ReportService` state.

use crate::error::Result;
use crate::logic::ReportService;
use axum::{response::Html, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod error;
mod forecast;

const INDEX_HTML: &str = include_str!("../../static/index.html");

pub fn router(service: ReportService) -> Router {
    Router::new()
        .merge(forecast::router())
        .fallback(index)
        .with_state(service)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn serve(service: ReportService, bind: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(service)).await?;
    Ok(())
}
