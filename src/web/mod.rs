// Web server — Axum-based dashboard.
//
// Every request re-reads the dataset and re-runs the pipeline, so the page
// always reflects the file on disk. There is no cache and no session state.
// `/` renders server-side HTML; `/api/*` serves the same data as JSON.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::pipeline::report::{self, Report};

pub mod handlers;
pub mod page;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

/// Optional `?subject=` filter accepted by the dashboard and report endpoints.
#[derive(Debug, Deserialize, Default)]
pub struct SubjectQuery {
    pub subject: Option<String>,
}

impl SubjectQuery {
    /// The filter value, treating an empty string as "all subjects".
    pub fn subject(&self) -> Option<&str> {
        self.subject
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(config: Config, port: u16, bind: &str) -> Result<()> {
    let state = AppState {
        config: Arc::new(config),
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("gapscan dashboard listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/report", get(handlers::report::get_report))
        .route("/api/gaps", get(handlers::report::get_gaps));

    Router::new()
        .route("/", get(handlers::dashboard::get_dashboard))
        .route("/health", get(health))
        .merge(api)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Load the dataset and run the pipeline, optionally for a single subject.
///
/// Returns the all-subject list alongside the report so the dashboard can
/// render its filter even when a filter is active. The file read and the
/// pipeline are synchronous, so they run on the blocking pool.
pub async fn compute_report(
    config: Arc<Config>,
    subject: Option<String>,
) -> Result<(Report, Vec<String>)> {
    tokio::task::spawn_blocking(move || build_report(&config, subject.as_deref()))
        .await
        .context("spawn_blocking panicked")?
}

fn build_report(config: &Config, subject: Option<&str>) -> Result<(Report, Vec<String>)> {
    let records = crate::dataset::load(&config.data_path)?;

    let mut subjects: Vec<String> = records.iter().map(|r| r.subject.clone()).collect();
    subjects.sort();
    subjects.dedup();

    let report = match subject {
        Some(s) => report::build(&report::filter_subject(&records, s), &config.gap_threshold),
        None => report::build(&records, &config.gap_threshold),
    };
    Ok((report, subjects))
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
