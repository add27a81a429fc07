// JSON report endpoints.
//
// GET /api/report — every table of the report (optional ?subject= filter)
// GET /api/gaps   — gap rows, weak topics and their action plans

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::output::recommend;
use crate::web::{api_error, compute_report, AppState, SubjectQuery};

/// GET /api/report — full report as JSON.
pub async fn get_report(
    State(state): State<AppState>,
    Query(params): Query<SubjectQuery>,
) -> Response {
    let filter = params.subject().map(str::to_string);
    match compute_report(Arc::clone(&state.config), filter).await {
        Ok((report, subjects)) => Json(serde_json::json!({
            "all_subjects": subjects,
            "filter": params.subject(),
            "report": report,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build report");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, &format!("{e:#}"))
        }
    }
}

/// GET /api/gaps — gap table plus recommendations for weak topics.
pub async fn get_gaps(
    State(state): State<AppState>,
    Query(params): Query<SubjectQuery>,
) -> Response {
    let filter = params.subject().map(str::to_string);
    let report = match compute_report(Arc::clone(&state.config), filter).await {
        Ok((report, _)) => report,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build gap report");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, &format!("{e:#}"));
        }
    };

    let recs = recommend::recommendations(&report.gaps);
    let message = if recs.is_empty() {
        recommend::NO_GAPS_MESSAGE
    } else {
        recommend::WEAK_ALERT
    };

    Json(serde_json::json!({
        "threshold": report.gap_threshold,
        "gaps": report.gaps,
        "weak_count": recs.len(),
        "message": message,
        "recommendations": recs,
    }))
    .into_response()
}

