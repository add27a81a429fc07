// GET / — the HTML dashboard.
//
// Re-runs the pipeline on each request. Changing the subject filter in the
// page submits the form, which is just another GET with ?subject=.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::web::page::{escape_html, render_dashboard};
use crate::web::{compute_report, AppState, SubjectQuery};

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<SubjectQuery>,
) -> Response {
    let filter = params.subject().map(str::to_string);
    match compute_report(Arc::clone(&state.config), filter).await {
        Ok((report, subjects)) => {
            Html(render_dashboard(&report, &subjects, params.subject())).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to build dashboard");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!(
                    "<!doctype html><html><body><h1>Dashboard unavailable</h1><pre>{}</pre></body></html>",
                    escape_html(&format!("{e:#}"))
                )),
            )
                .into_response()
        }
    }
}
