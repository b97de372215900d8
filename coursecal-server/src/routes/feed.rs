//! Calendar feed endpoints

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::debug;

use coursecal_core::{ics, locator};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(info))
        .route("/calendar", get(missing_name))
        .route("/calendar/{name}", get(calendar))
}

/// GET / - advisory info page (plain text, not an API contract)
async fn info(State(state): State<AppState>) -> String {
    let root = state.config.export_root();
    let mut page = String::from("coursecal feed server\n\n");

    page.push_str("Merged calendars:\n");
    if state.config.merge.is_empty() {
        page.push_str("  (none configured)\n");
    }
    for (name, sources) in &state.config.merge {
        page.push_str(&format!("  {} <- {}\n", name, sources.join(", ")));
    }

    page.push_str("\nExported calendars:\n");
    for name in locator::available_calendars(&root) {
        page.push_str(&format!("  {name}\n"));
    }

    page.push_str("\nSubscribe at /calendar/{name}\n");
    page
}

/// GET /calendar - a name is required
async fn missing_name() -> Response {
    (StatusCode::BAD_REQUEST, "Missing calendar name").into_response()
}

/// GET /calendar/:name - serve one calendar, merged if configured
async fn calendar(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let root = state.config.export_root();

    if let Some(source_names) = state.config.merge_sources(&name) {
        let sources: Vec<String> = source_names
            .iter()
            .filter_map(|source| locator::locate(&root, source))
            .collect();

        if sources.is_empty() {
            debug!("no sources resolved for merged calendar {name}");
            return not_found(format!("No exports found for merged calendar {name}"));
        }

        // Missing sources degrade silently; the resolving subset merges.
        return ics_response(ics::merge_documents(&sources, &name));
    }

    match locator::locate(&root, &name) {
        Some(content) => ics_response(content),
        None => {
            debug!("no export found for calendar {name}");
            not_found(format!("No export found for calendar {name}"))
        }
    }
}

/// Feed responses must never be cached: exports change on a schedule
/// and subscribed clients are expected to poll.
fn ics_response(body: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
        ],
        body,
    )
        .into_response()
}

fn not_found(message: String) -> Response {
    (StatusCode::NOT_FOUND, message).into_response()
}
