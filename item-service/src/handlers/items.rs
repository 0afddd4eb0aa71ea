use crate::dtos::ItemResponse;
use crate::models::{parse_item_id, Item};
use crate::services::record_lookup;
use crate::startup::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::AppError;

pub const NOT_FOUND_BODY: &str = "Not found";

/// Result of a single item lookup.
///
/// Every variant except `Found` renders the same `404 Not found`: a malformed
/// id, a missing document and a failing store are indistinguishable to the
/// caller. The variants exist so the cause is still visible in logs and
/// metrics.
#[derive(Debug)]
pub enum LookupOutcome {
    Found(Item),
    MalformedId,
    Absent,
    StoreFailure(AppError),
    TimedOut,
}

impl LookupOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            LookupOutcome::Found(_) => "found",
            LookupOutcome::MalformedId => "malformed_id",
            LookupOutcome::Absent => "absent",
            LookupOutcome::StoreFailure(_) => "store_failure",
            LookupOutcome::TimedOut => "timed_out",
        }
    }
}

impl IntoResponse for LookupOutcome {
    fn into_response(self) -> Response {
        match self {
            // A serialization failure becomes a 500 from `Json`.
            LookupOutcome::Found(item) => Json(ItemResponse::from(item)).into_response(),
            _ => not_found_response(),
        }
    }
}

/// Plain-text `404 Not found`, also used as the router fallback.
pub async fn not_found() -> Response {
    not_found_response()
}

fn not_found_response() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
}

/// `GET /:id`
pub async fn get_item(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Response {
    let raw_id = match id {
        Ok(Path(raw_id)) => raw_id,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Item id could not be extracted");
            record_lookup(LookupOutcome::MalformedId.label());
            return not_found_response();
        }
    };

    let outcome = lookup_item(&state, &raw_id).await;
    match &outcome {
        LookupOutcome::StoreFailure(e) => {
            tracing::warn!(item_id = %raw_id, error = %e, "Item lookup failed at the store")
        }
        LookupOutcome::TimedOut => {
            tracing::warn!(item_id = %raw_id, "Item lookup timed out")
        }
        other => tracing::debug!(item_id = %raw_id, outcome = other.label(), "Item lookup"),
    }
    record_lookup(outcome.label());

    outcome.into_response()
}

/// Parse `raw_id`, then run a bounded point lookup against the shared collection.
pub async fn lookup_item(state: &AppState, raw_id: &str) -> LookupOutcome {
    let Some(id) = parse_item_id(raw_id) else {
        return LookupOutcome::MalformedId;
    };

    let collection = state.store.collection_handle().await;

    match tokio::time::timeout(state.config.lookup.timeout(), collection.find_one(id)).await {
        Ok(Ok(Some(item))) => LookupOutcome::Found(item),
        Ok(Ok(None)) => LookupOutcome::Absent,
        Ok(Err(e)) => LookupOutcome::StoreFailure(e),
        Err(_) => LookupOutcome::TimedOut,
    }
}
