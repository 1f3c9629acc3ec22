use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Serialize;

use crate::server::state::{GuardedWorkEngine, ServerState};

const REJECTION_MESSAGE: &str =
    "Charge notification service does not accept any requests at this time.";

#[derive(Serialize)]
struct SubmittedWorkItem {
    id: i64,
}

#[derive(Serialize)]
struct WorkItemCompletion {
    elapsed_ms: u64,
}

/// POST /{customer_number}/{date} - Queue a notification document for one customer
async fn submit_customer_notification(
    State(engine): State<GuardedWorkEngine>,
    Path((customer_number, date)): Path<(i64, NaiveDate)>,
) -> Response {
    match engine.submit_single(customer_number, date).await {
        Some(id) => Json(SubmittedWorkItem { id }).into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, REJECTION_MESSAGE).into_response(),
    }
}

/// POST /{date} - Queue notification documents for every customer with charges
async fn submit_all_notifications(
    State(engine): State<GuardedWorkEngine>,
    Path(date): Path<NaiveDate>,
) -> Response {
    match engine.submit_all(date).await {
        Some(id) => Json(SubmittedWorkItem { id }).into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, REJECTION_MESSAGE).into_response(),
    }
}

/// GET /{id} - Completion status of a submitted work item
async fn get_work_item_status(
    State(engine): State<GuardedWorkEngine>,
    Path(id): Path<i64>,
) -> Response {
    match engine.status(id) {
        Some(elapsed) => Json(WorkItemCompletion {
            elapsed_ms: elapsed.as_millis() as u64,
        })
        .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Build the notification routes.
///
/// - POST /:customer_number/:date - Submit a single-customer notification
/// - POST /:date - Submit the all-customers fan-out
/// - GET /:id - Poll a work item for completion
pub fn notification_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/{customer_number}/{date}",
            post(submit_customer_notification),
        )
        // POST reads the segment as a date, GET as a work item id.
        .route(
            "/{date_or_id}",
            post(submit_all_notifications).get(get_work_item_status),
        )
}
