use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::customer_store::GameCharge;
use crate::server::state::{GuardedCustomerStore, ServerState};

#[derive(Serialize)]
struct GameChargeModel {
    number: i64,
    customer_number: i64,
    game_id: i64,
    game_name: String,
    cost: i64,
    charge_date: NaiveDate,
}

impl From<GameCharge> for GameChargeModel {
    fn from(charge: GameCharge) -> Self {
        GameChargeModel {
            number: charge.number,
            customer_number: charge.customer_number,
            game_id: charge.game_id,
            game_name: charge.game_name,
            cost: charge.cost,
            charge_date: charge.charge_date,
        }
    }
}

#[derive(Serialize)]
struct SeedCount {
    created: usize,
}

/// GET /{number} - Fetch one charge
async fn get_charge(
    State(store): State<GuardedCustomerStore>,
    Path(number): Path<i64>,
) -> Response {
    match store.charge(number) {
        Ok(Some(charge)) => Json(GameChargeModel::from(charge)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Failed to fetch charge {}: {}", number, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch charge").into_response()
        }
    }
}

/// GET /all/{customer_number}/{date} - All charges a customer accrued on a date
async fn get_customer_charges(
    State(store): State<GuardedCustomerStore>,
    Path((customer_number, date)): Path<(i64, NaiveDate)>,
) -> Response {
    match store.customer_with_charges(customer_number, date) {
        Ok(Some(customer_charges)) => {
            let models: Vec<GameChargeModel> = customer_charges
                .charges
                .into_iter()
                .map(GameChargeModel::from)
                .collect();
            Json(models).into_response()
        }
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Failed to fetch charges for customer {}: {}", customer_number, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch charges").into_response()
        }
    }
}

/// POST /create/{count}/{date} - Seed the store with generated charges
async fn create_random_charges(
    State(store): State<GuardedCustomerStore>,
    Path((count, date)): Path<(usize, NaiveDate)>,
) -> Response {
    match store.seed_charges(count, date) {
        Ok(created) => Json(SeedCount { created }).into_response(),
        Err(e) => {
            warn!("Failed to seed {} charges: {}", count, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to seed charges").into_response()
        }
    }
}

/// DELETE /{number} - Remove one charge
async fn delete_charge(
    State(store): State<GuardedCustomerStore>,
    Path(number): Path<i64>,
) -> Response {
    match store.remove_charge(number) {
        Ok(true) => StatusCode::OK.into_response(),
        Ok(false) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Failed to delete charge {}: {}", number, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete charge").into_response()
        }
    }
}

/// Build the charge routes.
///
/// - GET /:number - Fetch a charge
/// - GET /all/:customer_number/:date - A customer's charges for a date
/// - POST /create/:count/:date - Seed generated charges
/// - DELETE /:number - Remove a charge
pub fn charge_routes() -> Router<ServerState> {
    Router::new()
        .route("/{number}", get(get_charge).delete(delete_charge))
        .route("/all/{customer_number}/{date}", get(get_customer_charges))
        .route("/create/{count}/{date}", post(create_random_charges))
}
