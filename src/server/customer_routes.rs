use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::customer_store::Customer;
use crate::server::state::{GuardedCustomerStore, ServerState};

#[derive(Serialize)]
struct CustomerModel {
    number: i64,
    name: String,
    register_date: DateTime<Utc>,
}

impl From<Customer> for CustomerModel {
    fn from(customer: Customer) -> Self {
        CustomerModel {
            number: customer.number,
            name: customer.name,
            register_date: customer.register_date,
        }
    }
}

#[derive(Serialize)]
struct SeedCount {
    created: usize,
}

/// GET /{number} - Fetch one customer
async fn get_customer(
    State(store): State<GuardedCustomerStore>,
    Path(number): Path<i64>,
) -> Response {
    match store.customer(number) {
        Ok(Some(customer)) => Json(CustomerModel::from(customer)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Failed to fetch customer {}: {}", number, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch customer").into_response()
        }
    }
}

/// POST /{name} - Create a customer with the given name
async fn create_customer(
    State(store): State<GuardedCustomerStore>,
    Path(name): Path<String>,
) -> Response {
    match store.insert_customer(&name) {
        Ok(customer) => (StatusCode::CREATED, Json(CustomerModel::from(customer))).into_response(),
        Err(e) => {
            warn!("Failed to create customer {}: {}", name, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create customer").into_response()
        }
    }
}

/// POST /create/{count} - Seed the store with generated customers
async fn create_random_customers(
    State(store): State<GuardedCustomerStore>,
    Path(count): Path<usize>,
) -> Response {
    match store.seed_customers(count) {
        Ok(created) => Json(SeedCount { created }).into_response(),
        Err(e) => {
            warn!("Failed to seed {} customers: {}", count, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to seed customers").into_response()
        }
    }
}

/// DELETE /{number} - Remove one customer
async fn delete_customer(
    State(store): State<GuardedCustomerStore>,
    Path(number): Path<i64>,
) -> Response {
    match store.remove_customer(number) {
        Ok(true) => StatusCode::OK.into_response(),
        Ok(false) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Failed to delete customer {}: {}", number, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete customer").into_response()
        }
    }
}

/// Build the customer routes.
///
/// - GET /:number - Fetch a customer
/// - POST /:name - Create a customer
/// - POST /create/:count - Seed generated customers
/// - DELETE /:number - Remove a customer
pub fn customer_routes() -> Router<ServerState> {
    Router::new()
        // POST reads the segment as a name, GET and DELETE as a number.
        .route(
            "/{number_or_name}",
            get(get_customer)
                .post(create_customer)
                .delete(delete_customer),
        )
        .route("/create/{count}", post(create_random_customers))
}
