use axum::extract::FromRef;

use crate::customer_store::CustomerStore;
use crate::work::WorkEngine;
use std::sync::Arc;

use super::ServerConfig;

pub type GuardedCustomerStore = Arc<dyn CustomerStore>;
pub type GuardedWorkEngine = Arc<WorkEngine>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub customer_store: GuardedCustomerStore,
    pub work_engine: GuardedWorkEngine,
}

impl FromRef<ServerState> for GuardedCustomerStore {
    fn from_ref(input: &ServerState) -> Self {
        input.customer_store.clone()
    }
}

impl FromRef<ServerState> for GuardedWorkEngine {
    fn from_ref(input: &ServerState) -> Self {
        input.work_engine.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
