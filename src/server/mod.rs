mod charge_routes;
pub mod config;
mod customer_routes;
mod http_layers;
pub mod metrics;
mod notification_routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use http_layers::*;
#[allow(unused_imports)] // Used by main.rs
pub use server::{run_metrics_server, run_server};
