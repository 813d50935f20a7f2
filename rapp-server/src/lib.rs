//! rApp HTTP Server - probes, metrics and a thin PMS proxy
//!
//! This crate serves the rApp's HTTP surface while the startup
//! registration sequence from `rapp-core` runs in the background.

pub mod api;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod proxy;
pub mod routes;
pub mod state;
pub mod tracing;

pub use api::{HealthResponse, LimitRequest, PolicyDocument};
pub use error::{ApiError, ApiResult};
pub use routes::build_router;
pub use state::AppState;
