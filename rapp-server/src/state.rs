//! Application state

use rapp_core::{PmsClient, RappConfig, ReadinessFlag};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Environment configuration
    pub config: Arc<RappConfig>,

    /// Client for the policy-management service
    pub client: PmsClient,

    /// Set by the background registration sequence
    pub readiness: ReadinessFlag,
}

impl AppState {
    /// Create new application state
    pub fn new(config: RappConfig, client: PmsClient, readiness: ReadinessFlag) -> Self {
        Self {
            config: Arc::new(config),
            client,
            readiness,
        }
    }
}
