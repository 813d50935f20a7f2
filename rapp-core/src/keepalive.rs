//! Periodic re-registration with PMS

use crate::client::PmsClient;
use crate::retry::attempt_once;
use crate::types::RegistrationRequest;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

/// Re-sends the startup registration on a fixed period
///
/// A failed tick is logged and forgotten: no retry, and readiness is left
/// alone.
#[derive(Debug, Clone)]
pub struct KeepaliveScheduler {
    client: PmsClient,
    registration: RegistrationRequest,
    period: Duration,
}

impl KeepaliveScheduler {
    /// Create a scheduler
    pub fn new(client: PmsClient, registration: RegistrationRequest, period: Duration) -> Self {
        Self {
            client,
            registration,
            period,
        }
    }

    /// Interval between keepalives
    pub fn period(&self) -> Duration {
        self.period
    }

    /// One keepalive; `true` when PMS accepted it
    pub async fn tick(&self) -> bool {
        let sent = attempt_once(
            "keepalive",
            async {
                self.client
                    .put_service(&self.registration)
                    .await
                    .and_then(|outcome| outcome.into_success("services"))
            },
        )
        .await;
        sent.is_some()
    }

    /// Loop forever; the first keepalive goes out one period from now
    pub async fn run(self) {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if self.tick().await {
                debug!(service_id = %self.registration.service_id, "Keepalive accepted");
            }
        }
    }
}
