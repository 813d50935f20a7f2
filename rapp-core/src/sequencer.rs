//! Startup registration sequence
//!
//! Registers the service with PMS, then submits the startup policy, each
//! step retried until it succeeds. The policy PUT is never sent before a
//! registration has been accepted. Once both steps succeed the readiness
//! flag is set and the task carries on as the keepalive scheduler.

use crate::client::PmsClient;
use crate::config::RappConfig;
use crate::keepalive::KeepaliveScheduler;
use crate::metrics;
use crate::readiness::ReadinessFlag;
use crate::retry::{retry_forever, RetryPolicy};
use crate::types::{PolicyRequest, RegistrationRequest};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

/// Where the startup sequence currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    /// Task not running yet
    NotStarted,
    /// Registering the service, retrying on failure
    Registering,
    /// Registered; submitting the policy, retrying on failure
    SubmittingPolicy,
    /// Both steps succeeded
    Ready,
}

/// Drives register-then-submit, then keepalive
pub struct RegistrationSequencer {
    client: PmsClient,
    registration: RegistrationRequest,
    policy: PolicyRequest,
    readiness: ReadinessFlag,
    retry: RetryPolicy,
    keepalive_period: Duration,
    state: watch::Sender<SequencerState>,
}

impl RegistrationSequencer {
    /// Create a sequencer
    pub fn new(
        client: PmsClient,
        registration: RegistrationRequest,
        policy: PolicyRequest,
        readiness: ReadinessFlag,
        retry: RetryPolicy,
        keepalive_period: Duration,
    ) -> Self {
        let (state, _) = watch::channel(SequencerState::NotStarted);
        Self {
            client,
            registration,
            policy,
            readiness,
            retry,
            keepalive_period,
            state,
        }
    }

    /// Sequencer for the configured service and startup policy
    pub fn from_config(config: &RappConfig, client: PmsClient, readiness: ReadinessFlag) -> Self {
        Self::new(
            client,
            config.registration_request(),
            config.startup_policy(),
            readiness,
            config.retry,
            config.keepalive_period,
        )
    }

    /// Observe state changes
    pub fn subscribe(&self) -> watch::Receiver<SequencerState> {
        self.state.subscribe()
    }

    /// Current state
    pub fn state(&self) -> SequencerState {
        *self.state.borrow()
    }

    /// Register, then submit the policy, then set readiness
    ///
    /// Does not return until both PUTs have been accepted.
    pub async fn run_startup(&self) {
        let client = &self.client;
        let registration = &self.registration;
        let policy = &self.policy;

        self.transition(SequencerState::Registering);
        retry_forever("register service", self.retry, || async move {
            client
                .put_service(registration)
                .await
                .and_then(|outcome| outcome.into_success("services"))
        })
        .await;
        info!(service_id = %registration.service_id, "Service registered with PMS");

        self.transition(SequencerState::SubmittingPolicy);
        if let Some(limit) = policy.limit() {
            metrics::set_policy_limit(limit);
        }
        retry_forever("put policy", self.retry, || async move {
            client
                .put_policy(policy)
                .await
                .and_then(|outcome| outcome.into_success("policies"))
        })
        .await;
        info!(
            policy_id = %policy.policy_id,
            ric_id = %policy.ric_id,
            "Policy accepted by PMS"
        );

        self.transition(SequencerState::Ready);
        if self.readiness.mark_ready() {
            metrics::set_ready(true);
            info!("rApp ready");
        }
    }

    /// Startup sequence followed by keepalive, for the life of the task
    pub async fn run(self) {
        self.run_startup().await;
        self.keepalive().run().await;
    }

    /// Run on a detached background task
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    fn keepalive(&self) -> KeepaliveScheduler {
        KeepaliveScheduler::new(
            self.client.clone(),
            self.registration.clone(),
            self.keepalive_period,
        )
    }

    fn transition(&self, next: SequencerState) {
        self.state.send_replace(next);
    }
}
