//! rApp Core - A1 policy client building blocks
//!
//! This crate provides the pieces the rApp needs to talk to the A1
//! policy-management service (PMS): environment configuration, wire types,
//! a JSON PUT client, an unbounded retry driver, the startup registration
//! sequencer and the keepalive scheduler.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod keepalive;
pub mod metrics;
pub mod readiness;
pub mod retry;
pub mod sequencer;
pub mod types;

pub use client::{PmsClient, PutOutcome};
pub use config::RappConfig;
pub use error::{RappError, Result};
pub use keepalive::KeepaliveScheduler;
pub use readiness::ReadinessFlag;
pub use retry::{attempt_once, retry_forever, Backoff, RetryPolicy};
pub use sequencer::{RegistrationSequencer, SequencerState};
pub use types::{PolicyRequest, RegistrationRequest};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
