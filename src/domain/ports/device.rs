//! Device Port
//!
//! Connection to a mobile-automation endpoint that can answer "does this UI
//! element exist" within a time budget.

use std::time::Duration;

use thiserror::Error;

use crate::domain::value_objects::MatchMode;

/// Error talking to the device
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeviceError {
    /// Endpoint down, session could not be established
    #[error("{0}")]
    Unreachable(String),
    /// The endpoint answered but the exchange failed
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Establishes sessions with the device
pub trait DeviceConnector {
    type Session: DeviceSession;

    fn connect(&self) -> Result<Self::Session, DeviceError>;
}

/// A live connection, reused for the whole wait
pub trait DeviceSession {
    /// Block until an element matching `target` exists or `timeout` elapses
    ///
    /// The implementation owns the polling interval.
    fn wait_exists(
        &self,
        mode: MatchMode,
        target: &str,
        timeout: Duration,
    ) -> Result<bool, DeviceError>;
}
