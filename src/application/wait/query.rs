//! Wait Query

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::domain::value_objects::MatchMode;

/// Budget used when the caller gives none
pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;

/// Room kept above the budget for transport timeouts layered on top of it
const DEADLINE_HEADROOM: Duration = Duration::from_secs(3600);

/// Invocation problem detected before any device contact
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct UsageError(pub String);

/// What to wait for and for how long
#[derive(Debug, Clone, PartialEq)]
pub struct WaitQuery {
    mode: MatchMode,
    target: String,
    timeout: Duration,
}

impl WaitQuery {
    pub fn new(
        mode: MatchMode,
        target: impl Into<String>,
        timeout_secs: Option<f64>,
    ) -> Result<Self, UsageError> {
        let target = target.into();
        if target.is_empty() {
            return Err(UsageError("Missing search text".to_string()));
        }
        let secs = timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        Ok(Self {
            mode,
            target,
            timeout: timeout_from_secs(secs)?,
        })
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Convert a caller-supplied number of seconds into a budget
pub fn timeout_from_secs(secs: f64) -> Result<Duration, UsageError> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(UsageError(format!(
            "Invalid timeout '{}': expected a non-negative number of seconds",
            secs
        )));
    }
    let too_large = || UsageError(format!("Invalid timeout '{}': too large", secs));
    let budget = Duration::try_from_secs_f64(secs).map_err(|_| too_large())?;
    // The budget travels as u64 milliseconds and becomes an Instant deadline.
    let representable = u64::try_from(budget.as_millis()).is_ok()
        && budget
            .checked_add(DEADLINE_HEADROOM)
            .and_then(|span| Instant::now().checked_add(span))
            .is_some();
    if !representable {
        return Err(too_large());
    }
    Ok(budget)
}
