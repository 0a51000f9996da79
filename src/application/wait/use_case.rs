//! Wait Use Case
//!
//! One connection, one blocking existence query. The session stays open for
//! the whole wait; the device side owns the polling cadence.

use crate::domain::ports::{DeviceConnector, DeviceSession};

use super::outcome::WaitOutcome;
use super::query::WaitQuery;

pub struct WaitUseCase<C>
where
    C: DeviceConnector,
{
    connector: C,
}

impl<C> WaitUseCase<C>
where
    C: DeviceConnector,
{
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn execute(&self, query: &WaitQuery) -> WaitOutcome {
        let session = match self.connector.connect() {
            Ok(session) => session,
            Err(err) => {
                return WaitOutcome::DeviceUnreachable {
                    message: err.to_string(),
                }
            }
        };

        match session.wait_exists(query.mode(), query.target(), query.timeout()) {
            Ok(true) => WaitOutcome::Found,
            Ok(false) => WaitOutcome::TimedOut,
            Err(err) => WaitOutcome::DeviceUnreachable {
                message: err.to_string(),
            },
        }
    }
}
