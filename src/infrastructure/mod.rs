//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `remote/` - SSH-backed relay host
//! - `device/` - uiautomator2 device connector
//! - `events/` - Deploy event sinks (console, NDJSON)

pub mod device;
pub mod events;
pub mod remote;

pub use device::{AdbForward, UiAutomatorConnector, UiAutomatorSession, DEVICE_SERVER_PORT};
pub use events::{ConsoleEventSink, JsonEventSink};
pub use remote::SshHost;
