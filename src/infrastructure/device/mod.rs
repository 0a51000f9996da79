//! Device Implementations
//!
//! Implements the device ports against the uiautomator2 HTTP JSON-RPC server.

mod uiautomator;

pub use uiautomator::{AdbForward, UiAutomatorConnector, UiAutomatorSession, DEVICE_SERVER_PORT};
