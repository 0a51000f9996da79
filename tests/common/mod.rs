//! Common test utilities for the integration tests.
//!
//! - `TestEnv`: isolated working/home directories plus binary runners
//! - `MockDevice`: in-process uiautomator2 HTTP server

pub mod device;
pub mod env;

#[allow(unused_imports)]
pub use device::*;
#[allow(unused_imports)]
pub use env::*;
