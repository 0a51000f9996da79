//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod deploy_events;
pub mod device;
pub mod remote_host;

pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use device::{DeviceConnector, DeviceError, DeviceSession};
pub use remote_host::{HostError, HostResult, RemoteHost};
