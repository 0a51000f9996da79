//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - Materialize the manifest, push to the device, run the cascade
//! - `WaitUseCase` - Connect to the device and wait for one UI element

pub mod deploy;
pub mod wait;

pub use deploy::{DeployOptions, DeployResult, DeployUseCase};
pub use wait::{UsageError, WaitOutcome, WaitQuery, WaitUseCase};
