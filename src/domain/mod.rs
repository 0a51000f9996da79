//! Domain Layer
//!
//! Pure deployment and probe logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Deployed artifacts, apply results, the device bridge push
//! - `value_objects/` - Immutable value types (FileMode, ContentHash, Privilege, MatchMode)
//! - `services/` - The fixed manifest and the change cascade
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the network or the remote host directly
//! 2. **Pure Functions** - The cascade is a function over collected apply results
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
