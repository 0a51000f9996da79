//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod file_mode;
mod hash;
mod match_mode;
mod privilege;

pub use file_mode::{FileMode, FileModeError};
pub use hash::ContentHash;
pub use match_mode::MatchMode;
pub use privilege::Privilege;
