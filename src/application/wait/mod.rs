//! Wait Module
//!
//! Turns a slow, failure-prone device query into a three-outcome primitive:
//! found, timed out, or device unreachable.
//!
//! - `query` - Validated input (`WaitQuery`)
//! - `outcome` - Tri-state result and its exit code (`WaitOutcome`)
//! - `use_case` - Connect once, query once (`WaitUseCase`)

mod outcome;
mod query;
mod use_case;

pub use outcome::WaitOutcome;
pub use query::{timeout_from_secs, UsageError, WaitQuery, DEFAULT_TIMEOUT_SECS};
pub use use_case::WaitUseCase;
