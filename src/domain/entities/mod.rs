//! Domain Entities
//!
//! - `DeployedArtifact` - A file or unit declared for the remote host
//! - `ApplyResult` - Whether materializing an artifact changed the host
//! - `BridgePush` - A file forwarded from the host to the attached device

mod apply_result;
mod artifact;
mod bridge;

pub use apply_result::ApplyResult;
pub use artifact::{ArtifactKind, ArtifactSource, DeployedArtifact};
pub use bridge::BridgePush;
