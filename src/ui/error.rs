//! Error rendering for the terminal

use crossterm::style::Stylize;

use crate::domain::ports::HostError;
use crate::error::MeshError;
use crate::ui::{theme, Icon};

/// Render a top-level error with a fix hint when one is known
pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let icon = Icon::Error.colored(supports_color, supports_unicode);
    let mut out = format!("{} Error: {}\n", icon, err);

    if let Some(hint) = err.downcast_ref::<MeshError>().and_then(fix_hint) {
        let hint = format!("{} {}", Icon::Arrow.render(supports_unicode), hint);
        if supports_color {
            out.push_str(&format!("  {}\n", hint.with(theme::colors::DIM)));
        } else {
            out.push_str(&format!("  {}\n", hint));
        }
    }

    out
}

fn fix_hint(err: &MeshError) -> Option<&'static str> {
    match err {
        MeshError::SourceMissing { .. } => {
            Some("Point --source (or source.dir) at the directory holding the scripts.")
        }
        MeshError::Config { .. } => Some("Fix the config file and try again."),
        MeshError::Transfer { source, .. }
        | MeshError::BridgePush { source }
        | MeshError::Action { source, .. } => host_hint(source),
        _ => None,
    }
}

fn host_hint(err: &HostError) -> Option<&'static str> {
    match err {
        HostError::Connection(_) => {
            Some("Check that `ssh <host>` works without a password prompt.")
        }
        HostError::CommandFailed { stderr, .. } if stderr.contains("sudo") => {
            Some("The login user needs passwordless sudo on the host.")
        }
        _ => None,
    }
}
