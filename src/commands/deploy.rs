use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::application::{DeployOptions, DeployResult};
use crate::config::Config;
use crate::domain::ports::DeployEventSink;
use crate::infrastructure::{ConsoleEventSink, JsonEventSink};
use crate::presentation::create_deploy_use_case;
use crate::ui::UiContext;

/// Run the reconciler against the configured host
///
/// CLI flags win over config and environment.
pub fn cmd_deploy(
    mut config: Config,
    ui: &UiContext,
    host: Option<String>,
    source: Option<PathBuf>,
    dry_run: bool,
) -> Result<DeployResult> {
    if let Some(host) = host {
        config.host.destination = host;
    }
    if let Some(source) = source {
        config.source.dir = source;
    }

    let use_case = create_deploy_use_case(&config, dry_run)?;
    let options = DeployOptions::new(config.source.dir.clone()).with_dry_run(dry_run);

    let sink: Arc<dyn DeployEventSink> = if ui.json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stdout(ui))
    };

    Ok(use_case.execute_with_events(&options, sink)?)
}
