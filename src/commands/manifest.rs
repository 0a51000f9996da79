use std::io::Write;

use anyhow::Result;
use serde_json::json;

use crate::config::Config;
use crate::domain::entities::ArtifactSource;
use crate::domain::services::{mesh_rules, CascadeRules, Manifest, Trigger};
use crate::presentation::factory::mesh_manifest;

/// Print the artifact table and cascade rules
pub fn cmd_manifest(config: &Config, json: bool, out: &mut impl Write) -> Result<()> {
    let manifest = mesh_manifest(config);
    let rules = mesh_rules();
    if json {
        writeln!(out, "{}", manifest_json(&manifest, &rules))?;
    } else {
        write_text(&manifest, &rules, out)?;
    }
    Ok(())
}

fn source_label(source: &ArtifactSource) -> String {
    match source {
        ArtifactSource::File(path) => path.display().to_string(),
        ArtifactSource::Inline(_) => "(generated)".to_string(),
    }
}

fn trigger_label(trigger: &Trigger) -> String {
    match trigger {
        Trigger::Kind(kind) => format!("any {}", kind.as_str()),
        Trigger::Artifact(name) => name.clone(),
    }
}

pub fn manifest_json(manifest: &Manifest, rules: &CascadeRules) -> serde_json::Value {
    let artifacts: Vec<_> = manifest
        .artifacts()
        .iter()
        .map(|a| {
            json!({
                "name": a.name(),
                "kind": a.kind().as_str(),
                "source": source_label(a.source()),
                "destination": a.destination().display().to_string(),
                "mode": a.mode().to_string(),
                "privilege": a.privilege().as_str(),
            })
        })
        .collect();

    let pushes: Vec<_> = manifest
        .bridge_pushes()
        .iter()
        .map(|p| {
            json!({
                "artifact": p.artifact(),
                "host_path": p.host_path().display().to_string(),
                "device_path": p.device_path(),
            })
        })
        .collect();

    let rules: Vec<_> = rules
        .rules()
        .iter()
        .map(|r| {
            json!({
                "name": r.name(),
                "triggers": r.triggers().iter().map(trigger_label).collect::<Vec<_>>(),
                "actions": r.actions().iter().map(|a| a.describe()).collect::<Vec<_>>(),
            })
        })
        .collect();

    json!({
        "artifacts": artifacts,
        "bridge_pushes": pushes,
        "rules": rules,
    })
}

fn write_text(manifest: &Manifest, rules: &CascadeRules, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Artifacts ({}):", manifest.len())?;
    for a in manifest.artifacts() {
        writeln!(
            out,
            "  {:>4} {:<8} {:<28} -> {}",
            a.mode().to_string(),
            a.privilege().as_str(),
            a.name(),
            a.destination().display()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Device pushes:")?;
    for p in manifest.bridge_pushes() {
        writeln!(out, "  {} -> device:{}", p.artifact(), p.device_path())?;
    }

    writeln!(out)?;
    writeln!(out, "Cascade:")?;
    for r in rules.rules() {
        let triggers: Vec<_> = r.triggers().iter().map(trigger_label).collect();
        writeln!(out, "  {} when {} changes", r.name(), triggers.join(" | "))?;
        for action in r.actions() {
            writeln!(out, "      {}", action.describe())?;
        }
    }
    Ok(())
}
