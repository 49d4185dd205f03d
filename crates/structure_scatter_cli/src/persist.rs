//! Reading configuration files and writing export documents.
use std::fs;
use std::path::Path;

use anyhow::Context;
use structure_scatter::prelude::*;
use tracing::info;

/// Parses a JSON [`GeneratorConfig`]. Missing fields fall back to the defaults.
pub fn config_from_json(text: &str) -> anyhow::Result<GeneratorConfig> {
    serde_json::from_str(text).context("parsing generator config")
}

pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<GeneratorConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    config_from_json(&text).with_context(|| format!("in {}", path.display()))
}

/// Writes `doc` as indented JSON.
pub fn write_export(path: impl AsRef<Path>, doc: &ExportDocument) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(doc).context("serializing export")?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    info!(
        "Exported {} placements to {}.",
        doc.structures.len(),
        path.display()
    );
    Ok(())
}
