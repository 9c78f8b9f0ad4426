//! Command implementations

pub mod completions;
pub mod list;
pub mod resolve;
pub mod translate;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use beacon::core::StaticWorkspace;
use beacon::persist::{deserialize_config, ContainerRegistry, LoadReport};
use beacon::SourceLocator;

/// Load the configuration file and build a ready-to-query locator.
///
/// The same document carries the container list and the `[projects]`
/// workspace declarations; relative project roots are anchored at the
/// config file's directory.
pub(crate) fn load_locator(config_path: &Path) -> Result<(SourceLocator, LoadReport)> {
    let text = std::fs::read_to_string(config_path)
        .with_context(|| format!("failed to read configuration: {}", config_path.display()))?;

    let mut workspace = StaticWorkspace::from_toml(&text)
        .with_context(|| format!("invalid workspace declarations: {}", config_path.display()))?;
    if let Some(base) = config_path.parent() {
        workspace.anchor_roots(base);
    }
    let workspace = Arc::new(workspace);

    let registry = ContainerRegistry::builtin();
    let (config, report) = deserialize_config(&text, &registry)
        .with_context(|| format!("invalid configuration: {}", config_path.display()))?;

    let locator = SourceLocator::new(workspace.clone());
    config.install(&locator, workspace.as_ref());
    Ok((locator, report))
}

/// Print load warnings to stderr without failing the command.
pub(crate) fn emit_report(report: &LoadReport) {
    if !report.is_clean() {
        eprint!("{}", report.format(false));
    }
}
