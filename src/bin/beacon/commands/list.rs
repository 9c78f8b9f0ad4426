//! `beacon list` command

use std::path::Path;

use anyhow::{Context, Result};

use beacon::persist::{deserialize_config, ContainerRegistry};
use beacon::DuplicatePolicy;

use crate::cli::ListArgs;
use crate::commands::emit_report;

pub fn execute(config_path: &Path, _args: ListArgs) -> Result<()> {
    let text = std::fs::read_to_string(config_path)
        .with_context(|| format!("failed to read configuration: {}", config_path.display()))?;

    let registry = ContainerRegistry::builtin();
    let (config, report) = deserialize_config(&text, &registry)
        .with_context(|| format!("invalid configuration: {}", config_path.display()))?;
    emit_report(&report);

    let policy = match config.policy {
        DuplicatePolicy::FirstMatch => "first match wins",
        DuplicatePolicy::CollectAll => "collect all matches",
    };
    println!("policy: {}", policy);

    if config.containers.is_empty() {
        println!("no containers configured");
    } else {
        for container in &config.containers {
            println!("{:<16} {}", container.type_id(), container.name());
        }
    }

    if !config.disabled_generic_projects.is_empty() {
        println!(
            "disabled generic projects: {}",
            config.disabled_generic_projects.join(", ")
        );
    }

    Ok(())
}
