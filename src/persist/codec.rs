//! Locator configuration codec.
//!
//! The persisted form is a TOML document: a duplicate-policy flag, markers
//! for suppressed auto-generated project containers, and an ordered list of
//! container entries, each carrying a type identifier plus that type's own
//! configuration blob. An older generation of the format held only a flat
//! search path; it is recognized when no current-format entries exist.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::containers::{
    AbsolutePathContainer, DirectoryContainer, DuplicatePolicy, ProjectContainer, SourceContainer,
};
use crate::core::ProjectModel;
use crate::lookup::SourceLocator;
use crate::persist::error::{ConfigLoadError, PersistError};
use crate::persist::registry::ContainerRegistry;
use crate::persist::report::LoadReport;

/// A locator configuration: the ordered containers, the duplicate policy,
/// and the projects whose auto-generated containers are suppressed.
#[derive(Debug, Default)]
pub struct LocatorConfig {
    /// Containers in priority order.
    pub containers: Vec<Box<dyn SourceContainer>>,

    /// Whether resolution stops at the first match or collects all.
    pub policy: DuplicatePolicy,

    /// Projects excluded from generic-container generation.
    pub disabled_generic_projects: Vec<String>,
}

impl LocatorConfig {
    /// Create an empty first-match configuration.
    pub fn new() -> Self {
        LocatorConfig::default()
    }

    /// Append a container.
    pub fn with_container(mut self, container: Box<dyn SourceContainer>) -> Self {
        self.containers.push(container);
        self
    }

    /// Set the duplicate policy.
    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Suppress the generic container of a project.
    pub fn disable_generic_project(mut self, project: impl Into<String>) -> Self {
        self.disabled_generic_projects.push(project.into());
        self
    }

    /// Install this configuration into a locator: the explicit containers,
    /// then one generic container per open project not suppressed, then an
    /// absolute-path fallback. Swaps policy, containers, and cache in one
    /// critical section.
    pub fn install(self, locator: &SourceLocator, projects: &dyn ProjectModel) {
        let mut containers = self.containers;
        for project in projects.project_names() {
            if !projects.is_open(&project) {
                continue;
            }
            if self.disabled_generic_projects.contains(&project) {
                continue;
            }
            containers.push(Box::new(ProjectContainer::new(Some(project), false)));
        }
        containers.push(Box::new(AbsolutePathContainer::new()));
        locator.configure(containers, self.policy);
    }
}

/// On-disk document shape, current and legacy fields together.
#[derive(Debug, Serialize, Deserialize)]
struct MementoDoc {
    #[serde(default = "default_version")]
    version: u32,

    /// `true` selects `DuplicatePolicy::CollectAll`.
    #[serde(rename = "find-duplicates", default)]
    find_duplicates: bool,

    #[serde(
        rename = "disabled-generic-projects",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    disabled_generic_projects: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    containers: Vec<toml::Table>,

    /// Legacy single-kind format: directories to search, in order.
    #[serde(rename = "search-path", default, skip_serializing_if = "Vec::is_empty")]
    search_path: Vec<String>,
}

fn default_version() -> u32 {
    1
}

/// Serialize a configuration to its persisted text form.
pub fn serialize_config(config: &LocatorConfig) -> Result<String, PersistError> {
    let containers = config
        .containers
        .iter()
        .map(|container| {
            let mut table = container.memento();
            table.insert(
                "type".to_string(),
                toml::Value::String(container.type_id().to_string()),
            );
            table
        })
        .collect();

    let doc = MementoDoc {
        version: 1,
        find_duplicates: config.policy == DuplicatePolicy::CollectAll,
        disabled_generic_projects: config.disabled_generic_projects.clone(),
        containers,
        search_path: Vec::new(),
    };
    Ok(toml::to_string_pretty(&doc)?)
}

/// Deserialize a configuration, reconstructing containers in order.
///
/// Per-entry failures (unknown type, missing attribute, stale directory)
/// are recorded in the returned report and the entry is skipped; only an
/// unparsable document is a hard error.
pub fn deserialize_config(
    text: &str,
    registry: &ContainerRegistry,
) -> Result<(LocatorConfig, LoadReport), PersistError> {
    let doc: MementoDoc = toml::from_str(text)?;
    let mut report = LoadReport::new();
    let mut containers: Vec<Box<dyn SourceContainer>> = Vec::new();

    if !doc.containers.is_empty() {
        for (index, entry) in doc.containers.iter().enumerate() {
            let Some(type_id) = entry.get("type").and_then(|v| v.as_str()) else {
                report.error(format!(
                    "container entry {} has no `type` attribute",
                    index + 1
                ));
                continue;
            };
            match registry.create(type_id, entry) {
                Ok(container) => containers.push(container),
                Err(err @ PersistError::UnknownType(_)) => {
                    tracing::warn!(type_id, "skipping unknown container type");
                    report.warn(format!("skipped container entry {}: {}", index + 1, err));
                }
                Err(err) => {
                    tracing::warn!(type_id, error = %err, "skipping malformed container entry");
                    report.error(format!("skipped container entry {}: {}", index + 1, err));
                }
            }
        }
    } else if !doc.search_path.is_empty() {
        // Legacy generation: a flat directory list plus an implicit
        // absolute-path fallback.
        for dir in &doc.search_path {
            match DirectoryContainer::new(dir, false) {
                Ok(container) => containers.push(Box::new(container)),
                Err(err) => report.error(format!("skipped search path `{}`: {}", dir, err)),
            }
        }
        containers.push(Box::new(AbsolutePathContainer::new()));
    }

    let policy = if doc.find_duplicates {
        DuplicatePolicy::CollectAll
    } else {
        DuplicatePolicy::FirstMatch
    };

    Ok((
        LocatorConfig {
            containers,
            policy,
            disabled_generic_projects: doc.disabled_generic_projects,
        },
        report,
    ))
}

/// Load a configuration from a file.
pub fn load_config(
    path: &Path,
    registry: &ContainerRegistry,
) -> Result<(LocatorConfig, LoadReport), ConfigLoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigLoadError {
        path: path.to_path_buf(),
        source: PersistError::Io(e),
    })?;
    deserialize_config(&text, registry).map_err(|source| ConfigLoadError {
        path: path.to_path_buf(),
        source,
    })
}

/// Save a configuration to a file.
pub fn save_config(path: &Path, config: &LocatorConfig) -> Result<()> {
    let text = serialize_config(config)?;
    std::fs::write(path, text)
        .with_context(|| format!("failed to write configuration: {}", path.display()))?;
    Ok(())
}
