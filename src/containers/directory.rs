//! Directory container - resolves names against a file-system directory.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use walkdir::WalkDir;

use crate::containers::{LookupContext, SourceContainer};
use crate::core::Artifact;
use crate::persist::{self, PersistError};
use crate::util::paths;

/// Type identifier for the persistence codec.
pub const TYPE_ID: &str = "directory";

/// Resolves names against a directory, and optionally against every
/// subdirectory beneath it.
///
/// Subfolders are enumerated once at construction and cached for the life
/// of the container; recreate the container to pick up new subfolders.
#[derive(Debug)]
pub struct DirectoryContainer {
    /// The directory to search.
    root: PathBuf,

    /// Whether subdirectories participate in the search.
    recursive: bool,

    /// Alias path under which the backend may report files from `root`.
    association: Option<PathBuf>,

    /// Pre-enumerated subfolders; empty unless `recursive`.
    folders: Vec<PathBuf>,
}

impl DirectoryContainer {
    /// Create a container for an existing directory.
    pub fn new(root: impl Into<PathBuf>, recursive: bool) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            bail!("not a directory: {}", root.display());
        }
        let root = paths::normalize_path(&root);
        let folders = if recursive {
            enumerate_subfolders(&root)
        } else {
            Vec::new()
        };

        Ok(DirectoryContainer {
            root,
            recursive,
            association: None,
            folders,
        })
    }

    /// Also accept absolute names reported under an alias of `root`.
    pub fn with_association(mut self, association: impl Into<PathBuf>) -> Self {
        self.association = Some(association.into());
        self
    }

    /// The directory being searched.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether subdirectories participate in the search.
    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    pub(crate) fn from_memento(table: &toml::Table) -> Result<Box<dyn SourceContainer>, PersistError> {
        let path = persist::require_str(table, TYPE_ID, "path")?;
        let nest = persist::get_bool(table, "nest").unwrap_or(false);

        let mut container =
            DirectoryContainer::new(path, nest).map_err(|e| PersistError::InvalidEntry {
                container: TYPE_ID.to_string(),
                message: e.to_string(),
            })?;
        if let Some(assoc) = table.get("association").and_then(|v| v.as_str()) {
            container = container.with_association(assoc);
        }
        Ok(Box::new(container))
    }

    fn probe(&self, candidate: PathBuf, ctx: &LookupContext<'_>, found: &mut Vec<Artifact>) {
        if candidate.is_file() {
            found.extend(ctx.artifacts_for(&candidate));
        }
    }
}

/// Enumerate every subdirectory beneath `root`, one file-system walk.
fn enumerate_subfolders(root: &Path) -> Vec<PathBuf> {
    let folders: Vec<PathBuf> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.into_path())
        .collect();
    tracing::debug!(root = %root.display(), count = folders.len(), "enumerated subfolders");
    folders
}

impl SourceContainer for DirectoryContainer {
    fn type_id(&self) -> &'static str {
        TYPE_ID
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn name(&self) -> String {
        self.root.display().to_string()
    }

    fn resolve(&self, name: &str, ctx: &LookupContext<'_>) -> Vec<Artifact> {
        let mut found = Vec::new();

        if Path::new(name).is_absolute() {
            // Absolute names must address a direct child of the root (or of
            // an alias, or of a pre-enumerated subfolder) - one extra
            // segment beyond the matched prefix, compared ignoring case.
            let Some(file) = paths::file_segment(name) else {
                return found;
            };
            let under_root = paths::is_direct_child(&self.root, name)
                || self
                    .association
                    .as_deref()
                    .is_some_and(|alias| paths::is_direct_child(alias, name));
            if under_root {
                self.probe(self.root.join(file), ctx, &mut found);
            }
            for folder in &self.folders {
                if ctx.is_satisfied(&found) {
                    break;
                }
                if paths::is_direct_child(folder, name) {
                    self.probe(folder.join(file), ctx, &mut found);
                }
            }
        } else if let Some(rel) = paths::as_relative_path(name) {
            self.probe(self.root.join(&rel), ctx, &mut found);
            for folder in &self.folders {
                if ctx.is_satisfied(&found) {
                    break;
                }
                self.probe(folder.join(&rel), ctx, &mut found);
            }
        }

        found
    }

    fn memento(&self) -> toml::Table {
        let mut table = toml::Table::new();
        table.insert(
            "path".to_string(),
            toml::Value::String(self.root.to_string_lossy().into_owned()),
        );
        table.insert("nest".to_string(), toml::Value::Boolean(self.recursive));
        if let Some(assoc) = &self.association {
            table.insert(
                "association".to_string(),
                toml::Value::String(assoc.to_string_lossy().into_owned()),
            );
        }
        table
    }
}
