//! Compilation-directory container - mirrors a compiler's working directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::containers::{CompilationPathTranslator, LookupContext, SourceContainer};
use crate::core::Artifact;
use crate::persist::{self, PersistError};
use crate::util::paths;

/// Type identifier for the persistence codec.
pub const TYPE_ID: &str = "compilation-dir";

/// Resolves relative debug-info paths against the directory the compiler
/// was invoked from.
///
/// With `per_subfolder`, every subdirectory acts as its own compilation
/// directory; children are enumerated lazily, one nested container per
/// subdirectory, and cached for the life of this container.
#[derive(Debug)]
pub struct CompilationDirContainer {
    /// The compiler working directory.
    root: PathBuf,

    /// Whether each subdirectory is treated as a compilation directory too.
    per_subfolder: bool,

    /// Lazily built child containers; populated only when `per_subfolder`.
    children: OnceLock<Vec<CompilationDirContainer>>,
}

impl CompilationDirContainer {
    /// Create a container for a compiler working directory.
    pub fn new(root: impl Into<PathBuf>, per_subfolder: bool) -> Self {
        CompilationDirContainer {
            root: root.into(),
            per_subfolder,
            children: OnceLock::new(),
        }
    }

    /// The compiler working directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether subdirectories act as compilation directories too.
    pub fn is_per_subfolder(&self) -> bool {
        self.per_subfolder
    }

    pub(crate) fn from_memento(table: &toml::Table) -> Result<Box<dyn SourceContainer>, PersistError> {
        let path = persist::require_str(table, TYPE_ID, "path")?;
        let subfolders = persist::get_bool(table, "subfolders").unwrap_or(false);
        Ok(Box::new(CompilationDirContainer::new(path, subfolders)))
    }

    /// Nested containers, one per direct subdirectory. Empty unless
    /// `per_subfolder`; read failures yield no children.
    fn children(&self) -> &[CompilationDirContainer] {
        if !self.per_subfolder {
            return &[];
        }
        self.children.get_or_init(|| {
            let Ok(entries) = fs::read_dir(&self.root) else {
                return Vec::new();
            };
            entries
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
                .map(|entry| CompilationDirContainer::new(entry.path(), true))
                .collect()
        })
    }
}

impl SourceContainer for CompilationDirContainer {
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

        if let Some(rel) = paths::as_relative_path(name) {
            let candidate = self.root.join(&rel);
            if candidate.is_file() {
                found.extend(ctx.artifacts_for(&candidate));
            }
        } else if Path::new(name).is_absolute() {
            if paths::is_direct_child(&self.root, name) {
                if let Some(file) = paths::file_segment(name) {
                    let candidate = self.root.join(file);
                    if candidate.is_file() {
                        found.extend(ctx.artifacts_for(&candidate));
                    }
                }
            }
        }

        if self.per_subfolder {
            for child in self.children() {
                if ctx.is_satisfied(&found) {
                    break;
                }
                found.extend(child.resolve(name, ctx));
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
        table.insert(
            "subfolders".to_string(),
            toml::Value::Boolean(self.per_subfolder),
        );
        table
    }

    fn as_translator(&self) -> Option<&dyn CompilationPathTranslator> {
        Some(self)
    }
}

impl CompilationPathTranslator for CompilationDirContainer {
    fn compilation_path(&self, local: &Path) -> Option<String> {
        let rel = pathdiff::diff_paths(local, &self.root)?;
        if rel.as_os_str().is_empty() || rel.starts_with("..") || rel.is_absolute() {
            return None;
        }
        let segments: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        // Under per-subfolder mode the subdirectory itself is the working
        // directory, so its segment is not part of the backend path.
        let segments = if self.per_subfolder {
            if segments.len() < 2 {
                return None;
            }
            &segments[1..]
        } else {
            &segments[..]
        };
        Some(segments.join("/"))
    }
}
