//! Mapping container - backend-to-local path prefix substitution.

use std::path::{Path, PathBuf};

use crate::containers::{CompilationPathTranslator, LookupContext, SourceContainer};
use crate::core::Artifact;
use crate::persist::{self, PersistError};
use crate::util::paths;

/// Type identifier for the persistence codec.
pub const TYPE_ID: &str = "mapping";

/// One backend-prefix to local-path substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    /// Path prefix as the debugger backend reports it.
    pub backend_prefix: String,

    /// Local directory the prefix maps onto.
    pub local_path: PathBuf,
}

/// An ordered list of substitution entries; the first matching entry wins.
///
/// Prefix matching ignores case and requires a separator boundary, so a
/// `/hello` entry never claims `/hello2/a.c`. When the direct string match
/// fails, a legacy strategy re-parses both sides into segments and compares
/// those, which tolerates foreign separators and redundant slashes.
#[derive(Debug)]
pub struct MappingContainer {
    /// Display name for this mapping set.
    name: String,

    /// Substitutions in insertion order.
    entries: Vec<MapEntry>,
}

impl MappingContainer {
    /// Create an empty mapping container.
    pub fn new(name: impl Into<String>) -> Self {
        MappingContainer {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Append a substitution entry.
    pub fn add_entry(
        mut self,
        backend_prefix: impl Into<String>,
        local_path: impl Into<PathBuf>,
    ) -> Self {
        self.entries.push(MapEntry {
            backend_prefix: backend_prefix.into(),
            local_path: local_path.into(),
        });
        self
    }

    /// The substitution entries, in match order.
    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    pub(crate) fn from_memento(table: &toml::Table) -> Result<Box<dyn SourceContainer>, PersistError> {
        let name = persist::require_str(table, TYPE_ID, "name")?;
        let mut container = MappingContainer::new(name);

        if let Some(entries) = table.get("entries") {
            let entries = entries
                .as_array()
                .ok_or_else(|| PersistError::InvalidEntry {
                    container: TYPE_ID.to_string(),
                    message: "`entries` is not an array".to_string(),
                })?;
            for entry in entries {
                let entry = entry.as_table().ok_or_else(|| PersistError::InvalidEntry {
                    container: TYPE_ID.to_string(),
                    message: "map entry is not a table".to_string(),
                })?;
                let backend = persist::require_str(entry, TYPE_ID, "backend")?;
                let local = persist::require_str(entry, TYPE_ID, "local")?;
                container = container.add_entry(backend, local);
            }
        }
        Ok(Box::new(container))
    }

    /// The local file an entry maps `name` onto, if it exists.
    fn apply_entry(entry: &MapEntry, name: &str) -> Option<PathBuf> {
        // Direct string prefix with a separator boundary.
        if let Some(rest) = paths::strip_prefix_boundary(name, &entry.backend_prefix) {
            if !rest.is_empty() {
                let candidate = paths::join_backend_relative(&entry.local_path, rest);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        // Legacy strategy: compare normalized segments instead of raw text.
        if let Some(rest) = paths::strip_segment_prefix(name, &entry.backend_prefix) {
            let mut candidate = entry.local_path.clone();
            for seg in rest {
                candidate.push(seg);
            }
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }
}

impl SourceContainer for MappingContainer {
    fn type_id(&self) -> &'static str {
        TYPE_ID
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn resolve(&self, name: &str, ctx: &LookupContext<'_>) -> Vec<Artifact> {
        let mut found = Vec::new();
        for entry in &self.entries {
            if ctx.is_satisfied(&found) {
                break;
            }
            if let Some(candidate) = Self::apply_entry(entry, name) {
                found.extend(ctx.artifacts_for(&candidate));
            }
        }
        found
    }

    fn memento(&self) -> toml::Table {
        let mut table = toml::Table::new();
        table.insert("name".to_string(), toml::Value::String(self.name.clone()));
        let entries: Vec<toml::Value> = self
            .entries
            .iter()
            .map(|entry| {
                let mut t = toml::Table::new();
                t.insert(
                    "backend".to_string(),
                    toml::Value::String(entry.backend_prefix.clone()),
                );
                t.insert(
                    "local".to_string(),
                    toml::Value::String(entry.local_path.to_string_lossy().into_owned()),
                );
                toml::Value::Table(t)
            })
            .collect();
        table.insert("entries".to_string(), toml::Value::Array(entries));
        table
    }

    fn as_translator(&self) -> Option<&dyn CompilationPathTranslator> {
        Some(self)
    }
}

/// Separator convention of a backend prefix: backslash for Windows-style
/// prefixes, forward slash otherwise.
fn backend_separator(prefix: &str) -> char {
    if prefix.contains('\\') {
        '\\'
    } else {
        '/'
    }
}

impl CompilationPathTranslator for MappingContainer {
    fn compilation_path(&self, local: &Path) -> Option<String> {
        let local_str = local.to_string_lossy();
        for entry in &self.entries {
            let local_prefix = entry.local_path.to_string_lossy();
            if let Some(rest) = paths::strip_segment_prefix(&local_str, &local_prefix) {
                let sep = backend_separator(&entry.backend_prefix);
                let mut backend = entry
                    .backend_prefix
                    .trim_end_matches(['/', '\\'])
                    .to_string();
                for seg in rest {
                    backend.push(sep);
                    backend.push_str(seg);
                }
                return Some(backend);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::DuplicatePolicy;
    use crate::core::EmptyWorkspace;
    use std::fs;
    use tempfile::TempDir;

    fn ctx(ws: &EmptyWorkspace) -> LookupContext<'_> {
        LookupContext {
            index: ws,
            projects: ws,
            launch: ws,
            policy: DuplicatePolicy::FirstMatch,
        }
    }

    #[test]
    fn test_prefix_substitution() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("main.c"), "").unwrap();

        let ws = EmptyWorkspace;
        let container = MappingContainer::new("build host").add_entry("/build", tmp.path());

        let found = container.resolve("/build/main.c", &ctx(&ws));
        assert_eq!(found, vec![Artifact::external(tmp.path().join("main.c"))]);
    }

    #[test]
    fn test_prefix_boundary_is_respected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.c"), "").unwrap();

        let ws = EmptyWorkspace;
        let container = MappingContainer::new("m").add_entry("/hello", tmp.path());

        assert_eq!(container.resolve("/hello/a.c", &ctx(&ws)).len(), 1);
        assert!(container.resolve("/hello2/a.c", &ctx(&ws)).is_empty());
    }

    #[test]
    fn test_windows_backend_path() {
        let tmp = TempDir::new().unwrap();
        let sub = tmp.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("a.c"), "").unwrap();

        let ws = EmptyWorkspace;
        let container = MappingContainer::new("m").add_entry("C:\\build", tmp.path());

        let found = container.resolve("c:\\BUILD\\sub\\a.c", &ctx(&ws));
        assert_eq!(found, vec![Artifact::external(sub.join("a.c"))]);
    }

    #[test]
    fn test_entries_match_in_order() {
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("first");
        let second = tmp.path().join("second");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();
        fs::write(first.join("a.c"), "").unwrap();
        fs::write(second.join("a.c"), "").unwrap();

        let ws = EmptyWorkspace;
        let container = MappingContainer::new("m")
            .add_entry("/build", &first)
            .add_entry("/build", &second);

        let found = container.resolve("/build/a.c", &ctx(&ws));
        assert_eq!(found, vec![Artifact::external(first.join("a.c"))]);
    }

    #[test]
    fn test_legacy_segment_match_tolerates_foreign_separators() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.c"), "").unwrap();

        let ws = EmptyWorkspace;
        let container = MappingContainer::new("m").add_entry("/build", tmp.path());

        // The raw string prefix does not match, the segment comparison does.
        let found = container.resolve("\\build\\a.c", &ctx(&ws));
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_inverse_translation() {
        let container = MappingContainer::new("m").add_entry("/build", "/home/me/proj");

        let translated = container
            .compilation_path(Path::new("/home/me/proj/src/a.c"))
            .unwrap();
        assert_eq!(translated, "/build/src/a.c");

        assert!(container
            .compilation_path(Path::new("/elsewhere/a.c"))
            .is_none());
    }

    #[test]
    fn test_inverse_translation_preserves_backend_separators() {
        let container = MappingContainer::new("m").add_entry("C:\\build", "/home/me/proj");

        let translated = container
            .compilation_path(Path::new("/home/me/proj/a.c"))
            .unwrap();
        assert_eq!(translated, "C:\\build\\a.c");
    }
}
