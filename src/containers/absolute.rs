//! Absolute-path container - matches names that are already valid local paths.

use std::path::Path;

use crate::containers::{LookupContext, SourceContainer};
use crate::core::Artifact;
use crate::persist::PersistError;

/// Type identifier for the persistence codec.
pub const TYPE_ID: &str = "absolute";

/// Accepts a name only if it is an absolute path on the local OS and the
/// addressed file exists. Typically configured last, as a fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct AbsolutePathContainer;

impl AbsolutePathContainer {
    /// Create the container. It carries no state.
    pub fn new() -> Self {
        AbsolutePathContainer
    }

    pub(crate) fn from_memento(_table: &toml::Table) -> Result<Box<dyn SourceContainer>, PersistError> {
        Ok(Box::new(AbsolutePathContainer))
    }
}

impl SourceContainer for AbsolutePathContainer {
    fn type_id(&self) -> &'static str {
        TYPE_ID
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn name(&self) -> String {
        "Absolute file path".to_string()
    }

    fn resolve(&self, name: &str, _ctx: &LookupContext<'_>) -> Vec<Artifact> {
        let path = Path::new(name);
        if path.is_absolute() && path.is_file() {
            vec![Artifact::external(path)]
        } else {
            Vec::new()
        }
    }

    fn memento(&self) -> toml::Table {
        toml::Table::new()
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
    fn test_matches_existing_absolute_path() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("main.c");
        fs::write(&file, "int main() {}").unwrap();

        let ws = EmptyWorkspace;
        let container = AbsolutePathContainer::new();
        let name = file.to_string_lossy().into_owned();

        assert_eq!(
            container.resolve(&name, &ctx(&ws)),
            vec![Artifact::external(&file)]
        );
    }

    #[test]
    fn test_rejects_relative_and_missing() {
        let ws = EmptyWorkspace;
        let container = AbsolutePathContainer::new();

        assert!(container.resolve("src/main.c", &ctx(&ws)).is_empty());
        assert!(container.resolve("/nonexistent/main.c", &ctx(&ws)).is_empty());
        // a Windows-style path is not absolute on this OS
        #[cfg(unix)]
        assert!(container.resolve("C:\\src\\main.c", &ctx(&ws)).is_empty());
    }
}
