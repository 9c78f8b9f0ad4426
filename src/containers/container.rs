//! SourceContainer trait - common interface for all resolution strategies.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Artifact, LaunchConfig, ProjectModel, WorkspaceIndex};

/// Whether resolution stops at the first match or gathers every match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Stop at the first container that yields a result.
    #[default]
    FirstMatch,
    /// Query every container and collect all distinct results.
    CollectAll,
}

/// Read-only view of the hosting workspace handed to containers per query.
pub struct LookupContext<'a> {
    /// Maps disk locations back to workspace files.
    pub index: &'a dyn WorkspaceIndex,

    /// Project existence, references, and source roots.
    pub projects: &'a dyn ProjectModel,

    /// Supplies the active project for unbound project containers.
    pub launch: &'a dyn LaunchConfig,

    /// The locator's duplicate policy for this query.
    pub policy: DuplicatePolicy,
}

impl LookupContext<'_> {
    /// Artifacts for an existing on-disk file: the workspace handles the
    /// index knows for it, or a single external artifact otherwise. Under
    /// `FirstMatch` at most one workspace handle is returned.
    pub fn artifacts_for(&self, location: &Path) -> Vec<Artifact> {
        let mut hits = self.index.find_files_for_location(location);
        if hits.is_empty() {
            return vec![Artifact::external(location)];
        }
        if self.policy == DuplicatePolicy::FirstMatch {
            hits.truncate(1);
        }
        hits
    }

    /// Whether this query should stop probing once `found` is non-empty.
    pub fn is_satisfied(&self, found: &[Artifact]) -> bool {
        self.policy == DuplicatePolicy::FirstMatch && !found.is_empty()
    }
}

/// Inverse lookup capability: from a local file back to the path string the
/// debugger backend would recognize. Only mapping-style containers have one.
pub trait CompilationPathTranslator: Send + Sync {
    /// The backend path for a local file, or `None` when this container
    /// does not map it.
    fn compilation_path(&self, local: &Path) -> Option<String>;
}

/// One strategy for locating source files given a debugger-reported name.
///
/// Containers never fail a query: I/O trouble while probing a candidate is
/// treated as "no match" and resolution degrades to an empty result.
pub trait SourceContainer: Send + Sync + fmt::Debug {
    /// Stable type identifier used by the persistence codec.
    fn type_id(&self) -> &'static str;

    /// Type recovery for variant-specific checks (the locator's cheap
    /// project-membership test).
    fn as_any(&self) -> &dyn std::any::Any;

    /// Human-readable container name for display.
    fn name(&self) -> String;

    /// Resolve a file name to zero, one, or many artifacts. More than one
    /// is only returned under `DuplicatePolicy::CollectAll`.
    fn resolve(&self, name: &str, ctx: &LookupContext<'_>) -> Vec<Artifact>;

    /// Per-type configuration blob for the persistence codec.
    fn memento(&self) -> toml::Table;

    /// The inverse-translation capability, when this container supports it.
    fn as_translator(&self) -> Option<&dyn CompilationPathTranslator> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EmptyWorkspace;

    #[test]
    fn test_artifacts_for_falls_back_to_external() {
        let ws = EmptyWorkspace;
        let ctx = LookupContext {
            index: &ws,
            projects: &ws,
            launch: &ws,
            policy: DuplicatePolicy::FirstMatch,
        };

        let hits = ctx.artifacts_for(Path::new("/tmp/somewhere/a.c"));
        assert_eq!(hits, vec![Artifact::external("/tmp/somewhere/a.c")]);
    }

    #[test]
    fn test_is_satisfied_respects_policy() {
        let ws = EmptyWorkspace;
        let found = vec![Artifact::external("/tmp/a.c")];

        let first = LookupContext {
            index: &ws,
            projects: &ws,
            launch: &ws,
            policy: DuplicatePolicy::FirstMatch,
        };
        assert!(first.is_satisfied(&found));
        assert!(!first.is_satisfied(&[]));

        let all = LookupContext {
            index: &ws,
            projects: &ws,
            launch: &ws,
            policy: DuplicatePolicy::CollectAll,
        };
        assert!(!all.is_satisfied(&found));
    }
}
