//! Resolved source artifacts and resolution outcomes.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// A resolved source unit. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Artifact {
    /// A file known to the workspace, attributed to a project.
    Workspace {
        /// Owning project name.
        project: String,
        /// Absolute location on disk.
        path: PathBuf,
    },

    /// A plain file outside any workspace project.
    External {
        /// Absolute location on disk.
        path: PathBuf,
    },
}

impl Artifact {
    /// Create an external-file artifact.
    pub fn external(path: impl Into<PathBuf>) -> Self {
        Artifact::External { path: path.into() }
    }

    /// Create a workspace artifact.
    pub fn workspace(project: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Artifact::Workspace {
            project: project.into(),
            path: path.into(),
        }
    }

    /// The on-disk location of this artifact.
    pub fn location(&self) -> &Path {
        match self {
            Artifact::Workspace { path, .. } => path,
            Artifact::External { path } => path,
        }
    }

    /// The project this artifact belongs to, if any.
    pub fn project(&self) -> Option<&str> {
        match self {
            Artifact::Workspace { project, .. } => Some(project),
            Artifact::External { .. } => None,
        }
    }

    /// The name a locator would be asked to resolve to reproduce this
    /// artifact. Used by membership tests.
    pub fn derived_name(&self) -> String {
        self.location().to_string_lossy().into_owned()
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artifact::Workspace { project, path } => {
                write!(f, "{}:{}", project, path.display())
            }
            Artifact::External { path } => write!(f, "{}", path.display()),
        }
    }
}

/// Typed marker for a name no container could resolve.
///
/// Callers use the marker to drive their own fallback (e.g. prompting the
/// user for an alternate file); its presence is part of the lookup contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFound {
    /// The name as reported by the debugger.
    pub name: String,
    /// Human-readable description of the failure.
    pub description: String,
}

impl NotFound {
    /// Create a marker for an unresolvable name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let description = format!("no source container could locate `{}`", name);
        NotFound { name, description }
    }
}

/// Outcome of resolving one name through a locator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Resolution {
    /// One or more matching artifacts, in container order.
    Found(Vec<Artifact>),
    /// No container matched.
    NotFound(NotFound),
}

impl Resolution {
    /// Whether any artifact was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    /// The matched artifacts (empty when not found).
    pub fn artifacts(&self) -> &[Artifact] {
        match self {
            Resolution::Found(artifacts) => artifacts,
            Resolution::NotFound(_) => &[],
        }
    }

    /// Consume the resolution, yielding its artifacts (empty when not found).
    pub fn into_artifacts(self) -> Vec<Artifact> {
        match self {
            Resolution::Found(artifacts) => artifacts,
            Resolution::NotFound(_) => Vec::new(),
        }
    }
}
