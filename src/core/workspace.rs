//! Read-only collaborator traits for the hosting workspace.
//!
//! Beacon never mutates workspace state; it only asks the host which files
//! a location maps to, which projects exist, and which project the current
//! debug launch belongs to. Hosts implement these traits over their own
//! resource model. `StaticWorkspace` is a self-contained implementation
//! driven by configuration, used by the CLI and by tests.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::Artifact;

/// Maps on-disk locations back to workspace files.
pub trait WorkspaceIndex: Send + Sync {
    /// All workspace files that live at the given location, as artifacts
    /// attributed to their projects. Empty when the location is outside
    /// the workspace or the file does not exist.
    fn find_files_for_location(&self, location: &Path) -> Vec<Artifact>;
}

/// Project existence, open-state, references, and source roots.
pub trait ProjectModel: Send + Sync {
    /// Names of all projects, open or not.
    fn project_names(&self) -> Vec<String>;

    /// Whether the named project exists and is open.
    fn is_open(&self, project: &str) -> bool;

    /// Projects directly referenced by the named project.
    fn referenced_projects(&self, project: &str) -> Vec<String>;

    /// Source root directories of the named project.
    fn source_roots(&self, project: &str) -> Vec<PathBuf>;
}

/// Supplies the project a debug launch is running against.
pub trait LaunchConfig: Send + Sync {
    /// The active project, if the launch names one.
    fn active_project(&self) -> Option<String>;
}

/// Inert workspace for standalone use: no projects, no index, no launch.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyWorkspace;

impl WorkspaceIndex for EmptyWorkspace {
    fn find_files_for_location(&self, _location: &Path) -> Vec<Artifact> {
        Vec::new()
    }
}

impl ProjectModel for EmptyWorkspace {
    fn project_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn is_open(&self, _project: &str) -> bool {
        false
    }

    fn referenced_projects(&self, _project: &str) -> Vec<String> {
        Vec::new()
    }

    fn source_roots(&self, _project: &str) -> Vec<PathBuf> {
        Vec::new()
    }
}

impl LaunchConfig for EmptyWorkspace {
    fn active_project(&self) -> Option<String> {
        None
    }
}

/// A project declared in configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StaticProject {
    /// Source root directories, absolute or relative to the config file.
    #[serde(default)]
    pub roots: Vec<PathBuf>,

    /// Names of directly referenced projects.
    #[serde(default)]
    pub references: Vec<String>,

    /// Closed projects are invisible to resolution.
    #[serde(default = "default_true")]
    pub open: bool,
}

fn default_true() -> bool {
    true
}

/// Workspace declarations as they appear in a configuration document.
#[derive(Debug, Default, Deserialize)]
struct WorkspaceDoc {
    #[serde(default)]
    projects: BTreeMap<String, StaticProject>,

    #[serde(rename = "active-project", default)]
    active_project: Option<String>,
}

/// A workspace assembled from declared projects.
///
/// Projects are kept in a `BTreeMap` so enumeration order is stable.
#[derive(Debug, Default)]
pub struct StaticWorkspace {
    projects: BTreeMap<String, StaticProject>,
    active: Option<String>,
}

impl StaticWorkspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        StaticWorkspace::default()
    }

    /// Build a workspace from `[projects]` tables in a TOML document.
    /// Unrelated keys in the document are ignored.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        let doc: WorkspaceDoc = toml::from_str(text)?;
        Ok(StaticWorkspace {
            projects: doc.projects,
            active: doc.active_project,
        })
    }

    /// Add a project with the given source roots.
    pub fn add_project(&mut self, name: impl Into<String>, roots: Vec<PathBuf>) -> &mut Self {
        self.projects.insert(
            name.into(),
            StaticProject {
                roots,
                references: Vec::new(),
                open: true,
            },
        );
        self
    }

    /// Insert a fully specified project.
    pub fn insert(&mut self, name: impl Into<String>, project: StaticProject) -> &mut Self {
        self.projects.insert(name.into(), project);
        self
    }

    /// Declare references from one project to others.
    pub fn add_references(&mut self, project: &str, references: Vec<String>) -> &mut Self {
        if let Some(p) = self.projects.get_mut(project) {
            p.references = references;
        }
        self
    }

    /// Set the project the launch configuration names.
    pub fn set_active(&mut self, project: impl Into<String>) -> &mut Self {
        self.active = Some(project.into());
        self
    }

    /// Resolve all relative project roots against a base directory.
    pub fn anchor_roots(&mut self, base: &Path) {
        for project in self.projects.values_mut() {
            for root in &mut project.roots {
                if root.is_relative() {
                    *root = base.join(&*root);
                }
            }
        }
    }
}

impl WorkspaceIndex for StaticWorkspace {
    fn find_files_for_location(&self, location: &Path) -> Vec<Artifact> {
        if !location.is_file() {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        for (name, project) in &self.projects {
            if !project.open {
                continue;
            }
            let owns = project.roots.iter().any(|root| location.starts_with(root));
            if owns && seen.insert(name.clone()) {
                out.push(Artifact::workspace(name.clone(), location));
            }
        }
        out
    }
}

impl ProjectModel for StaticWorkspace {
    fn project_names(&self) -> Vec<String> {
        self.projects.keys().cloned().collect()
    }

    fn is_open(&self, project: &str) -> bool {
        self.projects.get(project).is_some_and(|p| p.open)
    }

    fn referenced_projects(&self, project: &str) -> Vec<String> {
        self.projects
            .get(project)
            .map(|p| p.references.clone())
            .unwrap_or_default()
    }

    fn source_roots(&self, project: &str) -> Vec<PathBuf> {
        self.projects
            .get(project)
            .filter(|p| p.open)
            .map(|p| p.roots.clone())
            .unwrap_or_default()
    }
}

impl LaunchConfig for StaticWorkspace {
    fn active_project(&self) -> Option<String> {
        self.active.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_files_for_location() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("demo/src");
        fs::create_dir_all(&root).unwrap();
        let file = root.join("a.c");
        fs::write(&file, "int a;").unwrap();

        let mut ws = StaticWorkspace::new();
        ws.add_project("demo", vec![tmp.path().join("demo")]);

        let hits = ws.find_files_for_location(&file);
        assert_eq!(hits, vec![Artifact::workspace("demo", &file)]);

        assert!(ws
            .find_files_for_location(Path::new("/nonexistent/a.c"))
            .is_empty());
    }

    #[test]
    fn test_closed_project_is_invisible() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.c");
        fs::write(&file, "").unwrap();

        let mut ws = StaticWorkspace::new();
        ws.insert(
            "closed",
            StaticProject {
                roots: vec![tmp.path().to_path_buf()],
                references: Vec::new(),
                open: false,
            },
        );

        assert!(ws.find_files_for_location(&file).is_empty());
        assert!(!ws.is_open("closed"));
        assert!(ws.source_roots("closed").is_empty());
    }

    #[test]
    fn test_from_toml() {
        let text = r#"
active-project = "app"

[projects.app]
roots = ["app/src"]
references = ["lib"]

[projects.lib]
roots = ["lib/src"]

[some.unrelated]
key = "ignored"
"#;
        let ws = StaticWorkspace::from_toml(text).unwrap();
        assert_eq!(ws.project_names(), vec!["app", "lib"]);
        assert_eq!(ws.active_project(), Some("app".to_string()));
        assert_eq!(ws.referenced_projects("app"), vec!["lib".to_string()]);
    }

    #[test]
    fn test_anchor_roots() {
        let mut ws = StaticWorkspace::new();
        ws.add_project("demo", vec![PathBuf::from("src")]);
        ws.anchor_roots(Path::new("/base"));
        assert_eq!(ws.source_roots("demo"), vec![PathBuf::from("/base/src")]);
    }
}
