//! Project container - resolves names through a workspace project's folders.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use walkdir::WalkDir;

use crate::containers::{LookupContext, SourceContainer};
use crate::core::Artifact;
use crate::persist::{self, PersistError};
use crate::util::paths;

/// Type identifier for the persistence codec.
pub const TYPE_ID: &str = "project";

/// Resolves names against the source folders of a workspace project,
/// optionally walking the transitive referenced-project graph.
///
/// An unbound container (no project name) asks the launch configuration for
/// the active project at query time. Folder enumerations are built lazily,
/// once per project, and cached for the life of the container.
#[derive(Debug)]
pub struct ProjectContainer {
    /// Bound project name; `None` means launch-resolved.
    project: Option<String>,

    /// Whether referenced projects participate in the search.
    include_referenced: bool,

    /// Lazily built folder lists, keyed by project name.
    folders: Mutex<HashMap<String, Arc<Vec<PathBuf>>>>,
}

impl ProjectContainer {
    /// Create a container bound to a project, or unbound when `project`
    /// is `None`.
    pub fn new(project: Option<String>, include_referenced: bool) -> Self {
        ProjectContainer {
            project,
            include_referenced,
            folders: Mutex::new(HashMap::new()),
        }
    }

    /// The bound project name, if any.
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    /// Whether referenced projects participate in the search.
    pub fn includes_referenced(&self) -> bool {
        self.include_referenced
    }

    pub(crate) fn from_memento(table: &toml::Table) -> Result<Box<dyn SourceContainer>, PersistError> {
        let project = table
            .get("project")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let referenced = persist::get_bool(table, "referenced").unwrap_or(false);
        Ok(Box::new(ProjectContainer::new(project, referenced)))
    }

    /// The project this query runs against, bound or launch-resolved.
    fn query_project(&self, ctx: &LookupContext<'_>) -> Option<String> {
        self.project.clone().or_else(|| ctx.launch.active_project())
    }

    /// The project plus, when configured, its transitive references.
    fn search_scope(&self, root: &str, ctx: &LookupContext<'_>) -> Vec<String> {
        let mut scope = vec![root.to_string()];
        if !self.include_referenced {
            return scope;
        }
        let mut next = 0;
        while next < scope.len() {
            let current = scope[next].clone();
            next += 1;
            for referenced in ctx.projects.referenced_projects(&current) {
                if !scope.contains(&referenced) {
                    scope.push(referenced);
                }
            }
        }
        scope
    }

    /// Source roots of a project plus every directory beneath them,
    /// enumerated once and cached.
    fn folders_for(&self, project: &str, ctx: &LookupContext<'_>) -> Arc<Vec<PathBuf>> {
        let mut cache = self.folders.lock().unwrap();
        if let Some(folders) = cache.get(project) {
            return Arc::clone(folders);
        }

        let mut folders = Vec::new();
        for root in ctx.projects.source_roots(project) {
            for entry in WalkDir::new(&root)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_dir())
            {
                folders.push(entry.into_path());
            }
        }
        tracing::debug!(project, count = folders.len(), "enumerated project folders");

        let folders = Arc::new(folders);
        cache.insert(project.to_string(), Arc::clone(&folders));
        folders
    }
}

impl SourceContainer for ProjectContainer {
    fn type_id(&self) -> &'static str {
        TYPE_ID
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn name(&self) -> String {
        match &self.project {
            Some(project) => format!("Project {}", project),
            None => "Project of the active launch".to_string(),
        }
    }

    fn resolve(&self, name: &str, ctx: &LookupContext<'_>) -> Vec<Artifact> {
        let Some(root) = self.query_project(ctx) else {
            return Vec::new();
        };
        if !ctx.projects.is_open(&root) {
            return Vec::new();
        }
        let scope = self.search_scope(&root, ctx);

        let mut found = Vec::new();
        if Path::new(name).is_absolute() {
            // Workspace lookup, scoped to the projects we may search.
            for hit in ctx.index.find_files_for_location(Path::new(name)) {
                if ctx.is_satisfied(&found) {
                    break;
                }
                if hit.project().is_some_and(|p| scope.iter().any(|s| s.as_str() == p)) {
                    found.push(hit);
                }
            }
        } else if let Some(rel) = paths::as_relative_path(name) {
            'projects: for project in &scope {
                if !ctx.projects.is_open(project) {
                    continue;
                }
                for folder in self.folders_for(project, ctx).iter() {
                    let candidate = folder.join(&rel);
                    if candidate.is_file() {
                        found.push(Artifact::workspace(project.clone(), candidate));
                        if ctx.is_satisfied(&found) {
                            break 'projects;
                        }
                    }
                }
            }
        }

        found
    }

    fn memento(&self) -> toml::Table {
        let mut table = toml::Table::new();
        if let Some(project) = &self.project {
            table.insert("project".to_string(), toml::Value::String(project.clone()));
        }
        table.insert(
            "referenced".to_string(),
            toml::Value::Boolean(self.include_referenced),
        );
        table
    }
}
