//! Source locator - the ordered-container resolution director.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::containers::{
    DuplicatePolicy, LookupContext, ProjectContainer, SourceContainer,
};
use crate::core::{
    Artifact, LaunchConfig, NotFound, ProjectModel, Resolution, WorkspaceIndex,
};
use crate::lookup::cache::LookupCache;

/// Container list, duplicate policy, and cache, guarded as one unit so a
/// query never observes a half-swapped configuration and every cache write
/// is atomic with the container read that produced it.
struct LocatorState {
    containers: Vec<Box<dyn SourceContainer>>,
    policy: DuplicatePolicy,
    cache: LookupCache,
}

/// Resolves debugger-reported names through an ordered list of containers.
///
/// Queries run synchronously on the caller's thread; concurrent access is
/// serialized internally. Reconfiguration clears the memo cache in the same
/// critical section that swaps the state it invalidates.
pub struct SourceLocator {
    state: Mutex<LocatorState>,
    owner_project: Option<String>,
    index: Arc<dyn WorkspaceIndex>,
    projects: Arc<dyn ProjectModel>,
    launch: Arc<dyn LaunchConfig>,
}

impl SourceLocator {
    /// Create a locator over a host that plays all three collaborator roles.
    pub fn new<W>(workspace: Arc<W>) -> Self
    where
        W: WorkspaceIndex + ProjectModel + LaunchConfig + 'static,
    {
        let index: Arc<dyn WorkspaceIndex> = workspace.clone();
        let projects: Arc<dyn ProjectModel> = workspace.clone();
        let launch: Arc<dyn LaunchConfig> = workspace;
        Self::from_parts(index, projects, launch)
    }

    /// Create a locator from individually supplied collaborators.
    pub fn from_parts(
        index: Arc<dyn WorkspaceIndex>,
        projects: Arc<dyn ProjectModel>,
        launch: Arc<dyn LaunchConfig>,
    ) -> Self {
        SourceLocator {
            state: Mutex::new(LocatorState {
                containers: Vec::new(),
                policy: DuplicatePolicy::FirstMatch,
                cache: LookupCache::new(),
            }),
            owner_project: None,
            index,
            projects,
            launch,
        }
    }

    /// Scope this locator to a project.
    pub fn with_owner_project(mut self, project: impl Into<String>) -> Self {
        self.owner_project = Some(project.into());
        self
    }

    /// The project this locator is scoped to, if any.
    pub fn owner_project(&self) -> Option<&str> {
        self.owner_project.as_deref()
    }

    /// Replace the container list. Clears the cache atomically with the swap.
    pub fn set_containers(&self, containers: Vec<Box<dyn SourceContainer>>) {
        let mut state = self.state.lock().unwrap();
        state.containers = containers;
        state.cache.clear();
    }

    /// Replace containers and policy together, in one critical section.
    pub fn configure(&self, containers: Vec<Box<dyn SourceContainer>>, policy: DuplicatePolicy) {
        let mut state = self.state.lock().unwrap();
        state.containers = containers;
        state.policy = policy;
        state.cache.clear();
    }

    /// Change the duplicate policy. Clears the cache atomically.
    pub fn set_policy(&self, policy: DuplicatePolicy) {
        let mut state = self.state.lock().unwrap();
        if state.policy != policy {
            state.policy = policy;
            state.cache.clear();
        }
    }

    /// The current duplicate policy.
    pub fn policy(&self) -> DuplicatePolicy {
        self.state.lock().unwrap().policy
    }

    /// Run a closure over the current container list, under the lock.
    pub fn with_containers<R>(&self, f: impl FnOnce(&[Box<dyn SourceContainer>]) -> R) -> R {
        let state = self.state.lock().unwrap();
        f(&state.containers)
    }

    /// Resolve a name to artifacts, consulting the cache first.
    pub fn resolve(&self, name: &str) -> Resolution {
        if name.trim().is_empty() {
            return Resolution::NotFound(NotFound::new(name));
        }
        let mut state = self.state.lock().unwrap();
        self.resolve_locked(&mut state, name)
    }

    fn resolve_locked(&self, state: &mut LocatorState, name: &str) -> Resolution {
        if let Some(cached) = state.cache.lookup(name) {
            tracing::debug!(name, "cache hit");
            return cached;
        }

        let ctx = LookupContext {
            index: self.index.as_ref(),
            projects: self.projects.as_ref(),
            launch: self.launch.as_ref(),
            policy: state.policy,
        };

        let mut all = Vec::new();
        for container in &state.containers {
            let found = container.resolve(name, &ctx);
            if found.is_empty() {
                continue;
            }
            tracing::debug!(name, container = %container.name(), hits = found.len(), "matched");
            if state.policy == DuplicatePolicy::FirstMatch {
                all = found;
                break;
            }
            all.extend(found);
        }

        if state.policy == DuplicatePolicy::CollectAll {
            dedup_in_order(&mut all);
        }

        let resolution = if all.is_empty() {
            Resolution::NotFound(NotFound::new(name))
        } else {
            Resolution::Found(all)
        };
        state.cache.store(name, &resolution);
        resolution
    }

    /// Whether re-resolving the artifact's own derived name through this
    /// locator would produce it. Project containers answer by identity
    /// without a query when they can.
    pub fn contains(&self, artifact: &Artifact) -> bool {
        let mut state = self.state.lock().unwrap();

        if let Some(project) = artifact.project() {
            let launch_project = self.launch.active_project();
            for container in &state.containers {
                let Some(pc) = container.as_any().downcast_ref::<ProjectContainer>() else {
                    continue;
                };
                let bound = pc
                    .project()
                    .map(str::to_string)
                    .or_else(|| launch_project.clone());
                if bound.as_deref() == Some(project) {
                    return true;
                }
            }
        }

        let name = artifact.derived_name();
        self.resolve_locked(&mut state, &name)
            .artifacts()
            .contains(artifact)
    }

    /// The path string the debugger backend would recognize for a local
    /// file. Asks each translator-capable container in order; the first
    /// answer wins.
    pub fn compilation_path(&self, local: &Path) -> Option<String> {
        let state = self.state.lock().unwrap();
        for container in &state.containers {
            if let Some(translator) = container.as_translator() {
                if let Some(backend) = translator.compilation_path(local) {
                    return Some(backend);
                }
            }
        }
        None
    }

    /// Drop the container list and every cached result.
    pub fn dispose(&self) {
        let mut state = self.state.lock().unwrap();
        state.containers.clear();
        state.cache.clear();
    }
}

/// Remove duplicate artifacts, keeping the first occurrence of each.
fn dedup_in_order(artifacts: &mut Vec<Artifact>) {
    let mut seen = HashSet::new();
    artifacts.retain(|artifact| seen.insert(artifact.clone()));
}
