//! Test utilities for Beacon unit tests.
//!
//! This module is only available when compiling with `--cfg test`. It
//! provides a call-counting stub container for verifying short-circuit and
//! caching behavior.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::containers::{LookupContext, SourceContainer};
use crate::core::Artifact;

/// A container that returns a fixed result and counts how often it is asked.
#[derive(Debug)]
pub struct StubContainer {
    artifacts: Vec<Artifact>,
    calls: Arc<AtomicUsize>,
}

impl StubContainer {
    /// Create a stub producing `artifacts` for every query, except empty
    /// results for names starting with "missing".
    pub fn new(artifacts: Vec<Artifact>, calls: Arc<AtomicUsize>) -> Self {
        StubContainer { artifacts, calls }
    }
}

impl SourceContainer for StubContainer {
    fn type_id(&self) -> &'static str {
        "stub"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn name(&self) -> String {
        "stub".to_string()
    }

    fn resolve(&self, name: &str, _ctx: &LookupContext<'_>) -> Vec<Artifact> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if name.starts_with("missing") {
            Vec::new()
        } else {
            self.artifacts.clone()
        }
    }

    fn memento(&self) -> toml::Table {
        toml::Table::new()
    }
}
