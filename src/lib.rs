//! Beacon - a source path lookup engine for debuggers
//!
//! This crate resolves debugger-reported source file references to readable
//! files on disk or in a workspace, through a configurable ordered list of
//! source containers, with result caching and persistence of the lookup
//! configuration.

pub mod containers;
pub mod core;
pub mod lookup;
pub mod persist;
pub mod util;

/// Test utilities for Beacon unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides a call-counting stub container for caching and short-circuit
/// assertions.
#[cfg(test)]
pub mod test_support;

pub use crate::containers::{
    AbsolutePathContainer, CompilationDirContainer, CompilationPathTranslator, DirectoryContainer,
    DuplicatePolicy, LookupContext, MapEntry, MappingContainer, ProjectContainer, SourceContainer,
};
pub use crate::core::{Artifact, NotFound, Resolution};
pub use crate::lookup::SourceLocator;
pub use crate::persist::{ContainerRegistry, LoadReport, LocatorConfig};
