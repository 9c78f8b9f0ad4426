//! Source containers.
//!
//! A container is one strategy for locating source files given a
//! debugger-reported name (an absolute path, a directory search, a project
//! lookup, a path-prefix mapping, or a compilation directory). A locator
//! owns an ordered list of them.

pub mod absolute;
pub mod compilation;
pub mod container;
pub mod directory;
pub mod mapping;
pub mod project;

pub use absolute::AbsolutePathContainer;
pub use compilation::CompilationDirContainer;
pub use container::{
    CompilationPathTranslator, DuplicatePolicy, LookupContext, SourceContainer,
};
pub use directory::DirectoryContainer;
pub use mapping::{MapEntry, MappingContainer};
pub use project::ProjectContainer;
