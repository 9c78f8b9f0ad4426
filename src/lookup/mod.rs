//! Name resolution through an ordered container list.

pub mod cache;
pub mod locator;

pub use cache::LookupCache;
pub use locator::SourceLocator;
