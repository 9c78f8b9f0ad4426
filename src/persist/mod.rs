//! Configuration persistence.
//!
//! Serializes and restores a locator's ordered container list, duplicate
//! policy, and suppressed generic projects, tolerating unknown or broken
//! entries by aggregating them into a report instead of failing the load.

pub mod codec;
pub mod error;
pub mod registry;
pub mod report;

pub use codec::{
    deserialize_config, load_config, save_config, serialize_config, LocatorConfig,
};
pub use error::{ConfigLoadError, PersistError};
pub use registry::{ContainerFactory, ContainerRegistry};
pub use report::{LoadReport, ReportEntry, Severity};

/// Fetch a required string attribute from a container memento.
pub(crate) fn require_str<'a>(
    table: &'a toml::Table,
    container: &str,
    attribute: &str,
) -> Result<&'a str, PersistError> {
    table
        .get(attribute)
        .and_then(|v| v.as_str())
        .ok_or_else(|| PersistError::MissingAttribute {
            container: container.to_string(),
            attribute: attribute.to_string(),
        })
}

/// Fetch an optional boolean attribute from a container memento.
pub(crate) fn get_bool(table: &toml::Table, attribute: &str) -> Option<bool> {
    table.get(attribute).and_then(|v| v.as_bool())
}
