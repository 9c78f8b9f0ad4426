//! Container type registry - type identifiers mapped to factories.
//!
//! The registry is built explicitly at startup and passed by reference to
//! whatever deserializes configurations. There is no global state and no
//! runtime class lookup: an unrecognized identifier is a recorded failure,
//! not a crash.

use std::collections::HashMap;

use crate::containers::{absolute, compilation, directory, mapping, project, SourceContainer};
use crate::persist::PersistError;

/// Constructs a container from its persisted per-type configuration.
pub type ContainerFactory = fn(&toml::Table) -> Result<Box<dyn SourceContainer>, PersistError>;

/// Registry of container types the codec can reconstruct.
pub struct ContainerRegistry {
    factories: HashMap<String, ContainerFactory>,
}

impl ContainerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        ContainerRegistry {
            factories: HashMap::new(),
        }
    }

    /// Create a registry with every built-in container type.
    pub fn builtin() -> Self {
        let mut registry = ContainerRegistry::new();
        registry.register(absolute::TYPE_ID, absolute::AbsolutePathContainer::from_memento);
        registry.register(directory::TYPE_ID, directory::DirectoryContainer::from_memento);
        registry.register(project::TYPE_ID, project::ProjectContainer::from_memento);
        registry.register(mapping::TYPE_ID, mapping::MappingContainer::from_memento);
        registry.register(
            compilation::TYPE_ID,
            compilation::CompilationDirContainer::from_memento,
        );
        registry
    }

    /// Register a container type. Re-registering an id replaces the factory.
    pub fn register(&mut self, type_id: impl Into<String>, factory: ContainerFactory) {
        self.factories.insert(type_id.into(), factory);
    }

    /// Construct a container from its type id and configuration blob.
    pub fn create(
        &self,
        type_id: &str,
        config: &toml::Table,
    ) -> Result<Box<dyn SourceContainer>, PersistError> {
        let factory = self
            .factories
            .get(type_id)
            .ok_or_else(|| PersistError::UnknownType(type_id.to_string()))?;
        factory(config)
    }

    /// Whether a type id is registered.
    pub fn contains(&self, type_id: &str) -> bool {
        self.factories.contains_key(type_id)
    }

    /// All registered type ids, sorted.
    pub fn type_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for ContainerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registers_every_variant() {
        let registry = ContainerRegistry::builtin();
        assert_eq!(
            registry.type_ids(),
            vec![
                "absolute",
                "compilation-dir",
                "directory",
                "mapping",
                "project"
            ]
        );
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let registry = ContainerRegistry::builtin();
        let err = registry.create("wiretap", &toml::Table::new()).unwrap_err();
        assert!(matches!(err, PersistError::UnknownType(id) if id == "wiretap"));
    }

    #[test]
    fn test_create_absolute() {
        let registry = ContainerRegistry::builtin();
        let container = registry.create("absolute", &toml::Table::new()).unwrap();
        assert_eq!(container.type_id(), "absolute");
    }
}
