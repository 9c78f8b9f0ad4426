//! Persistence error types.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

/// Error while encoding or decoding a locator configuration.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("configuration could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("configuration could not be encoded: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("container entry has no `type` attribute")]
    MissingType,

    #[error("`{container}` entry is missing required attribute `{attribute}`")]
    MissingAttribute {
        container: String,
        attribute: String,
    },

    #[error("unknown container type `{0}`")]
    UnknownType(String),

    #[error("invalid `{container}` entry: {message}")]
    InvalidEntry { container: String, message: String },
}

/// A configuration file that could not be loaded at all.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("could not load source lookup configuration from `{}`", path.display())]
#[diagnostic(
    code(beacon::persist::load_failed),
    help("Check that the file exists and is valid TOML")
)]
pub struct ConfigLoadError {
    /// The file that failed to load.
    pub path: PathBuf,

    #[source]
    pub source: PersistError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_entry() {
        let err = PersistError::MissingAttribute {
            container: "directory".to_string(),
            attribute: "path".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "`directory` entry is missing required attribute `path`"
        );

        let err = PersistError::UnknownType("wiretap".to_string());
        assert_eq!(err.to_string(), "unknown container type `wiretap`");
    }
}
