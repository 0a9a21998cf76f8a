//! Registry error types
//!
//! Every failure the engine can hit is a distinct variant so callers
//! can branch on kind rather than matching message strings.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving or materializing components
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The registry listing could not be fetched or had an unexpected shape
    #[error("could not fetch the component listing from the registry: {reason}")]
    RegistryUnavailable { reason: String },

    /// No registry path ends with the requested component name
    #[error("could not find component '{name}' in the registry")]
    ComponentNotFound { name: String },

    /// The per-component file listing fetch did not succeed
    #[error("could not download component contents for '{path}': {reason}")]
    ComponentFetchFailed { path: String, reason: String },

    /// The component's manifest bytes were not valid YAML
    ///
    /// Never fatal: the materializer logs this and treats the
    /// manifest as absent.
    #[error("manifest for '{path}' could not be parsed")]
    ManifestParseFailure {
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// A destination file could not be created or written
    #[error("could not write '{path}'")]
    LocalWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A component's dependency chain leads back to itself
    #[error("dependency cycle detected while materializing '{path}'")]
    DependencyCycle { path: String },
}
