//! Component registry - resolution and materialization
//!
//! This module resolves named components against a remote registry
//! and materializes them, plus their declared dependencies, into a
//! local destination tree.
//!
//! # Overview
//!
//! ```text
//! Registry (GitHub repository)
//!     │
//!     ├── git tree listing      ← every path in the registry
//!     └── contents/<path>       ← per-component file listings
//!            │
//!            ▼
//!     Materializer
//!            │
//!            ▼
//!     <dest>/<path>/<file>      ← materialized components
//! ```
//!
//! Resolution maps a bare component name to the first registry path
//! ending with that name. Materialization fetches the component's
//! files, writes them under the destination root, parses the
//! `component.yml` manifest for a `needs` list, and recurses over
//! each dependency depth-first. A directory that already exists at
//! the destination is skipped entirely.

mod error;
mod index;
mod manifest;
mod materializer;
mod sink;
mod source;

pub use error::RegistryError;
pub use index::{RegistryEntry, RegistryIndex};
pub use manifest::{ComponentManifest, MANIFEST_FILENAME};
pub use materializer::{Materializer, STARTER_COMPONENTS};
pub use sink::{DirSink, FileSink};
pub use source::{ContentSource, GithubSource, RemoteFile, DEFAULT_REGISTRY_REPO};
