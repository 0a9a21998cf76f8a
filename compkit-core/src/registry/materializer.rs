//! Component materialization
//!
//! Given a resolved registry path, the materializer fetches the
//! component's files, writes them under the destination root, parses
//! the manifest for a `needs` list, and recurses over each
//! dependency depth-first. One component's entire file set and full
//! dependency subtree complete before the next sibling begins.

use std::collections::HashSet;

use futures::future::BoxFuture;
use tracing::{debug, info, warn};

use super::{
    ComponentManifest, ContentSource, FileSink, RegistryError, RegistryIndex, MANIFEST_FILENAME,
};

/// Well-known components a fresh destination tree starts from,
/// materialized in this order by [`Materializer::add_starter`].
pub const STARTER_COMPONENTS: &[&str] = &["card", "hero", "accordion", "tabs"];

/// Resolves component names and materializes their dependency trees
pub struct Materializer<S, K> {
    source: S,
    sink: K,
    index: RegistryIndex,
}

impl<S: ContentSource, K: FileSink> Materializer<S, K> {
    /// Load the registry listing and build a materializer over it.
    ///
    /// The listing is fetched exactly once; every later resolution
    /// runs against this snapshot.
    pub async fn connect(source: S, sink: K) -> Result<Self, RegistryError> {
        let entries = source.fetch_index().await?;
        debug!("loaded registry index: {} entries", entries.len());

        Ok(Self {
            source,
            sink,
            index: RegistryIndex::new(entries),
        })
    }

    pub fn index(&self) -> &RegistryIndex {
        &self.index
    }

    /// Resolve a component name and materialize it plus every
    /// declared dependency. Fails fast: the first unresolved
    /// dependency or failed fetch aborts the whole call.
    pub async fn add(&self, name: &str) -> Result<(), RegistryError> {
        let path = self.index.resolve(name)?.to_string();
        let mut in_progress = HashSet::new();
        self.materialize(path, &mut in_progress).await
    }

    /// Materialize the fixed starter set, stopping at the first
    /// failure.
    pub async fn add_starter(&self) -> Result<(), RegistryError> {
        for name in STARTER_COMPONENTS {
            self.add(name).await?;
        }
        Ok(())
    }

    /// Materialize one resolved path.
    ///
    /// `in_progress` holds the paths currently on the call stack.
    /// The cycle check runs before the existence check: a component
    /// being materialized right now already has files on disk, so
    /// checking existence first would mask the cycle instead of
    /// reporting it.
    fn materialize<'a>(
        &'a self,
        path: String,
        in_progress: &'a mut HashSet<String>,
    ) -> BoxFuture<'a, Result<(), RegistryError>> {
        Box::pin(async move {
            if in_progress.contains(&path) {
                return Err(RegistryError::DependencyCycle { path });
            }

            if self.sink.exists(&path) {
                warn!("component already exists at: {path}");
                return Ok(());
            }

            in_progress.insert(path.clone());

            let files = self.source.list_component(&path).await?;

            let mut manifest_bytes = None;
            for file in &files {
                // Contents listings include subdirectories; only
                // entries with a download URL are files.
                if file.download_url.is_none() {
                    debug!("skipping directory entry: {path}/{}", file.name);
                    continue;
                }

                let bytes = self.source.fetch_file(file).await?;
                self.sink.write(&format!("{path}/{}", file.name), &bytes)?;

                if file.name.ends_with(MANIFEST_FILENAME) {
                    manifest_bytes = Some(bytes);
                }
            }

            let leaf = path.rsplit('/').next().unwrap_or(&path);
            info!("added component: {leaf}");

            let needs = self.dependencies_of(&path, manifest_bytes);
            for dependency in &needs {
                debug!("adding dependency: {dependency}");
                let dependency_path = self.index.resolve(dependency)?.to_string();
                self.materialize(dependency_path, in_progress).await?;
            }

            in_progress.remove(&path);
            Ok(())
        })
    }

    /// Dependency names declared by a component's manifest.
    ///
    /// A missing manifest, non-UTF-8 bytes, or unparseable YAML all
    /// mean "no dependencies" - the manifest is best-effort, never a
    /// reason to fail a download that already succeeded.
    fn dependencies_of(&self, path: &str, manifest_bytes: Option<Vec<u8>>) -> Vec<String> {
        let Some(bytes) = manifest_bytes else {
            debug!("no manifest found under {path}");
            return Vec::new();
        };

        let parsed = std::str::from_utf8(&bytes)
            .ok()
            .map(ComponentManifest::from_yaml);

        match parsed {
            Some(Ok(manifest)) => manifest.needs,
            Some(Err(source)) => {
                let err = RegistryError::ManifestParseFailure {
                    path: path.to_string(),
                    source,
                };
                warn!("{err}; skipping dependency processing");
                Vec::new()
            }
            None => {
                warn!("manifest for '{path}' is not valid UTF-8; skipping dependency processing");
                Vec::new()
            }
        }
    }
}
