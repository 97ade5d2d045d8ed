//! Content factory for loading health content from a data directory.

use std::path::{Path, PathBuf};

use health_core::HealthConfig;

use crate::catalog::DamageCatalog;
use crate::loaders::{CatalogLoader, ConfigLoader, Encounter, EncounterLoader, LoadResult};

/// Catalog and configuration loaded together.
#[derive(Debug)]
pub struct Content {
    pub catalog: DamageCatalog,
    pub config: HealthConfig,
}

/// Content factory that loads all health content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── catalog.ron
/// ├── health.toml
/// └── encounters/
///     └── duel.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the damage catalog from `catalog.ron`.
    pub fn load_catalog(&self) -> LoadResult<DamageCatalog> {
        let path = self.data_dir.join("catalog.ron");
        CatalogLoader::load(&path)
    }

    /// Load health configuration from `health.toml`, resolved against `catalog`.
    pub fn load_config(&self, catalog: &DamageCatalog) -> LoadResult<HealthConfig> {
        let path = self.data_dir.join("health.toml");
        ConfigLoader::load(&path, catalog)
    }

    /// Load the catalog, then the configuration that refers to it.
    pub fn load(&self) -> LoadResult<Content> {
        let catalog = self.load_catalog()?;
        let config = self.load_config(&catalog)?;
        tracing::info!(data_dir = %self.data_dir.display(), "loaded health content");
        Ok(Content { catalog, config })
    }

    /// Load an encounter script.
    ///
    /// Relative paths are resolved against the data directory when the file
    /// does not exist relative to the working directory.
    pub fn load_encounter(&self, path: &Path, catalog: &DamageCatalog) -> LoadResult<Encounter> {
        let path = if path.is_relative() && !path.exists() {
            self.data_dir.join(path)
        } else {
            path.to_path_buf()
        };
        EncounterLoader::load(&path, catalog)
    }

    /// Get the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
