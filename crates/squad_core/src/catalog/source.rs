//! Catalog source resolution
//!
//! Source artifact: `data/catalog/attribute_requirements.yaml`, embedded at
//! compile time.
//!
//! Resolution order for [`load_catalog`]:
//! 1) explicit path passed by the caller
//! 2) `SQUAD_CATALOG_PATH` if set and non-empty
//! 3) embedded catalog

use once_cell::sync::OnceCell;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use super::AttributeCatalog;
use crate::error::CatalogError;

/// Env var for overriding the catalog file.
pub const CATALOG_PATH_ENV: &str = "SQUAD_CATALOG_PATH";

pub const EMBEDDED_CATALOG_YAML: &str =
    include_str!("../../../../data/catalog/attribute_requirements.yaml");

static DEFAULT_CATALOG: OnceCell<AttributeCatalog> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Explicit(PathBuf),
    Env(PathBuf),
    Embedded,
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Explicit(p) => write!(f, "{}", p.display()),
            CatalogSource::Env(p) => write!(f, "{} (from {})", p.display(), CATALOG_PATH_ENV),
            CatalogSource::Embedded => f.write_str("embedded"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: AttributeCatalog,
    pub source: CatalogSource,
}

/// Path from `SQUAD_CATALOG_PATH`, if set to something non-blank.
pub fn resolve_catalog_path() -> Option<PathBuf> {
    env::var(CATALOG_PATH_ENV).ok().and_then(|raw| {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    })
}

/// Load the catalog following the resolution order above.
///
/// A configured file that fails to load is an error; it does not fall back
/// to the embedded data.
pub fn load_catalog(explicit: Option<&Path>) -> Result<LoadedCatalog, CatalogError> {
    let source = match explicit {
        Some(path) => CatalogSource::Explicit(path.to_path_buf()),
        None => match resolve_catalog_path() {
            Some(path) => CatalogSource::Env(path),
            None => CatalogSource::Embedded,
        },
    };

    let catalog = match &source {
        CatalogSource::Explicit(path) | CatalogSource::Env(path) => {
            AttributeCatalog::from_path(path)?
        }
        CatalogSource::Embedded => AttributeCatalog::from_yaml_str(EMBEDDED_CATALOG_YAML)?,
    };

    tracing::info!(source = %source, "using attribute catalog");
    Ok(LoadedCatalog { catalog, source })
}

/// Shared embedded catalog, parsed on first use.
pub fn default_catalog() -> Result<&'static AttributeCatalog, CatalogError> {
    DEFAULT_CATALOG.get_or_try_init(|| AttributeCatalog::from_yaml_str(EMBEDDED_CATALOG_YAML))
}
