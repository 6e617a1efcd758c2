//! Model catalog: the table of profiles the selector scores.
//!
//! The catalog is data, not code: profiles come from
//! 1. **Embedded seed**: compiled-in JSON, always available
//! 2. **JSON file**: e.g. the `selector.catalog_path` config entry
//!
//! Adding a profile never requires touching the scoring logic; the selector
//! works generically over whatever the catalog holds.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::warn;

use crate::types::ModelProfile;
use crate::{AugurError, Result};

/// Immutable-after-load set of model profiles, keyed by id.
///
/// Iteration order is by id so scoring is reproducible.
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    entries: BTreeMap<String, ModelProfile>,
}

impl ModelCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a profile, replacing any existing profile with the same id.
    pub fn insert(&mut self, profile: ModelProfile) {
        self.entries.insert(profile.id.clone(), profile);
    }

    /// Get a profile by id.
    pub fn get(&self, id: &str) -> Option<&ModelProfile> {
        self.entries.get(id)
    }

    /// All profiles, ordered by id.
    pub fn list(&self) -> Vec<&ModelProfile> {
        self.entries.values().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a catalog from a JSON array of profiles.
    ///
    /// Later entries with a repeated id replace earlier ones.
    pub fn from_json(json: &str) -> Result<Self> {
        let profiles: Vec<ModelProfile> = serde_json::from_str(json)
            .map_err(|e| AugurError::configuration(format!("invalid model catalog: {e}")))?;
        Ok(profiles.into_iter().collect())
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AugurError::configuration(format!("Failed to read catalog file {path:?}: {e}"))
        })?;
        Self::from_json(&content)
    }

    /// Create a catalog pre-populated with the embedded seed data.
    ///
    /// The seed is compiled in and covered by tests; should it ever fail to
    /// parse, the catalog comes back empty and selection reports a
    /// configuration error.
    pub fn with_embedded_seed() -> Self {
        match Self::from_json(EMBEDDED_SEED) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "failed to parse embedded model seed");
                Self::new()
            }
        }
    }
}

impl FromIterator<ModelProfile> for ModelCatalog {
    fn from_iter<I: IntoIterator<Item = ModelProfile>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for profile in iter {
            catalog.insert(profile);
        }
        catalog
    }
}

/// Raw JSON seed data compiled into the binary.
const EMBEDDED_SEED: &str = include_str!("seed.json");
