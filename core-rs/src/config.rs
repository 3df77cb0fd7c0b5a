/**
 * config.rs
 * Rules files and engine settings
 *
 * Rules file format (YAML, or JSON for `.json` paths):
 * ```yaml
 * apiVersion: taxon/v1
 * kind: RuleBook
 * includeBuiltin: true
 * platforms:
 *   - platform: Acme Ads
 *     tokenPositions:
 *       - position: 0
 *         name: Brand
 *         required: true
 *         allowedValues: [acme]
 *       - position: 1
 *         name: Date
 *         required: true
 *         formatPattern: "^20[0-9]{2}$"
 * ```
 *
 * Every schema is validated while the file is parsed, so a malformed
 * position anywhere rejects the whole file.
 */

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::batch::DEFAULT_ITEM_TIMEOUT;
use crate::errors::{Result, TaxonError};
use crate::registry::{InMemorySchemaStore, SchemaStore};
use crate::schema::TokenPositionSchema;

pub const API_VERSION: &str = "taxon/v1";
pub const KIND: &str = "RuleBook";

pub const ENV_RULES: &str = "TAXON_RULES";
pub const ENV_ITEM_TIMEOUT_MS: &str = "TAXON_ITEM_TIMEOUT_MS";
pub const ENV_BUILTIN: &str = "TAXON_BUILTIN";

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_kind() -> String {
    KIND.to_string()
}

fn default_true() -> bool {
    true
}

/// Schema for one platform inside a rules file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformRules {
    pub platform: String,
    pub token_positions: TokenPositionSchema,
}

/// A set of platform schemas loaded from disk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuleBook {
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Seed the built-in platform presets before applying `platforms`
    #[serde(default = "default_true")]
    pub include_builtin: bool,
    #[serde(default)]
    pub platforms: Vec<PlatformRules>,
}

impl Default for RuleBook {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            include_builtin: true,
            platforms: Vec::new(),
        }
    }
}

impl RuleBook {
    /// Load a rules file
    ///
    /// # Arguments
    /// * `path` - YAML file, or JSON when the extension is `.json`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TaxonError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to read rules file {}: {}", path.display(), e),
            ))
        })?;

        let book: RuleBook = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        book.check_envelope()?;
        Ok(book)
    }

    /// Write the rules file, creating parent directories as needed
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        fs::write(path, content)?;
        Ok(())
    }

    /// Capture the latest revision of every platform in `store`
    pub fn from_store(store: &dyn SchemaStore) -> Self {
        let platforms = store
            .platforms()
            .into_iter()
            .filter_map(|platform| store.get(&platform))
            .map(|snapshot| PlatformRules {
                platform: snapshot.platform,
                token_positions: (*snapshot.schema).clone(),
            })
            .collect();

        Self {
            include_builtin: false,
            platforms,
            ..Self::default()
        }
    }

    /// Save every platform schema into `store`, returning how many were applied
    pub fn apply(&self, store: &dyn SchemaStore) -> Result<usize> {
        for rules in &self.platforms {
            store.save(&rules.platform, rules.token_positions.clone())?;
        }
        Ok(self.platforms.len())
    }

    /// New in-memory store holding this book's schemas (and presets if enabled)
    pub fn build_store(&self) -> Result<InMemorySchemaStore> {
        let store = if self.include_builtin {
            InMemorySchemaStore::with_builtin_platforms()?
        } else {
            InMemorySchemaStore::new()
        };
        self.apply(&store)?;
        Ok(store)
    }

    fn check_envelope(&self) -> Result<()> {
        if self.kind != KIND {
            return Err(TaxonError::MalformedSchema(format!(
                "expected kind '{}', got '{}'",
                KIND, self.kind
            )));
        }
        if self.platforms.iter().any(|p| p.platform.trim().is_empty()) {
            return Err(TaxonError::MalformedSchema(
                "every platform entry needs a non-empty name".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Runtime settings resolved from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub rules_path: Option<PathBuf>,
    pub item_timeout: Duration,
    pub include_builtin: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            rules_path: None,
            item_timeout: DEFAULT_ITEM_TIMEOUT,
            include_builtin: true,
        }
    }
}

impl EngineSettings {
    /// Read `TAXON_RULES`, `TAXON_ITEM_TIMEOUT_MS` and `TAXON_BUILTIN`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(path) = lookup(ENV_RULES).filter(|p| !p.trim().is_empty()) {
            settings.rules_path = Some(PathBuf::from(path));
        }

        if let Some(raw) = lookup(ENV_ITEM_TIMEOUT_MS) {
            let ms: u64 = raw.trim().parse().map_err(|_| {
                TaxonError::InvalidInput(format!("{} must be a number of milliseconds, got '{}'", ENV_ITEM_TIMEOUT_MS, raw))
            })?;
            settings.item_timeout = Duration::from_millis(ms);
        }

        if let Some(raw) = lookup(ENV_BUILTIN) {
            settings.include_builtin = !matches!(raw.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off");
        }

        Ok(settings)
    }

    /// Store described by these settings
    ///
    /// Without a rules file the store holds the presets (unless disabled).
    /// With one, the file's own `includeBuiltin` flag is combined with the
    /// environment switch.
    pub fn build_store(&self) -> Result<InMemorySchemaStore> {
        match &self.rules_path {
            Some(path) => {
                let mut book = RuleBook::load(path)?;
                book.include_builtin = book.include_builtin && self.include_builtin;
                book.build_store()
            }
            None if self.include_builtin => InMemorySchemaStore::with_builtin_platforms(),
            None => Ok(InMemorySchemaStore::new()),
        }
    }
}
