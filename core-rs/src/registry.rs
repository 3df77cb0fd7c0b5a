/**
 * registry.rs
 * Platform -> token schema store
 *
 * Every save creates a new immutable revision:
 * - Revisions are numbered per platform, starting at 1
 * - `get` hands out the latest revision behind an `Arc`, so a validation that
 *   already resolved its schema keeps a consistent view while a newer
 *   revision is being saved
 * - Saves are last-write-wins (upsert)
 * - Only the newest `history_limit` revisions per platform are retained;
 *   revision numbers keep counting up after older ones are dropped
 *
 * Lookups of unknown platforms return `None`; the validator treats that as
 * "use the default regex rules", never as an error.
 */

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use crate::errors::{Result, TaxonError};
use crate::schema::{self, TokenPositionSchema};

/// One saved revision of a platform schema
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSnapshot {
    pub platform: String,
    pub revision: u64,
    pub saved_at: DateTime<Utc>,
    #[serde(rename = "tokenPositions")]
    pub schema: Arc<TokenPositionSchema>,
}

/// Storage seam for platform schemas
pub trait SchemaStore: Send + Sync {
    /// Insert or replace the schema for `platform`, returning the new revision
    fn save(&self, platform: &str, schema: TokenPositionSchema) -> Result<u64>;

    /// Latest revision for `platform`
    fn get(&self, platform: &str) -> Option<SchemaSnapshot>;

    /// Every revision for `platform`, oldest first
    fn history(&self, platform: &str) -> Vec<SchemaSnapshot>;

    /// Platforms with at least one revision, sorted by name
    fn platforms(&self) -> Vec<String>;

    /// Drop all revisions for `platform`; true if anything was removed
    fn remove(&self, platform: &str) -> bool;
}

/// Revisions retained per platform unless overridden
pub const DEFAULT_HISTORY_LIMIT: usize = 32;

/// Process-local schema store guarded by a read-write lock
pub struct InMemorySchemaStore {
    revisions: RwLock<BTreeMap<String, Vec<SchemaSnapshot>>>,
    history_limit: usize,
}

impl Default for InMemorySchemaStore {
    fn default() -> Self {
        Self {
            revisions: RwLock::new(BTreeMap::new()),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl InMemorySchemaStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Retain at most `limit` revisions per platform (minimum 1)
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    /// Store seeded with the shipped platform presets
    pub fn with_builtin_platforms() -> Result<Self> {
        let store = Self::new();
        for (platform, schema) in schema::builtin_platforms()? {
            store.save(&platform, schema)?;
        }
        Ok(store)
    }
}

impl SchemaStore for InMemorySchemaStore {
    fn save(&self, platform: &str, schema: TokenPositionSchema) -> Result<u64> {
        let platform = platform.trim();
        if platform.is_empty() {
            return Err(TaxonError::InvalidInput(
                "platform id must be a non-empty string".to_string(),
            ));
        }

        let positions = schema.len();
        let mut revisions = self.revisions.write();
        let entries = revisions.entry(platform.to_string()).or_default();
        let revision = entries.last().map(|s| s.revision + 1).unwrap_or(1);

        entries.push(SchemaSnapshot {
            platform: platform.to_string(),
            revision,
            saved_at: Utc::now(),
            schema: Arc::new(schema),
        });
        if entries.len() > self.history_limit {
            let excess = entries.len() - self.history_limit;
            entries.drain(..excess);
        }

        info!(platform, revision, positions, "saved token schema");
        Ok(revision)
    }

    fn get(&self, platform: &str) -> Option<SchemaSnapshot> {
        self.revisions
            .read()
            .get(platform.trim())
            .and_then(|entries| entries.last().cloned())
    }

    fn history(&self, platform: &str) -> Vec<SchemaSnapshot> {
        self.revisions
            .read()
            .get(platform.trim())
            .cloned()
            .unwrap_or_default()
    }

    fn platforms(&self) -> Vec<String> {
        self.revisions.read().keys().cloned().collect()
    }

    fn remove(&self, platform: &str) -> bool {
        self.revisions.write().remove(platform.trim()).is_some()
    }
}
