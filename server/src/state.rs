//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the optional database pool, the in-memory catalog, the session
//! table, and the optional LLM client. The catalog is the authoritative copy;
//! Postgres only receives whole-collection snapshots from the persistence task.
//!
//! DIRTY TRACKING
//! ==============
//! Every mutation bumps the revision of the collection it touched and marks
//! it dirty. The flush task snapshots `(collection, revision)` pairs and only
//! clears a dirty mark when the revision is unchanged after the write.

use std::collections::HashMap;
use std::sync::Arc;

use catalog::{Catalog, Collection};
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::llm::LlmChat;
use crate::rate_limit::RateLimiter;

// =============================================================================
// CATALOG STATE
// =============================================================================

/// In-memory catalog plus per-collection revision bookkeeping.
#[derive(Debug, Default)]
pub struct CatalogState {
    pub catalog: Catalog,
    /// Monotonic mutation counter per collection.
    revisions: HashMap<Collection, u64>,
    /// Collections changed since their last successful flush, with the
    /// revision they were marked at.
    dirty: HashMap<Collection, u64>,
}

impl CatalogState {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog, revisions: HashMap::new(), dirty: HashMap::new() }
    }

    /// Record a mutation of `collection`.
    pub fn mark_dirty(&mut self, collection: Collection) {
        let revision = self.revisions.entry(collection).or_insert(0);
        *revision += 1;
        self.dirty.insert(collection, *revision);
    }

    #[must_use]
    pub fn revision(&self, collection: Collection) -> u64 {
        self.revisions.get(&collection).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_dirty(&self, collection: Collection) -> bool {
        self.dirty.contains_key(&collection)
    }

    /// Dirty collections with the revision they currently carry.
    #[must_use]
    pub fn dirty_snapshot(&self) -> Vec<(Collection, u64)> {
        let mut out: Vec<_> = self.dirty.keys().map(|c| (*c, self.revision(*c))).collect();
        out.sort_by_key(|(c, _)| c.key());
        out
    }

    /// Clear the dirty mark if nothing changed since `flushed_revision`.
    pub fn clear_if_unchanged(&mut self, collection: Collection, flushed_revision: u64) -> bool {
        if self.revision(collection) != flushed_revision {
            return false;
        }
        self.dirty.remove(&collection).is_some()
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    /// `None` when running memory-only.
    pub pool: Option<PgPool>,
    pub catalog: Arc<RwLock<CatalogState>>,
    /// Session token -> user id.
    pub sessions: Arc<RwLock<HashMap<String, String>>>,
    /// Optional LLM client. `None` if LLM env vars are not configured.
    pub llm: Option<Arc<dyn LlmChat>>,
    /// In-memory rate limiter for AI requests.
    pub rate_limiter: RateLimiter,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: Option<PgPool>, llm: Option<Arc<dyn LlmChat>>, config: ServerConfig) -> Self {
        Self {
            pool,
            catalog: Arc::new(RwLock::new(CatalogState::new(Catalog::seeded()))),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            llm,
            rate_limiter: RateLimiter::new(),
            config: Arc::new(config),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
