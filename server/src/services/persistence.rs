//! Persistence service — hydrate the catalog and flush dirty collections.
//!
//! DESIGN
//! ======
//! Each collection is stored as one JSON array under its fixed key in the
//! `collections` table. At startup `hydrate` loads whatever keys exist; a
//! missing key keeps the seed data and is marked dirty so the first flush
//! writes it. A background task then flushes dirty collections, sleeping
//! `flush_interval_ms` between cycles.
//!
//! ERROR HANDLING
//! ==============
//! Dirty marks are cleared only after a successful write, and only when the
//! collection's revision did not move during the write. Repeated upserts are
//! acceptable; silent data loss is not. A corrupt stored blob is logged and
//! left in place, and the in-memory seed is served until an edit overwrites it.

use std::time::Duration;

use catalog::{CatalogError, Collection};
use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// One dirty collection captured for writing.
#[derive(Debug)]
pub(crate) struct DirtyCollection {
    pub(crate) collection: Collection,
    pub(crate) revision: u64,
    pub(crate) body: Value,
}

// =============================================================================
// HYDRATE
// =============================================================================

/// Load all stored collections into the in-memory catalog.
///
/// # Errors
///
/// Returns a database error if a read fails. Corrupt blobs are not errors.
pub async fn hydrate(state: &AppState, pool: &PgPool) -> Result<(), PersistenceError> {
    for collection in Collection::ALL {
        let stored = load_blob(pool, collection.key()).await?;
        let mut guard = state.catalog.write().await;
        match stored {
            Some(body) => {
                if let Err(e) = guard.catalog.load_collection(collection, body) {
                    warn!(error = %e, key = collection.key(), "stored collection unreadable; serving seed");
                } else {
                    info!(key = collection.key(), "collection hydrated");
                }
            }
            None => {
                guard.catalog.reseed(collection);
                guard.mark_dirty(collection);
                info!(key = collection.key(), "collection missing; seeded");
            }
        }
    }
    Ok(())
}

// =============================================================================
// FLUSH
// =============================================================================

/// Spawn the background persistence task. Returns `None` when memory-only.
pub fn spawn_persistence_task(state: AppState) -> Option<JoinHandle<()>> {
    let pool = state.pool.clone()?;
    let flush_interval_ms = state.config.flush_interval_ms;
    info!(flush_interval_ms, "collection persistence flush configured");
    Some(tokio::spawn(async move {
        loop {
            flush_all_dirty(&state, &pool).await;
            tokio::time::sleep(Duration::from_millis(flush_interval_ms)).await;
        }
    }))
}

pub(crate) async fn flush_all_dirty(state: &AppState, pool: &PgPool) {
    // Snapshot under the read lock, write without holding it.
    let batch = match collect_dirty(state).await {
        Ok(batch) => batch,
        Err(e) => {
            error!(error = %e, "persistence snapshot failed");
            return;
        }
    };

    for dirty in batch {
        match store_blob(pool, dirty.collection.key(), &dirty.body).await {
            Ok(()) => {
                let cleared = ack_flushed(state, &dirty).await;
                if !cleared {
                    info!(key = dirty.collection.key(), "collection changed during flush; will retry");
                }
            }
            Err(e) => {
                error!(error = %e, key = dirty.collection.key(), "persistence flush failed");
            }
        }
    }
}

pub(crate) async fn collect_dirty(state: &AppState) -> Result<Vec<DirtyCollection>, CatalogError> {
    let guard = state.catalog.read().await;
    guard
        .dirty_snapshot()
        .into_iter()
        .map(|(collection, revision)| {
            let body = guard.catalog.collection_json(collection)?;
            Ok(DirtyCollection { collection, revision, body })
        })
        .collect()
}

pub(crate) async fn ack_flushed(state: &AppState, dirty: &DirtyCollection) -> bool {
    state
        .catalog
        .write()
        .await
        .clear_if_unchanged(dirty.collection, dirty.revision)
}

// =============================================================================
// SQL
// =============================================================================

async fn load_blob(pool: &PgPool, key: &str) -> Result<Option<Value>, sqlx::Error> {
    let row: Option<Json<Value>> = sqlx::query_scalar("SELECT body FROM collections WHERE key = $1")
        .bind(key)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|Json(body)| body))
}

async fn store_blob(pool: &PgPool, key: &str, body: &Value) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO collections (key, body, updated_at) VALUES ($1, $2, now()) \
         ON CONFLICT (key) DO UPDATE SET body = EXCLUDED.body, updated_at = now()",
    )
    .bind(key)
    .bind(Json(body))
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
