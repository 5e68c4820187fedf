//! Fast in-memory implementation of [`DocumentStore`] for unit tests.
//!
//! This implementation provides:
//! - **Fast**: no I/O, all operations in-memory
//! - **Deterministic**: no timing dependencies or external services
//! - **Isolated**: each instance has independent state
//!
//! It registers expansion rules only for the plain single-field index kinds;
//! geo kinds are deliberately unsupported so the fail-soft degradation path
//! (unregistered expansion rule leaves the field unindexed) stays covered by
//! fast tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::index::{IndexKind, IndexSpec};
use crate::store::{check_unique_index_names, Document, DocumentStore};

/// In-memory document store keyed by identifier.
pub struct InMemoryStore<T: Document> {
    docs: Arc<RwLock<HashMap<String, T>>>,
    indexes: Arc<RwLock<Vec<IndexSpec>>>,
}

impl<T: Document> InMemoryStore<T> {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            docs: Arc::new(RwLock::new(HashMap::new())),
            indexes: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Index specs this store accepted and applied.
    ///
    /// Specs skipped for lack of an expansion rule do not appear here.
    pub fn applied_indexes(&self) -> Vec<IndexSpec> {
        self.indexes
            .read()
            .expect("Index lock poisoned - store is in inconsistent state")
            .clone()
    }

    fn has_expansion_rule(kind: IndexKind) -> bool {
        matches!(kind, IndexKind::Ascending | IndexKind::Descending)
    }
}

impl<T: Document> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Document> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            docs: Arc::clone(&self.docs),
            indexes: Arc::clone(&self.indexes),
        }
    }
}

#[async_trait]
impl<T: Document> DocumentStore<T> for InMemoryStore<T> {
    async fn insert(&self, mut doc: T) -> StoreResult<T> {
        let id = match doc.id() {
            Some(id) => id.to_string(),
            None => {
                let id = uuid::Uuid::new_v4().to_string();
                doc.set_id(id.clone());
                id
            }
        };

        let mut docs = self
            .docs
            .write()
            .expect("Storage lock poisoned - store is in inconsistent state");
        if docs.contains_key(&id) {
            return Err(StoreError::Query(format!(
                "duplicate identifier '{}' in collection '{}'",
                id,
                T::collection_name()
            )));
        }
        docs.insert(id, doc.clone());
        Ok(doc)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<T>> {
        let docs = self
            .docs
            .read()
            .expect("Storage lock poisoned - store is in inconsistent state");
        Ok(docs.get(id).cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<T>> {
        let docs = self
            .docs
            .read()
            .expect("Storage lock poisoned - store is in inconsistent state");
        Ok(docs.values().cloned().collect())
    }

    async fn find_stream(&self) -> StoreResult<BoxStream<'static, StoreResult<T>>> {
        let all = self.find_all().await?;
        Ok(futures::stream::iter(all.into_iter().map(Ok)).boxed())
    }

    async fn replace(&self, doc: &T) -> StoreResult<()> {
        let id = doc.id().ok_or_else(|| {
            StoreError::Query("cannot replace a document without an identifier".to_string())
        })?;

        let mut docs = self
            .docs
            .write()
            .expect("Storage lock poisoned - store is in inconsistent state");
        match docs.get_mut(id) {
            Some(existing) => {
                *existing = doc.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(format!(
                "no document '{}' in collection '{}'",
                id,
                T::collection_name()
            ))),
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut docs = self
            .docs
            .write()
            .expect("Storage lock poisoned - store is in inconsistent state");
        Ok(docs.remove(id).is_some())
    }

    async fn count(&self) -> StoreResult<u64> {
        let docs = self
            .docs
            .read()
            .expect("Storage lock poisoned - store is in inconsistent state");
        Ok(docs.len() as u64)
    }

    async fn ensure_indexes(&self, specs: &[IndexSpec]) -> StoreResult<()> {
        check_unique_index_names(specs)?;

        let mut indexes = self
            .indexes
            .write()
            .expect("Index lock poisoned - store is in inconsistent state");
        for spec in specs {
            if !Self::has_expansion_rule(spec.kind) {
                warn!(
                    collection = T::collection_name(),
                    index = %spec.name,
                    kind = %spec.kind,
                    "no expansion rule registered for index kind; field stays unindexed"
                );
                continue;
            }

            match indexes.iter().find(|existing| existing.name == spec.name) {
                Some(existing) if existing == spec => {
                    // Re-applying the same spec is a no-op.
                }
                Some(_) => {
                    return Err(StoreError::Index(format!(
                        "index name '{}' already declared with a different spec",
                        spec.name
                    )));
                }
                None => {
                    debug!(
                        collection = T::collection_name(),
                        index = %spec.name,
                        kind = %spec.kind,
                        "applied index"
                    );
                    indexes.push(spec.clone());
                }
            }
        }
        Ok(())
    }
}
