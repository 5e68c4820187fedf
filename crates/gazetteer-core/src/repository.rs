//! Repository over one document collection.
//!
//! One concrete data-access type exposing three calling conventions over the
//! same underlying store:
//!
//! - **future**: plain `async fn`s (`save`, `find_by_id`, `find_all`,
//!   `delete`, `count`, `exists`);
//! - **stream**: [`Repository::stream_all`] yields documents as a
//!   [`BoxStream`];
//! - **callback**: [`Repository::for_each`] drives the stream and invokes an
//!   async callback per document.
//!
//! All three read and write the same collection; a record saved through one
//! convention reads back identically through any other.
//!
//! The repository also dispatches [`StoreEvent`]s to registered listeners
//! around each operation. Dispatch is best-effort and never fails the
//! operation.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::BoxStream;
use futures::StreamExt;

use crate::error::StoreResult;
use crate::events::{StoreEvent, StoreEventListener};
use crate::store::{Document, DocumentStore};

/// Typed data access over one collection.
///
/// Cheap to clone; clones share the underlying store handle and listener
/// set. Safe for concurrent use after construction.
pub struct Repository<T: Document> {
    store: Arc<dyn DocumentStore<T>>,
    listeners: Vec<Arc<dyn StoreEventListener>>,
}

impl<T: Document> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            listeners: self.listeners.clone(),
        }
    }
}

impl<T: Document> std::fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("collection", &T::collection_name())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<T: Document> Repository<T> {
    /// Create a repository over a store, with no listeners registered.
    pub fn new(store: Arc<dyn DocumentStore<T>>) -> Self {
        Self {
            store,
            listeners: Vec::new(),
        }
    }

    /// Register a lifecycle event listener.
    pub fn register_listener(&mut self, listener: Arc<dyn StoreEventListener>) {
        self.listeners.push(listener);
    }

    /// Builder-style variant of [`Repository::register_listener`].
    pub fn with_listener(mut self, listener: Arc<dyn StoreEventListener>) -> Self {
        self.register_listener(listener);
        self
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &Arc<dyn DocumentStore<T>> {
        &self.store
    }

    async fn dispatch(&self, event: StoreEvent) {
        for listener in &self.listeners {
            listener.on_event(&event).await;
        }
    }

    // === Future convention ===

    /// Save a document: insert when it has no identifier, replace otherwise.
    ///
    /// Returns the saved value; on first write it carries the identifier the
    /// store assigned.
    pub async fn save(&self, doc: T) -> StoreResult<T> {
        self.dispatch(StoreEvent::BeforeSave {
            collection: T::collection_name().to_string(),
            id: doc.id().map(str::to_string),
        })
        .await;

        let saved = match doc.id() {
            Some(_) => {
                self.store.replace(&doc).await?;
                doc
            }
            None => self.store.insert(doc).await?,
        };

        self.dispatch(StoreEvent::AfterSave {
            collection: T::collection_name().to_string(),
            id: saved.id().map(str::to_string),
        })
        .await;
        Ok(saved)
    }

    /// Find one document by identifier.
    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<T>> {
        let found = self.store.find_by_id(id).await?;
        if found.is_some() {
            self.dispatch(StoreEvent::AfterLoad {
                collection: T::collection_name().to_string(),
                id: Some(id.to_string()),
            })
            .await;
        }
        Ok(found)
    }

    /// Read the whole collection at once.
    pub async fn find_all(&self) -> StoreResult<Vec<T>> {
        let docs = self.store.find_all().await?;
        for doc in &docs {
            self.dispatch(StoreEvent::AfterLoad {
                collection: T::collection_name().to_string(),
                id: doc.id().map(str::to_string),
            })
            .await;
        }
        Ok(docs)
    }

    /// Delete a document by identifier.
    ///
    /// # Returns
    /// `Ok(true)` if deleted, `Ok(false)` if no such document existed.
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        self.dispatch(StoreEvent::BeforeDelete {
            collection: T::collection_name().to_string(),
            id: id.to_string(),
        })
        .await;

        let deleted = self.store.delete(id).await?;
        if deleted {
            self.dispatch(StoreEvent::AfterDelete {
                collection: T::collection_name().to_string(),
                id: id.to_string(),
            })
            .await;
        }
        Ok(deleted)
    }

    /// Number of documents in the collection.
    pub async fn count(&self) -> StoreResult<u64> {
        self.store.count().await
    }

    /// Whether a document with this identifier exists.
    ///
    /// Existence checks do not count as loads, so no event fires.
    pub async fn exists(&self, id: &str) -> StoreResult<bool> {
        Ok(self.store.find_by_id(id).await?.is_some())
    }

    /// Expand and apply the document type's declared index descriptors.
    ///
    /// Run once at startup; idempotent.
    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        self.store.ensure_indexes(&T::index_specs()).await
    }

    // === Stream convention ===

    /// Read the whole collection as a stream.
    ///
    /// Each materialized document fires an `AfterLoad` event before it is
    /// yielded, same as the other read paths.
    pub async fn stream_all(&self) -> StoreResult<BoxStream<'static, StoreResult<T>>> {
        let inner = self.store.find_stream().await?;
        let listeners = self.listeners.clone();

        let stream = inner.then(move |item| {
            let listeners = listeners.clone();
            async move {
                if let Ok(doc) = &item {
                    let event = StoreEvent::AfterLoad {
                        collection: T::collection_name().to_string(),
                        id: doc.id().map(str::to_string),
                    };
                    for listener in &listeners {
                        listener.on_event(&event).await;
                    }
                }
                item
            }
        });
        Ok(stream.boxed())
    }

    // === Callback convention ===

    /// Invoke an async callback for every document in the collection.
    ///
    /// Drives [`Repository::stream_all`] to completion and returns the
    /// number of documents handed to the callback.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// repository
    ///     .for_each(|venue| {
    ///         Box::pin(async move {
    ///             println!("{}", venue.address);
    ///         })
    ///     })
    ///     .await?;
    /// ```
    pub async fn for_each<F>(&self, mut callback: F) -> StoreResult<usize>
    where
        F: FnMut(T) -> BoxFuture<'static, ()> + Send,
    {
        let mut stream = self.stream_all().await?;
        let mut handled = 0usize;
        while let Some(item) = stream.next().await {
            callback(item?).await;
            handled += 1;
        }
        Ok(handled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use crate::memory::InMemoryStore;
    use crate::venue::Venue;

    fn repository() -> Repository<Venue> {
        Repository::new(Arc::new(InMemoryStore::<Venue>::new()))
    }

    #[tokio::test]
    async fn test_save_assigns_identifier_once() {
        let repo = repository();

        let saved = repo
            .save(Venue::new("123 Main St", GeoPoint::new(1.0, 2.0)))
            .await
            .unwrap();
        let id = saved.id.clone().expect("identifier assigned on save");

        // Saving again must keep the identifier stable.
        let resaved = repo.save(saved).await.unwrap();
        assert_eq!(resaved.id.as_deref(), Some(id.as_str()));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_exists_and_delete() {
        let repo = repository();
        let saved = repo
            .save(Venue::new("123 Main St", GeoPoint::new(1.0, 2.0)))
            .await
            .unwrap();
        let id = saved.id.unwrap();

        assert!(repo.exists(&id).await.unwrap());
        assert!(repo.delete(&id).await.unwrap());
        assert!(!repo.exists(&id).await.unwrap());
        assert!(!repo.delete(&id).await.unwrap());
    }
}
