//! MongoDB operations facade.
//!
//! [`MongoOperations`] is the mapping/template layer over one typed
//! collection: it implements the [`DocumentStore`] contract against the
//! driver, converts driver errors into the core taxonomy, and assigns
//! identifiers on first write. Repositories are built on top of it; direct
//! use is for driver-level operations the repository does not cover, such
//! as [`MongoOperations::find_near`].

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use gazetteer_core::{
    check_unique_index_names, Document, DocumentStore, GeoPoint, IndexSpec, StoreError,
    StoreResult,
};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, Document as BsonDocument};
use mongodb::{Collection, Database};
use tracing::debug;

use crate::indexes::index_model_for;

/// Typed operations over one MongoDB collection.
pub struct MongoOperations<T: Document> {
    database: Database,
    collection: Collection<T>,
}

impl<T: Document> Clone for MongoOperations<T> {
    fn clone(&self) -> Self {
        Self {
            database: self.database.clone(),
            collection: self.collection.clone(),
        }
    }
}

impl<T: Document> std::fmt::Debug for MongoOperations<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoOperations")
            .field("database", &self.database.name())
            .field("collection", &T::collection_name())
            .finish()
    }
}

impl<T: Document> MongoOperations<T> {
    /// Derive the operations facade for `T`'s collection from a database
    /// handle.
    pub fn new(database: Database) -> Self {
        let collection = database.collection::<T>(T::collection_name());
        Self {
            database,
            collection,
        }
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// The underlying typed collection, for driver-level access.
    pub fn collection(&self) -> &Collection<T> {
        &self.collection
    }

    /// Find documents whose `field` is near `point`, closest first.
    ///
    /// Requires the planar geo index declared for the field; `max_distance`
    /// is in the same planar units as the stored coordinates.
    pub async fn find_near(
        &self,
        field: &str,
        point: GeoPoint,
        max_distance: Option<f64>,
    ) -> StoreResult<Vec<T>> {
        let mut near = BsonDocument::new();
        near.insert(
            "$near",
            Bson::Array(vec![Bson::Double(point.x), Bson::Double(point.y)]),
        );
        if let Some(distance) = max_distance {
            near.insert("$maxDistance", Bson::Double(distance));
        }
        let mut filter = BsonDocument::new();
        filter.insert(field, near);

        let cursor = self
            .collection
            .find(filter)
            .await
            .map_err(StoreError::query)?;
        cursor.try_collect().await.map_err(StoreError::query)
    }
}

#[async_trait]
impl<T: Document> DocumentStore<T> for MongoOperations<T> {
    async fn insert(&self, mut doc: T) -> StoreResult<T> {
        // Identifier assignment happens client-side immediately before the
        // first write, so the returned value always carries it.
        if doc.id().is_none() {
            doc.set_id(ObjectId::new().to_hex());
        }

        self.collection
            .insert_one(&doc)
            .await
            .map_err(StoreError::query)?;
        Ok(doc)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<T>> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(StoreError::query)
    }

    async fn find_all(&self) -> StoreResult<Vec<T>> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(StoreError::query)?;
        cursor.try_collect().await.map_err(StoreError::query)
    }

    async fn find_stream(&self) -> StoreResult<BoxStream<'static, StoreResult<T>>> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(StoreError::query)?;
        Ok(cursor.map(|item| item.map_err(StoreError::query)).boxed())
    }

    async fn replace(&self, doc: &T) -> StoreResult<()> {
        let id = doc.id().ok_or_else(|| {
            StoreError::Query("cannot replace a document without an identifier".to_string())
        })?;

        let result = self
            .collection
            .replace_one(doc! { "_id": id }, doc)
            .await
            .map_err(StoreError::query)?;
        if result.matched_count == 0 {
            return Err(StoreError::NotFound(format!(
                "no document '{}' in collection '{}'",
                id,
                T::collection_name()
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(StoreError::query)?;
        Ok(result.deleted_count > 0)
    }

    async fn count(&self) -> StoreResult<u64> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(StoreError::query)
    }

    async fn ensure_indexes(&self, specs: &[IndexSpec]) -> StoreResult<()> {
        check_unique_index_names(specs)?;

        for spec in specs {
            let model = index_model_for(spec);
            self.collection.create_index(model).await.map_err(|e| {
                StoreError::Index(format!("failed to create index '{}': {}", spec.name, e))
            })?;
            debug!(
                collection = T::collection_name(),
                index = %spec.name,
                kind = %spec.kind,
                "applied index"
            );
        }
        Ok(())
    }
}
