//! Document and store abstractions.
//!
//! [`Document`] describes a mappable type: which collection it lives in, how
//! its identifier is read and assigned, and which indexes its fields
//! declare. [`DocumentStore`] is the minimal async interface a backend must
//! provide; the repository layer builds its calling conventions and
//! lifecycle events on top of it.
//!
//! ## Design
//!
//! - **Minimal interface**: only the operations the repository actually
//!   needs.
//! - **Async-first**: every operation returns a future; backends decide how
//!   the work is executed.
//! - **No leaky abstractions**: nothing here names a concrete driver.
//!
//! Implementations must be Send + Sync so handles can be shared across
//! request-handling tasks after the one-time construction at startup.

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreResult;
use crate::index::IndexSpec;

/// A type stored as a document in one collection.
///
/// The identifier is an opaque string: absent until the first write,
/// immutable once persisted. `index_specs` is the declarative attachment
/// point for per-field index descriptors; the default declares none.
pub trait Document:
    Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static
{
    /// Name of the collection documents of this type live in.
    fn collection_name() -> &'static str;

    /// The identifier, if one has been assigned.
    fn id(&self) -> Option<&str>;

    /// Assign the identifier. Called by the store exactly once, on first
    /// write.
    fn set_id(&mut self, id: String);

    /// Index descriptors for this document's fields.
    fn index_specs() -> Vec<IndexSpec> {
        Vec::new()
    }
}

/// Minimal async interface over one document collection.
///
/// # Method categories
///
/// - **Write**: `insert`, `replace`, `delete`
/// - **Read**: `find_by_id`, `find_all`, `find_stream`, `count`
/// - **Setup**: `ensure_indexes`
#[async_trait]
pub trait DocumentStore<T: Document>: Send + Sync {
    /// Insert a new document.
    ///
    /// When the document carries no identifier the store assigns one;
    /// the returned value always carries its identifier.
    async fn insert(&self, doc: T) -> StoreResult<T>;

    /// Find a document by identifier.
    ///
    /// # Returns
    /// `Ok(Some(doc))` if found, `Ok(None)` if not found.
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<T>>;

    /// Read every document in the collection.
    async fn find_all(&self) -> StoreResult<Vec<T>>;

    /// Read every document in the collection as a stream.
    ///
    /// Items arrive in store order; each is an independent result so a
    /// mapping failure on one document does not end the stream.
    async fn find_stream(&self) -> StoreResult<BoxStream<'static, StoreResult<T>>>;

    /// Replace an existing document, matched by its identifier.
    async fn replace(&self, doc: &T) -> StoreResult<()>;

    /// Delete a document by identifier.
    ///
    /// # Returns
    /// `Ok(true)` if deleted, `Ok(false)` if no such document existed.
    async fn delete(&self, id: &str) -> StoreResult<bool>;

    /// Number of documents in the collection.
    async fn count(&self) -> StoreResult<u64>;

    /// Expand and apply index descriptors.
    ///
    /// Idempotent: safe to call multiple times with the same specs.
    /// Duplicate index names within one call are rejected. A spec whose
    /// kind this store has no expansion rule for is skipped with a warning
    /// rather than failing, leaving the field unindexed.
    async fn ensure_indexes(&self, specs: &[IndexSpec]) -> StoreResult<()>;
}

/// Reject duplicate index names within one setup call.
///
/// Shared by store implementations; the named-index-per-collection
/// invariant holds regardless of backend.
pub fn check_unique_index_names(specs: &[IndexSpec]) -> StoreResult<()> {
    let mut seen = std::collections::HashSet::new();
    for spec in specs {
        if !seen.insert(spec.name.as_str()) {
            return Err(crate::error::StoreError::Index(format!(
                "duplicate index name '{}' in collection setup",
                spec.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{IndexKind, IndexSpec};

    #[test]
    fn test_unique_index_names_accepts_distinct() {
        let specs = vec![
            IndexSpec::geo2d("location", "venue_location"),
            IndexSpec::new("address", "venue_address", IndexKind::Ascending),
        ];
        assert!(check_unique_index_names(&specs).is_ok());
    }

    #[test]
    fn test_unique_index_names_rejects_duplicates() {
        let specs = vec![
            IndexSpec::geo2d("location", "venue_location"),
            IndexSpec::new("address", "venue_location", IndexKind::Ascending),
        ];
        let err = check_unique_index_names(&specs).unwrap_err();
        assert!(err.to_string().contains("venue_location"));
    }
}
