//! # Gazetteer Core
//!
//! Driver-independent document-store contract for the gazetteer venue
//! directory. This crate defines the document model, the declarative index
//! descriptors, the lifecycle event observer API, and the repository layer;
//! backend crates (such as `gazetteer-mongodb`) implement the
//! [`DocumentStore`] trait against a real driver.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gazetteer_core::{GeoPoint, InMemoryStore, LoggingListener, Repository, Venue};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut venues = Repository::new(Arc::new(InMemoryStore::<Venue>::new()));
//!     venues.register_listener(Arc::new(LoggingListener));
//!     venues.ensure_indexes().await?;
//!
//!     let saved = venues
//!         .save(Venue::new("123 Main St", GeoPoint::new(1.0, 2.0)))
//!         .await?;
//!     println!("saved venue {}", saved.id.unwrap());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod events;
pub mod geo;
pub mod index;
pub mod memory;
pub mod repository;
pub mod store;
pub mod venue;

pub use error::{StoreError, StoreResult};
pub use events::{LoggingListener, StoreEvent, StoreEventListener};
pub use geo::GeoPoint;
pub use index::{IndexKind, IndexSpec};
pub use memory::InMemoryStore;
pub use repository::Repository;
pub use store::{check_unique_index_names, Document, DocumentStore};
pub use venue::Venue;

// Test utilities, for this crate's tests and for backend crates
#[cfg(feature = "test-utils")]
pub use events::RecordingListener;
