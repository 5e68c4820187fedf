//! # Gazetteer MongoDB Backend
//!
//! MongoDB implementation of the `gazetteer-core` document-store contract.
//! It wires the official async driver into the core repository layer:
//! configuration with documented defaults, a shared client handle, a typed
//! operations facade, declarative index setup, and one-shot startup wiring.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gazetteer_mongodb::{AppContext, MongoConfig};
//! use gazetteer_core::{GeoPoint, Venue};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Reads MONGODB_URI and MONGO_DATABASE, with documented defaults.
//!     let context = AppContext::bootstrap(MongoConfig::from_env()).await?;
//!
//!     let saved = context
//!         .venues
//!         .save(Venue::new("123 Main St", GeoPoint::new(1.0, 2.0)))
//!         .await?;
//!     println!("saved venue {}", saved.id.unwrap());
//!     Ok(())
//! }
//! ```

pub mod bootstrap;
pub mod client;
pub mod config;
pub mod indexes;
pub mod operations;

pub use bootstrap::{AppContext, RepositoryFactory};
pub use client::MongoHandle;
pub use config::MongoConfig;
pub use indexes::index_model_for;
pub use operations::MongoOperations;

// Re-export the core contract so backend users need one import path
pub use gazetteer_core::{
    Document, DocumentStore, GeoPoint, IndexKind, IndexSpec, LoggingListener, Repository,
    StoreError, StoreEvent, StoreEventListener, StoreResult, Venue,
};
