//! Startup wiring.
//!
//! [`AppContext::bootstrap`] builds every singleton in dependency order
//! (client, connectivity check, database handle, repository factory, venue
//! repository with the diagnostic listener, index setup) and returns them
//! in one explicit struct. Construction happens once at process start; any
//! failure propagates to the caller, which is expected to abort startup.
//! No retry policy exists at this layer.

use std::sync::Arc;

use gazetteer_core::{Document, LoggingListener, Repository, StoreResult, Venue};
use mongodb::Database;
use tracing::info;

use crate::client::MongoHandle;
use crate::config::MongoConfig;
use crate::operations::MongoOperations;

/// Derives typed repositories from one database handle.
///
/// Every repository produced by the same factory operates over the same
/// underlying database; the calling-convention flavors (future, stream,
/// callback) are methods on the produced [`Repository`].
#[derive(Debug, Clone)]
pub struct RepositoryFactory {
    database: Database,
}

impl RepositoryFactory {
    /// Create a factory over a database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Derive the operations facade for a document type.
    pub fn operations<T: Document>(&self) -> MongoOperations<T> {
        MongoOperations::new(self.database.clone())
    }

    /// Derive a repository for a document type, with no listeners
    /// registered.
    pub fn repository<T: Document>(&self) -> Repository<T> {
        Repository::new(Arc::new(self.operations::<T>()))
    }
}

/// The application's store singletons, built once at startup.
///
/// Holds no mutable per-request state; every field is safe to share across
/// request-handling tasks for the life of the process.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Configuration the context was built from.
    pub config: MongoConfig,
    /// Shared client handle owning the connection pool.
    pub client: MongoHandle,
    /// Logical database handle derived from the client.
    pub database: Database,
    /// Factory for further typed repositories.
    pub factory: RepositoryFactory,
    /// Venue repository with the diagnostic listener registered.
    pub venues: Repository<Venue>,
    /// The diagnostic lifecycle observer registered on [`AppContext::venues`].
    pub listener: Arc<LoggingListener>,
}

impl AppContext {
    /// Build the full wiring graph from a configuration.
    ///
    /// Order: client, ping (an unreachable store fails startup here),
    /// database handle, factory, venue repository, logging listener, index
    /// setup. Reconstruction with the same configuration yields functionally
    /// equivalent singletons.
    pub async fn bootstrap(config: MongoConfig) -> StoreResult<Self> {
        info!(
            database = %config.database,
            uri = %config.uri,
            "bootstrapping document store"
        );

        let client = MongoHandle::connect(config.clone()).await?;
        client.ping().await?;

        let database = client.database();
        let factory = RepositoryFactory::new(database.clone());

        let listener = Arc::new(LoggingListener);
        let venues = factory
            .repository::<Venue>()
            .with_listener(listener.clone());
        venues.ensure_indexes().await?;

        info!(collection = Venue::collection_name(), "store bootstrap complete");
        Ok(Self {
            config,
            client,
            database,
            factory,
            venues,
            listener,
        })
    }

    /// Bootstrap from environment configuration.
    pub async fn from_env() -> StoreResult<Self> {
        Self::bootstrap(MongoConfig::from_env()).await
    }
}
