//! MongoDB client wrapper.
//!
//! [`MongoHandle`] wraps the official driver's `Client`, holding it together
//! with the configuration it was built from. The driver connects lazily, so
//! [`MongoHandle::connect`] performs no I/O; call [`MongoHandle::ping`] when
//! an unreachable server should fail startup.

use gazetteer_core::{StoreError, StoreResult};
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::info;

use crate::config::MongoConfig;

/// Handle over the shared MongoDB client.
///
/// Uses Arc internally so cloning is cheap and every clone talks to the same
/// connection pool. The handle is read-only after construction and safe to
/// share across request-handling tasks.
#[derive(Clone)]
pub struct MongoHandle {
    inner: std::sync::Arc<MongoHandleInner>,
}

struct MongoHandleInner {
    client: Client,
    config: MongoConfig,
}

impl std::fmt::Debug for MongoHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoHandle")
            .field("config", &self.inner.config)
            .finish()
    }
}

impl MongoHandle {
    /// Build a client from the given configuration.
    ///
    /// Reconstruction with the same configuration yields a functionally
    /// equivalent handle. A malformed connection string surfaces as
    /// [`StoreError::Configuration`].
    pub async fn connect(config: MongoConfig) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            StoreError::Configuration(format!(
                "invalid MongoDB connection string '{}': {}",
                config.uri, e
            ))
        })?;
        options.app_name = Some(config.app_name.clone());

        let client = Client::with_options(options)
            .map_err(|e| StoreError::Connection(format!("failed to create MongoDB client: {}", e)))?;

        Ok(Self {
            inner: std::sync::Arc::new(MongoHandleInner { client, config }),
        })
    }

    /// Verify connectivity with a `ping` command.
    ///
    /// Bootstrap calls this so that an unreachable store aborts process
    /// startup instead of failing on the first real operation.
    pub async fn ping(&self) -> StoreResult<()> {
        self.database()
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| {
                StoreError::Connection(format!(
                    "MongoDB at '{}' is unreachable: {}",
                    self.inner.config.uri, e
                ))
            })?;
        info!(
            database = %self.inner.config.database,
            "MongoDB connection verified"
        );
        Ok(())
    }

    /// Derive the logical database handle from the configured name.
    pub fn database(&self) -> Database {
        self.inner.client.database(&self.inner.config.database)
    }

    /// Get a reference to the underlying driver client.
    ///
    /// This allows direct access to the driver for advanced operations
    /// (sessions, transactions) not covered by the wrapper API.
    pub fn client(&self) -> &Client {
        &self.inner.client
    }

    /// Get the handle configuration.
    pub fn config(&self) -> &MongoConfig {
        &self.inner.config
    }
}
