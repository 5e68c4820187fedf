//! Configuration for the MongoDB backend.
//!
//! The store endpoint is an explicit, documented input with a localhost
//! default; nothing here relies on implicit driver discovery.

use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable holding the connection string.
pub const ENV_URI: &str = "MONGODB_URI";

/// Environment variable holding the logical database name.
pub const ENV_DATABASE: &str = "MONGO_DATABASE";

/// Default connection string when [`ENV_URI`] is unset.
pub const DEFAULT_URI: &str = "mongodb://localhost:27017";

/// Default database name when [`ENV_DATABASE`] is unset.
pub const DEFAULT_DATABASE: &str = "reactive";

/// Connection parameters for the MongoDB backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MongoConfig {
    /// Connection string, e.g. `mongodb://localhost:27017`.
    pub uri: String,
    /// Logical database name.
    pub database: String,
    /// Application name reported to the server, useful in server-side logs.
    pub app_name: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            app_name: "gazetteer".to_string(),
        }
    }
}

impl MongoConfig {
    /// Read configuration from the environment, falling back to the
    /// documented defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            uri: env::var(ENV_URI).unwrap_or(defaults.uri),
            database: env::var(ENV_DATABASE).unwrap_or(defaults.database),
            app_name: defaults.app_name,
        }
    }

    /// Replace the database name.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Replace the connection string.
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }
}
