//! Process-wide access to the items collection.
//!
//! The connection sequence (dial, select database, select collection) runs at
//! most once per [`StoreAccessor`]. Callers that arrive while it is in flight
//! wait for it and then share the same handle.

use crate::config::MongoConfig;
use crate::services::collection::{ItemCollection, MongoItemCollection};
use async_trait::async_trait;
use mongodb::{bson::doc, Client as MongoClient};
use service_core::error::AppError;
use std::sync::Arc;
use tokio::sync::OnceCell;

pub type CollectionHandle = Arc<dyn ItemCollection>;

/// Establishes the connection to the document store.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<CollectionHandle, AppError>;
}

pub struct MongoConnector {
    uri: String,
    database: String,
    collection: String,
}

impl MongoConnector {
    pub fn new(config: &MongoConfig) -> Self {
        Self {
            uri: config.uri.clone(),
            database: config.database.clone(),
            collection: config.collection.clone(),
        }
    }
}

#[async_trait]
impl Connector for MongoConnector {
    async fn connect(&self) -> Result<CollectionHandle, AppError> {
        tracing::info!(uri = %self.uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(&self.uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", self.uri, e);
            AppError::from(e)
        })?;

        // The driver connects lazily; ping so a dead store surfaces here.
        let db = client.database(&self.database);
        db.run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB at {} did not answer ping: {}", self.uri, e);
                AppError::from(e)
            })?;

        tracing::info!(
            database = %self.database,
            collection = %self.collection,
            "Successfully connected to MongoDB collection"
        );
        Ok(Arc::new(MongoItemCollection::new(db, &self.collection)))
    }
}

/// Called with the dial error when the store cannot be reached.
pub type FailureHandler = Box<dyn Fn(&AppError) + Send + Sync>;

pub struct StoreAccessor {
    connector: Option<Box<dyn Connector>>,
    on_failure: FailureHandler,
    handle: OnceCell<CollectionHandle>,
}

/// The service has no useful degraded mode without its store.
fn exit_on_failure(err: &AppError) {
    tracing::error!(error = %err, "Failed to establish store connection, exiting");
    std::process::exit(1);
}

impl StoreAccessor {
    pub fn new(connector: impl Connector + 'static) -> Self {
        Self::with_failure_handler(connector, Box::new(exit_on_failure))
    }

    /// Like [`new`](Self::new) but with a custom reaction to a failed dial.
    ///
    /// If `on_failure` returns, the initialization never completes: every
    /// caller of [`collection_handle`](Self::collection_handle) stays parked
    /// and the connector is not invoked again.
    pub fn with_failure_handler(
        connector: impl Connector + 'static,
        on_failure: FailureHandler,
    ) -> Self {
        Self {
            connector: Some(Box::new(connector)),
            on_failure,
            handle: OnceCell::new(),
        }
    }

    /// An accessor that is already initialized with `handle` and never dials.
    pub fn with_handle(handle: CollectionHandle) -> Self {
        Self {
            connector: None,
            on_failure: Box::new(exit_on_failure),
            handle: OnceCell::new_with(Some(handle)),
        }
    }

    /// The handle if initialization already completed. Never dials.
    pub fn initialized_handle(&self) -> Option<CollectionHandle> {
        self.handle.get().cloned()
    }

    /// Shared collection handle, connecting on first use.
    ///
    /// A failed dial is handed to the failure handler while the
    /// initialization permit is still held, so it is never attempted twice.
    /// With the default handler the process exits.
    pub async fn collection_handle(&self) -> CollectionHandle {
        self.handle
            .get_or_init(|| async {
                let result = match &self.connector {
                    Some(connector) => connector.connect().await,
                    None => Err(AppError::ServiceUnavailable),
                };
                match result {
                    Ok(handle) => handle,
                    Err(e) => {
                        (self.on_failure)(&e);
                        std::future::pending::<CollectionHandle>().await
                    }
                }
            })
            .await
            .clone()
    }
}
