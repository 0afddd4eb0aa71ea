use crate::models::Item;
use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection, Database,
};
use service_core::error::AppError;

/// Read access to the items collection.
#[async_trait]
pub trait ItemCollection: Send + Sync {
    /// Point lookup by `_id`. `Ok(None)` means no such document.
    async fn find_one(&self, id: ObjectId) -> Result<Option<Item>, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct MongoItemCollection {
    db: Database,
    items: Collection<Item>,
}

impl MongoItemCollection {
    pub fn new(db: Database, collection: &str) -> Self {
        let items = db.collection(collection);
        Self { db, items }
    }
}

#[async_trait]
impl ItemCollection for MongoItemCollection {
    async fn find_one(&self, id: ObjectId) -> Result<Option<Item>, AppError> {
        self.items
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(AppError::from)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
