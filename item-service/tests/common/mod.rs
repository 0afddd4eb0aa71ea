#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use item_service::config::{ItemConfig, LookupConfig, MongoConfig};
use item_service::models::Item;
use item_service::services::{CollectionHandle, ItemCollection, StoreAccessor};
use item_service::{build_router, AppState};
use mongodb::bson::oid::ObjectId;
use service_core::config::Config as CoreConfig;
use service_core::error::AppError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

pub const SEEDED_ID: &str = "52f6aef226f149b7048b4567";
pub const SEEDED_DESCRIPTION: &str = "Nones";
pub const ABSENT_ID: &str = "000000000000000000000000";

/// In-memory stand-in for the items collection.
#[derive(Default)]
pub struct FakeCollection {
    items: HashMap<ObjectId, Item>,
    pub lookups: AtomicUsize,
}

impl FakeCollection {
    pub fn seeded() -> Self {
        let id = ObjectId::parse_str(SEEDED_ID).unwrap();
        Self::default().with_item(Item::new(id, SEEDED_DESCRIPTION))
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.insert(item.id, item);
        self
    }
}

#[async_trait]
impl ItemCollection for FakeCollection {
    async fn find_one(&self, id: ObjectId) -> Result<Option<Item>, AppError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.items.get(&id).cloned())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// A collection whose every query fails at the transport level.
pub struct BrokenCollection;

#[async_trait]
impl ItemCollection for BrokenCollection {
    async fn find_one(&self, _id: ObjectId) -> Result<Option<Item>, AppError> {
        Err(AppError::DatabaseError(anyhow::anyhow!("connection reset")))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::DatabaseError(anyhow::anyhow!("connection reset")))
    }
}

/// A collection that never answers within the lookup timeout.
pub struct StalledCollection;

#[async_trait]
impl ItemCollection for StalledCollection {
    async fn find_one(&self, _id: ObjectId) -> Result<Option<Item>, AppError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(None)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

pub fn test_config() -> ItemConfig {
    ItemConfig {
        common: CoreConfig { port: 0 },
        mongodb: MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "test".to_string(),
            collection: "items".to_string(),
        },
        lookup: LookupConfig { timeout_ms: 100 },
    }
}

pub fn test_state(collection: CollectionHandle) -> AppState {
    AppState {
        config: test_config(),
        store: Arc::new(StoreAccessor::with_handle(collection)),
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

/// Drive one request through the full router.
pub async fn send(state: AppState, method: &str, uri: &str) -> TestResponse {
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn get(state: AppState, uri: &str) -> TestResponse {
    send(state, "GET", uri).await
}
