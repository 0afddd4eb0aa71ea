pub mod collection;
pub mod metrics;
pub mod store;

pub use collection::{ItemCollection, MongoItemCollection};
pub use metrics::{get_metrics, init_metrics, record_lookup};
pub use store::{CollectionHandle, Connector, FailureHandler, MongoConnector, StoreAccessor};
