pub mod health;
pub mod items;
pub mod metrics;

pub use health::{health_check, readiness_check};
pub use items::{get_item, lookup_item, not_found, LookupOutcome, NOT_FOUND_BODY};
pub use metrics::metrics_endpoint;
