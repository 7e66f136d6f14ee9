//! Event bus integration
//!
//! Forwards extracted Control Tower events onto EventBridge.

mod publisher;
mod request;

pub use publisher::{EventBridgePublisher, EventPublisher};
pub use request::{PublishRequest, PutEventsResponse, PutEventsResultEntry, EVENT_SOURCE};
