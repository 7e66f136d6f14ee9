//! EventBridge event publisher
//!
//! Publishes forwarded events with a single put-events call per request.
//! Throttling is absorbed by the SDK's adaptive retry strategy; anything
//! that survives the retry budget comes back as a `PublishError`.

use super::request::{PublishRequest, PutEventsResponse};
use crate::error::PublishError;
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_eventbridge::error::DisplayErrorContext;
use aws_sdk_eventbridge::types::PutEventsRequestEntry;
use aws_sdk_eventbridge::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Destination for forwarded events
///
/// Implementations must be safe to share across concurrent invocations.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Submit one entry and return the service's response unchanged
    async fn put_event(&self, request: &PublishRequest) -> Result<PutEventsResponse, PublishError>;
}

/// EventBridge publisher backed by the AWS SDK client
pub struct EventBridgePublisher {
    client: Client,
    messages_published: AtomicU64,
    publish_failures: AtomicU64,
}

impl EventBridgePublisher {
    /// Build a client from the default credential chain
    ///
    /// Region and endpoint overrides (`AWS_REGION`, `AWS_ENDPOINT_URL_EVENTS`)
    /// are picked up by the SDK loader itself.
    pub async fn connect(retry_max_attempts: u32) -> Arc<Self> {
        let retry_config = RetryConfig::adaptive().with_max_attempts(retry_max_attempts);

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .retry_config(retry_config)
            .load()
            .await;

        info!(
            region = ?sdk_config.region(),
            retry_max_attempts,
            "Initialized EventBridge client"
        );

        Arc::new(Self::from_client(Client::new(&sdk_config)))
    }

    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            messages_published: AtomicU64::new(0),
            publish_failures: AtomicU64::new(0),
        }
    }

    /// Get total events published by this warm container
    pub fn messages_published(&self) -> u64 {
        self.messages_published.load(Ordering::Relaxed)
    }

    /// Get total publish failures by this warm container
    pub fn publish_failures(&self) -> u64 {
        self.publish_failures.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl EventPublisher for EventBridgePublisher {
    async fn put_event(&self, request: &PublishRequest) -> Result<PutEventsResponse, PublishError> {
        let entry = PutEventsRequestEntry::builder()
            .source(&request.source)
            .detail_type(&request.detail_type)
            .detail(&request.detail)
            .event_bus_name(&request.event_bus_name)
            .build();

        debug!(
            detail_type = %request.detail_type,
            event_bus = %request.event_bus_name,
            "Publishing event"
        );

        match self.client.put_events().entries(entry).send().await {
            Ok(output) => {
                self.messages_published.fetch_add(1, Ordering::Relaxed);
                let response = PutEventsResponse::from(&output);
                if response.failed_entry_count > 0 {
                    warn!(
                        failed_entry_count = response.failed_entry_count,
                        "Event bus rejected entries"
                    );
                }
                debug!(
                    published_total = self.messages_published(),
                    failures_total = self.publish_failures(),
                    "Put-events call completed"
                );
                Ok(response)
            }
            Err(e) => {
                self.publish_failures.fetch_add(1, Ordering::Relaxed);
                let message = DisplayErrorContext(&e).to_string();
                warn!(
                    detail_type = %request.detail_type,
                    error = %message,
                    failures_total = self.publish_failures(),
                    "Failed to publish event"
                );
                Err(PublishError::Service {
                    detail_type: request.detail_type.clone(),
                    message,
                    source: Box::new(e),
                })
            }
        }
    }
}
