//! New-account event forwarder
//!
//! Takes the SNS envelope delivered to one invocation, pulls the Control
//! Tower event out of the first record and republishes it on the bus.
//!
//! Only the first record of an envelope is ever forwarded. The function has
//! always behaved this way and the AFT topic delivers one record per
//! invocation, so later records are left untouched rather than silently
//! changing what gets published.

use crate::bus::{EventPublisher, PublishRequest, PutEventsResponse};
use crate::config::{ForwarderConfig, EVENT_BUS_ENV};
use crate::error::ForwarderError;
use crate::events::{render_json, InboundEnvelope};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Forwards Control Tower events from SNS onto the event bus
#[derive(Clone)]
pub struct Forwarder {
    publisher: Arc<dyn EventPublisher>,
}

impl Forwarder {
    pub fn new(publisher: Arc<dyn EventPublisher>) -> Self {
        Self { publisher }
    }

    /// Handle one invocation payload
    ///
    /// Returns the put-events response for the first record, or `None` when
    /// the envelope carries no records. Every failure is logged and then
    /// returned unchanged.
    pub async fn handle(
        &self,
        payload: &Value,
        event_bus_name: Option<String>,
    ) -> Result<Option<PutEventsResponse>, ForwarderError> {
        self.forward_first(payload, event_bus_name)
            .await
            .inspect_err(|e| error!(error_type = e.error_type_label(), "{e}"))
    }

    async fn forward_first(
        &self,
        payload: &Value,
        event_bus_name: Option<String>,
    ) -> Result<Option<PutEventsResponse>, ForwarderError> {
        let incoming = render_json(payload).map_err(|source| ForwarderError::SerializationFailed {
            what: "incoming event",
            source,
        })?;
        info!(event = %incoming, "Incoming event");

        let envelope = InboundEnvelope::from_payload(payload)?;

        let Some(record) = envelope.records().next() else {
            debug!("Envelope has no records, nothing to forward");
            return Ok(None);
        };
        let descriptor = record?.event_descriptor()?;

        let event_bus_name = event_bus_name.unwrap_or_else(|| {
            warn!(variable = EVENT_BUS_ENV, "Event bus not configured, publishing to empty bus name");
            String::new()
        });

        let request = PublishRequest::from_descriptor(&descriptor, event_bus_name).map_err(
            |source| ForwarderError::SerializationFailed {
                what: "event detail",
                source,
            },
        )?;

        let response = self.publisher.put_event(&request).await?;

        info!(
            detail_type = %request.detail_type,
            detail = %request.detail,
            records_skipped = envelope.len() - 1,
            "Event sent"
        );
        match render_json(&response) {
            Ok(raw) => debug!(response = %raw, "Put-events response"),
            Err(e) => debug!(error = %e, "Put-events response could not be rendered"),
        }

        Ok(Some(response))
    }
}

/// Runtime entry point: reads the destination bus at call time
pub async fn invoke(
    forwarder: &Forwarder,
    payload: Value,
) -> Result<Option<PutEventsResponse>, ForwarderError> {
    forwarder
        .handle(&payload, ForwarderConfig::event_bus_name())
        .await
}
