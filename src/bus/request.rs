//! Put-events request and response shapes
//!
//! Both serialize with the service's PascalCase field names so the response
//! can be handed back to the invoking host as-is.

use crate::events::{render_json, EventDescriptor};
use aws_sdk_eventbridge::operation::put_events::PutEventsOutput;
use serde::{Deserialize, Serialize};

/// Fixed `Source` stamped on every forwarded event
pub const EVENT_SOURCE: &str = "aft-new-account-event-forwarder";

/// One put-events entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublishRequest {
    pub source: String,
    pub detail_type: String,
    /// Rendered JSON text of the descriptor's `detail`
    pub detail: String,
    pub event_bus_name: String,
}

impl PublishRequest {
    pub fn from_descriptor(
        descriptor: &EventDescriptor,
        event_bus_name: String,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            source: EVENT_SOURCE.to_string(),
            detail_type: descriptor.detail_type.clone(),
            detail: render_json(&descriptor.detail)?,
            event_bus_name,
        })
    }
}

/// Result of a put-events call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutEventsResponse {
    #[serde(default)]
    pub entries: Vec<PutEventsResultEntry>,
    #[serde(default)]
    pub failed_entry_count: i32,
}

/// Per-entry outcome: either an `EventId` or an error code and message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutEventsResultEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl PutEventsResponse {
    /// Response the service returns when every entry was accepted
    pub fn accepted(event_id: impl Into<String>) -> Self {
        Self {
            entries: vec![PutEventsResultEntry {
                event_id: Some(event_id.into()),
                ..Default::default()
            }],
            failed_entry_count: 0,
        }
    }
}

impl From<&PutEventsOutput> for PutEventsResponse {
    fn from(output: &PutEventsOutput) -> Self {
        Self {
            entries: output
                .entries()
                .iter()
                .map(|entry| PutEventsResultEntry {
                    event_id: entry.event_id().map(str::to_string),
                    error_code: entry.error_code().map(str::to_string),
                    error_message: entry.error_message().map(str::to_string),
                })
                .collect(),
            failed_entry_count: output.failed_entry_count(),
        }
    }
}
