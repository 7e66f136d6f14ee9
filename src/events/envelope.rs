//! Inbound notification envelope
//!
//! The host hands us `{"Records": [{"Sns": {"Message": "<json>"}}, ...]}`.
//! Records are kept as raw JSON and only decoded when iterated, so a record
//! that is never reached is never parsed.

use crate::error::MalformedInputError;
use serde::Deserialize;
use serde_json::Value;

/// Batch of notification records delivered to one invocation
#[derive(Debug, Clone, Copy)]
pub struct InboundEnvelope<'a> {
    records: &'a [Value],
}

impl<'a> InboundEnvelope<'a> {
    /// Borrow the `Records` sequence out of a raw invocation payload
    pub fn from_payload(payload: &'a Value) -> Result<Self, MalformedInputError> {
        match payload.get("Records") {
            None => Err(MalformedInputError::MissingRecords),
            Some(Value::Array(records)) => Ok(Self { records }),
            Some(_) => Err(MalformedInputError::RecordsNotSequence),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Decode records in order, one at a time
    pub fn records(&self) -> impl Iterator<Item = Result<NotificationRecord, MalformedInputError>> + 'a {
        self.records
            .iter()
            .enumerate()
            .map(|(index, raw)| NotificationRecord::from_raw(index, raw))
    }
}

/// One SNS notification; everything but `Sns.Message` is ignored
#[derive(Debug, Clone)]
pub struct NotificationRecord {
    pub index: usize,
    pub message: String,
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(rename = "Sns")]
    sns: RawSns,
}

#[derive(Deserialize)]
struct RawSns {
    #[serde(rename = "Message")]
    message: String,
}

impl NotificationRecord {
    fn from_raw(index: usize, raw: &Value) -> Result<Self, MalformedInputError> {
        let record = RawRecord::deserialize(raw)
            .map_err(|source| MalformedInputError::InvalidRecord { index, source })?;
        Ok(Self {
            index,
            message: record.sns.message,
        })
    }

    /// Parse `Message` and pull out `Input.control_tower_event`
    ///
    /// The message is read into a `Value` first so repeated keys collapse to
    /// the last occurrence before the typed shape is checked.
    pub fn event_descriptor(&self) -> Result<EventDescriptor, MalformedInputError> {
        let index = self.index;
        let message: Value = serde_json::from_str(&self.message)
            .map_err(|source| MalformedInputError::InvalidMessageJson { index, source })?;
        ControlTowerMessage::deserialize(message)
            .map(|message| message.input.control_tower_event)
            .map_err(|source| MalformedInputError::MissingEventDescriptor { index, source })
    }
}

/// Control Tower lifecycle event as embedded by the AFT step function
#[derive(Debug, Deserialize)]
struct ControlTowerMessage {
    #[serde(rename = "Input")]
    input: MessageInput,
}

#[derive(Debug, Deserialize)]
struct MessageInput {
    control_tower_event: EventDescriptor,
}

/// The `{detail-type, detail}` pair destined for the event bus
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventDescriptor {
    #[serde(rename = "detail-type")]
    pub detail_type: String,
    /// Any JSON value, `null` included; only absence is rejected
    pub detail: Value,
}
