//! Domain error types for the event forwarder
//!
//! Replaces opaque error types with structured thiserror types so every
//! failure mode can be pattern-matched instead of string-parsed.
//!
//! main.rs is the ONLY module allowed to use anyhow::Result (process boundary).
//! All library code returns Result<T, ForwarderError>.

use thiserror::Error;

/// Forwarder domain errors
///
/// Every variant is logged at error level with its Display text and then
/// handed back to the invoking host unchanged. Nothing is retried locally.
///
/// Example log output:
/// ```text
/// ForwarderError::MalformedInput(MalformedInputError::MissingRecords)
/// → "malformed input: envelope has no 'Records' field"
/// ```
#[derive(Error, Debug)]
pub enum ForwarderError {
    /// Envelope or embedded message does not have the expected shape
    #[error("malformed input: {0}")]
    MalformedInput(#[from] MalformedInputError),

    /// The event-bus call failed after the client's retry budget
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// A JSON value could not be rendered to text
    #[error("failed to render {what} as JSON")]
    SerializationFailed {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error (environment variable missing or invalid)
    #[error("configuration error: {0}")]
    Config(String),
}

impl ForwarderError {
    /// Returns a static label string suitable for a structured log field.
    pub fn error_type_label(&self) -> &'static str {
        match self {
            Self::MalformedInput(_) => "malformed_input",
            Self::Publish(_) => "publish",
            Self::SerializationFailed { .. } => "serialization",
            Self::Config(_) => "config",
        }
    }
}

/// The inbound envelope or its first record cannot be turned into an event
#[derive(Error, Debug)]
pub enum MalformedInputError {
    #[error("envelope has no 'Records' field")]
    MissingRecords,

    #[error("envelope 'Records' is not a sequence")]
    RecordsNotSequence,

    /// The record is missing `Sns.Message`, or it is not a string
    #[error("record {index} is not a notification record: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// `Sns.Message` is not valid JSON text
    #[error("record {index} message is not valid JSON: {source}")]
    InvalidMessageJson {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The message parsed, but `Input.control_tower_event` is incomplete
    #[error("record {index} message has no usable Input.control_tower_event: {source}")]
    MissingEventDescriptor {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// The put-events call did not complete
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("put-events failed for detail-type '{detail_type}': {message}")]
    Service {
        detail_type: String,
        /// Full error text including the service's error code, if any
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
