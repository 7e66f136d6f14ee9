//! Event handling module
//!
//! Decodes the inbound SNS envelope and renders JSON text for the bus.

pub mod envelope;
pub mod render;

pub use envelope::{EventDescriptor, InboundEnvelope, NotificationRecord};
pub use render::render_json;
