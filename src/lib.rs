//! AFT new-account event forwarder
//!
//! Receives the SNS notification AFT emits for a Control Tower lifecycle
//! event and republishes the embedded event on an EventBridge bus under the
//! `aft-new-account-event-forwarder` source.

pub mod bus;
pub mod config;
pub mod error;
pub mod events;
pub mod forwarder;

pub use error::ForwarderError;
pub use forwarder::{invoke, Forwarder};
