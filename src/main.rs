//! AFT New-Account Event Forwarder - function runtime entry point
//!
//! Wires the forwarder to the function runtime:
//! - JSON structured logs to stdout
//! - One EventBridge client per process, adaptive retry
//! - One forwarded event per invocation

use aft_event_forwarder::bus::{EventBridgePublisher, EventPublisher, PutEventsResponse};
use aft_event_forwarder::config::ForwarderConfig;
use aft_event_forwarder::{invoke, Forwarder};
use anyhow::Result;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, info_span, Instrument};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first to get log level
    let forwarder_config = ForwarderConfig::from_env()?;

    // Initialize tracing with configured log level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(
                    format!("aft_event_forwarder={}", forwarder_config.log_level).parse()?,
                )
                .add_directive(
                    format!("aft_new_account_event_forwarder={}", forwarder_config.log_level)
                        .parse()?,
                )
                .add_directive("aws_config=warn".parse()?)
                .add_directive("aws_smithy_runtime=warn".parse()?)
                .add_directive("lambda_runtime=warn".parse()?),
        )
        .json()
        .without_time()
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        retry_max_attempts = forwarder_config.retry_max_attempts,
        "Starting AFT new-account event forwarder"
    );

    let publisher: Arc<dyn EventPublisher> =
        EventBridgePublisher::connect(forwarder_config.retry_max_attempts).await;
    let forwarder = Forwarder::new(publisher);

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| {
        function_handler(&forwarder, event)
    }))
    .await
    .map_err(|e| anyhow::anyhow!(e))?;

    info!("Forwarder shutdown complete");
    Ok(())
}

async fn function_handler(
    forwarder: &Forwarder,
    event: LambdaEvent<Value>,
) -> Result<Option<PutEventsResponse>, Error> {
    let (payload, context) = event.into_parts();
    let span = info_span!("invocation", request_id = %context.request_id);

    Ok(invoke(forwarder, payload).instrument(span).await?)
}
