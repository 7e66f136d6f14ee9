//! Wire format conformance tests
//!
//! Feeds committed SNS envelopes through the forwarder and compares the
//! captured put-events entry with the committed request fixture. The
//! `Detail` text in those fixtures is what subscribers on the bus match
//! against, so it must stay byte-identical.
//!
//! ## Fixture regeneration
//!
//! To regenerate request fixtures after an intentional wire format change:
//! ```bash
//! REGENERATE_FIXTURES=1 cargo test --test wire_format
//! ```

use aft_event_forwarder::bus::{EventPublisher, PublishRequest, PutEventsResponse};
use aft_event_forwarder::error::PublishError;
use aft_event_forwarder::Forwarder;
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

const EVENT_BUS: &str = "arn:aws:events:us-east-1:111122223333:event-bus/aft-events";

/// Envelope fixtures, each with a matching `<name>.request.json`.
const ALL_FIXTURES: &[&str] = &[
    "account-created",
    "managed-account",
    "multi-record",
    "numeric-detail",
];

/// Required fields on every committed request fixture.
const REQUIRED_REQUEST_FIELDS: &[&str] = &["Source", "DetailType", "Detail", "EventBusName"];

#[derive(Default)]
struct CapturingPublisher {
    requests: Mutex<Vec<PublishRequest>>,
}

#[async_trait]
impl EventPublisher for CapturingPublisher {
    async fn put_event(&self, request: &PublishRequest) -> Result<PutEventsResponse, PublishError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(PutEventsResponse::accepted("00000000-0000-4000-8000-000000000001"))
    }
}

/// Fixture directory resolved via CARGO_MANIFEST_DIR.
fn fixtures_dir() -> PathBuf {
    let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    assert!(
        fixtures.exists(),
        "Fixture directory does not exist at {}",
        fixtures.display()
    );
    fixtures
}

/// Load a committed fixture by file stem (without .json extension).
fn load_fixture(stem: &str) -> Value {
    let path = fixtures_dir().join(format!("{stem}.json"));
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {e}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {e}", path.display()))
}

/// Write a fixture to disk (for regeneration mode).
fn write_fixture(stem: &str, value: &Value) {
    let path = fixtures_dir().join(format!("{stem}.json"));
    let content = serde_json::to_string_pretty(value).unwrap();
    std::fs::write(&path, format!("{content}\n"))
        .unwrap_or_else(|e| panic!("Failed to write fixture {}: {e}", path.display()));
    eprintln!("Regenerated fixture: {}", path.display());
}

/// Run one envelope through the forwarder and return the captured requests.
async fn forward(envelope: &Value) -> Vec<PublishRequest> {
    let publisher = Arc::new(CapturingPublisher::default());
    let forwarder = Forwarder::new(Arc::clone(&publisher) as Arc<dyn EventPublisher>);

    let response = forwarder
        .handle(envelope, Some(EVENT_BUS.to_string()))
        .await
        .expect("fixture envelope should forward cleanly");
    assert_eq!(
        response,
        Some(PutEventsResponse::accepted("00000000-0000-4000-8000-000000000001"))
    );

    let requests = publisher.requests.lock().unwrap().clone();
    requests
}

#[tokio::test]
async fn published_requests_match_committed_fixtures() {
    let regenerate = std::env::var("REGENERATE_FIXTURES").is_ok();

    for name in ALL_FIXTURES {
        let envelope = load_fixture(&format!("{name}.envelope"));
        let requests = forward(&envelope).await;
        assert_eq!(requests.len(), 1, "fixture '{name}' should publish exactly once");

        let actual = serde_json::to_value(&requests[0]).unwrap();
        let stem = format!("{name}.request");

        if regenerate {
            write_fixture(&stem, &actual);
        } else {
            assert_eq!(
                actual,
                load_fixture(&stem),
                "Wire format mismatch for fixture '{name}'. \
                 If intentional, run: REGENERATE_FIXTURES=1 cargo test --test wire_format"
            );
        }
    }
}

#[test]
fn all_request_fixtures_have_required_fields() {
    for name in ALL_FIXTURES {
        let fixture = load_fixture(&format!("{name}.request"));
        let obj = fixture.as_object().unwrap_or_else(|| {
            panic!("Fixture '{name}' is not a JSON object");
        });

        for field in REQUIRED_REQUEST_FIELDS {
            assert!(
                obj.contains_key(*field),
                "Fixture '{name}' missing required request field '{field}'"
            );
        }
        assert_eq!(obj["Source"], "aft-new-account-event-forwarder");
    }
}

#[test]
fn request_details_are_ascii_with_spaced_separators() {
    for name in ALL_FIXTURES {
        let fixture = load_fixture(&format!("{name}.request"));
        let detail = fixture["Detail"].as_str().expect("Detail should be a string");

        assert!(detail.is_ascii(), "Fixture '{name}' Detail must be ASCII-only");
        assert!(
            !detail.contains("\":\"") && !detail.contains("\",\""),
            "Fixture '{name}' Detail must use spaced separators"
        );
        serde_json::from_str::<Value>(detail)
            .unwrap_or_else(|e| panic!("Fixture '{name}' Detail is not JSON: {e}"));
    }
}

#[tokio::test]
async fn non_ascii_detail_is_escaped_on_the_wire() {
    let envelope = load_fixture("managed-account.envelope");
    let requests = forward(&envelope).await;

    assert!(requests[0].detail.contains(r#""accountName": "Z\u00fcrich Sandbox""#));
}

#[tokio::test]
async fn numbers_keep_their_published_form() {
    let envelope = load_fixture("numeric-detail.envelope");
    let requests = forward(&envelope).await;
    let detail = &requests[0].detail;

    assert!(detail.contains(r#""requestId": 123456789012345678901234567890"#), "{detail}");
    assert!(detail.contains(r#""overflowCounter": 18446744073709551616"#), "{detail}");
    assert!(detail.contains(r#""utilization": 1e-05"#), "{detail}");
    assert!(detail.contains(r#""bytesAllocated": 1e+16"#), "{detail}");
    assert!(detail.contains(r#""scale": 1e+300"#), "{detail}");
}
