//! OTLP/JSON encoding of finished spans.
//!
//! One exported batch becomes one JSON document:
//!
//! ```json
//! {"resourceSpans": [{
//!   "resource": {"attributes": [{"key": "service.name", "value": {"stringValue": "zsfile"}}]},
//!   "scopeSpans": [{"scope": {"name": "zsfile"}, "spans": [...]}]
//! }]}
//! ```

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as JsonValue};
use std::time::{SystemTime, UNIX_EPOCH};

/// Instrumentation scope name written into every batch.
pub const SCOPE_NAME: &str = "zsfile";

/// Encodes `batch` with the attributes of `resource`.
#[must_use]
pub fn encode_batch(resource: &Resource, batch: &[SpanData]) -> JsonValue {
    let resource_attributes: Vec<JsonValue> = resource
        .iter()
        .map(|(key, value)| json!({ "key": key.as_str(), "value": any_value(value) }))
        .collect();

    json!({
        "resourceSpans": [{
            "resource": { "attributes": resource_attributes },
            "scopeSpans": [{
                "scope": { "name": SCOPE_NAME },
                "spans": batch.iter().map(encode_span).collect::<Vec<_>>(),
            }],
        }],
    })
}

fn encode_span(span: &SpanData) -> JsonValue {
    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };
    let (code, message) = match &span.status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    };

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "kind": kind_code(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes(&span.attributes),
        "events": span.events.iter().map(encode_event).collect::<Vec<_>>(),
        "links": span.links.iter().map(encode_link).collect::<Vec<_>>(),
        "status": { "code": code, "message": message },
    })
}

fn encode_event(event: &Event) -> JsonValue {
    json!({
        "timeUnixNano": unix_nanos(event.timestamp),
        "name": event.name,
        "attributes": attributes(&event.attributes),
    })
}

fn encode_link(link: &Link) -> JsonValue {
    json!({
        "traceId": format!("{:032x}", link.span_context.trace_id()),
        "spanId": format!("{:016x}", link.span_context.span_id()),
        "attributes": attributes(&link.attributes),
    })
}

/// OTLP `SpanKind` numbering (0 is unspecified).
const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn attributes(attributes: &[KeyValue]) -> Vec<JsonValue> {
    attributes
        .iter()
        .map(|kv| json!({ "key": kv.key.as_str(), "value": any_value(&kv.value) }))
        .collect()
}

/// 64-bit integers are strings in OTLP/JSON. Arrays fall back to their
/// debug rendering.
fn any_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.as_str() }),
        Value::Array(_) => json!({ "stringValue": format!("{value:?}") }),
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_values_use_otlp_field_names() {
        assert_eq!(any_value(&Value::I64(7)), json!({ "intValue": "7" }));
        assert_eq!(any_value(&Value::Bool(true)), json!({ "boolValue": true }));
        assert_eq!(any_value(&Value::from("x")), json!({ "stringValue": "x" }));
    }

    #[test]
    fn empty_batch_carries_resource() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "zsfile")]);
        let doc = encode_batch(&resource, &[]);
        let attrs = &doc["resourceSpans"][0]["resource"]["attributes"];
        assert!(attrs
            .as_array()
            .unwrap()
            .iter()
            .any(|a| a["key"] == "service.name" && a["value"]["stringValue"] == "zsfile"));
        assert_eq!(doc["resourceSpans"][0]["scopeSpans"][0]["spans"], json!([]));
    }

    #[test]
    fn pre_epoch_times_clamp_to_zero() {
        assert_eq!(unix_nanos(UNIX_EPOCH), "0");
    }
}
