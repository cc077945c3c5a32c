//! Decoding of CloudEvents delivered over HTTP, in both binary and structured content mode

use crate::relay::{CloudEvent, EventData};
use axum::{
    body::Bytes,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use base64::{Engine, engine::general_purpose};
use serde_json::Value;
use thiserror::Error;

static STRUCTURED_CONTENT_TYPE: &str = "application/cloudevents+json";
static ATTRIBUTE_HEADER_PREFIX: &str = "ce-";

#[derive(Debug, Error)]
pub enum CloudEventErr {
    #[error("structured cloud event is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("structured cloud event must be a JSON object")]
    NotAnObject,
    #[error("data_base64 must be a string")]
    InvalidBase64Field,
    #[error("data_base64 is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl IntoResponse for CloudEventErr {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

/// Reads the event out of an HTTP request
pub fn from_http(headers: &HeaderMap, body: Bytes) -> Result<CloudEvent, CloudEventErr> {
    if is_structured(headers) {
        from_structured(&body)
    } else {
        Ok(from_binary(headers, body))
    }
}

/// media types are case insensitive and may carry parameters such as `charset`
fn is_structured(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<mime::Mime>().ok())
        .is_some_and(|mime| mime.essence_str() == STRUCTURED_CONTENT_TYPE)
}

/// binary mode: attributes are `ce-` prefixed headers holding percent encoded values, the body is the data
fn from_binary(headers: &HeaderMap, body: Bytes) -> CloudEvent {
    let mut event = CloudEvent::new((!body.is_empty()).then(|| EventData::Bytes(body.to_vec())));

    for (name, value) in headers {
        let Some(attribute) = name.as_str().strip_prefix(ATTRIBUTE_HEADER_PREFIX) else {
            continue;
        };
        let Ok(value) = value.to_str() else {
            tracing::warn!(header = %name, "skipping non visible ascii attribute header");
            continue;
        };
        let value = match urlencoding::decode(value) {
            Ok(decoded) => decoded.into_owned(),
            Err(err) => {
                tracing::warn!(
                    header = %name,
                    error = %err,
                    "attribute is not valid percent encoded UTF-8, keeping it as is"
                );
                value.to_string()
            }
        };
        event.attributes.insert(attribute.to_string(), value);
    }

    if let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
        event
            .attributes
            .insert("datacontenttype".to_string(), content_type.to_string());
    }

    event
}

/// structured mode: the whole event, attributes and data, is one JSON object
fn from_structured(body: &[u8]) -> Result<CloudEvent, CloudEventErr> {
    let Value::Object(fields) = serde_json::from_slice::<Value>(body)? else {
        return Err(CloudEventErr::NotAnObject);
    };

    let mut event = CloudEvent::default();
    for (key, value) in fields {
        match key.as_str() {
            "data" => event.data = structured_data(value),
            "data_base64" => match value {
                Value::String(encoded) => {
                    let bytes = general_purpose::STANDARD.decode(encoded)?;
                    event.data = Some(EventData::Bytes(bytes));
                }
                Value::Null => {}
                _ => return Err(CloudEventErr::InvalidBase64Field),
            },
            _ => {
                if let Value::String(value) = value {
                    event.attributes.insert(key, value);
                }
            }
        }
    }

    Ok(event)
}

fn structured_data(value: Value) -> Option<EventData> {
    match value {
        Value::Null => None,
        Value::Object(map) => Some(EventData::Structured(map)),
        Value::String(text) => Some(EventData::Text(text)),
        other => Some(EventData::Text(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn it_reads_binary_mode_events() {
        let headers = headers(&[
            ("ce-id", "1234"),
            ("ce-type", "google.cloud.storage.object.v1.finalized"),
            ("ce-source", "//storage.googleapis.com/projects/_/buckets/b"),
            ("content-type", "application/json"),
            ("user-agent", "APIs-Google"),
        ]);
        let body = Bytes::from_static(br#"{"name":"a.jpg"}"#);

        let event = from_http(&headers, body).unwrap();

        assert_eq!(event.id(), Some("1234"));
        assert_eq!(
            event.attributes.get("type").map(String::as_str),
            Some("google.cloud.storage.object.v1.finalized")
        );
        assert_eq!(
            event.attributes.get("datacontenttype").map(String::as_str),
            Some("application/json")
        );
        assert!(!event.attributes.contains_key("user-agent"));
        assert_eq!(
            event.data,
            Some(EventData::Bytes(br#"{"name":"a.jpg"}"#.to_vec()))
        );
    }

    #[test]
    fn binary_attribute_values_are_percent_decoded() {
        let headers = headers(&[
            ("ce-id", "1234"),
            ("ce-subject", "objects/photos%2Fa%20b%E2%82%AC.jpg"),
            ("ce-broken", "caf%E9"),
        ]);

        let event = from_http(&headers, Bytes::new()).unwrap();

        assert_eq!(
            event.attributes.get("subject").map(String::as_str),
            Some("objects/photos/a b€.jpg")
        );
        assert_eq!(
            event.attributes.get("broken").map(String::as_str),
            Some("caf%E9")
        );
    }

    #[test]
    fn the_structured_content_type_is_matched_by_essence() {
        let body = Bytes::from(r#"{"id":"1","data":{"name":"a.jpg"}}"#);

        for content_type in [
            "application/cloudevents+json",
            "Application/CloudEvents+JSON",
            "application/cloudevents+json;charset=UTF-8",
        ] {
            let headers = headers(&[("content-type", content_type)]);
            let event = from_http(&headers, body.clone()).unwrap();
            assert_eq!(event.id(), Some("1"), "{content_type}");
            assert!(matches!(event.data, Some(EventData::Structured(_))));
        }

        for content_type in [
            "application/cloudevents+jsonx",
            "application/cloudevents-batch+json",
        ] {
            let headers = headers(&[("content-type", content_type)]);
            let event = from_http(&headers, body.clone()).unwrap();
            assert!(event.id().is_none(), "{content_type}");
            assert!(matches!(event.data, Some(EventData::Bytes(_))));
        }
    }

    #[test]
    fn an_empty_binary_body_has_no_data() {
        let event = from_http(&headers(&[("ce-id", "1")]), Bytes::new()).unwrap();
        assert!(event.data.is_none());
    }

    #[test]
    fn it_reads_structured_mode_events() {
        let body = json!({
            "specversion": "1.0",
            "id": "1234",
            "type": "google.cloud.storage.object.v1.finalized",
            "data": { "name": "a.jpg", "size": "1024" },
        });
        let headers = headers(&[("content-type", "application/cloudevents+json; charset=utf-8")]);

        let event = from_http(&headers, Bytes::from(body.to_string())).unwrap();

        assert_eq!(event.id(), Some("1234"));
        assert_eq!(
            event.attributes.get("specversion").map(String::as_str),
            Some("1.0")
        );
        assert!(!event.attributes.contains_key("data"));
        assert_eq!(
            event.data,
            Some(EventData::Structured(
                json!({ "name": "a.jpg", "size": "1024" })
                    .as_object()
                    .cloned()
                    .unwrap()
            ))
        );
    }

    #[test]
    fn structured_data_keeps_its_shape() {
        let headers = headers(&[("content-type", "application/cloudevents+json")]);

        let text = from_http(&headers, Bytes::from(r#"{"id":"1","data":"{\"name\":1}"}"#)).unwrap();
        assert_eq!(text.data, Some(EventData::Text("{\"name\":1}".to_string())));

        let null = from_http(&headers, Bytes::from(r#"{"id":"1","data":null}"#)).unwrap();
        assert!(null.data.is_none());

        // {"name":"a.jpg"}
        let encoded = from_http(
            &headers,
            Bytes::from(r#"{"id":"1","data_base64":"eyJuYW1lIjoiYS5qcGcifQ=="}"#),
        )
        .unwrap();
        assert_eq!(
            encoded.data,
            Some(EventData::Bytes(br#"{"name":"a.jpg"}"#.to_vec()))
        );
    }

    #[test]
    fn it_rejects_broken_structured_events() {
        let headers = headers(&[("content-type", "application/cloudevents+json")]);

        assert!(matches!(
            from_http(&headers, Bytes::from("not json")),
            Err(CloudEventErr::InvalidJson(_))
        ));
        assert!(matches!(
            from_http(&headers, Bytes::from("[1]")),
            Err(CloudEventErr::NotAnObject)
        ));
        assert!(matches!(
            from_http(&headers, Bytes::from(r#"{"data_base64":"%%%"}"#)),
            Err(CloudEventErr::Base64(_))
        ));
        assert!(matches!(
            from_http(&headers, Bytes::from(r#"{"data_base64":12}"#)),
            Err(CloudEventErr::InvalidBase64Field)
        ));
    }
}
