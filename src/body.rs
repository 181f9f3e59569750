//! Request payloads and content-type negotiation.

use crate::{Error, Result};
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue};
use serde::Serialize;

const APPLICATION_JSON: &str = "application/json";

/// A request body as handed to [`Request::set_body`](crate::Request::set_body).
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Already-encoded bytes, sent unchanged.
    Raw(Vec<u8>),
    /// A structured value, serialized to JSON when the request is built.
    Json(serde_json::Value),
}

impl Payload {
    /// Converts any serializable value into a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestConstruction`] if `value` cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(Payload::Json)
            .map_err(|e| Error::RequestConstruction(format!("Failed to serialize body: {e}")))
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Raw(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::Raw(bytes.to_vec())
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Raw(s.into_bytes())
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Raw(s.as_bytes().to_vec())
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Json(value)
    }
}

/// Returns `true` for JSON media types: `application/json`, `text/json`,
/// the `+json` suffix family and `json-*` subtypes, ignoring case and parameters.
///
/// # Examples
///
/// ```
/// use rip::is_json;
///
/// assert!(is_json("application/json; charset=utf-8"));
/// assert!(is_json("Application/Problem+JSON"));
/// assert!(is_json("text/json"));
/// assert!(!is_json("text/plain"));
/// ```
pub fn is_json(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    let Some((kind, subtype)) = essence.split_once('/') else {
        return false;
    };

    matches!(kind, "application" | "text")
        && (subtype == "json" || subtype.ends_with("+json") || subtype.starts_with("json-"))
}

/// Turns `payload` into body bytes and makes sure a content type is set.
///
/// Structured payloads are serialized, raw payloads are passed through as is.
/// Either way the content type becomes `application/json` unless a JSON
/// content type is already present.
/// A missing payload, or a JSON `null`, produces no body and leaves headers alone.
pub(crate) fn negotiate(payload: Option<Payload>, headers: &mut HeaderMap) -> Result<Option<Vec<u8>>> {
    let bytes = match payload {
        None | Some(Payload::Json(serde_json::Value::Null)) => return Ok(None),
        Some(Payload::Raw(bytes)) => bytes,
        Some(Payload::Json(value)) => serde_json::to_vec(&value).map_err(|e| {
            Error::RequestConstruction(format!("Failed to serialize body: {e}"))
        })?,
    };

    let has_json_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(is_json);

    if !has_json_type {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    }

    Ok(Some(bytes))
}
