//! Response wrapper with at-most-once body access.
//!
//! The body stream stays open until it is read or released. Reading it with
//! [`Response::body`], [`Response::text`] or [`Response::json`] buffers the
//! whole stream and releases it; [`Response::close`] releases it unread.
//! Either way the body is gone afterwards and later reads return nothing.
//! Dropping a `Response` releases the stream too.

use crate::request::ResolvedRequest;
use crate::{Error, Result};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::io::Read;

pub(crate) type BodyStream = Box<dyn Read + Send>;

/// Where the response body is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyState {
    /// The stream is available and unread.
    Open,
    /// The stream was read to the end and released.
    Consumed,
    /// The stream was released without being read, or there never was one.
    Closed,
}

enum Body {
    Open(BodyStream),
    Consumed,
    Closed,
}

/// An HTTP response.
///
/// Any status code, including 4xx and 5xx, arrives as a `Response`; use
/// [`Response::is_success`] and [`Response::is_error`] to classify it.
///
/// # Examples
///
/// ```no_run
/// use rip::Client;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Item {
///     id: u64,
/// }
///
/// # fn example() -> Result<(), rip::Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")?
///     .build()?;
///
/// let mut response = client.request().set_params([("id", 42)]).get("/items/:id")?;
///
/// println!("Status: {}", response.status_code());
/// println!("Content-Type: {:?}", response.header("content-type"));
///
/// if response.is_success() {
///     let item: Item = response.json()?;
///     println!("Item {}", item.id);
/// }
///
/// // The body has been read, so this is empty.
/// assert!(response.text()?.is_empty());
/// # Ok(())
/// # }
/// ```
pub struct Response {
    request: ResolvedRequest,
    status: Option<StatusCode>,
    headers: HeaderMap,
    content_length: Option<u64>,
    body: Body,
}

impl Response {
    pub(crate) fn from_transport(request: ResolvedRequest, raw: reqwest::blocking::Response) -> Self {
        let status = raw.status();
        let headers = raw.headers().clone();
        let content_length = raw.content_length();

        Self::from_parts(request, status, headers, content_length, Box::new(raw))
    }

    pub(crate) fn from_parts(
        request: ResolvedRequest,
        status: StatusCode,
        headers: HeaderMap,
        content_length: Option<u64>,
        stream: BodyStream,
    ) -> Self {
        Self {
            request,
            status: Some(status),
            headers,
            content_length,
            body: Body::Open(stream),
        }
    }

    /// A response that never arrived: no status, no headers, no body.
    pub(crate) fn shell(request: ResolvedRequest) -> Self {
        Self {
            request,
            status: None,
            headers: HeaderMap::new(),
            content_length: None,
            body: Body::Closed,
        }
    }

    /// The request this response answers.
    pub fn request(&self) -> &ResolvedRequest {
        &self.request
    }

    /// The status, or `None` for a response shell.
    ///
    /// `StatusCode` displays as e.g. `200 OK`.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// The numeric status code, or `0` for a response shell.
    pub fn status_code(&self) -> u16 {
        self.status.map_or(0, |status| status.as_u16())
    }

    /// Looks up a response header by name, ignoring case.
    ///
    /// Returns the first value, or `None` if the header is missing or not
    /// visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// All response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The body length announced by the server, if known.
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Where the body is in its lifecycle.
    pub fn body_state(&self) -> BodyState {
        match self.body {
            Body::Open(_) => BodyState::Open,
            Body::Consumed => BodyState::Consumed,
            Body::Closed => BodyState::Closed,
        }
    }

    /// Reads the whole body and releases the stream.
    ///
    /// Returns an empty vector if the body was already read or closed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BodyRead`] if the stream fails mid-read. The body is
    /// considered consumed either way.
    pub fn body(&mut self) -> Result<Vec<u8>> {
        let mut stream = match std::mem::replace(&mut self.body, Body::Consumed) {
            Body::Open(stream) => stream,
            released => {
                self.body = released;
                return Ok(Vec::new());
            }
        };

        let mut buf = Vec::new();
        stream.read_to_end(&mut buf)?;

        tracing::debug!(
            url = %self.request.url(),
            bytes = buf.len(),
            "Response body consumed"
        );

        Ok(buf)
    }

    /// Reads the whole body as text with surrounding whitespace trimmed.
    ///
    /// Invalid UTF-8 is replaced rather than rejected. Returns an empty string
    /// if the body was already read or closed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BodyRead`] if the stream fails mid-read.
    pub fn text(&mut self) -> Result<String> {
        let bytes = self.body()?;
        Ok(String::from_utf8_lossy(&bytes).trim().to_owned())
    }

    /// Reads the whole body and deserializes it from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeserializationFailed`] with the raw body if it is not
    /// valid JSON for `T`, including when the body was already read.
    pub fn json<T: DeserializeOwned>(&mut self) -> Result<T> {
        let bytes = self.body()?;

        serde_json::from_slice(&bytes).map_err(|e| {
            let raw_response = String::from_utf8_lossy(&bytes).into_owned();

            tracing::error!(
                error = %e,
                raw_response = %raw_response,
                "Failed to deserialize response"
            );

            Error::DeserializationFailed {
                raw_response,
                serde_error: e.to_string(),
                status: self.status,
            }
        })
    }

    /// Releases the body stream without reading it.
    ///
    /// Safe to call any number of times, before or after the body was read.
    pub fn close(&mut self) {
        if matches!(self.body, Body::Open(_)) {
            // Dropping the stream hands the connection back to the transport.
            self.body = Body::Closed;
            tracing::trace!(url = %self.request.url(), "Response body released unread");
        }
    }

    /// Returns `true` if the status code is in `200..=299`.
    pub fn is_success(&self) -> bool {
        let code = self.status_code();
        code > 199 && code < 300
    }

    /// Returns `true` if the status code is `400` or above.
    pub fn is_error(&self) -> bool {
        self.status_code() > 399
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("method", self.request.method())
            .field("url", &self.request.url().as_str())
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body", &self.body_state())
            .finish()
    }
}
