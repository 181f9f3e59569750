//! Error types for building and executing requests.
//!
//! Failures are split by where they happen: client configuration, request
//! construction, the transport, or reading the response body. An HTTP error
//! status is never an [`Error`]; it comes back as a normal [`Response`]
//! with [`Response::is_error`] set.

use crate::request::ResolvedRequest;
use crate::Response;
use http::StatusCode;

/// The main error type for this crate.
///
/// # Examples
///
/// ```no_run
/// use rip::{Client, Error};
///
/// # fn example() -> Result<(), Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")?
///     .build()?;
///
/// match client.request().get("/endpoint") {
///     Ok(mut response) if response.is_success() => println!("{}", response.text()?),
///     Ok(response) => eprintln!("HTTP error {}", response.status_code()),
///     Err(Error::Transport { source, request }) => {
///         eprintln!("{} {} never got a response: {}", request.method(), request.url(), source);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Invalid client configuration, such as a malformed base URL or a bad
    /// default header. No request was attempted.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The request was not obtained from a [`Client`](crate::Client), so there
    /// is no transport to send it with.
    #[error("Request is not bound to a client; use Client::request() to create one")]
    NoTransportBound,

    /// The request could not be built: bad method, URL, header, or a body
    /// that failed to serialize. Nothing was sent.
    #[error("Failed to build request: {0}")]
    RequestConstruction(String),

    /// The transport failed before a response arrived (connection refused,
    /// DNS failure, timeout).
    ///
    /// `request` is what was about to be sent. [`Error::into_response`] turns
    /// this into a response shell with no status.
    #[error("Transport error for {} {}: {source}", .request.method(), .request.url())]
    Transport {
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
        /// The request that failed.
        request: Box<ResolvedRequest>,
    },

    /// The response stream failed while the body was being read.
    #[error("Failed to read response body: {0}")]
    BodyRead(#[from] std::io::Error),

    /// The response body could not be deserialized into the requested type.
    ///
    /// # Fields
    ///
    /// * `raw_response` - The raw response body as a string
    /// * `serde_error` - The error message from serde
    /// * `status` - The HTTP status code of the response, `None` for a shell
    #[error(
        "Failed to deserialize response (status {}): {serde_error}",
        display_status(.status)
    )]
    DeserializationFailed {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: Option<StatusCode>,
    },
}

fn display_status(status: &Option<StatusCode>) -> String {
    match status {
        Some(status) => status.to_string(),
        None => "none".to_string(),
    }
}

impl Error {
    /// Returns `true` if repeating the same request might succeed.
    ///
    /// Transport and body-read failures are retryable; everything else
    /// needs the caller to change something first. This crate never retries
    /// on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use rip::Error;
    ///
    /// assert!(!Error::NoTransportBound.is_retryable());
    /// assert!(!Error::RequestConstruction("bad method".into()).is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport { .. } => true,
            Error::BodyRead(_) => true,
            Error::ConfigurationError(_) => false,
            Error::NoTransportBound => false,
            Error::RequestConstruction(_) => false,
            Error::DeserializationFailed { .. } => false,
        }
    }

    /// Returns `true` for timeouts reported by the transport.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Transport { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// Returns the HTTP status code if this error has one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::DeserializationFailed { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Returns the request that was being sent, for transport failures.
    pub fn request(&self) -> Option<&ResolvedRequest> {
        match self {
            Error::Transport { request, .. } => Some(request.as_ref()),
            _ => None,
        }
    }

    /// Converts a transport failure into a response shell.
    ///
    /// The shell keeps the originating request but has no status (code `0`),
    /// no headers and an empty body. Returns `None` for other errors.
    pub fn into_response(self) -> Option<Response> {
        match self {
            Error::Transport { request, .. } => Some(Response::shell(*request)),
            _ => None,
        }
    }
}

/// A specialized `Result` type for this crate.
///
/// This is a convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
