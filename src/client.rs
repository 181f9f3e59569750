//! HTTP client holding the base URL, default headers and transport.
//!
//! The [`Client`] type is the entry point for making requests.
//! Use [`ClientBuilder`] or [`ClientConfig`] to configure and create clients.

use crate::header::parse_header;
use crate::request::{Request, ResolvedRequest};
use crate::{Error, Response, Result};
use http::HeaderMap;
use reqwest::cookie::Jar;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// A configured HTTP client.
///
/// The client is designed to be reused across many requests and threads.
/// Cloning it is cheap; clones share the same connection pool and settings,
/// which never change after construction.
///
/// The default transport is a [`reqwest::blocking::Client`], so a `Client`
/// must not be built or dropped from inside an async runtime.
///
/// # Examples
///
/// ```no_run
/// use rip::Client;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), rip::Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")?
///     .timeout(Duration::from_secs(30))
///     .default_header("x-api-key", "secret")?
///     .build()?;
///
/// let mut response = client
///     .request()
///     .set_params([("id", 123)])
///     .get("/users/:id")?;
///
/// println!("{}: {}", response.status_code(), response.text()?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::blocking::Client,
    base_url: Url,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

/// Options accepted by [`Client::new`].
///
/// # Examples
///
/// ```no_run
/// use rip::{Client, ClientConfig};
/// use std::collections::HashMap;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), rip::Error> {
/// let client = Client::new(
///     "https://api.example.com",
///     ClientConfig {
///         default_headers: HashMap::from([("x-api-key".to_string(), "secret".to_string())]),
///         timeout: Some(Duration::from_secs(30)),
///         ..ClientConfig::default()
///     },
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ClientConfig {
    /// Headers sent with every request unless the request sets the same name.
    pub default_headers: HashMap<String, String>,
    /// Per-request timeout, covering connect through the end of the body.
    pub timeout: Option<Duration>,
    /// Cookie store for the default transport.
    pub cookie_jar: Option<Arc<Jar>>,
    /// A preconfigured transport used instead of the default one.
    pub transport: Option<reqwest::blocking::Client>,
}

impl Client {
    /// Creates a client from a base URL and a [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationError`] if the base URL or a default
    /// header is invalid, if a cookie jar is combined with a custom
    /// transport, or if the transport cannot be built.
    pub fn new(base_url: impl AsRef<str>, config: ClientConfig) -> Result<Self> {
        let base_url = parse_base_url(base_url.as_ref())?;

        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let (name, value) = parse_header(name, value, Error::ConfigurationError)?;
            default_headers.insert(name, value);
        }

        Self::from_parts(
            base_url,
            default_headers,
            config.timeout,
            config.cookie_jar,
            config.transport,
        )
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rip::Client;
    ///
    /// # fn example() -> Result<(), rip::Error> {
    /// let client = Client::builder()
    ///     .base_url("https://api.example.com")?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    fn from_parts(
        base_url: Url,
        default_headers: HeaderMap,
        timeout: Option<Duration>,
        cookie_jar: Option<Arc<Jar>>,
        transport: Option<reqwest::blocking::Client>,
    ) -> Result<Self> {
        let http_client = match (transport, cookie_jar) {
            (Some(_), Some(_)) => {
                return Err(Error::ConfigurationError(
                    "A cookie jar cannot be added to a custom transport; configure it on the transport instead"
                        .to_string(),
                ));
            }
            (Some(transport), None) => transport,
            (None, cookie_jar) => {
                let mut builder = reqwest::blocking::Client::builder();
                if let Some(jar) = cookie_jar {
                    builder = builder.cookie_provider(jar);
                }
                builder.build().map_err(|e| {
                    Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
                })?
            }
        };

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                default_headers,
                timeout,
            }),
        })
    }

    /// Starts a new request bound to this client.
    pub fn request(&self) -> Request {
        Request::bound(self.clone())
    }

    /// The base URL every request path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Headers applied to every request unless overridden.
    pub fn default_headers(&self) -> &HeaderMap {
        &self.inner.default_headers
    }

    /// The per-request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.inner.timeout
    }

    /// Sends a built request and wraps whatever comes back.
    ///
    /// Every status code produces `Ok`. The response owns the body stream;
    /// read it or let the response drop to release the connection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if no response was received.
    pub fn execute(&self, request: ResolvedRequest) -> Result<Response> {
        let start_time = Instant::now();

        tracing::debug!(
            method = %request.method(),
            url = %request.url(),
            "Executing HTTP request"
        );

        let mut builder = self
            .inner
            .http_client
            .request(request.method().clone(), request.url().clone())
            .headers(request.headers().clone());

        if let Some(timeout) = self.inner.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }

        match builder.send() {
            Ok(raw) => {
                tracing::info!(
                    method = %request.method(),
                    url = %request.url(),
                    status = raw.status().as_u16(),
                    latency_ms = start_time.elapsed().as_millis(),
                    "Received HTTP response"
                );
                Ok(Response::from_transport(request, raw))
            }
            Err(source) => {
                tracing::warn!(
                    error = %source,
                    method = %request.method(),
                    url = %request.url(),
                    timeout = source.is_timeout(),
                    "Request failed"
                );
                Err(Error::Transport {
                    source,
                    request: Box::new(request),
                })
            }
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("default_headers", &self.inner.default_headers)
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

fn parse_base_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)
        .map_err(|e| Error::ConfigurationError(format!("Invalid base URL {url:?}: {e}")))?;

    if parsed.cannot_be_a_base() {
        return Err(Error::ConfigurationError(format!(
            "Invalid base URL {url:?}: not a hierarchical URL"
        )));
    }

    Ok(parsed)
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use rip::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), rip::Error> {
/// let client = ClientBuilder::new()
///     .base_url("https://api.example.com")?
///     .timeout(Duration::from_secs(30))
///     .default_header("User-Agent", "my-app/1.0")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<Url>,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
    cookie_jar: Option<Arc<Jar>>,
    transport: Option<reqwest::blocking::Client>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            base_url: None,
            default_headers: HeaderMap::new(),
            timeout: None,
            cookie_jar: None,
            transport: None,
        }
    }

    /// Sets the base URL for all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(parse_base_url(url.as_ref())?);
        Ok(self)
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let (name, value) = parse_header(name.as_ref(), value.as_ref(), Error::ConfigurationError)?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Adds several default headers.
    ///
    /// # Errors
    ///
    /// Returns an error if any header name or value is invalid.
    pub fn default_headers<I, K, V>(mut self, headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in headers {
            self = self.default_header(name, value)?;
        }
        Ok(self)
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the cookie store used by the default transport.
    pub fn cookie_jar(mut self, jar: Arc<Jar>) -> Self {
        self.cookie_jar = Some(jar);
        self
    }

    /// Replaces the default transport with a preconfigured one.
    ///
    /// The timeout still applies; a cookie jar does not and is rejected by
    /// [`ClientBuilder::build`].
    pub fn transport(mut self, transport: reqwest::blocking::Client) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if no base URL was provided or if the client
    /// configuration is invalid.
    pub fn build(self) -> Result<Client> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::ConfigurationError("Base URL is required".to_string()))?;

        Client::from_parts(
            base_url,
            self.default_headers,
            self.timeout,
            self.cookie_jar,
            self.transport,
        )
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
