//! Fluent request description and the resolved request it builds into.

use crate::body::{self, Payload};
use crate::header::{merge_headers, parse_header};
use crate::path::resolve_path;
use crate::query::encode_query;
use crate::value::{self, Params, Query, Value};
use crate::{Client, Error, Response, Result};
use http::{HeaderMap, Method};
use serde::Serialize;
use url::Url;

/// A single outgoing call, configured fluently and consumed by [`Request::execute`].
///
/// Obtain one from [`Client::request`]. A `Request` created with
/// [`Request::new`] has no client and fails with [`Error::NoTransportBound`].
///
/// Setters never fail. Invalid header names or values and bodies that cannot
/// be serialized are reported by [`Request::execute`] as
/// [`Error::RequestConstruction`]; the first such problem wins.
///
/// # Examples
///
/// ```no_run
/// use rip::{Client, Value};
///
/// # fn example() -> Result<(), rip::Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")?
///     .build()?;
///
/// let mut response = client
///     .request()
///     .set_params([("id", 42)])
///     .set_query([("expand", Value::from(true)), ("limit", Value::from(10))])
///     .set_header("Accept", "application/json")
///     .get("/items/:id")?;
///
/// println!("{} {}", response.status_code(), response.text()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Request {
    client: Option<Client>,
    params: Params,
    query: Query,
    headers: HeaderMap,
    body: Option<Payload>,
    deferred: Option<Error>,
}

impl Request {
    /// Creates a request that is not bound to any client.
    ///
    /// Executing it fails with [`Error::NoTransportBound`]; use
    /// [`Client::request`] instead.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bound(client: Client) -> Self {
        Self {
            client: Some(client),
            ..Self::default()
        }
    }

    /// Replaces the path parameters substituted into `:name` placeholders.
    pub fn set_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.params = value::collect(params);
        self
    }

    /// Replaces the query parameters.
    pub fn set_query<I, K, V>(mut self, query: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.query = value::collect(query);
        self
    }

    /// Adds a header value. Repeated calls with the same name accumulate values.
    pub fn set_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        match parse_header(name.as_ref(), value.as_ref(), Error::RequestConstruction) {
            Ok((name, value)) => {
                self.headers.append(name, value);
            }
            Err(e) => self.defer(e),
        }
        self
    }

    /// Sets several headers, replacing any values already set for each name.
    pub fn set_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in headers {
            match parse_header(name.as_ref(), value.as_ref(), Error::RequestConstruction) {
                Ok((name, value)) => {
                    self.headers.insert(name, value);
                }
                Err(e) => self.defer(e),
            }
        }
        self
    }

    /// Sets the body. Strings and bytes are sent as-is; a
    /// [`serde_json::Value`] is serialized to JSON.
    pub fn set_body(mut self, body: impl Into<Payload>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets a JSON body from any serializable value.
    pub fn set_json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        match Payload::json(body) {
            Ok(payload) => self.body = Some(payload),
            Err(e) => self.defer(e),
        }
        self
    }

    fn defer(&mut self, error: Error) {
        if self.deferred.is_none() {
            self.deferred = Some(error);
        }
    }

    /// Builds the request without sending it.
    ///
    /// # Errors
    ///
    /// * [`Error::NoTransportBound`] if the request has no client.
    /// * [`Error::RequestConstruction`] for an invalid method or URL, a bad
    ///   header, or a body that failed to serialize.
    pub fn build(self, method: &str, path_template: &str) -> Result<ResolvedRequest> {
        let client = self.client.as_ref().ok_or(Error::NoTransportBound)?;

        if let Some(error) = self.deferred {
            return Err(error);
        }

        let method = Method::from_bytes(method.as_bytes()).map_err(|e| {
            Error::RequestConstruction(format!("Invalid method {method:?}: {e}"))
        })?;

        let path = resolve_path(path_template, &self.params);
        let query = encode_query(&self.query);
        let url = build_url(client.base_url(), &path, &query)?;

        let mut headers = merge_headers(client.default_headers(), &self.headers);
        let body = body::negotiate(self.body, &mut headers)?;

        Ok(ResolvedRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Builds the request and sends it through the client's transport.
    ///
    /// A non-2xx status is not an error: check [`Response::is_success`] or
    /// [`Response::is_error`].
    ///
    /// # Errors
    ///
    /// Everything [`Request::build`] reports, plus [`Error::Transport`] when
    /// no response was received.
    pub fn execute(self, method: &str, path_template: &str) -> Result<Response> {
        let client = self.client.clone().ok_or(Error::NoTransportBound)?;
        let request = self.build(method, path_template)?;
        client.execute(request)
    }

    /// Executes a `GET` request.
    pub fn get(self, path_template: &str) -> Result<Response> {
        self.execute("GET", path_template)
    }

    /// Executes a `POST` request.
    pub fn post(self, path_template: &str) -> Result<Response> {
        self.execute("POST", path_template)
    }

    /// Executes a `PUT` request.
    pub fn put(self, path_template: &str) -> Result<Response> {
        self.execute("PUT", path_template)
    }

    /// Executes a `PATCH` request.
    pub fn patch(self, path_template: &str) -> Result<Response> {
        self.execute("PATCH", path_template)
    }

    /// Executes a `DELETE` request.
    pub fn delete(self, path_template: &str) -> Result<Response> {
        self.execute("DELETE", path_template)
    }
}

/// `base + path`, with `?query` inserted ahead of any `#fragment` in the path.
fn build_url(base: &Url, path: &str, query: &str) -> Result<Url> {
    let (path, fragment) = match path.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (path, None),
    };

    let mut url = base.as_str().trim_end_matches('/').to_owned();

    if !path.is_empty() && !path.starts_with('/') {
        url.push('/');
    }
    url.push_str(path);

    if !query.is_empty() {
        url.push(if path.contains('?') { '&' } else { '?' });
        url.push_str(query);
    }

    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }

    Url::parse(&url).map_err(|e| Error::RequestConstruction(format!("Invalid URL {url:?}: {e}")))
}

/// A fully built request, ready for the transport.
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl ResolvedRequest {
    #[cfg(test)]
    pub(crate) fn new(method: Method, url: Url, headers: HeaderMap, body: Option<Vec<u8>>) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The final URL: base, resolved path and encoded query.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The merged header set, including any negotiated `Content-Type`.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The encoded body, if any.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::CONTENT_TYPE;
    use serde_json::json;

    fn client() -> Client {
        Client::builder()
            .base_url("http://localhost:8080")
            .unwrap()
            .default_header("x-api-key", "api-key-test")
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn unbound_request_fails() {
        let err = Request::new().execute("GET", "/fails-anyways").unwrap_err();
        assert!(matches!(err, Error::NoTransportBound));
    }

    #[test]
    fn url_joins_base_path_and_query() {
        let request = client()
            .request()
            .set_params([("id", 42)])
            .set_query([("b", Value::from(2)), ("a", Value::from("x y"))])
            .build("GET", "/items/:id")
            .unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.url().as_str(), "http://localhost:8080/items/42?a=x+y&b=2");
    }

    #[test]
    fn empty_query_adds_no_question_mark() {
        let request = client().request().build("GET", "/items").unwrap();
        assert_eq!(request.url().as_str(), "http://localhost:8080/items");
        assert_eq!(request.url().query(), None);
    }

    #[test]
    fn query_goes_before_fragment() {
        let request = client()
            .request()
            .set_query([("page", Value::from(2))])
            .build("GET", "/docs#intro")
            .unwrap();

        assert_eq!(request.url().as_str(), "http://localhost:8080/docs?page=2#intro");
        assert_eq!(request.url().query(), Some("page=2"));
        assert_eq!(request.url().fragment(), Some("intro"));
    }

    #[test]
    fn query_appends_to_existing_query_before_fragment() {
        let request = client()
            .request()
            .set_query([("b", Value::from(2))])
            .build("GET", "/docs?a=1#intro")
            .unwrap();

        assert_eq!(request.url().query(), Some("a=1&b=2"));
        assert_eq!(request.url().fragment(), Some("intro"));
    }

    #[test]
    fn base_path_is_kept() {
        let client = Client::builder()
            .base_url("http://localhost:8080/api/v1/")
            .unwrap()
            .build()
            .unwrap();

        let request = client.request().build("GET", "users").unwrap();
        assert_eq!(request.url().as_str(), "http://localhost:8080/api/v1/users");
    }

    #[test]
    fn set_header_accumulates_and_set_headers_overwrites() {
        let request = client()
            .request()
            .set_header("x-trace", "1")
            .set_header("X-Trace", "2")
            .set_header("accept", "text/plain")
            .set_headers([("Accept", "application/json")])
            .build("GET", "/")
            .unwrap();

        let traces: Vec<_> = request.headers().get_all("x-trace").iter().collect();
        assert_eq!(traces, vec!["1", "2"]);

        let accepts: Vec<_> = request.headers().get_all("accept").iter().collect();
        assert_eq!(accepts, vec!["application/json"]);
    }

    #[test]
    fn request_headers_override_defaults() {
        let request = client()
            .request()
            .set_headers([("X-API-KEY", "should-overwrite-default")])
            .build("GET", "/")
            .unwrap();

        let keys: Vec<_> = request.headers().get_all("x-api-key").iter().collect();
        assert_eq!(keys, vec!["should-overwrite-default"]);
    }

    #[test]
    fn defaults_apply_when_not_overridden() {
        let request = client().request().build("GET", "/").unwrap();
        assert_eq!(request.headers()["x-api-key"], "api-key-test");
    }

    #[test]
    fn json_body_sets_content_type() {
        let request = client()
            .request()
            .set_json(&json!({"name": "a", "age": 1}))
            .build("POST", "/people")
            .unwrap();

        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        let body: serde_json::Value = serde_json::from_slice(request.body().unwrap()).unwrap();
        assert_eq!(body, json!({"name": "a", "age": 1}));
    }

    #[test]
    fn no_body_means_no_content_type() {
        let request = client().request().build("GET", "/").unwrap();
        assert!(request.body().is_none());
        assert!(request.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn invalid_method_is_a_construction_error() {
        let err = client().request().build("NOT A METHOD", "/").unwrap_err();
        assert!(matches!(err, Error::RequestConstruction(_)));
    }

    #[test]
    fn invalid_header_is_reported_at_build() {
        let err = client()
            .request()
            .set_header("bad header", "v")
            .set_header("x-ok", "v")
            .build("GET", "/")
            .unwrap_err();

        assert!(matches!(err, Error::RequestConstruction(msg) if msg.contains("bad header")));
    }

    #[test]
    fn serialization_failure_is_reported_at_build() {
        let mut map = std::collections::HashMap::new();
        map.insert(vec![1u8], 1);

        let err = client().request().set_json(&map).build("POST", "/").unwrap_err();
        assert!(matches!(err, Error::RequestConstruction(_)));
    }

    #[test]
    fn unresolved_placeholder_reaches_the_url() {
        let request = client()
            .request()
            .set_params([("id", json!({"nested": true}))])
            .build("GET", "/users/:id")
            .unwrap();

        assert_eq!(request.url().path(), "/users/:id");
    }
}
