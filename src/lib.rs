//! # Rip - fluent HTTP requests on top of `reqwest`
//!
//! Rip turns a declarative request description (a `:name` path template,
//! parameters, query values, headers and an optional body) into a request
//! for a blocking `reqwest` transport, and hands back a response with a
//! well-defined body lifecycle.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rip::{Client, Value};
//! use serde::{Deserialize, Serialize};
//! use std::time::Duration;
//!
//! #[derive(Serialize)]
//! struct CreateUser {
//!     name: String,
//! }
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! fn main() -> Result<(), rip::Error> {
//!     let client = Client::builder()
//!         .base_url("https://api.example.com")?
//!         .default_header("x-api-key", "secret")?
//!         .timeout(Duration::from_secs(30))
//!         .build()?;
//!
//!     // GET /users/123?verbose=true
//!     let mut response = client
//!         .request()
//!         .set_params([("id", 123)])
//!         .set_query([("verbose", Value::from(true))])
//!         .get("/users/:id")?;
//!
//!     if response.is_success() {
//!         let user: User = response.json()?;
//!         println!("User: {}", user.name);
//!     }
//!
//!     // POST /users with a JSON body
//!     let mut created = client
//!         .request()
//!         .set_json(&CreateUser { name: "Alice".to_string() })
//!         .post("/users")?;
//!     println!("{} {}", created.status_code(), created.text()?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Building a request
//!
//! - **Path parameters** replace the first `:name` placeholder. Integers render
//!   as digits, floats with six fractional digits, strings verbatim. Anything
//!   else leaves the placeholder untouched.
//! - **Query parameters** are encoded with sorted keys; booleans render as
//!   `true` / `false`.
//! - **Headers** set on the request replace client defaults with the same
//!   name. [`Request::set_header`] accumulates values, [`Request::set_headers`]
//!   overwrites them.
//! - **Bodies** given as strings or bytes are sent unchanged; structured
//!   values are serialized to JSON. Either kind gets
//!   `Content-Type: application/json` unless a JSON content type is already set.
//!
//! ## Responses and errors
//!
//! Every status code comes back as a [`Response`]. Only failures to build or
//! send the request are an [`Error`]:
//!
//! ```no_run
//! use rip::{Client, Error};
//!
//! # fn example() -> Result<(), Error> {
//! # let client = Client::builder().base_url("https://api.example.com")?.build()?;
//! match client.request().delete("/items/1") {
//!     Ok(response) if response.is_error() => {
//!         eprintln!("HTTP error {}", response.status_code());
//!     }
//!     Ok(mut response) => println!("Deleted: {}", response.text()?),
//!     Err(e) if e.is_retryable() => eprintln!("Transport failure, try again: {}", e),
//!     Err(e) => eprintln!("Request was never sent: {}", e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The response body can be read once. After [`Response::body`],
//! [`Response::text`], [`Response::json`] or [`Response::close`], the stream
//! is released and further reads are empty.

mod body;
mod client;
mod error;
pub mod header;
pub mod path;
pub mod query;
mod request;
mod response;
mod value;

pub use body::{is_json, Payload};
pub use client::{Client, ClientBuilder, ClientConfig};
pub use error::{Error, Result};
pub use request::{Request, ResolvedRequest};
pub use response::{BodyState, Response};
pub use value::{Params, Query, Value};
