//! Header construction and merging.

use crate::{Error, Result};
use http::{HeaderMap, HeaderName, HeaderValue};

/// Merges client defaults with request headers.
///
/// Every name present in `overrides` replaces all default values for that
/// name; names only present in `defaults` pass through. Names compare
/// case-insensitively.
///
/// # Examples
///
/// ```
/// use http::{HeaderMap, HeaderName, HeaderValue};
/// use rip::header::merge_headers;
///
/// let mut defaults = HeaderMap::new();
/// defaults.insert("x-api-key", HeaderValue::from_static("d"));
/// defaults.insert("user-agent", HeaderValue::from_static("rip"));
///
/// let mut overrides = HeaderMap::new();
/// let name = HeaderName::try_from("X-Api-Key").unwrap();
/// overrides.insert(name, HeaderValue::from_static("o"));
///
/// let merged = merge_headers(&defaults, &overrides);
/// assert_eq!(merged["x-api-key"], "o");
/// assert_eq!(merged["user-agent"], "rip");
/// ```
pub fn merge_headers(defaults: &HeaderMap, overrides: &HeaderMap) -> HeaderMap {
    let mut merged = defaults.clone();

    for name in overrides.keys() {
        merged.remove(name);
        for value in overrides.get_all(name) {
            merged.append(name.clone(), value.clone());
        }
    }

    merged
}

/// Parses a header name/value pair, wrapping failures with `wrap`.
pub(crate) fn parse_header(
    name: &str,
    value: &str,
    wrap: fn(String) -> Error,
) -> Result<(HeaderName, HeaderValue)> {
    let name = HeaderName::try_from(name)
        .map_err(|e| wrap(format!("Invalid header name {name:?}: {e}")))?;
    let value = HeaderValue::try_from(value)
        .map_err(|e| wrap(format!("Invalid header value for {name}: {e}")))?;
    Ok((name, value))
}
