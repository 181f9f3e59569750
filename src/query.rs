//! Query string encoding.

use crate::value::Value;
use std::collections::BTreeMap;
use url::form_urlencoded;

/// What to do with a query parameter that has no string form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnsupportedValues {
    /// Leave the parameter out entirely.
    #[default]
    Omit,
    /// Keep the key with an empty value (`key=`).
    KeepKey,
}

/// Encodes `query` as `application/x-www-form-urlencoded`, without a leading `?`.
///
/// Keys come out in lexicographic order. Unsupported values are omitted.
///
/// # Examples
///
/// ```
/// use rip::{query::encode_query, Query, Value};
///
/// let query: Query = [
///     ("test1".to_string(), Value::from("a")),
///     ("test2".to_string(), Value::from(1)),
///     ("test3".to_string(), Value::from(1.5)),
///     ("test4".to_string(), Value::from(true)),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(encode_query(&query), "test1=a&test2=1&test3=1.500000&test4=true");
/// ```
pub fn encode_query(query: &BTreeMap<String, Value>) -> String {
    encode_query_with(query, UnsupportedValues::Omit)
}

/// Like [`encode_query`], with an explicit policy for unsupported values.
pub fn encode_query_with(query: &BTreeMap<String, Value>, unsupported: UnsupportedValues) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    for (key, value) in query {
        match (value.to_query(), unsupported) {
            (Some(rendered), _) => {
                serializer.append_pair(key, &rendered);
            }
            (None, UnsupportedValues::KeepKey) => {
                serializer.append_pair(key, "");
            }
            (None, UnsupportedValues::Omit) => {}
        }
    }

    serializer.finish()
}
