/*!
 * Query string encoding.
 *
 * Keys and values are percent-encoded byte by byte, leaving only ASCII
 * letters and digits untouched. This is stricter than form encoding: `-`,
 * `_`, `.` and `~` are escaped too, which is what the API signs against.
 */

use std::fmt::Write;

/// Ordered key/value parameters with unique keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing an existing value in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Builder-style `insert`
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as `?k1=v1&k2=v2`, or an empty string when there is nothing to send
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();

        for (key, value) in self.iter() {
            // Blank keys are dropped
            if key.trim().is_empty() {
                continue;
            }

            out.push(if out.is_empty() { '?' } else { '&' });
            out.push_str(&escape(key));
            out.push('=');
            out.push_str(&escape(value));
        }

        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Encode optional parameters; `None` encodes to an empty string
pub fn encode_query(params: Option<&QueryParams>) -> String {
    params.map(QueryParams::to_query_string).unwrap_or_default()
}

/// Percent-encode every byte that is not an ASCII letter or digit
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());

    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() {
            out.push(byte as char);
        } else {
            let _ = write!(out, "%{:02X}", byte);
        }
    }

    out
}
