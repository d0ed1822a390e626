//! The immutable request template a batch is built from.

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Description of one outbound request, reused for every dispatch in a batch.
///
/// A descriptor is constructed once and never mutated afterwards; the runner
/// clones it into each request task. The URL is kept as a plain string and is
/// not validated here; the transport reports invalid or unreachable targets
/// when the request is actually sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,

    /// Absolute target URL (e.g., <http://localhost:3000/namespaces>).
    pub url: String,

    /// Headers sent with every dispatch of this descriptor.
    pub headers: HeaderMap,
}

impl RequestDescriptor {
    /// Create a descriptor with the given method and no headers.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
        }
    }

    /// Create a GET descriptor for `url` with no headers.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Attach a header, replacing any previous value under the same name.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}
