use crate::http::HttpMethod;
use crate::http::headers::HttpHeaders;

/// A request being reconstructed from the connection's byte stream.
///
/// Filled in incrementally by the [`parser`](crate::http::parser); immutable
/// once the parser reports completion. The target is kept raw, no percent
/// decoding. Header names are lowercased on insertion, so lookups through
/// [`header`](HttpRequest::header) use lowercase names.
pub struct HttpRequest {
    pub method: HttpMethod,
    pub target: String,
    pub headers: HttpHeaders,
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn new() -> Self {
        Self {
            method: HttpMethod::Unknown,
            target: String::new(),
            headers: HttpHeaders::new(),
            body: Vec::new(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Declared body length, 0 when the header is absent or unparsable.
    pub fn content_length(&self) -> usize {
        self.header("content-length")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(0)
    }
}

impl Default for HttpRequest {
    fn default() -> Self {
        Self::new()
    }
}
