use crate::http::headers::HttpHeaders;
use crate::http::status::HttpStatus;

/// Response headers set through the wrapper API. `ContentLength` is always
/// set last, after any encoding decision, so the declared length matches the
/// final body bytes.
pub enum ResponseHeader {
    ContentType,
    ContentLength,
    ContentEncoding,
}

pub struct HttpResponse {
    pub status: HttpStatus,
    pub headers: HttpHeaders,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: HttpStatus) -> Self {
        Self {
            status,
            headers: HttpHeaders::new(),
            body: Vec::new(),
        }
    }

    pub fn set_header(&mut self, h: ResponseHeader, value: &str) {
        let name = match h {
            ResponseHeader::ContentType => "Content-Type",
            ResponseHeader::ContentLength => "Content-Length",
            ResponseHeader::ContentEncoding => "Content-Encoding",
        };

        self.headers.set_raw(name, value);
    }

    /// Serializes as `status-line CRLF (header CRLF)* CRLF body`, headers in
    /// insertion order.
    pub fn serialize(&self) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {} {}\r\n{}\r\n",
            self.status.code(),
            self.status.reason(),
            self.headers.stringify(),
        );

        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }
}
