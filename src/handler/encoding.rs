//! Response finalization: content-encoding negotiation and framing.
//!
//! The client's `Accept-Encoding` must name exactly the one supported
//! token; a list like `gzip, deflate` does not negotiate. `Content-Length`
//! is always set last so it reflects the body as actually sent.

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::http::request::HttpRequest;
use crate::http::response::{HttpResponse, ResponseHeader};

pub const SUPPORTED_ENCODING: &str = "gzip";

pub fn finalize(req: &HttpRequest, res: &mut HttpResponse) {
    if req.header("accept-encoding") == Some(SUPPORTED_ENCODING) {
        match compress(&res.body) {
            Ok(compressed) => {
                res.body = compressed;
                res.set_header(ResponseHeader::ContentEncoding, SUPPORTED_ENCODING);
            }
            Err(err) => {
                // Fall back to the identity body rather than failing the
                // response.
                tracing::warn!(error = %err, "gzip compression failed");
            }
        }
    }

    res.set_header(ResponseHeader::ContentLength, &res.body.len().to_string());
}

fn compress(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    encoder.finish()
}
