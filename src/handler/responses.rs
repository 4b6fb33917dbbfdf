use crate::http::response::{HttpResponse, ResponseHeader};
use crate::http::status::HttpStatus;

// Content-Length is deliberately not set here; encoding::finalize sets it
// last, after the compression decision.

pub fn empty(status: HttpStatus) -> HttpResponse {
    HttpResponse::new(status)
}

pub fn text(body: &str) -> HttpResponse {
    let mut res = HttpResponse::new(HttpStatus::Ok);
    res.set_header(ResponseHeader::ContentType, "text/plain");
    res.body = body.as_bytes().to_vec();
    res
}

pub fn octet_stream(bytes: Vec<u8>) -> HttpResponse {
    let mut res = HttpResponse::new(HttpStatus::Ok);
    res.set_header(ResponseHeader::ContentType, "application/octet-stream");
    res.body = bytes;
    res
}
