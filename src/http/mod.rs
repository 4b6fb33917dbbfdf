pub mod connection;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod status;

/// The two methods the fixed route table serves. Anything else parses as
/// `Unknown` and is answered with 400 at dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Unknown,
}

pub fn http_method_from_token(token: &str) -> HttpMethod {
    match token {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        _ => HttpMethod::Unknown,
    }
}
