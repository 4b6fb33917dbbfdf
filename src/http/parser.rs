//! Incremental HTTP/1.1 request parser.
//!
//! The parser is fed raw chunks as they arrive on the connection and must
//! tolerate the chunk boundary falling anywhere: mid-line, mid-header,
//! mid-body. Complete `\r\n`-terminated lines are consumed and classified
//! one at a time; a trailing partial line stays buffered until more bytes
//! arrive. After the blank line ending the headers, a POST switches to a
//! raw body phase that runs until the declared `Content-Length` is met.
//!
//! Parser outcomes stay separate from HTTP status codes and are mapped
//! later via [`ParserError::into_http_status`].

use crate::http::request::HttpRequest;
use crate::http::status::HttpStatus;
use crate::http::{HttpMethod, http_method_from_token};

#[derive(Debug, PartialEq, Eq)]
pub enum ParserOk {
    /// More bytes are needed before the request is complete.
    Incomplete,
    /// The request is fully reconstructed and ready for dispatch.
    Complete,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ParserError {
    /// A second request line arrived before the first request completed.
    DuplicateRequestLine,
    /// The request line and headers exceeded the configured limit.
    HeadersTooLarge,
    /// The declared or accumulated body exceeded the configured limit.
    BodyTooLarge,
}

impl ParserError {
    pub fn into_http_status(self) -> HttpStatus {
        match self {
            ParserError::DuplicateRequestLine => HttpStatus::BadRequest,
            ParserError::HeadersTooLarge => HttpStatus::BadRequest,
            ParserError::BodyTooLarge => HttpStatus::PayloadTooLarge,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParserLimits {
    pub max_header_bytes: usize,
    pub max_body_bytes: usize,
}

impl Default for ParserLimits {
    fn default() -> Self {
        Self {
            max_header_bytes: 8192,
            max_body_bytes: 1024 * 1024,
        }
    }
}

#[derive(PartialEq)]
enum ParserPhase {
    Headers,
    Body,
    Done,
}

pub struct RequestParser {
    acc: Vec<u8>,
    phase: ParserPhase,
    header_bytes: usize,
    expected_body: usize,
    limits: ParserLimits,
}

impl RequestParser {
    pub fn new(limits: ParserLimits) -> Self {
        Self {
            acc: Vec::new(),
            phase: ParserPhase::Headers,
            header_bytes: 0,
            expected_body: 0,
            limits,
        }
    }

    /// Whether the parser is past the headers and accumulating body bytes.
    pub fn reading_body(&self) -> bool {
        self.phase == ParserPhase::Body
    }

    /// Consumes one chunk of the connection's byte stream.
    pub fn feed(
        &mut self,
        chunk: &[u8],
        req: &mut HttpRequest,
    ) -> Result<ParserOk, ParserError> {
        match self.phase {
            ParserPhase::Headers => {
                self.acc.extend_from_slice(chunk);
                self.drain_lines(req)
            }
            ParserPhase::Body => {
                req.body.extend_from_slice(chunk);
                self.check_body(req)
            }
            ParserPhase::Done => Ok(ParserOk::Complete),
        }
    }

    /// Consumes every complete `\r\n`-terminated line in the accumulator.
    /// A trailing partial line is retained and not reprocessed.
    ///
    /// The header-size limit is checked against bytes consumed so far (plus
    /// any pending partial line), so enforcement does not depend on where
    /// the chunk boundaries fall.
    fn drain_lines(&mut self, req: &mut HttpRequest) -> Result<ParserOk, ParserError> {
        loop {
            if self.header_bytes > self.limits.max_header_bytes {
                return Err(ParserError::HeadersTooLarge);
            }

            let Some(end) = find_crlf(&self.acc) else {
                if self.header_bytes + self.acc.len() > self.limits.max_header_bytes {
                    return Err(ParserError::HeadersTooLarge);
                }
                return Ok(ParserOk::Incomplete);
            };

            let rest = self.acc.split_off(end + 2);
            self.acc.truncate(end);
            let line = std::mem::replace(&mut self.acc, rest);
            self.header_bytes += line.len() + 2;

            if line.is_empty() {
                return self.end_of_headers(req);
            }
            self.read_line(&line, req)?;
        }
    }

    /// Classifies one header-section line: request line, `name: value`
    /// header, or noise. Noise lines are ignored.
    fn read_line(&mut self, line: &[u8], req: &mut HttpRequest) -> Result<(), ParserError> {
        let Ok(text) = std::str::from_utf8(line) else {
            return Ok(());
        };

        if let Some((method, target)) = parse_request_line(text) {
            if req.method != HttpMethod::Unknown {
                return Err(ParserError::DuplicateRequestLine);
            }
            req.method = method;
            req.target = target.to_string();
        } else if let Some((name, value)) = parse_header_line(text) {
            req.headers.set_raw(&name.to_ascii_lowercase(), value);
        }

        Ok(())
    }

    /// Phase transition at the blank line. GET (and anything without a body)
    /// completes here; POST moves on to the body, claiming any bytes already
    /// buffered past the terminator.
    fn end_of_headers(&mut self, req: &mut HttpRequest) -> Result<ParserOk, ParserError> {
        if req.method != HttpMethod::Post {
            self.phase = ParserPhase::Done;
            return Ok(ParserOk::Complete);
        }

        self.expected_body = req.content_length();
        if self.expected_body > self.limits.max_body_bytes {
            return Err(ParserError::BodyTooLarge);
        }

        self.phase = ParserPhase::Body;
        let buffered = std::mem::take(&mut self.acc);
        req.body.extend_from_slice(&buffered);
        self.check_body(req)
    }

    /// Completion is tested before the size cap: a body that has reached
    /// its declared length keeps any excess trailing bytes and completes,
    /// even when those push the accumulated total past the limit.
    fn check_body(&mut self, req: &HttpRequest) -> Result<ParserOk, ParserError> {
        if req.body.len() >= self.expected_body {
            self.phase = ParserPhase::Done;
            return Ok(ParserOk::Complete);
        }
        if req.body.len() > self.limits.max_body_bytes {
            return Err(ParserError::BodyTooLarge);
        }
        Ok(ParserOk::Incomplete)
    }
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}

/// `METHOD SP TARGET [SP version]` with METHOD one of GET/POST. Anything
/// else is not a request line and falls through to header classification.
fn parse_request_line(text: &str) -> Option<(HttpMethod, &str)> {
    let mut tokens = text.split_whitespace();
    let method = match http_method_from_token(tokens.next()?) {
        HttpMethod::Unknown => return None,
        m => m,
    };
    let target = tokens.next()?;
    Some((method, target))
}

/// `name: value` with a non-empty, whitespace-free name. The value keeps
/// everything after the colon minus leading whitespace; it is not decoded.
fn parse_header_line(text: &str) -> Option<(&str, &str)> {
    let (name, value) = text.split_once(':')?;
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    Some((name, value.trim_start()))
}
