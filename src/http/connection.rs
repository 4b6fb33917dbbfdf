//! Per-connection state machine.
//!
//! One [`Connection`] exists per accepted socket and owns everything about
//! that request: the incremental parser, the request under construction,
//! and the serialized response once dispatched. The machine has a plain
//! `feed(bytes)` operation and no concurrency vocabulary of its own, so it
//! can be driven from a task, a thread, or a test loop alike. Exactly one
//! request is processed per connection; there is no keep-alive.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::handler;
use crate::handler::files::FileStore;
use crate::http::HttpMethod;
use crate::http::parser::{ParserLimits, ParserOk, RequestParser};
use crate::http::request::HttpRequest;
use crate::http::status::HttpStatus;

/// `Open → ParsingHeaders → (ParsingBody | Dispatched) → Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Open,
    ParsingHeaders,
    ParsingBody,
    Dispatched,
    Closed,
}

pub struct Connection {
    peer: String,
    parser: RequestParser,
    request: HttpRequest,
    store: Arc<FileStore>,
    phase: Phase,
    response: Vec<u8>,
}

impl Connection {
    pub fn new(peer: String, config: &ServerConfig, store: Arc<FileStore>) -> Self {
        let limits = ParserLimits {
            max_header_bytes: config.max_header_size,
            max_body_bytes: config.max_body_size,
        };

        Self {
            peer,
            parser: RequestParser::new(limits),
            request: HttpRequest::new(),
            store,
            phase: Phase::Open,
            response: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Advances the machine with newly arrived bytes. Once the request is
    /// complete (or violates the protocol) the response is built and the
    /// phase moves to `Dispatched`; the driver must not feed further input
    /// after that.
    pub fn feed(&mut self, chunk: &[u8]) -> Phase {
        match self.phase {
            Phase::Dispatched | Phase::Closed => return self.phase,
            _ => {}
        }

        match self.parser.feed(chunk, &mut self.request) {
            Ok(ParserOk::Complete) => self.dispatch(),
            Ok(ParserOk::Incomplete) => {
                self.phase = if self.parser.reading_body() {
                    Phase::ParsingBody
                } else {
                    Phase::ParsingHeaders
                };
            }
            Err(err) => self.dispatch_error(err.into_http_status()),
        }

        self.phase
    }

    /// The remote end closed before the request completed. Nothing has been
    /// dispatched, so the flush is empty and the connection just closes.
    pub fn remote_closed(&mut self) {
        if self.phase != Phase::Dispatched {
            tracing::warn!(peer = %self.peer, "connection closed before request completed");
        }
        self.phase = Phase::Closed;
    }

    /// The serialized response; empty until the request has been dispatched.
    pub fn response_bytes(&self) -> &[u8] {
        &self.response
    }

    pub fn finish(&mut self) {
        self.phase = Phase::Closed;
    }

    fn dispatch(&mut self) {
        let res = handler::handle_request(&self.request, &self.store);
        self.log_outcome(res.status);
        self.response = res.serialize();
        self.phase = Phase::Dispatched;
    }

    fn dispatch_error(&mut self, status: HttpStatus) {
        let res = handler::handle_error(&self.request, status);
        self.log_outcome(res.status);
        self.response = res.serialize();
        self.phase = Phase::Dispatched;
    }

    fn log_outcome(&self, status: HttpStatus) {
        let method = match self.request.method {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Unknown => "-",
        };

        if status.is_error() {
            tracing::warn!(
                peer = %self.peer,
                code = status.code(),
                reason = status.reason(),
                method,
                target = %self.request.target,
                "dispatched"
            );
        } else {
            tracing::info!(
                peer = %self.peer,
                code = status.code(),
                reason = status.reason(),
                method,
                target = %self.request.target,
                "dispatched"
            );
        }
    }
}
