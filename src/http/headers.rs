//! HTTP headers abstraction shared by [`HttpRequest`](crate::http::request::HttpRequest)
//! and [`HttpResponse`](crate::http::response::HttpResponse).
//!
//! Headers are stored in an ordered map so that response serialization
//! preserves insertion order. Names and values are raw strings; no HTTP
//! semantics are enforced here. Request-side case-insensitivity is achieved
//! by the parser lowercasing names before insertion, response-side names are
//! stored with their canonical casing. Duplicate names overwrite (last write
//! wins).

use indexmap::IndexMap;

pub struct HttpHeaders {
    headers: IndexMap<String, String>,
}

impl HttpHeaders {
    pub fn new() -> Self {
        Self {
            headers: IndexMap::new(),
        }
    }

    pub fn set_raw(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn stringify(&self) -> String {
        let mut result = String::new();
        for (name, value) in &self.headers {
            result.push_str(&format!("{}: {}\r\n", name, value));
        }
        result
    }
}

impl Default for HttpHeaders {
    fn default() -> Self {
        Self::new()
    }
}
