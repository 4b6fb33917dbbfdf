pub mod encoding;
pub mod files;
pub mod responses;
pub mod router;

use crate::handler::files::FileStore;
use crate::handler::router::RouteMatch;
use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;
use crate::http::status::HttpStatus;

/// Routes a complete request and produces the finalized response.
///
/// Dispatch only runs once the parser reports completion, which is what
/// defers the User-Agent echo until all headers are in and the `/files/`
/// write until the full body has arrived.
pub fn handle_request(req: &HttpRequest, store: &FileStore) -> HttpResponse {
    let mut res = match router::route(req.method, &req.target) {
        RouteMatch::Root => responses::empty(HttpStatus::Ok),
        RouteMatch::Echo(capture) => responses::text(&capture),
        RouteMatch::UserAgent => responses::text(req.header("user-agent").unwrap_or("")),
        RouteMatch::FilesGet(capture) => match store.read(&capture) {
            Ok(bytes) => responses::octet_stream(bytes),
            Err(err) => responses::empty(err.into_http_status()),
        },
        RouteMatch::FilesPost(capture) => match store.write(&capture, &req.body) {
            Ok(()) => responses::empty(HttpStatus::Created),
            Err(err) => responses::empty(err.into_http_status()),
        },
        RouteMatch::NotFound => responses::empty(HttpStatus::NotFound),
        RouteMatch::MethodNotAllowed => responses::empty(HttpStatus::MethodNotAllowed),
        RouteMatch::BadRequest => responses::empty(HttpStatus::BadRequest),
    };

    encoding::finalize(req, &mut res);
    res
}

/// Converts a parse-level failure into its finalized error response.
pub fn handle_error(req: &HttpRequest, status: HttpStatus) -> HttpResponse {
    let mut res = responses::empty(status);
    encoding::finalize(req, &mut res);
    res
}
