//! Request builder: turns an [`OutboundRequest`] into an absolute address.

use cadre::{Method, OutboundRequest};
use reqwest::Url;
use thiserror::Error;

/// Reasons a request cannot be turned into an address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// A `.` or `..` segment, which would address something other than itself.
    #[error("path segment `{0}` is not addressable")]
    DotSegment(String),

    /// An empty segment, which would leave a trailing `/` on the address.
    #[error("path segment must not be empty")]
    EmptySegment,

    /// The origin has no hierarchical path to append to.
    #[error("origin `{0}` cannot be used as a base address")]
    NotABase(Url),
}

/// Joins `origin` and the request's segments into the absolute resource address.
///
/// Unlike [`Url::join`], this never discards the last segment of the origin's
/// path: `http://host/api` and `http://host/api/` both resolve `t/prod` to
/// `http://host/api/t/prod`. Each segment is percent-encoded as a whole, so a
/// `/` inside an environment name stays inside that segment.
///
/// Empty segments and the dot segments `.` and `..` are refused: they cannot
/// name a single resource and would otherwise address the collection (`t/`) or
/// a parent of the intended one.
pub fn resolve(origin: &Url, request: &OutboundRequest) -> Result<Url, RequestError> {
    for segment in request.segments() {
        match segment.as_str() {
            "" => return Err(RequestError::EmptySegment),
            "." | ".." => return Err(RequestError::DotSegment(segment.clone())),
            _ => {}
        }
    }

    let mut url = origin.clone();
    url.path_segments_mut()
        .map_err(|()| RequestError::NotABase(origin.clone()))?
        .pop_if_empty()
        .extend(request.segments());
    Ok(url)
}

/// Maps the domain method onto the HTTP method.
pub fn http_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Put => reqwest::Method::PUT,
    }
}
