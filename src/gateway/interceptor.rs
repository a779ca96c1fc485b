//! Outbound request interceptors.
//!
//! Interceptors are an explicit, ordered list of synchronous transforms
//! applied to every pending request before it is handed to the transport.
//! They must not block or perform I/O. An interceptor that fails rejects the
//! call with its error unmodified; nothing is swallowed.

use crate::credentials::CredentialStore;
use crate::Result;
use reqwest::RequestBuilder;
use std::sync::Arc;
use uuid::Uuid;

/// Correlation header stamped on every call. The backend may ignore it, but
/// application logs can use it for linkage.
pub const REQUEST_ID_HEADER: &str = "x-gallery-request-id";

/// A synchronous transform applied to a pending request.
pub type RequestInterceptor = Box<dyn Fn(RequestBuilder) -> Result<RequestBuilder> + Send + Sync>;

/// Attach `Authorization: Bearer <token>` when a session token is present;
/// the request proceeds unchanged otherwise.
pub fn bearer_auth(credentials: Arc<dyn CredentialStore>) -> RequestInterceptor {
    Box::new(move |request| match credentials.token() {
        Some(token) => Ok(request.bearer_auth(token)),
        None => Ok(request),
    })
}

/// Stamp each call with a fresh correlation id.
pub fn correlation_id() -> RequestInterceptor {
    Box::new(|request| Ok(request.header(REQUEST_ID_HEADER, Uuid::new_v4().to_string())))
}

/// Apply the list in order, stopping at the first failure.
pub(crate) fn apply(
    interceptors: &[RequestInterceptor],
    mut request: RequestBuilder,
) -> Result<RequestBuilder> {
    for interceptor in interceptors {
        request = interceptor(request)?;
    }
    Ok(request)
}
