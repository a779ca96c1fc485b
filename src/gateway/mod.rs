//! HTTP client gateway: the sole egress point for application data access.
//!
//! The gateway resolves the backend origin, builds a fresh transport per
//! call, runs the outbound interceptor list, and classifies every outcome at
//! a single point before control returns to the caller.

mod builder;
mod core;
mod interceptor;

pub use builder::GatewayBuilder;
pub use core::{Gateway, API_ROOT, DEFAULT_TIMEOUT};
pub use interceptor::{bearer_auth, correlation_id, RequestInterceptor, REQUEST_ID_HEADER};
