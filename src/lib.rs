//! # gallery-client
//!
//! 媒体图库应用的客户端数据访问层：所有对后端 API 的调用都经由这里的网关发出。
//!
//! Client-side data-access layer for the media gallery web application. Every
//! call to the backend API (`<origin>/api/v1`) goes through a single
//! [`Gateway`] that resolves the backend origin dynamically, attaches bearer
//! authentication, and classifies every outcome exactly once.
//!
//! ## Overview
//!
//! The gateway is the sole egress point for application data access. It owns
//! three concerns:
//!
//! - **Origin resolution**: one build artifact adapts to varying deployment
//!   topologies (same-origin reverse proxy, separate port in local dev,
//!   separate host in containerized dev) without a rebuild. The resolved
//!   origin is cached for a short validity window; an explicitly configured
//!   origin always wins and is never cached.
//! - **Client construction**: a fresh transport is built per call with a
//!   fixed timeout and JSON default content type, so origin changes take
//!   effect on the next call without a restart.
//! - **Outcome classification**: every response or transport failure maps to
//!   exactly one [`Classification`] with exactly one global side effect
//!   (forced logout on 401, a user-visible notification otherwise), after
//!   which the original error is re-thrown for local handling.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gallery_client::{Gateway, SessionCredentials};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> gallery_client::Result<()> {
//!     let credentials = Arc::new(SessionCredentials::new());
//!     let gateway = Gateway::builder()
//!         .credentials(credentials)
//!         .build();
//!
//!     gateway.session().login("alice", "secret").await?;
//!     let topics = gateway.topics().list(None).await?;
//!     println!("{topics}");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`gateway`] | Client factory, interceptor pipelines, verb surface |
//! | [`origin`] | Environment probing and cached origin resolution |
//! | [`credentials`] | Credential store trait and in-memory session store |
//! | [`notify`] | User-visible notification sinks |
//! | [`services`] | Typed route groups (topics, categories, images, ...) |
//! | [`hash`] | Chunked SHA-256 file digest for upload deduplication |

pub mod credentials;
pub mod gateway;
pub mod hash;
pub mod notify;
pub mod origin;
pub mod services;

// Re-export main types for convenience
pub use credentials::{CredentialStore, SessionCredentials};
pub use gateway::{Gateway, GatewayBuilder};
pub use notify::{InMemoryNotifier, NoopNotifier, Notifier, TracingNotifier};
pub use origin::{EnvironmentProbe, OriginResolver, PageLocation};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Classification, Error};
