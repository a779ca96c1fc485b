use crate::credentials::{CredentialStore, SessionCredentials};
use crate::gateway::core::{Gateway, DEFAULT_TIMEOUT};
use crate::gateway::interceptor::{self, RequestInterceptor};
use crate::notify::{Notifier, TracingNotifier};
use crate::origin::{EnvironmentProbe, OriginResolver};
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating a gateway with custom configuration.
///
/// Keep this surface area small and predictable. Everything has a working
/// default: environment probing from process env, an in-memory credential
/// store, and tracing-backed notifications.
pub struct GatewayBuilder {
    probe: Option<EnvironmentProbe>,
    explicit_origin: Option<String>,
    origin_window: Option<Duration>,
    timeout: Duration,
    credentials: Arc<dyn CredentialStore>,
    notifier: Arc<dyn Notifier>,
    extra_interceptors: Vec<RequestInterceptor>,
}

impl Default for GatewayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GatewayBuilder {
    pub fn new() -> Self {
        Self {
            probe: None,
            explicit_origin: None,
            origin_window: None,
            timeout: DEFAULT_TIMEOUT,
            credentials: Arc::new(SessionCredentials::new()),
            notifier: Arc::new(TracingNotifier),
            extra_interceptors: Vec::new(),
        }
    }

    /// Use a fully specified environment probe instead of reading the
    /// process environment at build time.
    pub fn probe(mut self, probe: EnvironmentProbe) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Pin the backend origin, overriding all derivation and caching.
    ///
    /// This is primarily for testing with mock servers; deployments set
    /// `GALLERY_API_URL` instead.
    pub fn explicit_origin(mut self, origin: impl Into<String>) -> Self {
        self.explicit_origin = Some(origin.into());
        self
    }

    /// Validity window for derived origins. Defaults to 5 seconds.
    pub fn origin_cache_window(mut self, window: Duration) -> Self {
        self.origin_window = Some(window);
        self
    }

    /// Per-request abort timeout. Defaults to 10 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Inject the credential store the bearer-auth interceptor reads from.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Inject the sink for global user-visible messages.
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Append a custom request interceptor. Runs after the built-in
    /// bearer-auth and correlation-id interceptors, in insertion order.
    pub fn interceptor(mut self, interceptor: RequestInterceptor) -> Self {
        self.extra_interceptors.push(interceptor);
        self
    }

    /// Build the gateway.
    pub fn build(self) -> Gateway {
        let mut probe = self.probe.unwrap_or_else(EnvironmentProbe::from_env);
        if self.explicit_origin.is_some() {
            probe.explicit_origin = self.explicit_origin;
        }

        let resolver = match self.origin_window {
            Some(window) => OriginResolver::with_window(window),
            None => OriginResolver::new(),
        };

        let mut interceptors: Vec<RequestInterceptor> = vec![
            interceptor::bearer_auth(Arc::clone(&self.credentials)),
            interceptor::correlation_id(),
        ];
        interceptors.extend(self.extra_interceptors);

        Gateway {
            probe,
            resolver,
            credentials: self.credentials,
            notifier: self.notifier,
            timeout: self.timeout,
            interceptors,
        }
    }
}
