//! 动态后端地址解析：让同一份构建产物适配不同的部署拓扑。
//!
//! Dynamic backend origin resolution.
//!
//! The frontend may be deployed behind varying reverse-proxy topologies
//! (same origin on standard ports, a separate port in local dev, a separate
//! host in containerized dev). The resolver derives the backend origin from
//! the runtime environment so one artifact adapts without a rebuild, at the
//! cost of a short staleness window.

use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Origin used in development and whenever no page context is available.
pub const DEFAULT_LOCAL_ORIGIN: &str = "http://localhost:8000";

/// Well-known backend port when the frontend is served from a non-loopback
/// host without an explicit origin configured.
pub const BACKEND_PORT: u16 = 8000;

/// How long a derived origin stays valid before it is recomputed.
pub const ORIGIN_CACHE_WINDOW: Duration = Duration::from_secs(5);

const LOOPBACK_HOSTNAMES: [&str; 4] = ["localhost", "127.0.0.1", "::1", "[::1]"];

/// The address the application is currently served from, as seen by the user
/// agent. In a browser embedding this mirrors `window.location`; other
/// embedders pass it through [`EnvironmentProbe`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLocation {
    pub scheme: String,
    pub hostname: String,
    pub port: Option<u16>,
}

impl PageLocation {
    pub fn new(scheme: impl Into<String>, hostname: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            scheme: scheme.into(),
            hostname: hostname.into(),
            port,
        }
    }

    /// Parse a full page URL into its scheme/host/port parts. Returns `None`
    /// for URLs without a host (`file:`, `data:`, malformed input).
    pub fn parse(page_url: &str) -> Option<Self> {
        let url = url::Url::parse(page_url).ok()?;
        let hostname = url.host_str()?.to_string();
        Some(Self {
            scheme: url.scheme().to_string(),
            hostname,
            port: url.port(),
        })
    }

    pub fn is_loopback(&self) -> bool {
        LOOPBACK_HOSTNAMES.contains(&self.hostname.as_str())
    }
}

/// Read-only snapshot of the deployment environment consumed by the
/// resolver: an optional explicitly configured origin, the build-mode flag,
/// and the current page address if one exists.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentProbe {
    /// Explicitly configured backend origin. Always authoritative.
    pub explicit_origin: Option<String>,
    /// Development build flag.
    pub development: bool,
    /// Current page address; `None` outside a browser-like context.
    pub page: Option<PageLocation>,
}

impl EnvironmentProbe {
    /// Probe the process environment:
    ///
    /// - `GALLERY_API_URL` — explicit backend origin
    /// - `GALLERY_DEV` — development flag (`1`/`true`); defaults to the
    ///   build profile when unset
    /// - `GALLERY_PAGE_URL` — page address handed in by the embedder
    pub fn from_env() -> Self {
        let explicit_origin = env::var("GALLERY_API_URL")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());
        let development = env::var("GALLERY_DEV")
            .ok()
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(cfg!(debug_assertions));
        let page = env::var("GALLERY_PAGE_URL")
            .ok()
            .and_then(|s| PageLocation::parse(&s));
        Self {
            explicit_origin,
            development,
            page,
        }
    }
}

#[derive(Debug)]
struct CachedOrigin {
    value: String,
    computed_at: Instant,
}

/// Resolver for the backend base origin.
///
/// Derived origins live in a single slot guarded by a validity window; an
/// explicitly configured origin short-circuits before the slot is consulted
/// and therefore can never be stale. Resolution never fails.
pub struct OriginResolver {
    window: Duration,
    slot: Mutex<Option<CachedOrigin>>,
}

impl Default for OriginResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginResolver {
    pub fn new() -> Self {
        Self::with_window(ORIGIN_CACHE_WINDOW)
    }

    /// Use a custom validity window. Mostly of interest to tests and to
    /// embedders with origins that genuinely move mid-session.
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            slot: Mutex::new(None),
        }
    }

    /// Resolve the backend origin for the given environment.
    ///
    /// `force_refresh` bypasses the cached value and recomputes. The cached
    /// slot is keyed by nothing but wall-clock recency; callers that change
    /// the probe mid-window keep getting the previous answer until the
    /// window expires or they force a refresh.
    pub fn resolve(&self, probe: &EnvironmentProbe, force_refresh: bool) -> String {
        if let Some(origin) = &probe.explicit_origin {
            return origin.clone();
        }

        let mut slot = match self.slot.lock() {
            Ok(slot) => slot,
            // A poisoned slot only means a panic elsewhere; derive uncached.
            Err(_) => return Self::derive(probe),
        };

        if !force_refresh {
            if let Some(cached) = slot.as_ref() {
                if cached.computed_at.elapsed() < self.window {
                    return cached.value.clone();
                }
            }
        }

        let value = Self::derive(probe);
        *slot = Some(CachedOrigin {
            value: value.clone(),
            computed_at: Instant::now(),
        });
        value
    }

    fn derive(probe: &EnvironmentProbe) -> String {
        if probe.development {
            return DEFAULT_LOCAL_ORIGIN.to_string();
        }
        match &probe.page {
            Some(page) if page.is_loopback() => DEFAULT_LOCAL_ORIGIN.to_string(),
            Some(page) => format!("{}://{}:{}", page.scheme, page.hostname, BACKEND_PORT),
            None => DEFAULT_LOCAL_ORIGIN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn production_probe(hostname: &str) -> EnvironmentProbe {
        EnvironmentProbe {
            explicit_origin: None,
            development: false,
            page: Some(PageLocation::new("https", hostname, None)),
        }
    }

    #[test]
    fn test_explicit_origin_always_wins() {
        let resolver = OriginResolver::new();
        let mut probe = production_probe("gallery.example.com");
        probe.explicit_origin = Some("https://api.internal:9443".to_string());
        probe.development = true;

        for _ in 0..3 {
            assert_eq!(
                resolver.resolve(&probe, false),
                "https://api.internal:9443"
            );
        }
        assert_eq!(resolver.resolve(&probe, true), "https://api.internal:9443");
    }

    #[test]
    fn test_explicit_origin_bypasses_cache_slot() {
        let resolver = OriginResolver::new();
        let derived = resolver.resolve(&production_probe("gallery.example.com"), false);
        assert_eq!(derived, "https://gallery.example.com:8000");

        let mut explicit = production_probe("other.example.com");
        explicit.explicit_origin = Some("https://api.example.com".to_string());
        assert_eq!(resolver.resolve(&explicit, false), "https://api.example.com");

        // The slot is untouched by the explicit hit: still within the window,
        // the originally derived value comes back.
        assert_eq!(
            resolver.resolve(&production_probe("other.example.com"), false),
            "https://gallery.example.com:8000"
        );
    }

    #[test]
    fn test_development_mode_uses_local_default() {
        let resolver = OriginResolver::new();
        let probe = EnvironmentProbe {
            explicit_origin: None,
            development: true,
            page: Some(PageLocation::new("https", "gallery.example.com", None)),
        };
        assert_eq!(resolver.resolve(&probe, false), DEFAULT_LOCAL_ORIGIN);
    }

    #[test]
    fn test_loopback_hostname_uses_local_default() {
        for hostname in ["localhost", "127.0.0.1", "::1", "[::1]"] {
            let resolver = OriginResolver::new();
            assert_eq!(
                resolver.resolve(&production_probe(hostname), false),
                DEFAULT_LOCAL_ORIGIN,
                "hostname {} should resolve to the local default",
                hostname
            );
        }
    }

    #[test]
    fn test_production_hostname_derives_backend_port() {
        let resolver = OriginResolver::new();
        assert_eq!(
            resolver.resolve(&production_probe("gallery.example.com"), false),
            "https://gallery.example.com:8000"
        );
    }

    #[test]
    fn test_no_page_context_uses_local_default() {
        let resolver = OriginResolver::new();
        let probe = EnvironmentProbe::default();
        assert_eq!(resolver.resolve(&probe, false), DEFAULT_LOCAL_ORIGIN);
    }

    #[test]
    fn test_cached_value_survives_hostname_change_within_window() {
        let resolver = OriginResolver::new();
        let first = resolver.resolve(&production_probe("gallery.example.com"), false);
        let second = resolver.resolve(&production_probe("moved.example.com"), false);
        assert_eq!(first, second);
    }

    #[test]
    fn test_force_refresh_recomputes_immediately() {
        let resolver = OriginResolver::new();
        let first = resolver.resolve(&production_probe("gallery.example.com"), false);
        assert_eq!(first, "https://gallery.example.com:8000");

        let refreshed = resolver.resolve(&production_probe("moved.example.com"), true);
        assert_eq!(refreshed, "https://moved.example.com:8000");

        // The forced recomputation overwrote the slot.
        assert_eq!(
            resolver.resolve(&production_probe("gallery.example.com"), false),
            "https://moved.example.com:8000"
        );
    }

    #[test]
    fn test_window_expiry_recomputes() {
        let resolver = OriginResolver::with_window(Duration::from_millis(50));
        let first = resolver.resolve(&production_probe("gallery.example.com"), false);
        assert_eq!(first, "https://gallery.example.com:8000");

        thread::sleep(Duration::from_millis(60));

        assert_eq!(
            resolver.resolve(&production_probe("moved.example.com"), false),
            "https://moved.example.com:8000"
        );
    }

    #[test]
    fn test_page_location_parse() {
        let page = PageLocation::parse("https://gallery.example.com/albums/3").unwrap();
        assert_eq!(page.scheme, "https");
        assert_eq!(page.hostname, "gallery.example.com");
        assert_eq!(page.port, None);

        let page = PageLocation::parse("http://localhost:3300/").unwrap();
        assert_eq!(page.port, Some(3300));
        assert!(page.is_loopback());

        assert!(PageLocation::parse("not a url").is_none());
        assert!(PageLocation::parse("data:text/plain,hi").is_none());
    }
}
