use thiserror::Error;

/// Outcome classification assigned to every completed call.
///
/// Exactly one classification applies per response, and each failed
/// classification triggers exactly one global side effect at the gateway
/// boundary (forced logout or a user-visible notification) before the
/// original error is returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// HTTP 2xx; the payload is passed through untouched.
    Success,
    /// HTTP 401; the session is no longer valid. Triggers logout, never a
    /// notification (the redirect to login is self-explanatory).
    AuthExpired,
    /// Any other 4xx/5xx reply from the backend.
    ClientOrServerError,
    /// The request went out but no usable response came back.
    NetworkUnreachable,
    /// The request could not be constructed or handed to the transport.
    RequestSetupFailed,
}

/// Fixed fallback text when the backend reply carries no detail message.
pub const GENERIC_FAILURE_TEXT: &str = "请求失败，请稍后重试";
/// Fixed text for calls that never received a response.
pub const NETWORK_UNREACHABLE_TEXT: &str = "网络连接失败，请检查您的网络设置";
/// Fixed text for calls that could not be sent at all.
pub const REQUEST_SETUP_FAILED_TEXT: &str = "请求发送失败";

/// Unified error type for the gallery client.
///
/// Variant order mirrors the classification order: presence of a status is
/// checked before absence-of-response, which is checked before total setup
/// failure. A reply with a failing status must never be reported as a
/// network failure.
#[derive(Debug, Error)]
pub enum Error {
    /// The backend replied with a non-2xx status.
    #[error("remote error: HTTP {status}: {}", detail.as_deref().unwrap_or("<no detail>"))]
    Remote { status: u16, detail: Option<String> },

    /// The request was sent but no response was received (DNS failure,
    /// timeout, connection reset, body cut short).
    #[error("network transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Request construction failed before anything reached the wire.
    #[error("request setup failed: {0}")]
    Setup(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Classify this failure. Pure function of the error shape; the gateway
    /// dispatches the matching side effect exactly once per failed call.
    pub fn classification(&self) -> Classification {
        match self {
            Error::Remote { status: 401, .. } => Classification::AuthExpired,
            Error::Remote { .. } => Classification::ClientOrServerError,
            Error::Transport(_) => Classification::NetworkUnreachable,
            Error::Setup(_) | Error::Serialization(_) | Error::Io(_) => {
                Classification::RequestSetupFailed
            }
        }
    }

    /// HTTP status of the backend reply, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// User-visible notification text for this failure, or `None` when the
    /// classification emits no message (success, forced logout).
    pub(crate) fn notification_text(&self) -> Option<&str> {
        match self.classification() {
            Classification::Success | Classification::AuthExpired => None,
            Classification::ClientOrServerError => Some(match self {
                Error::Remote {
                    detail: Some(detail),
                    ..
                } => detail.as_str(),
                _ => GENERIC_FAILURE_TEXT,
            }),
            Classification::NetworkUnreachable => Some(NETWORK_UNREACHABLE_TEXT),
            Classification::RequestSetupFailed => Some(REQUEST_SETUP_FAILED_TEXT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_401_classifies_as_auth_expired() {
        let err = Error::Remote {
            status: 401,
            detail: None,
        };
        assert_eq!(err.classification(), Classification::AuthExpired);
        assert_eq!(err.notification_text(), None);
    }

    #[test]
    fn test_other_statuses_classify_as_client_or_server_error() {
        for status in [400, 403, 404, 409, 422, 500, 502, 503] {
            let err = Error::Remote {
                status,
                detail: None,
            };
            assert_eq!(
                err.classification(),
                Classification::ClientOrServerError,
                "HTTP {} should classify as client/server error",
                status
            );
        }
    }

    #[test]
    fn test_server_detail_takes_precedence_over_generic_text() {
        let err = Error::Remote {
            status: 500,
            detail: Some("X failed".to_string()),
        };
        assert_eq!(err.notification_text(), Some("X failed"));

        let err = Error::Remote {
            status: 500,
            detail: None,
        };
        assert_eq!(err.notification_text(), Some(GENERIC_FAILURE_TEXT));
    }

    #[test]
    fn test_setup_failures_classify_as_request_setup_failed() {
        let err = Error::Setup("invalid url".to_string());
        assert_eq!(err.classification(), Classification::RequestSetupFailed);
        assert_eq!(err.notification_text(), Some(REQUEST_SETUP_FAILED_TEXT));

        let err = Error::from(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        assert_eq!(err.classification(), Classification::RequestSetupFailed);
    }

    #[test]
    fn test_status_accessor() {
        let err = Error::Remote {
            status: 503,
            detail: None,
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(Error::Setup("x".into()).status(), None);
    }
}
