//! User-visible notification sinks.
//!
//! The gateway emits at most one notification per failed call; where that
//! notification lands (a toast component, a log line, a test buffer) is up
//! to the sink the application injects.

use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

/// One recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// Destination for global user-visible messages.
pub trait Notifier: Send + Sync {
    fn error(&self, text: &str);

    fn success(&self, text: &str) {
        let _ = text;
    }
}

/// Default sink: routes notifications through `tracing`.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, text: &str) {
        tracing::error!(target: "gallery_client::notify", "{}", text);
    }

    fn success(&self, text: &str) {
        tracing::info!(target: "gallery_client::notify", "{}", text);
    }
}

/// Sink that drops everything.
#[derive(Debug, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn error(&self, _text: &str) {}
}

/// Convenience constructor for the no-op sink.
pub fn noop_notifier() -> Arc<dyn Notifier> {
    Arc::new(NoopNotifier)
}

/// In-memory sink for testing.
#[derive(Default)]
pub struct InMemoryNotifier {
    notices: RwLock<Vec<Notice>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.read().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notices
            .read()
            .unwrap()
            .iter()
            .filter(|n| n.kind == NoticeKind::Error)
            .map(|n| n.text.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.notices.write().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.notices.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, kind: NoticeKind, text: &str) {
        self.notices.write().unwrap().push(Notice {
            kind,
            text: text.to_string(),
        });
    }
}

impl Notifier for InMemoryNotifier {
    fn error(&self, text: &str) {
        self.push(NoticeKind::Error, text);
    }

    fn success(&self, text: &str) {
        self.push(NoticeKind::Success, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_notifier_records_in_order() {
        let notifier = InMemoryNotifier::new();
        assert!(notifier.is_empty());

        notifier.error("boom");
        notifier.success("saved");

        let notices = notifier.notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].kind, NoticeKind::Error);
        assert_eq!(notices[0].text, "boom");
        assert_eq!(notices[1].kind, NoticeKind::Success);
        assert_eq!(notifier.errors(), vec!["boom".to_string()]);

        notifier.clear();
        assert!(notifier.is_empty());
    }
}
