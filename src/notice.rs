//! Transient success/error banners.

use std::time::{Duration, Instant};

/// Lifetime of a notice unless configured otherwise.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    expires_at: Instant,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Holds at most one notice; a new one replaces the current.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    ttl: Duration,
    current: Option<Notice>,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TTL)
    }
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.post_at(NoticeKind::Success, message, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.post_at(NoticeKind::Error, message, Instant::now());
    }

    pub fn post_at(&mut self, kind: NoticeKind, message: impl Into<String>, now: Instant) {
        self.current = Some(Notice {
            kind,
            message: message.into(),
            expires_at: now + self.ttl,
        });
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<&Notice> {
        self.current.as_ref().filter(|notice| now < notice.expires_at)
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_notice_replaces_current() {
        let mut board = NoticeBoard::default();
        board.success("Order placed");
        board.error("Failed to update payment method");

        let notice = board.current().unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.message, "Failed to update payment method");
    }

    #[test]
    fn test_expiry() {
        let mut board = NoticeBoard::new(Duration::from_millis(100));
        let start = Instant::now();
        board.post_at(NoticeKind::Success, "Saved", start);

        assert!(board.current_at(start + Duration::from_millis(99)).is_some());
        assert!(board.current_at(start + Duration::from_millis(100)).is_none());
    }

    #[test]
    fn test_dismiss() {
        let mut board = NoticeBoard::default();
        board.success("Saved");
        board.dismiss();
        assert!(board.current().is_none());
    }
}
