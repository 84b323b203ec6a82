use std::fmt;
use std::time::{Duration, Instant};

/// How long a notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient, self-dismissing status message.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    shown_at: Instant,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self::at(NoticeKind::Success, text, Instant::now())
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::at(NoticeKind::Error, text, Instant::now())
    }

    pub fn at(kind: NoticeKind, text: impl Into<String>, shown_at: Instant) -> Self {
        Self {
            kind,
            text: text.into(),
            shown_at,
        }
    }

    pub fn hides_at(&self) -> Instant {
        self.shown_at + NOTICE_TTL
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        now < self.hides_at()
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&super::ClientError> for Notice {
    fn from(err: &super::ClientError) -> Self {
        Notice::error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_hides_after_five_seconds() {
        let start = Instant::now();
        let notice = Notice::at(NoticeKind::Success, "Movie added successfully!", start);
        assert!(notice.is_visible(start));
        assert!(notice.is_visible(start + Duration::from_millis(4_999)));
        assert!(!notice.is_visible(start + NOTICE_TTL));
        assert!(!notice.is_visible(start + Duration::from_secs(60)));
    }

    #[test]
    fn error_notice_uses_error_text() {
        let notice = Notice::from(&super::super::ClientError::SessionExpired);
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.to_string(), "Session expired. Please log in again.");
    }
}
