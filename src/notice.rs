use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient admin message. It travels in the visitor's own (encrypted)
/// cookie, so one browser never sees another's notices.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    expires_at: Timestamp,
}

impl Notice {
    /// Cookie payload.
    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Reads a cookie payload back, dropping it once it has expired.
    pub fn decode(raw: &str) -> Option<Notice> {
        Self::decode_at(raw, Timestamp::now())
    }

    fn decode_at(raw: &str, now: Timestamp) -> Option<Notice> {
        serde_json::from_str::<Notice>(raw).ok().filter(|n| n.expires_at > now)
    }
}

/// Issues notices stamped with the configured time to live.
pub struct NoticeBoard {
    ttl: SignedDuration,
}

impl NoticeBoard {
    pub fn new(ttl: std::time::Duration) -> Self {
        let ttl = SignedDuration::try_from(ttl).unwrap_or(SignedDuration::from_secs(3));
        Self { ttl }
    }

    pub fn success(&self, message: impl Into<String>) -> Notice {
        self.issue_at(NoticeKind::Success, message.into(), Timestamp::now())
    }

    pub fn error(&self, message: impl Into<String>) -> Notice {
        self.issue_at(NoticeKind::Error, message.into(), Timestamp::now())
    }

    fn issue_at(&self, kind: NoticeKind, message: String, now: Timestamp) -> Notice {
        let expires_at = now.checked_add(self.ttl).unwrap_or(now);
        Notice { kind, message, expires_at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_ttl() {
        let board = NoticeBoard::new(std::time::Duration::from_secs(3));
        let t0 = Timestamp::from_second(1_700_000_000).unwrap();
        let raw = board.issue_at(NoticeKind::Error, "Failed to add movie!".to_string(), t0).encode();

        let shown = Notice::decode_at(&raw, t0 + SignedDuration::from_secs(2)).unwrap();
        assert_eq!(shown.kind, NoticeKind::Error);
        assert_eq!(shown.message, "Failed to add movie!");

        assert!(Notice::decode_at(&raw, t0 + SignedDuration::from_secs(3)).is_none());
    }

    #[test]
    fn garbage_cookie_is_ignored() {
        assert!(Notice::decode("not json").is_none());
        assert!(Notice::decode("").is_none());
    }

    #[test]
    fn fresh_notice_is_readable() {
        let board = NoticeBoard::new(std::time::Duration::from_secs(3));
        let shown = Notice::decode(&board.success("Movie added successfully!").encode()).unwrap();
        assert_eq!(shown.kind, NoticeKind::Success);
        assert_eq!(shown.message, "Movie added successfully!");
    }
}
