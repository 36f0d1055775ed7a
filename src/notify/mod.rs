//! Transient toast notifications.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

/// How long a toast stays on screen, in milliseconds.
pub const TOAST_DURATION_MS: u64 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
    pub created_at: u64,
}

impl Toast {
    pub fn expires_at(&self) -> u64 {
        self.created_at.saturating_add(TOAST_DURATION_MS)
    }

    fn is_expired(&self, now: u64) -> bool {
        now >= self.expires_at()
    }
}

/// Visible toasts, oldest first. Each one expires on its own.
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    entries: VecDeque<Toast>,
    next_id: u64,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        kind: ToastKind,
        title: impl Into<String>,
        message: impl Into<String>,
        now: u64,
    ) -> ToastId {
        self.next_id += 1;
        let id = ToastId(self.next_id);
        self.entries.push_back(Toast {
            id,
            kind,
            title: title.into(),
            message: message.into(),
            created_at: now,
        });
        id
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>, now: u64) -> ToastId {
        self.push(ToastKind::Success, title, message, now)
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>, now: u64) -> ToastId {
        self.push(ToastKind::Error, title, message, now)
    }

    /// Remove one toast by id. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: ToastId) {
        self.entries.retain(|toast| toast.id != id);
    }

    /// Drop every toast whose duration has elapsed. Returns whether any went away.
    pub fn prune(&mut self, now: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|toast| !toast.is_expired(now));
        self.entries.len() != before
    }

    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Wall-clock milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_independently() {
        let mut toasts = Toasts::new();
        let first = toasts.success("Saved", "Changes saved", 1_000);
        let second = toasts.error("Error", "Upload failed", 3_000);

        assert!(!toasts.prune(1_000 + TOAST_DURATION_MS - 1));
        assert_eq!(toasts.len(), 2);

        assert!(toasts.prune(1_000 + TOAST_DURATION_MS));
        let ids: Vec<_> = toasts.visible().map(|t| t.id).collect();
        assert_eq!(ids, vec![second]);
        assert_ne!(first, second);

        assert!(toasts.prune(3_000 + TOAST_DURATION_MS));
        assert!(toasts.is_empty());
    }

    #[test]
    fn dismiss_removes_only_that_toast() {
        let mut toasts = Toasts::new();
        let a = toasts.success("A", "a", 0);
        let b = toasts.success("B", "b", 0);
        let c = toasts.error("C", "c", 0);

        toasts.dismiss(b);
        let ids: Vec<_> = toasts.visible().map(|t| t.id).collect();
        assert_eq!(ids, vec![a, c]);

        toasts.dismiss(b);
        assert_eq!(toasts.len(), 2);
    }

    #[test]
    fn visible_in_creation_order() {
        let mut toasts = Toasts::new();
        toasts.success("first", "", 10);
        toasts.error("second", "", 20);
        let titles: Vec<_> = toasts.visible().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
        assert_eq!(toasts.visible().next().map(|t| t.kind), Some(ToastKind::Success));
    }
}
