//! Transient toast centre.
//!
//! Range and chart-type changes surface a short-lived toast. Each toast gets
//! a monotonic id; dismissal is keyed by id, so the auto-dismiss timer for an
//! old toast can never remove a newer one. The command layer schedules the
//! timed dismissal.

use crate::types::{Toast, ToastKind};

/// How long a toast stays up before auto-dismissal.
pub const TOAST_DISMISS_MS: u64 = 3000;

#[derive(Debug, Default)]
pub struct ToastCenter {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastCenter {
    pub fn new() -> Self {
        ToastCenter::default()
    }

    /// Queue a toast and return its id for the dismissal timer.
    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
        });
        id
    }

    /// Remove a toast by id. Returns false when it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn active(&self) -> Vec<Toast> {
        self.toasts.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_monotonic_ids() {
        let mut center = ToastCenter::new();
        let a = center.push("Filter updated: today", ToastKind::Info);
        let b = center.push("Chart type changed: bar", ToastKind::Info);
        assert!(b > a);
        assert_eq!(center.active().len(), 2);
    }

    #[test]
    fn test_dismiss_is_keyed_by_id() {
        let mut center = ToastCenter::new();
        let old = center.push("old", ToastKind::Info);
        assert!(center.dismiss(old));
        let newer = center.push("newer", ToastKind::Success);
        // A stale timer firing for the old id must not touch the new toast.
        assert!(!center.dismiss(old));
        assert_eq!(center.active().len(), 1);
        assert_eq!(center.active()[0].id, newer);
    }
}
