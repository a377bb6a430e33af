//! Toasts
//!
//! Non-blocking notifications. Each toast dismisses itself after the
//! configured duration; the newest few are shown.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

const MAX_VISIBLE: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let message = message.into();
        // Same message already on screen: don't stack duplicates
        self.toasts.retain(|t| !(t.kind == kind && t.message == message));
        self.toasts.push(Toast {
            id: self.next_id,
            kind,
            message,
        });
        if self.toasts.len() > MAX_VISIBLE {
            let overflow = self.toasts.len() - MAX_VISIBLE;
            self.toasts.drain(..overflow);
        }
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

/// Reactive handle, provided through context
#[derive(Clone, Copy)]
pub struct Toasts {
    queue: RwSignal<ToastQueue>,
    duration_ms: u32,
}

impl Toasts {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
            duration_ms,
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&self, kind: ToastKind, message: String) {
        let Some(id) = self.queue.try_update(|q| q.push(kind, message)) else {
            return;
        };
        let queue = self.queue;
        Timeout::new(self.duration_ms, move || {
            queue.try_update(|q| q.dismiss(id));
        })
        .forget();
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| q.dismiss(id));
    }

    pub fn visible(&self) -> Vec<Toast> {
        self.queue.with(|q| q.toasts().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut q = ToastQueue::default();
        let a = q.push(ToastKind::Error, "Couldn't save order");
        let b = q.push(ToastKind::Info, "Tag added");
        assert_eq!(q.toasts().len(), 2);
        q.dismiss(a);
        assert_eq!(q.toasts().len(), 1);
        assert_eq!(q.toasts()[0].id, b);
    }

    #[test]
    fn test_duplicates_collapse() {
        let mut q = ToastQueue::default();
        q.push(ToastKind::Error, "offline");
        let latest = q.push(ToastKind::Error, "offline");
        assert_eq!(q.toasts().len(), 1);
        assert_eq!(q.toasts()[0].id, latest);
    }

    #[test]
    fn test_oldest_dropped_past_limit() {
        let mut q = ToastQueue::default();
        for i in 0..6 {
            q.push(ToastKind::Info, format!("toast {}", i));
        }
        assert_eq!(q.toasts().len(), MAX_VISIBLE);
        assert_eq!(q.toasts()[0].message, "toast 2");
    }
}
