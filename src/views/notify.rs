// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Transient user-facing notifications (toasts).

use serde::Serialize;
use std::collections::VecDeque;

pub const SUCCESS_TITLE: &str = "Éxito";
pub const ERROR_TITLE: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: &'static str,
    pub description: &'static str,
    pub variant: Variant,
}

impl Notification {
    pub fn success(description: &'static str) -> Self {
        Self {
            title: SUCCESS_TITLE,
            description,
            variant: Variant::Default,
        }
    }

    pub fn error(description: &'static str) -> Self {
        Self {
            title: ERROR_TITLE,
            description,
            variant: Variant::Destructive,
        }
    }

    pub fn is_error(&self) -> bool {
        self.variant == Variant::Destructive
    }
}

/// FIFO queue drained by whatever renders the toasts.
#[derive(Debug, Default)]
pub struct Notifications {
    queue: VecDeque<Notification>,
}

impl Notifications {
    pub fn push(&mut self, notification: Notification) {
        if notification.is_error() {
            tracing::debug!(description = notification.description, "Error notification");
        }
        self.queue.push_back(notification);
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }

    pub fn last(&self) -> Option<&Notification> {
        self.queue.back()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_fifo_and_drains() {
        let mut notifications = Notifications::default();
        notifications.push(Notification::success("Rol creado exitosamente"));
        notifications.push(Notification::error("No se pudo crear el rol"));

        assert_eq!(notifications.len(), 2);
        let last = notifications.last().unwrap();
        assert_eq!(last.title, ERROR_TITLE);
        assert_eq!(last.variant, Variant::Destructive);

        let drained = notifications.drain();
        assert_eq!(drained[0].title, SUCCESS_TITLE);
        assert!(!drained[0].is_error());
        assert!(drained[1].is_error());
        assert!(notifications.is_empty());
    }
}
