use tracing::{error, info, warn};

use crate::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// A transient notification shown after a mutating request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}

/// The browser around the views: blocking dialogs, toasts and the router.
pub trait Host {
    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
    fn toast(&self, toast: Toast);
    fn navigate(&self, route: Route);
}

/// Headless host that reports everything through the log and answers every
/// confirmation with yes.
#[derive(Default)]
pub struct LogHost;

impl Host for LogHost {
    fn alert(&self, message: &str) {
        warn!(text = message, "alert");
    }

    fn confirm(&self, message: &str) -> bool {
        info!(text = message, "confirm (auto-accepted)");
        true
    }

    fn toast(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Success => info!(text = %toast.message, "toast"),
            ToastLevel::Error => error!(text = %toast.message, "toast"),
        }
    }

    fn navigate(&self, route: Route) {
        info!(path = route.path(), "navigate");
    }
}
