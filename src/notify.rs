//! User-facing notification surface.
//!
//! Everything the client shows besides rendered views goes through a
//! [`Notifier`]: toasts, status regions, the page-level loading indicator and
//! delayed page switches. The terminal front end prints; tests and embedders
//! use [`MemoryNotifier`].

use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::pages::Page;

/// Status region written by the onboarding submission.
pub const ONBOARDING_STATUS: &str = "onboarding-status";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

/// Sink for everything the user is told outside of page content.
pub trait Notifier: Send + Sync {
    /// Transient, non-blocking notification.
    fn toast(&self, kind: ToastKind, message: &str);

    /// Write a message into a named status region.
    fn status(&self, region: &str, kind: ToastKind, message: &str);

    /// Show or hide the page-level loading indicator.
    fn set_loading(&self, active: bool);

    /// Switch to `page` once `delay` has passed.
    fn navigate_after(&self, page: Page, delay: Duration);
}

/// Holds the loading indicator up for as long as it lives.
///
/// Acquired once, released exactly once on drop, whatever path the holder
/// leaves by.
pub struct LoadingGuard<'a> {
    notifier: &'a dyn Notifier,
}

impl<'a> LoadingGuard<'a> {
    pub fn new(notifier: &'a dyn Notifier) -> Self {
        notifier.set_loading(true);
        Self { notifier }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.notifier.set_loading(false);
    }
}

// ── Terminal ─────────────────────────────────────────────────────────

/// Prints notifications to stderr and forwards navigation requests.
pub struct TerminalNotifier {
    nav_tx: mpsc::UnboundedSender<Page>,
}

impl TerminalNotifier {
    /// Returns the notifier and the receiving end of navigation requests.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Page>) {
        let (nav_tx, nav_rx) = mpsc::unbounded_channel();
        (Self { nav_tx }, nav_rx)
    }
}

impl Notifier for TerminalNotifier {
    fn toast(&self, kind: ToastKind, message: &str) {
        eprintln!("[{}] {}", kind.label(), message);
    }

    fn status(&self, region: &str, kind: ToastKind, message: &str) {
        tracing::debug!(region, kind = kind.label(), "Status message");
        eprintln!("   {message}");
    }

    fn set_loading(&self, active: bool) {
        if active {
            eprintln!("   ...");
        }
    }

    fn navigate_after(&self, page: Page, delay: Duration) {
        let tx = self.nav_tx.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(page);
                });
            }
            Err(_) => {
                let _ = tx.send(page);
            }
        }
    }
}

// ── In-memory ────────────────────────────────────────────────────────

/// One recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierEvent {
    Toast {
        kind: ToastKind,
        message: String,
    },
    Status {
        region: String,
        kind: ToastKind,
        message: String,
    },
    Loading(bool),
    Navigate {
        page: Page,
        delay: Duration,
    },
}

/// Records every notification in order.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    events: Mutex<Vec<NotifierEvent>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: NotifierEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    pub fn events(&self) -> Vec<NotifierEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn toasts(&self) -> Vec<(ToastKind, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                NotifierEvent::Toast { kind, message } => Some((kind, message)),
                _ => None,
            })
            .collect()
    }

    /// Last message written to `region`.
    pub fn last_status(&self, region: &str) -> Option<(ToastKind, String)> {
        self.events().into_iter().rev().find_map(|e| match e {
            NotifierEvent::Status {
                region: r,
                kind,
                message,
            } if r == region => Some((kind, message)),
            _ => None,
        })
    }

    /// Whether the loading indicator is currently up.
    pub fn loading(&self) -> bool {
        self.events()
            .into_iter()
            .rev()
            .find_map(|e| match e {
                NotifierEvent::Loading(active) => Some(active),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Number of times the indicator was raised and lowered.
    pub fn loading_transitions(&self) -> (usize, usize) {
        self.events()
            .iter()
            .fold((0, 0), |(up, down), e| match e {
                NotifierEvent::Loading(true) => (up + 1, down),
                NotifierEvent::Loading(false) => (up, down + 1),
                _ => (up, down),
            })
    }

    pub fn navigations(&self) -> Vec<(Page, Duration)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                NotifierEvent::Navigate { page, delay } => Some((page, delay)),
                _ => None,
            })
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn toast(&self, kind: ToastKind, message: &str) {
        self.push(NotifierEvent::Toast {
            kind,
            message: message.to_string(),
        });
    }

    fn status(&self, region: &str, kind: ToastKind, message: &str) {
        self.push(NotifierEvent::Status {
            region: region.to_string(),
            kind,
            message: message.to_string(),
        });
    }

    fn set_loading(&self, active: bool) {
        self.push(NotifierEvent::Loading(active));
    }

    fn navigate_after(&self, page: Page, delay: Duration) {
        self.push(NotifierEvent::Navigate { page, delay });
    }
}
